// Example demonstrating Parser over a ChunkReader, reading several
// concatenated documents and pretty-printing each one

use zenjson::{ChunkReader, ParseError, Parser};

fn main() -> Result<(), ParseError> {
    println!("🚀 Parser Demo with ChunkReader");
    println!("===============================");

    // Three documents back to back, including escape sequences
    let json = br#"{"name": "hello\nworld", "items": [1, 2.5, true, null], "count": 42}
[{"id": 1}, {"id": 2}]
"done""#;

    println!("📏 Total size: {} bytes", json.len());
    println!();

    // Read 8 bytes at a time (simulates small network packets)
    let reader = ChunkReader::new(json, 8);
    let mut parser = Parser::new(reader);

    for n in 1..=3 {
        let value = parser.parse_value()?;
        println!("📄 Document {n} ({}):", value.value_type());
        println!("{}", value.pretty("  "));
        println!("   compact: {value}");
        println!();
    }

    parser.finish()?;
    println!("✅ Input fully consumed");
    Ok(())
}
