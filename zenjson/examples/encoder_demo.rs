// Example demonstrating the Encode trait on user-defined types

use zenjson::{encode_json, encode_json_pretty, encode_json_to, Encode, EncodeOptions, Encoder};

struct Point {
    x: f32,
    y: f32,
}

impl Encode for Point {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
        let mut s = encoder.encode_struct("Point")?;
        s.field("x", &self.x)?;
        s.field("y", &self.y)?;
        s.finish()
    }
}

struct Route {
    name: &'static str,
    stops: Vec<Point>,
    note: Option<String>,
}

impl Encode for Route {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
        let mut s = encoder.encode_struct("Route")?;
        s.field("name", self.name)?;
        s.field("stops", &self.stops)?;
        s.field("note", &self.note)?;
        s.finish()
    }
}

fn main() -> std::io::Result<()> {
    let route = Route {
        name: "loop",
        stops: vec![Point { x: 0.0, y: 0.0 }, Point { x: 1.5, y: 2.0 }],
        note: None,
    };

    println!("compact: {}", encode_json(&route));
    println!("pretty:\n{}", encode_json_pretty(&route));

    // Straight to stdout with a tab per level
    let stdout = std::io::stdout().lock();
    let mut stdout = encode_json_to(
        &route.stops,
        stdout,
        EncodeOptions {
            indentation: "\t".to_owned(),
        },
    )?;
    std::io::Write::write_all(&mut stdout, b"\n")?;
    Ok(())
}
