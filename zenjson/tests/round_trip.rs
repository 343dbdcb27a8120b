// SPDX-License-Identifier: Apache-2.0

// print(parse(text)) is stable on printer output

use zenjson::{parse_json, parse_json_str, to_string, to_string_pretty, ChunkReader, Value};

const DOCUMENTS: &[&str] = &[
    r#"{}"#,
    r#"[]"#,
    r#""""#,
    r#"0"#,
    r#"9223372036854775807"#,
    r#"-9223372036854775808"#,
    r#"[null,true,false,"",0,-1,-0.5,-3.0]"#,
    r#"{"lat":-33.5,"lon":151.25,"alt":-12}"#,
    r#"{"a":{"b":{"c":{"d":[]}}}}"#,
    r#"{"escapes":"\"\\\b\f\n\r\t","solidus":"/","unicode":"héllo wörld ☃"}"#,
    r#"[{"id":1,"tags":[]},{"id":2,"tags":["x"]},{"id":3,"tags":["x","y"]}]"#,
];

#[test_log::test]
fn test_compact_output_is_a_fixed_point() {
    for doc in DOCUMENTS.iter().copied() {
        let value = parse_json_str(doc).unwrap();
        let printed = to_string(&value);
        assert_eq!(printed, doc);
        assert_eq!(parse_json_str(&printed).unwrap(), value, "{doc}");
    }
}

#[test]
fn test_pretty_output_parses_back() {
    for doc in DOCUMENTS.iter().copied() {
        let value = parse_json_str(doc).unwrap();
        for indent in ["  ", "    ", "\t"] {
            let pretty = to_string_pretty(&value, indent);
            assert_eq!(parse_json_str(&pretty).unwrap(), value, "{pretty}");
            assert_eq!(to_string_pretty(&value, indent), pretty);
        }
    }
}

#[test]
fn test_negative_numbers_survive_printing() {
    let value = Value::from(vec![
        Value::from(i64::MIN),
        Value::from(-1),
        Value::from(-2.5),
        Value::from(-1e20),
    ]);
    let printed = to_string(&value);
    assert_eq!(
        printed,
        "[-9223372036854775808,-1,-2.5,-100000000000000000000.0]"
    );
    assert_eq!(parse_json_str(&printed).unwrap(), value);
    assert_eq!(to_string(&parse_json_str(&printed).unwrap()), printed);
}

#[test]
fn test_negative_zero_prints_unsigned() {
    assert_eq!(to_string(&parse_json_str("-0").unwrap()), "0");
}

#[test]
fn test_chunked_reads_give_the_same_tree() {
    for doc in DOCUMENTS.iter().copied() {
        let reference = parse_json_str(doc).unwrap();
        for chunk_size in [1, 3, 5] {
            let value = parse_json(ChunkReader::new(doc.as_bytes(), chunk_size)).unwrap();
            assert_eq!(value, reference, "{doc} in chunks of {chunk_size}");
        }
    }
}

#[test]
fn test_first_duplicate_key_survives_printing() {
    let value = parse_json_str(r#"{"k":"first","other":0,"k":"second"}"#).unwrap();
    assert_eq!(to_string(&value), r#"{"k":"first","other":0}"#);
}

#[test]
fn test_fractional_prints_with_decimal_point() {
    let value: Value = parse_json_str("[1.0, 2.5, 4.0e2]").unwrap();
    assert_eq!(to_string(&value), "[1.0,2.5,16.0]");
    assert_eq!(parse_json_str(&to_string(&value)).unwrap(), value);
}
