// SPDX-License-Identifier: Apache-2.0

//! JSON text backend for the [`Encoder`] interface.

use std::io::{self, Write};

use crate::encoder::{Encode, Encoder};
use crate::escape_processor::JsonStr;
use crate::printer::Fractional;

/// Layout options for [`JsonEncoder`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Written once per nesting level before each field or element. Empty
    /// selects compact output.
    pub indentation: String,
}

impl EncodeOptions {
    /// Two spaces per level.
    pub fn pretty() -> Self {
        Self {
            indentation: "  ".to_owned(),
        }
    }
}

/// Writes encoded data as JSON text to an [`io::Write`].
///
/// Structs become objects, sequences become arrays and nil becomes `null`.
/// Struct tags are not written.
#[derive(Debug)]
pub struct JsonEncoder<W> {
    out: W,
    indentation: String,
    /// One entry per open container: `true` until its first child is written.
    levels: Vec<bool>,
}

impl<W: io::Write> JsonEncoder<W> {
    pub fn new(out: W, options: EncodeOptions) -> Self {
        Self {
            out,
            indentation: options.indentation,
            levels: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn newline(&mut self) -> io::Result<()> {
        if !self.indentation.is_empty() {
            self.out.write_all(b"\n")?;
            for _ in 0..self.levels.len() {
                self.out.write_all(self.indentation.as_bytes())?;
            }
        }
        Ok(())
    }

    /// Starts a new child of the innermost container.
    fn separate(&mut self) -> io::Result<()> {
        if let Some(first) = self.levels.last_mut() {
            if !*first {
                self.out.write_all(b",")?;
            }
            *first = false;
        }
        self.newline()
    }

    fn open(&mut self, delimiter: &[u8]) -> io::Result<()> {
        self.out.write_all(delimiter)?;
        self.levels.push(true);
        Ok(())
    }

    fn close(&mut self, delimiter: &[u8]) -> io::Result<()> {
        // An empty container stays on one line
        if self.levels.pop() == Some(false) {
            self.newline()?;
        }
        self.out.write_all(delimiter)
    }
}

impl<W: io::Write> Encoder for JsonEncoder<W> {
    type Error = io::Error;

    fn encode_bool(&mut self, value: bool) -> io::Result<()> {
        self.out
            .write_all(if value { b"true".as_slice() } else { b"false" })
    }

    fn encode_char(&mut self, value: char) -> io::Result<()> {
        write!(self.out, "{}", JsonStr(value.encode_utf8(&mut [0u8; 4])))
    }

    fn encode_i64(&mut self, value: i64) -> io::Result<()> {
        write!(self.out, "{value}")
    }

    fn encode_u64(&mut self, value: u64) -> io::Result<()> {
        write!(self.out, "{value}")
    }

    fn encode_f32(&mut self, value: f32) -> io::Result<()> {
        write!(self.out, "{}", Fractional(value))
    }

    fn encode_f64(&mut self, value: f64) -> io::Result<()> {
        write!(self.out, "{}", Fractional(value))
    }

    fn encode_str(&mut self, value: &str) -> io::Result<()> {
        write!(self.out, "{}", JsonStr(value))
    }

    fn encode_nil(&mut self) -> io::Result<()> {
        self.out.write_all(b"null")
    }

    fn start_struct(&mut self, _tag: &str) -> io::Result<()> {
        self.open(b"{")
    }

    fn start_field(&mut self, name: &str) -> io::Result<()> {
        self.separate()?;
        self.encode_str(name)?;
        self.out.write_all(if self.indentation.is_empty() {
            b":".as_slice()
        } else {
            b": "
        })
    }

    fn end_struct(&mut self) -> io::Result<()> {
        self.close(b"}")
    }

    fn start_sequence(&mut self) -> io::Result<()> {
        self.open(b"[")
    }

    fn start_element(&mut self) -> io::Result<()> {
        self.separate()
    }

    fn end_sequence(&mut self) -> io::Result<()> {
        self.close(b"]")
    }
}

/// Encodes `value` to `writer` as JSON text.
pub fn encode_json_to<T, W>(value: &T, writer: W, options: EncodeOptions) -> io::Result<W>
where
    T: Encode + ?Sized,
    W: io::Write,
{
    let mut encoder = JsonEncoder::new(writer, options);
    value.encode(&mut encoder)?;
    Ok(encoder.into_inner())
}

fn encode_to_string<T: Encode + ?Sized>(value: &T, options: EncodeOptions) -> String {
    let bytes = encode_json_to(value, Vec::new(), options)
        .expect("JsonEncoder only fails when its writer does, and Vec<u8> never does");
    // Every fragment written is valid UTF-8, so this never replaces anything
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Encodes `value` as compact JSON text.
pub fn encode_json<T: Encode + ?Sized>(value: &T) -> String {
    encode_to_string(value, EncodeOptions::default())
}

/// Encodes `value` as JSON text indented by two spaces per level.
pub fn encode_json_pretty<T: Encode + ?Sized>(value: &T) -> String {
    encode_to_string(value, EncodeOptions::pretty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_json_str, Value};
    use test_log::test;

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

    fn points() -> Vec<Point> {
        vec![
            Point { x: 1.0, y: 2.0 },
            Point { x: 3.0, y: 4.0 },
            Point { x: 5.0, y: 6.0 },
        ]
    }

    #[test]
    fn points_compact() {
        assert_eq!(
            encode_json(&points()),
            r#"[{"x":1.0,"y":2.0},{"x":3.0,"y":4.0},{"x":5.0,"y":6.0}]"#
        );
    }

    #[test]
    fn points_pretty() {
        assert_eq!(
            encode_json_pretty(&points()),
            "[\n  {\n    \"x\": 1.0,\n    \"y\": 2.0\n  },\n  {\n    \"x\": 3.0,\n    \"y\": 4.0\n  },\n  {\n    \"x\": 5.0,\n    \"y\": 6.0\n  }\n]"
        );
    }

    #[test]
    fn empty_containers_stay_on_one_line() {
        let empty: Vec<i32> = Vec::new();
        assert_eq!(encode_json_pretty(&empty), "[]");
        assert_eq!(encode_json_pretty(&vec![empty.clone()]), "[\n  []\n]");
        assert_eq!(encode_json_pretty(&Value::object()), "{}");
    }

    #[test]
    fn scalars() {
        assert_eq!(encode_json(&true), "true");
        assert_eq!(encode_json(&-12i32), "-12");
        assert_eq!(encode_json(&u64::MAX), "18446744073709551615");
        assert_eq!(encode_json(&0.25f64), "0.25");
        assert_eq!(encode_json(&f64::NAN), "null");
        assert_eq!(encode_json(&'"'), r#""\"""#);
        assert_eq!(encode_json("tab\there"), r#""tab\there""#);
        assert_eq!(encode_json(&None::<bool>), "null");
        assert_eq!(encode_json(&Some("x")), r#""x""#);
        assert_eq!(encode_json(&("a", 1u8)), r#"["a",1]"#);
    }

    #[test]
    fn custom_indentation() {
        let options = EncodeOptions {
            indentation: "\t".to_owned(),
        };
        let out = encode_json_to(&[1, 2], Vec::new(), options).unwrap();
        assert_eq!(out, b"[\n\t1,\n\t2\n]");
    }

    #[test]
    fn matches_value_printer() {
        let value = parse_json_str(
            r#"{"a": [1, 2.5, "three", null, true], "b": {"c": {}, "d": []}, "e": "A/"}"#,
        )
        .unwrap();
        assert_eq!(encode_json(&value), value.to_string());
        assert_eq!(encode_json_pretty(&value), value.pretty("  ").to_string());
    }

    #[test]
    fn string_output_matches_writer_output() {
        let data = vec![("héllo ☃", -1i64), ("\u{1}\n", i64::MIN)];
        let bytes = encode_json_to(&data, Vec::new(), EncodeOptions::default()).unwrap();
        assert_eq!(encode_json(&data).into_bytes(), bytes);
    }

    #[derive(Debug)]
    struct FailingWriter;

    impl io::Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_errors_are_returned() {
        let err = encode_json_to(&points(), FailingWriter, EncodeOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }
}
