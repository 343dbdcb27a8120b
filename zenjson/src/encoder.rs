// SPDX-License-Identifier: Apache-2.0

//! A format-agnostic encoding interface.
//!
//! Data describes itself through [`Encode`] as a depth-first walk of scalar
//! callbacks, with begin/end calls bracketing optionals, structs and
//! sequences. An [`Encoder`] turns that walk into some output format; the
//! JSON backend is [`JsonEncoder`](crate::JsonEncoder).
//!
//! ```
//! use zenjson::{encode_json, Encode, Encoder};
//!
//! struct Point {
//!     x: f32,
//!     y: f32,
//! }
//!
//! impl Encode for Point {
//!     fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
//!         let mut s = encoder.encode_struct("Point")?;
//!         s.field("x", &self.x)?;
//!         s.field("y", &self.y)?;
//!         s.finish()
//!     }
//! }
//!
//! assert_eq!(encode_json(&Point { x: 1.0, y: 2.5 }), r#"{"x":1.0,"y":2.5}"#);
//! ```

use crate::Value;

/// Receives the depth-first walk produced by [`Encode`].
///
/// Callbacks arrive properly nested: every `start_*` is matched by the
/// corresponding `end_*` once the contents have been encoded. The bracketing
/// callbacks that carry no information for many formats default to no-ops.
pub trait Encoder {
    type Error;

    fn encode_bool(&mut self, value: bool) -> Result<(), Self::Error>;
    fn encode_char(&mut self, value: char) -> Result<(), Self::Error>;
    fn encode_i64(&mut self, value: i64) -> Result<(), Self::Error>;
    fn encode_u64(&mut self, value: u64) -> Result<(), Self::Error>;
    fn encode_f32(&mut self, value: f32) -> Result<(), Self::Error>;
    fn encode_f64(&mut self, value: f64) -> Result<(), Self::Error>;
    fn encode_str(&mut self, value: &str) -> Result<(), Self::Error>;

    fn start_optional(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    /// The absent case of an optional.
    fn encode_nil(&mut self) -> Result<(), Self::Error>;
    fn end_optional(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Opens a struct. `tag` names the type being encoded.
    fn start_struct(&mut self, tag: &str) -> Result<(), Self::Error>;
    fn start_field(&mut self, name: &str) -> Result<(), Self::Error>;
    fn end_field(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn end_struct(&mut self) -> Result<(), Self::Error>;

    fn start_sequence(&mut self) -> Result<(), Self::Error>;
    /// Announces the number of elements, right after `start_sequence`.
    fn encode_size(&mut self, _size: usize) -> Result<(), Self::Error> {
        Ok(())
    }
    fn start_element(&mut self) -> Result<(), Self::Error>;
    fn end_element(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn end_sequence(&mut self) -> Result<(), Self::Error>;

    /// Opens a struct and returns a helper that brackets each field.
    fn encode_struct(&mut self, tag: &str) -> Result<StructEncoder<'_, Self>, Self::Error>
    where
        Self: Sized,
    {
        self.start_struct(tag)?;
        Ok(StructEncoder { encoder: self })
    }

    /// Opens a sequence of `size` elements and returns a helper that brackets
    /// each element.
    fn encode_sequence(&mut self, size: usize) -> Result<SequenceEncoder<'_, Self>, Self::Error>
    where
        Self: Sized,
    {
        self.start_sequence()?;
        self.encode_size(size)?;
        Ok(SequenceEncoder { encoder: self })
    }
}

/// Writes the fields of one struct. Close it with [`finish`](Self::finish).
#[must_use = "the struct is left open until `finish` is called"]
pub struct StructEncoder<'a, E: Encoder> {
    encoder: &'a mut E,
}

impl<E: Encoder> StructEncoder<'_, E> {
    pub fn field<T: Encode + ?Sized>(&mut self, name: &str, value: &T) -> Result<(), E::Error> {
        self.encoder.start_field(name)?;
        value.encode(&mut *self.encoder)?;
        self.encoder.end_field()
    }

    pub fn finish(self) -> Result<(), E::Error> {
        self.encoder.end_struct()
    }
}

/// Writes the elements of one sequence. Close it with
/// [`finish`](Self::finish).
#[must_use = "the sequence is left open until `finish` is called"]
pub struct SequenceEncoder<'a, E: Encoder> {
    encoder: &'a mut E,
}

impl<E: Encoder> SequenceEncoder<'_, E> {
    pub fn element<T: Encode + ?Sized>(&mut self, value: &T) -> Result<(), E::Error> {
        self.encoder.start_element()?;
        value.encode(&mut *self.encoder)?;
        self.encoder.end_element()
    }

    pub fn finish(self) -> Result<(), E::Error> {
        self.encoder.end_sequence()
    }
}

/// Data that can describe itself to an [`Encoder`].
pub trait Encode {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error>;
}

macro_rules! encode_via {
    ($method:ident as $wide:ty: $($t:ty),*) => {
        $(
            impl Encode for $t {
                fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
                    encoder.$method(*self as $wide)
                }
            }
        )*
    };
}

encode_via!(encode_i64 as i64: i8, i16, i32, i64, isize);
encode_via!(encode_u64 as u64: u8, u16, u32, u64, usize);

impl Encode for bool {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
        encoder.encode_bool(*self)
    }
}

impl Encode for char {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
        encoder.encode_char(*self)
    }
}

impl Encode for f32 {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
        encoder.encode_f32(*self)
    }
}

impl Encode for f64 {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
        encoder.encode_f64(*self)
    }
}

impl Encode for str {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
        encoder.encode_str(self)
    }
}

impl Encode for String {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
        encoder.encode_str(self)
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
        encoder.start_optional()?;
        match self {
            Some(value) => value.encode(encoder)?,
            None => encoder.encode_nil()?,
        }
        encoder.end_optional()
    }
}

impl<T: Encode> Encode for [T] {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
        let mut seq = encoder.encode_sequence(self.len())?;
        for item in self {
            seq.element(item)?;
        }
        seq.finish()
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
        self.as_slice().encode(encoder)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
        self.as_slice().encode(encoder)
    }
}

/// A pair is a two-element sequence.
impl<A: Encode, B: Encode> Encode for (A, B) {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
        let mut seq = encoder.encode_sequence(2)?;
        seq.element(&self.0)?;
        seq.element(&self.1)?;
        seq.finish()
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
        (**self).encode(encoder)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
        (**self).encode(encoder)
    }
}

/// Objects are encoded as structs tagged `object`, one field per entry.
impl Encode for Value {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), E::Error> {
        match self {
            Value::Null => encoder.encode_nil(),
            Value::Boolean(b) => encoder.encode_bool(*b),
            Value::Integer(i) => encoder.encode_i64(*i),
            Value::Fractional(x) => encoder.encode_f64(*x),
            Value::String(s) => encoder.encode_str(s),
            Value::Array(items) => items.encode(encoder),
            Value::Object(entries) => {
                let mut s = encoder.encode_struct("object")?;
                for (key, value) in entries {
                    s.field(key, value)?;
                }
                s.finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use test_log::test;

    /// Records the callback sequence as short tokens.
    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Recorder {
        fn push(&mut self, token: impl Into<String>) -> Result<(), Infallible> {
            self.0.push(token.into());
            Ok(())
        }
    }

    impl Encoder for Recorder {
        type Error = Infallible;

        fn encode_bool(&mut self, value: bool) -> Result<(), Infallible> {
            self.push(format!("bool:{value}"))
        }
        fn encode_char(&mut self, value: char) -> Result<(), Infallible> {
            self.push(format!("char:{value}"))
        }
        fn encode_i64(&mut self, value: i64) -> Result<(), Infallible> {
            self.push(format!("i64:{value}"))
        }
        fn encode_u64(&mut self, value: u64) -> Result<(), Infallible> {
            self.push(format!("u64:{value}"))
        }
        fn encode_f32(&mut self, value: f32) -> Result<(), Infallible> {
            self.push(format!("f32:{value}"))
        }
        fn encode_f64(&mut self, value: f64) -> Result<(), Infallible> {
            self.push(format!("f64:{value}"))
        }
        fn encode_str(&mut self, value: &str) -> Result<(), Infallible> {
            self.push(format!("str:{value}"))
        }
        fn start_optional(&mut self) -> Result<(), Infallible> {
            self.push("opt(")
        }
        fn encode_nil(&mut self) -> Result<(), Infallible> {
            self.push("nil")
        }
        fn end_optional(&mut self) -> Result<(), Infallible> {
            self.push(")opt")
        }
        fn start_struct(&mut self, tag: &str) -> Result<(), Infallible> {
            self.push(format!("struct {tag}("))
        }
        fn start_field(&mut self, name: &str) -> Result<(), Infallible> {
            self.push(format!("field {name}"))
        }
        fn end_struct(&mut self) -> Result<(), Infallible> {
            self.push(")struct")
        }
        fn start_sequence(&mut self) -> Result<(), Infallible> {
            self.push("seq(")
        }
        fn encode_size(&mut self, size: usize) -> Result<(), Infallible> {
            self.push(format!("size:{size}"))
        }
        fn start_element(&mut self) -> Result<(), Infallible> {
            self.push("elem")
        }
        fn end_sequence(&mut self) -> Result<(), Infallible> {
            self.push(")seq")
        }
    }

    fn record<T: Encode + ?Sized>(value: &T) -> Vec<String> {
        let mut recorder = Recorder::default();
        value.encode(&mut recorder).unwrap();
        recorder.0
    }

    #[test]
    fn integers_widen() {
        assert_eq!(record(&-3i8), ["i64:-3"]);
        assert_eq!(record(&7u16), ["u64:7"]);
        assert_eq!(record(&u64::MAX), [format!("u64:{}", u64::MAX)]);
    }

    #[test]
    fn none_encodes_nil() {
        assert_eq!(record(&None::<i32>), ["opt(", "nil", ")opt"]);
        assert_eq!(record(&Some(5i32)), ["opt(", "i64:5", ")opt"]);
    }

    #[test]
    fn sequences_announce_size() {
        assert_eq!(
            record(&vec!['a', 'b']),
            ["seq(", "size:2", "elem", "char:a", "elem", "char:b", ")seq"]
        );
        assert_eq!(record(&[0u8; 0]), ["seq(", "size:0", ")seq"]);
    }

    #[test]
    fn pairs_are_two_element_sequences() {
        assert_eq!(
            record(&("k", true)),
            ["seq(", "size:2", "elem", "str:k", "elem", "bool:true", ")seq"]
        );
    }

    #[test]
    fn boxes_and_references_are_transparent() {
        let boxed: Box<str> = "x".into();
        assert_eq!(record(&boxed), ["str:x"]);
        assert_eq!(record(&&1.5f64), ["f64:1.5"]);
    }

    #[test]
    fn value_objects_become_structs() {
        let value: Value = [("a", Value::from(1)), ("b", Value::Null)]
            .into_iter()
            .collect();
        assert_eq!(
            record(&value),
            ["struct object(", "field a", "i64:1", "field b", "nil", ")struct"]
        );
    }
}
