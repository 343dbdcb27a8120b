// SPDX-License-Identifier: Apache-2.0

//! A small JSON library built around a dynamically-typed [`Value`] tree.
//!
//! Parsing is a single pass over any [`std::io::Read`] with one byte of
//! lookahead. Nesting lives on an explicit heap stack, so document depth is
//! limited by memory, not by the call stack.
//!
//! ```
//! use zenjson::{parse_json_str, to_string};
//!
//! let value = parse_json_str(r#" {"foo": 1, "bar": [true, null]} "#).unwrap();
//! assert_eq!(*value.as_object()["foo"].as_integer(), 1);
//! assert_eq!(to_string(&value), r#"{"foo":1,"bar":[true,null]}"#);
//! ```
//!
//! Arbitrary data can be written as JSON through the [`Encode`] and
//! [`Encoder`] traits; see [`encode_json`].

// Compile-time configuration validation
mod config_check;

mod value;
pub use value::{Array, Object, Value, ValueType};

mod parse_error;
pub use parse_error::ParseError;

mod byte_stream;
pub use byte_stream::ByteStream;

mod chunk_reader;
pub use chunk_reader::ChunkReader;

mod escape_processor;

mod number_parser;

mod parser;
pub use parser::{parse_json, parse_json_exact, parse_json_str, Parser};

mod printer;
pub use printer::{print, print_pretty, to_string, to_string_pretty, Pretty};

mod encoder;
pub use encoder::{Encode, Encoder, SequenceEncoder, StructEncoder};

mod json_encoder;
pub use json_encoder::{encode_json, encode_json_pretty, encode_json_to, EncodeOptions, JsonEncoder};
