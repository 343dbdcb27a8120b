// SPDX-License-Identifier: Apache-2.0

//! Single-pass JSON parser with an explicit build stack.
//!
//! Nesting is never represented on the call stack: every open array or object
//! is a [`Frame`] on a heap-allocated vector, so the depth of a document is
//! bounded by memory rather than by thread stack size.

use std::io::Read;

use crate::byte_stream::ByteStream;
use crate::escape_processor::{EscapeProcessor, UnicodeEscapeCollector};
use crate::number_parser::NumberParser;
use crate::value::{Array, Object};
use crate::{ParseError, Value};

/// A container that has been opened but not yet closed.
#[derive(Debug)]
enum Frame {
    Array(Array),
    Object {
        entries: Object,
        /// Key scanned for the value currently being built.
        pending_key: Option<String>,
    },
}

impl Frame {
    fn object() -> Self {
        Frame::Object {
            entries: Object::new(),
            pending_key: None,
        }
    }

    fn closing_delimiter(&self) -> u8 {
        match self {
            Frame::Array(_) => b']',
            Frame::Object { .. } => b'}',
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Frame::Array(items) => items.is_empty(),
            Frame::Object {
                entries,
                pending_key,
            } => entries.is_empty() && pending_key.is_none(),
        }
    }

    /// An object with no pending key expects a key string next.
    fn awaits_key(&self) -> bool {
        matches!(
            self,
            Frame::Object {
                pending_key: None,
                ..
            }
        )
    }

    /// Adds a completed value to this container.
    ///
    /// On a duplicate key the first occurrence is kept and the new value is
    /// dropped.
    fn insert(&mut self, value: Value) -> Result<(), ParseError> {
        match self {
            Frame::Array(items) => items.push(value),
            Frame::Object {
                entries,
                pending_key,
            } => {
                let key = pending_key.take().ok_or(ParseError::UnexpectedCharacter)?;
                entries.entry(key).or_insert(value);
            }
        }
        Ok(())
    }

    /// Turns a container into a value, failing if it still awaits a value.
    fn close(self) -> Result<Value, ParseError> {
        match self {
            Frame::Array(items) => Ok(Value::Array(items)),
            Frame::Object {
                pending_key: Some(_),
                ..
            } => Err(ParseError::UnexpectedCharacter),
            Frame::Object { entries, .. } => Ok(Value::Object(entries)),
        }
    }
}

/// A JSON parser reading from any [`Read`] source.
///
/// [`parse_value`](Self::parse_value) reads exactly one top-level value and
/// leaves whatever follows it in the stream, so it can be called repeatedly
/// to read a sequence of concatenated documents.
///
/// # Example
/// ```
/// use zenjson::Parser;
///
/// let mut parser = Parser::new(&b"1 [2] {\"three\": 3}"[..]);
/// assert_eq!(*parser.parse_value().unwrap().as_integer(), 1);
/// assert_eq!(parser.parse_value().unwrap().as_array().len(), 1);
/// assert!(parser.parse_value().unwrap().is_object());
/// assert!(parser.finish().is_ok());
/// ```
#[derive(Debug)]
pub struct Parser<R> {
    input: ByteStream<R>,
    /// The parser's entire continuation: open containers, innermost last.
    building: Vec<Frame>,
}

impl<R: Read> Parser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            input: ByteStream::new(reader),
            building: Vec::new(),
        }
    }

    /// Reads one complete JSON value.
    ///
    /// Stops right after the value's last byte (a number stops before the
    /// byte that terminated it). Nothing after the value is validated.
    pub fn parse_value(&mut self) -> Result<Value, ParseError> {
        self.building.clear();
        let result = self.parse_value_impl();
        if let Err(e) = &result {
            log::debug!(
                "parse aborted with {:?} at nesting depth {}",
                e,
                self.building.len()
            );
            self.building.clear();
        }
        result
    }

    /// Consumes trailing whitespace and fails unless the input is exhausted.
    pub fn finish(mut self) -> Result<R, ParseError> {
        match self.input.peek_non_whitespace()? {
            None => Ok(self.input.into_inner()),
            Some(_) => Err(ParseError::UnexpectedCharacter),
        }
    }

    fn parse_value_impl(&mut self) -> Result<Value, ParseError> {
        loop {
            let c0 = self.input.next_non_whitespace()?;

            if let Some(top) = self.building.last() {
                if top.awaits_key() && !matches!(c0, Some(b'"' | b'}')) {
                    return Err(ParseError::UnexpectedCharacter);
                }
            }

            let mut result = match c0 {
                Some(b'{') => {
                    log::trace!("open object at depth {}", self.building.len());
                    self.building.push(Frame::object());
                    continue;
                }
                Some(b'[') => {
                    log::trace!("open array at depth {}", self.building.len());
                    self.building.push(Frame::Array(Array::new()));
                    continue;
                }
                Some(delimiter @ (b']' | b'}')) => self.close_empty(delimiter)?,
                Some(first @ (b'-' | b'0'..=b'9')) => NumberParser::scan(&mut self.input, first)?,
                Some(b'"') => {
                    let chars = self.scan_string()?;
                    if let Some(Frame::Object { pending_key, .. }) = self.building.last_mut() {
                        if pending_key.is_none() {
                            log::trace!("object key {:?}", chars);
                            *pending_key = Some(chars);
                            if self.input.next_non_whitespace()? != Some(b':') {
                                return Err(ParseError::UnexpectedCharacter);
                            }
                            continue;
                        }
                    }
                    Value::String(chars)
                }
                Some(b'n') => {
                    self.expect_literal(b"ull")?;
                    Value::Null
                }
                Some(b't') => {
                    self.expect_literal(b"rue")?;
                    Value::Boolean(true)
                }
                Some(b'f') => {
                    self.expect_literal(b"alse")?;
                    Value::Boolean(false)
                }
                _ => return Err(ParseError::UnexpectedCharacter),
            };

            // Fold the finished value into its parent; closing delimiters
            // cascade so `]]` closes two containers in one pass.
            loop {
                let Some(top) = self.building.last_mut() else {
                    return Ok(result);
                };
                top.insert(result)?;

                match self.input.peek_non_whitespace()? {
                    Some(b',') => {
                        self.input.next()?;
                        break;
                    }
                    Some(delimiter @ (b']' | b'}')) => {
                        self.input.next()?;
                        result = self.pop_frame(delimiter)?;
                    }
                    _ => return Err(ParseError::UnexpectedCharacter),
                }
            }
        }
    }

    /// Pops the innermost container, which `delimiter` must close.
    fn pop_frame(&mut self, delimiter: u8) -> Result<Value, ParseError> {
        match self.building.pop() {
            Some(frame) if frame.closing_delimiter() == delimiter => {
                log::trace!("close {} at depth {}", delimiter as char, self.building.len());
                frame.close()
            }
            _ => Err(ParseError::UnexpectedCharacter),
        }
    }

    /// Handles `]`/`}` at a value-start position, which is only valid right
    /// after the matching opening delimiter.
    fn close_empty(&mut self, delimiter: u8) -> Result<Value, ParseError> {
        match self.building.last() {
            Some(frame) if frame.is_empty() => self.pop_frame(delimiter),
            _ => Err(ParseError::UnexpectedCharacter),
        }
    }

    fn expect_literal(&mut self, rest: &[u8]) -> Result<(), ParseError> {
        rest.iter().try_for_each(|&byte| self.input.expect(byte))
    }

    /// Scans a string literal whose opening quote was already consumed.
    fn scan_string(&mut self) -> Result<String, ParseError> {
        let mut chars = Vec::new();
        let mut unicode = UnicodeEscapeCollector::new();
        loop {
            let byte = self
                .input
                .next()?
                .ok_or(ParseError::UnexpectedCharacter)?;
            match byte {
                b'"' => break,
                b'\n' => return Err(ParseError::UnexpectedCharacter),
                b'\\' => {
                    let escape = self
                        .input
                        .next()?
                        .ok_or(ParseError::UnexpectedCharacter)?;
                    if escape == b'u' {
                        let code_unit = EscapeProcessor::unicode_code_unit(self.scan_four()?)?;
                        if let Some(ch) = unicode.push_code_unit(code_unit)? {
                            chars.extend_from_slice(ch.encode_utf8(&mut [0u8; 4]).as_bytes());
                        }
                        continue;
                    }
                    unicode.ensure_no_pending()?;
                    chars.push(EscapeProcessor::process_simple_escape(escape)?);
                }
                other => {
                    unicode.ensure_no_pending()?;
                    chars.push(other);
                }
            }
        }
        unicode.ensure_no_pending()?;
        Ok(String::from_utf8(chars)?)
    }

    fn scan_four(&mut self) -> Result<[u8; 4], ParseError> {
        let mut digits = [0u8; 4];
        for slot in &mut digits {
            *slot = self
                .input
                .next()?
                .ok_or(ParseError::UnexpectedCharacter)?;
        }
        Ok(digits)
    }
}

/// Parses one JSON value from a reader.
///
/// Reads until one complete top-level value has been consumed; content after
/// that value is neither read nor validated.
pub fn parse_json<R: Read>(reader: R) -> Result<Value, ParseError> {
    Parser::new(reader).parse_value()
}

/// Parses one JSON value from a string. See [`parse_json`].
pub fn parse_json_str(input: &str) -> Result<Value, ParseError> {
    parse_json(input.as_bytes())
}

/// Parses a string that must contain exactly one JSON value, optionally
/// surrounded by whitespace.
pub fn parse_json_exact(input: &str) -> Result<Value, ParseError> {
    let mut parser = Parser::new(input.as_bytes());
    let value = parser.parse_value()?;
    parser.finish()?;
    Ok(value)
}
