// SPDX-License-Identifier: Apache-2.0

use core::fmt;

use crate::parse_error::ParseError;

/// Radix of the four digits following `\u`.
#[cfg(feature = "hex-unicode-escapes")]
pub(crate) const UNICODE_ESCAPE_RADIX: u32 = 16;
#[cfg(feature = "decimal-unicode-escapes")]
pub(crate) const UNICODE_ESCAPE_RADIX: u32 = 10;

/// Pure functions for escape processing, shared by the string scanner and
/// the output side.
pub(crate) struct EscapeProcessor;

impl EscapeProcessor {
    /// Process a simple escape sequence character and return the unescaped byte.
    ///
    /// `u` is not a simple escape and is rejected here like any other unknown
    /// character; the caller handles it before reaching this function.
    pub fn process_simple_escape(escape_char: u8) -> Result<u8, ParseError> {
        match escape_char {
            b'n' => Ok(b'\n'),
            b't' => Ok(b'\t'),
            b'r' => Ok(b'\r'),
            b'\\' => Ok(b'\\'),
            b'"' => Ok(b'"'),
            b'/' => Ok(b'/'),
            b'b' => Ok(0x08), // Backspace
            b'f' => Ok(0x0C), // Form feed
            _ => Err(ParseError::UnrecognisedEscapeSequence),
        }
    }

    /// Validate one digit of a `\u` escape and return its numeric value.
    ///
    /// Accepts hex digits, or only `0`-`9` when built with
    /// `decimal-unicode-escapes`.
    pub fn validate_unicode_digit(byte: u8) -> Result<u32, ParseError> {
        char::from(byte)
            .to_digit(UNICODE_ESCAPE_RADIX)
            .ok_or(ParseError::UnexpectedCharacter)
    }

    /// Fold the four digits of a `\u` escape into a code unit.
    ///
    /// In decimal mode this is `d0*1000 + d1*100 + d2*10 + d3`.
    pub fn unicode_code_unit(digits: [u8; 4]) -> Result<u32, ParseError> {
        digits.iter().try_fold(0u32, |acc, &byte| {
            Ok(acc * UNICODE_ESCAPE_RADIX + Self::validate_unicode_digit(byte)?)
        })
    }

    /// Check if a Unicode codepoint is a high surrogate (0xD800-0xDBFF)
    pub fn is_high_surrogate(codepoint: u32) -> bool {
        (0xD800..=0xDBFF).contains(&codepoint)
    }

    /// Check if a Unicode codepoint is a low surrogate (0xDC00-0xDFFF)
    pub fn is_low_surrogate(codepoint: u32) -> bool {
        (0xDC00..=0xDFFF).contains(&codepoint)
    }

    /// Combine a high and low surrogate pair into a single Unicode codepoint
    pub fn combine_surrogate_pair(high: u32, low: u32) -> Result<u32, ParseError> {
        if !Self::is_high_surrogate(high) || !Self::is_low_surrogate(low) {
            return Err(ParseError::InvalidUnicodeCodepoint);
        }
        Ok(0x10000 + ((high & 0x3FF) << 10) + (low & 0x3FF))
    }

    /// The output escape for `ch`, if it needs one.
    ///
    /// The solidus is accepted as an escape on input but written verbatim.
    pub fn escape_for_output(ch: char) -> Option<&'static str> {
        match ch {
            '"' => Some("\\\""),
            '\\' => Some("\\\\"),
            '\u{08}' => Some("\\b"),
            '\u{0C}' => Some("\\f"),
            '\n' => Some("\\n"),
            '\r' => Some("\\r"),
            '\t' => Some("\\t"),
            _ => None,
        }
    }
}

/// Tracks `\u` escapes within one string literal so surrogate pairs written
/// as two consecutive escapes decode to one code point.
#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeCollector {
    pending_high_surrogate: Option<u32>,
}

impl UnicodeEscapeCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one decoded `\u` code unit.
    ///
    /// Returns the finished character, or `None` when a high surrogate is held
    /// back waiting for its low half.
    pub fn push_code_unit(&mut self, code_unit: u32) -> Result<Option<char>, ParseError> {
        let codepoint = match self.pending_high_surrogate.take() {
            Some(high) => EscapeProcessor::combine_surrogate_pair(high, code_unit)?,
            None if EscapeProcessor::is_high_surrogate(code_unit) => {
                self.pending_high_surrogate = Some(code_unit);
                return Ok(None);
            }
            None if EscapeProcessor::is_low_surrogate(code_unit) => {
                return Err(ParseError::InvalidUnicodeCodepoint);
            }
            None => code_unit,
        };
        char::from_u32(codepoint)
            .map(Some)
            .ok_or(ParseError::InvalidUnicodeCodepoint)
    }

    /// Fails if a high surrogate is still waiting for its low half.
    pub fn ensure_no_pending(&self) -> Result<(), ParseError> {
        match self.pending_high_surrogate {
            Some(_) => Err(ParseError::InvalidUnicodeCodepoint),
            None => Ok(()),
        }
    }
}

/// Displays a string as a quoted JSON string literal with the minimal escape
/// set applied.
pub(crate) struct JsonStr<'a>(pub &'a str);

impl fmt::Display for JsonStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;

        f.write_char('"')?;
        let mut run_start = 0;
        for (i, ch) in self.0.char_indices() {
            if let Some(escape) = EscapeProcessor::escape_for_output(ch) {
                f.write_str(&self.0[run_start..i])?;
                f.write_str(escape)?;
                run_start = i + ch.len_utf8();
            }
        }
        f.write_str(&self.0[run_start..])?;
        f.write_char('"')
    }
}
