// SPDX-License-Identifier: Apache-2.0

use std::io;

/// Errors that can occur during JSON parsing
///
/// Parsing is fail-fast: the first malformed byte aborts the whole parse and
/// no partial tree is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Anything structurally invalid at the current scan position, including
    /// end of input in the middle of a token.
    UnexpectedCharacter,
    /// An unsupported character after `\` in a string.
    UnrecognisedEscapeSequence,
    /// A `\u` escape named a lone or mis-ordered UTF-16 surrogate.
    InvalidUnicodeCodepoint,
    /// The bytes of a string literal were not valid UTF-8.
    InvalidUtf8(core::str::Utf8Error),
    /// The integer part of a number does not fit in 64 bits.
    NumericOverflow,
    /// Error from the underlying reader (I/O error, not end-of-stream)
    ReaderError(io::ErrorKind),
}

impl From<core::str::Utf8Error> for ParseError {
    fn from(err: core::str::Utf8Error) -> Self {
        ParseError::InvalidUtf8(err)
    }
}

impl From<std::string::FromUtf8Error> for ParseError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ParseError::InvalidUtf8(err.utf8_error())
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        ParseError::ReaderError(err.kind())
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::UnexpectedCharacter => write!(f, "unexpected character"),
            ParseError::UnrecognisedEscapeSequence => write!(f, "unrecognised escape sequence"),
            ParseError::InvalidUnicodeCodepoint => write!(f, "invalid Unicode code point"),
            ParseError::InvalidUtf8(e) => write!(f, "Invalid UTF-8: {e}"),
            ParseError::NumericOverflow => write!(f, "number does not fit in a bigint"),
            ParseError::ReaderError(kind) => write!(f, "reader error: {kind}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::InvalidUtf8(e) => Some(e),
            _ => None,
        }
    }
}
