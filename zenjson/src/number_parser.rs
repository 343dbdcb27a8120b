// SPDX-License-Identifier: Apache-2.0

//! Number scanning sub-state machine.
//!
//! Numbers are scanned byte by byte with peek-then-consume, so the byte that
//! ends a number is left in the stream for the structural scanner. The
//! grammar recognised here is narrower than RFC 8259:
//!
//! - a number is an optional `-` directly followed by a digit (leading zeros
//!   allowed, no `+`)
//! - an exponent may only follow a fractional part
//! - the fractional value is `pow(integer + fraction, exponent)`, with the
//!   exponent defaulting to `1` when no `e`/`E` is present; a leading `-`
//!   negates the result
//! - integers must fit in `i64`, but the integer part of a fractional number
//!   may be arbitrarily long

use std::io::Read;

use crate::byte_stream::{is_json_whitespace, ByteStream};
use crate::{ParseError, Value};

/// Returns `true` if `byte` ends a number without being part of it.
const fn is_number_terminator(byte: Option<u8>) -> bool {
    match byte {
        None => true,
        Some(b) => matches!(b, b']' | b'}' | b',') || is_json_whitespace(b),
    }
}

const fn decimal_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum NumberState {
    Integer,
    Fraction,
    /// Just consumed `e`/`E`; a sign may follow.
    ExponentStart,
    Exponent,
}

#[derive(Debug)]
pub(crate) struct NumberParser {
    state: NumberState,
    negative: bool,
    /// Signed integer part, or `None` once it no longer fits in `i64`.
    integer: Option<i64>,
    /// Decimal digits of the integer part.
    integer_digits: String,
    fraction: f64,
    /// Weight of the next fractional digit.
    scale: f64,
    exponent: f64,
    exponent_negative: bool,
}

impl NumberParser {
    /// Starts a number whose first digit has already been consumed.
    fn new(first_digit: u8, negative: bool) -> Self {
        let integer = i64::from(first_digit);
        Self {
            state: NumberState::Integer,
            negative,
            integer: Some(if negative { -integer } else { integer }),
            integer_digits: String::from(char::from(b'0' + first_digit)),
            fraction: 0.0,
            scale: 1.0,
            exponent: 1.0,
            exponent_negative: false,
        }
    }

    /// Scans the rest of a number whose first byte `first` (a digit or `-`)
    /// was just consumed from `input`.
    pub fn scan<R: Read>(input: &mut ByteStream<R>, first: u8) -> Result<Value, ParseError> {
        let negative = first == b'-';
        let first_digit = if negative {
            input.next()?.and_then(decimal_digit)
        } else {
            decimal_digit(first)
        }
        .ok_or(ParseError::UnexpectedCharacter)?;

        let mut parser = Self::new(first_digit, negative);
        loop {
            let next = input.peek()?;
            if is_number_terminator(next) {
                return parser.finish();
            }
            if let Some(byte) = next {
                parser.advance(byte)?;
                input.next()?;
            }
        }
    }

    fn advance(&mut self, byte: u8) -> Result<(), ParseError> {
        use NumberState::*;

        match (self.state, decimal_digit(byte)) {
            (Integer, Some(d)) => {
                // Accumulate towards the sign so i64::MIN is reachable
                let d = i64::from(d);
                let negative = self.negative;
                self.integer = self.integer.and_then(|x| {
                    let shifted = x.checked_mul(10)?;
                    if negative {
                        shifted.checked_sub(d)
                    } else {
                        shifted.checked_add(d)
                    }
                });
                self.integer_digits.push(char::from(byte));
            }
            (Fraction, Some(d)) => {
                self.scale /= 10.0;
                self.fraction += self.scale * f64::from(d);
            }
            (ExponentStart | Exponent, Some(d)) => {
                self.exponent = self.exponent * 10.0 + f64::from(d);
                self.state = Exponent;
            }
            (Integer, None) if byte == b'.' => self.state = Fraction,
            (Fraction, None) if matches!(byte, b'e' | b'E') => {
                self.exponent = 0.0;
                self.state = ExponentStart;
            }
            (ExponentStart, None) if matches!(byte, b'+' | b'-') => {
                self.exponent_negative = byte == b'-';
                self.state = Exponent;
            }
            _ => return Err(ParseError::UnexpectedCharacter),
        }
        Ok(())
    }

    fn finish(self) -> Result<Value, ParseError> {
        if self.state == NumberState::Integer {
            return self.integer.map(Value::Integer).ok_or(ParseError::NumericOverflow);
        }

        let integer = match self.integer {
            Some(x) => x.unsigned_abs() as f64,
            None => self
                .integer_digits
                .parse::<f64>()
                .map_err(|_| ParseError::NumericOverflow)?,
        };
        let exponent = if self.exponent_negative {
            -self.exponent
        } else {
            self.exponent
        };
        let magnitude = (integer + self.fraction).powf(exponent);
        Ok(Value::Fractional(if self.negative {
            -magnitude
        } else {
            magnitude
        }))
    }
}
