// SPDX-License-Identifier: Apache-2.0

//! Pull-based byte input with a single byte of lookahead.
//!
//! The parser only ever needs to look one byte ahead, so [`ByteStream`] keeps
//! no buffer beyond that slot. Reading one byte at a time from an unbuffered
//! source is slow; wrap files and sockets in [`std::io::BufReader`].

use std::io::{self, Read};

use crate::ParseError;

/// Returns `true` for the four JSON whitespace bytes.
pub(crate) const fn is_json_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\n' | b'\r' | b'\t')
}

/// A byte source with peek-then-consume access.
///
/// `None` from [`peek`](Self::peek) or [`next`](Self::next) means end of
/// input. I/O errors other than [`io::ErrorKind::Interrupted`] are reported as
/// [`ParseError::ReaderError`].
#[derive(Debug)]
pub struct ByteStream<R> {
    reader: R,
    /// `Some(None)` caches an observed end of input.
    peeked: Option<Option<u8>>,
}

impl<R: Read> ByteStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
        }
    }

    /// Returns the wrapped reader. A peeked byte, if any, is lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_byte(&mut self) -> Result<Option<u8>, ParseError> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Looks at the next byte without consuming it.
    pub fn peek(&mut self) -> Result<Option<u8>, ParseError> {
        match self.peeked {
            Some(byte) => Ok(byte),
            None => {
                let byte = self.read_byte()?;
                self.peeked = Some(byte);
                Ok(byte)
            }
        }
    }

    /// Consumes and returns the next byte.
    pub fn next(&mut self) -> Result<Option<u8>, ParseError> {
        match self.peeked.take() {
            Some(byte) => Ok(byte),
            None => self.read_byte(),
        }
    }

    /// Consumes whitespace, then consumes and returns the first other byte.
    pub fn next_non_whitespace(&mut self) -> Result<Option<u8>, ParseError> {
        loop {
            match self.next()? {
                Some(byte) if is_json_whitespace(byte) => continue,
                other => return Ok(other),
            }
        }
    }

    /// Consumes whitespace, then peeks at the first other byte.
    pub fn peek_non_whitespace(&mut self) -> Result<Option<u8>, ParseError> {
        loop {
            match self.peek()? {
                Some(byte) if is_json_whitespace(byte) => {
                    self.next()?;
                }
                other => return Ok(other),
            }
        }
    }

    /// Consumes the next byte and fails unless it equals `expected`.
    pub fn expect(&mut self, expected: u8) -> Result<(), ParseError> {
        match self.next()? {
            Some(byte) if byte == expected => Ok(()),
            _ => Err(ParseError::UnexpectedCharacter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk_reader::ChunkReader;
    use test_log::test;

    #[test]
    fn peek_does_not_consume() {
        let mut stream = ByteStream::new(&b"ab"[..]);
        assert_eq!(stream.peek(), Ok(Some(b'a')));
        assert_eq!(stream.peek(), Ok(Some(b'a')));
        assert_eq!(stream.next(), Ok(Some(b'a')));
        assert_eq!(stream.next(), Ok(Some(b'b')));
        assert_eq!(stream.peek(), Ok(None));
        assert_eq!(stream.next(), Ok(None));
        assert_eq!(stream.next(), Ok(None));
    }

    #[test]
    fn whitespace_skipping() {
        let mut stream = ByteStream::new(&b" \t\r\n x \n"[..]);
        assert_eq!(stream.peek_non_whitespace(), Ok(Some(b'x')));
        assert_eq!(stream.next_non_whitespace(), Ok(Some(b'x')));
        assert_eq!(stream.next_non_whitespace(), Ok(None));
    }

    #[test]
    fn expect_checks_byte() {
        let mut stream = ByteStream::new(&b":;"[..]);
        assert_eq!(stream.expect(b':'), Ok(()));
        assert_eq!(stream.expect(b':'), Err(ParseError::UnexpectedCharacter));
        assert_eq!(stream.expect(b':'), Err(ParseError::UnexpectedCharacter));
    }

    #[test]
    fn chunked_source_reads_every_byte() {
        let mut stream = ByteStream::new(ChunkReader::new(b"hello", 2));
        let mut seen = Vec::new();
        while let Some(b) = stream.next().unwrap() {
            seen.push(b);
        }
        assert_eq!(seen, b"hello");
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn reader_errors_surface() {
        let mut stream = ByteStream::new(FailingReader);
        assert_eq!(
            stream.next(),
            Err(ParseError::ReaderError(io::ErrorKind::ConnectionReset))
        );
    }

    struct InterruptOnce {
        interrupted: bool,
    }

    impl Read for InterruptOnce {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            buf[0] = b'7';
            Ok(1)
        }
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let mut stream = ByteStream::new(InterruptOnce { interrupted: false });
        assert_eq!(stream.next(), Ok(Some(b'7')));
    }
}
