// SPDX-License-Identifier: Apache-2.0

//! An in-memory reader that can simulate streaming input.
//!
//! [`ChunkReader`] implements [`std::io::Read`] over a byte slice, handing out
//! at most `chunk_size` bytes per `read()` call. Feeding the parser through it
//! exercises the same code path as a socket or pipe that delivers a document
//! in pieces.
//!
//! ```rust
//! use zenjson::{parse_json, ChunkReader};
//!
//! let reader = ChunkReader::new(br#"{"name": "Alice", "age": 30}"#, 4);
//! let value = parse_json(reader).unwrap();
//! assert_eq!(*value.as_object()["age"].as_integer(), 30);
//! ```

use std::io;

/// A [`Read`](io::Read) over a byte slice, optionally in fixed-size chunks.
#[derive(Debug)]
pub struct ChunkReader<'a> {
    data: &'a [u8],
    pos: usize,
    chunk_size: usize,
}

impl<'a> ChunkReader<'a> {
    /// Creates a reader that returns at most `chunk_size` bytes per call
    /// (minimum 1).
    pub fn new(data: &'a [u8], chunk_size: usize) -> Self {
        Self {
            data,
            pos: 0,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Creates a reader that hands out as much as the caller's buffer holds.
    pub fn full_slice(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            chunk_size: usize::MAX,
        }
    }

    /// Bytes not yet handed out.
    pub fn remaining(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or_default()
    }
}

impl io::Read for ChunkReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.remaining();
        let to_copy = remaining.len().min(buf.len()).min(self.chunk_size);
        if let (Some(dest), Some(src)) = (buf.get_mut(..to_copy), remaining.get(..to_copy)) {
            dest.copy_from_slice(src);
        }
        self.pos = self.pos.saturating_add(to_copy);
        Ok(to_copy)
    }
}
