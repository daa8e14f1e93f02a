//! Positional little-endian reader over an in-memory package.
//!
//! The cursor is the only mutable state of a parse. It is threaded by `&mut`
//! through every decoder; out-of-line tables are read through [`ByteCursor::at`],
//! which restores the position on every exit path.
//!
//! ## String encoding
//!
//! A string is an `i32` length `L` followed by its characters:
//! - `L >= 0`: `L` single-byte Latin-1 characters, the last one a NUL terminator
//! - `L < 0`: `-L` UCS-2LE code units, the last one a NUL terminator
//!
//! `L == 0` is the empty string and consumes nothing after the length.

use crate::config::ParserConfig;
use crate::error::{Error, Result};
use byteorder::{ByteOrder, LittleEndian};
use tracing::{trace, warn};

/// Reader over an immutable byte buffer
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
    strict_bools: bool,
    max_array_len: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor at offset 0 with default limits
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, &ParserConfig::default())
    }

    /// Creates a cursor at offset 0 using the limits from `config`
    pub fn with_config(data: &'a [u8], config: &ParserConfig) -> Self {
        Self {
            data,
            position: 0,
            strict_bools: config.strict_bools,
            max_array_len: config.max_table_len,
        }
    }

    /// Current absolute position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total buffer length
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the underlying buffer is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the position and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Returns true if no bytes remain
    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Moves to an absolute position; the end of the buffer is a valid target
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.data.len() {
            return Err(Error::malformed(
                self.position,
                format!(
                    "seek target {} is beyond the end of a {} byte buffer",
                    position,
                    self.data.len()
                ),
            ));
        }
        self.position = position;
        Ok(())
    }

    /// Advances the position by `count` bytes without decoding them
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }

    /// Borrows the next `count` bytes and advances past them
    pub fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if count > available {
            return Err(Error::unexpected_end(self.position, count, available));
        }
        let bytes = &self.data[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }

    /// Runs `f` with the cursor moved to `offset`, then restores the previous
    /// position whether or not `f` succeeded.
    pub fn at<T, F>(&mut self, offset: usize, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let saved = self.position;
        let result = self.seek(offset).and_then(|()| f(self));
        self.position = saved;
        result
    }

    /// Reads one byte
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Reads a little-endian `u16`
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    /// Reads a little-endian `i16`
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.take(2)?))
    }

    /// Reads a little-endian `u32`
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    /// Reads a little-endian `i32`
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    /// Reads a little-endian `u64`
    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    /// Reads a little-endian `i64`
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(LittleEndian::read_i64(self.take(8)?))
    }

    /// Reads an `i32` that encodes a boolean.
    ///
    /// Values other than 0 and 1 are an error in strict mode and coerce to
    /// `true` otherwise.
    pub fn read_bool32(&mut self) -> Result<bool> {
        let offset = self.position;
        let raw = self.read_i32()?;
        match raw {
            0 => Ok(false),
            1 => Ok(true),
            _ if self.strict_bools => Err(Error::malformed(
                offset,
                format!("boolean encoded as {}, expected 0 or 1", raw),
            )),
            _ => {
                warn!("Non-canonical boolean {} at offset {}", raw, offset);
                Ok(true)
            }
        }
    }

    /// Reads a length-prefixed string (see the module docs for the encoding)
    pub fn read_string(&mut self) -> Result<String> {
        let offset = self.position;
        let len = self.read_i32()?;

        if len == 0 {
            return Ok(String::new());
        }

        if len > 0 {
            let bytes = self.take(len as usize)?;
            Ok(bytes[..bytes.len() - 1].iter().map(|&b| char::from(b)).collect())
        } else {
            let units = len.unsigned_abs() as usize;
            let bytes = self.take(units.checked_mul(2).ok_or_else(|| {
                Error::malformed(offset, format!("string length {} overflows", len))
            })?)?;
            let chars: Vec<u16> = bytes
                .chunks_exact(2)
                .take(units - 1)
                .map(LittleEndian::read_u16)
                .collect();
            Ok(String::from_utf16_lossy(&chars))
        }
    }

    /// Reads an `i32` element count, rejecting negative or oversized values
    pub fn read_count(&mut self) -> Result<usize> {
        let offset = self.position;
        let count = self.read_i32()?;
        self.check_count(offset, count)
    }

    fn check_count(&self, offset: usize, count: i32) -> Result<usize> {
        if count < 0 {
            return Err(Error::malformed(offset, format!("negative element count {}", count)));
        }
        let count = count as usize;
        if count > self.max_array_len {
            return Err(Error::malformed(
                offset,
                format!("element count {} exceeds limit {}", count, self.max_array_len),
            ));
        }
        Ok(count)
    }

    /// Reads a count, then that many elements in place
    pub fn read_inline_array<T, F>(&mut self, mut element: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let count = self.read_count()?;
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(element(self)?);
        }
        Ok(items)
    }

    /// Reads a count and an absolute offset, decodes the elements stored at
    /// that offset, and leaves the cursor just past the count/offset pair.
    pub fn read_deferred_array<T, F>(&mut self, mut element: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let count_at = self.position;
        let count = self.read_i32()?;
        let offset = self.read_i32()?;
        let count = self.check_count(count_at, count)?;

        if count == 0 {
            return Ok(Vec::new());
        }
        if offset < 0 {
            return Err(Error::malformed(
                count_at + 4,
                format!("negative table offset {}", offset),
            ));
        }

        trace!("Reading {} deferred elements at offset {}", count, offset);
        self.at(offset as usize, |cursor| {
            let mut items = Vec::with_capacity(count.min(cursor.remaining()));
            for _ in 0..count {
                items.push(element(cursor)?);
            }
            Ok(items)
        })
    }
}
