//! Bounds-checked cursor over an immutable module buffer.
//!
//! Every decoder walks its input through a [`ByteReader`]. The position is
//! private and every read goes through [`ByteReader::read_bytes`], so there is
//! exactly one place where slice bounds are validated.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{ModuleError, Result};
use crate::text::extract_string;

/// Sequential reader over a borrowed byte buffer.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at offset 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Create a reader positioned at `offset`, failing if it lies past the end.
    pub fn at(data: &'a [u8], offset: usize) -> Result<Self> {
        let mut reader = Self::new(data);
        reader.seek(offset)?;
        Ok(reader)
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Total buffer length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Move the cursor to an absolute offset (the end of the buffer is allowed).
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(ModuleError::TruncatedData {
                offset,
                needed: 0,
                available: self.data.len(),
            });
        }
        self.pos = offset;
        Ok(())
    }

    /// Move the cursor back by `count` bytes.
    pub fn rewind(&mut self, count: usize) {
        self.pos = self.pos.saturating_sub(count);
    }

    /// Advance the cursor without reading.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Read `count` bytes and advance.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let slice = slice_at(self.data, self.pos, count)?;
        self.pos += count;
        Ok(slice)
    }

    /// Read a fixed-size array and advance.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_u16_be(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.read_bytes(4)?))
    }

    /// Read a fixed-width text field, stopping at the first NUL.
    pub fn read_string(&mut self, width: usize) -> Result<String> {
        Ok(extract_string(self.read_bytes(width)?))
    }
}

/// Borrow `len` bytes at an absolute `offset`, validating against the buffer.
///
/// Used for pointer-chasing formats (S3M parapointers, IT offsets) where
/// payloads are addressed directly rather than through the cursor.
pub fn slice_at(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or(ModuleError::TruncatedData {
            offset,
            needed: len,
            available: data.len(),
        })
}
