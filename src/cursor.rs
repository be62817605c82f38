use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::Cursor;

use crate::error::{Result, TextureError};

/// Byte order used for multi-byte reads.
///
/// KTX picks this once from its endianness marker; ASTC is always little-endian.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

/// Bounds-checked reader over an in-memory buffer.
///
/// Every read checks the remaining length first, so a short buffer surfaces as
/// [`TextureError::TruncatedBuffer`] instead of a partial value.
pub struct ByteCursor<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor {
            inner: Cursor::new(data),
        }
    }

    pub fn len(&self) -> u64 {
        self.inner.get_ref().len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.inner.get_ref().is_empty()
    }

    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    pub fn remaining(&self) -> u64 {
        self.len().saturating_sub(self.position())
    }

    /// Moves to an absolute offset. `offset == len` is allowed.
    pub fn seek(&mut self, offset: u64) -> Result<()> {
        if offset > self.len() {
            return Err(TextureError::OutOfRange {
                offset,
                len: self.len(),
            });
        }
        self.inner.set_position(offset);
        Ok(())
    }

    /// Advances past `count` bytes without reading them.
    pub fn skip(&mut self, field: &'static str, count: u64) -> Result<()> {
        self.ensure(field, count)?;
        self.inner.set_position(self.position() + count);
        Ok(())
    }

    /// Borrows the next `count` bytes of the underlying buffer.
    pub fn read_bytes(&mut self, field: &'static str, count: usize) -> Result<&'a [u8]> {
        self.ensure(field, count as u64)?;
        let data: &'a [u8] = *self.inner.get_ref();
        let start = self.position() as usize;
        self.inner.set_position((start + count) as u64);
        Ok(&data[start..start + count])
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        self.ensure(field, 1)?;
        self.inner.read_u8().map_err(|_| self.truncated(field, 1))
    }

    pub fn read_u16(&mut self, field: &'static str, order: ByteOrder) -> Result<u16> {
        self.ensure(field, 2)?;
        let value = match order {
            ByteOrder::Little => self.inner.read_u16::<LittleEndian>(),
            ByteOrder::Big => self.inner.read_u16::<BigEndian>(),
        };
        value.map_err(|_| self.truncated(field, 2))
    }

    /// Reads a packed 3-byte unsigned integer.
    pub fn read_u24(&mut self, field: &'static str, order: ByteOrder) -> Result<u32> {
        self.ensure(field, 3)?;
        let value = match order {
            ByteOrder::Little => self.inner.read_u24::<LittleEndian>(),
            ByteOrder::Big => self.inner.read_u24::<BigEndian>(),
        };
        value.map_err(|_| self.truncated(field, 3))
    }

    pub fn read_u32(&mut self, field: &'static str, order: ByteOrder) -> Result<u32> {
        self.ensure(field, 4)?;
        let value = match order {
            ByteOrder::Little => self.inner.read_u32::<LittleEndian>(),
            ByteOrder::Big => self.inner.read_u32::<BigEndian>(),
        };
        value.map_err(|_| self.truncated(field, 4))
    }

    fn ensure(&self, field: &'static str, needed: u64) -> Result<()> {
        if self.remaining() < needed {
            return Err(self.truncated(field, needed));
        }
        Ok(())
    }

    fn truncated(&self, field: &'static str, needed: u64) -> TextureError {
        TextureError::TruncatedBuffer {
            field,
            offset: self.position(),
            needed,
            len: self.len(),
        }
    }
}
