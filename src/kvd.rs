use crate::cursor::{ByteCursor, ByteOrder};
use crate::error::{Result, TextureError};

/// One entry of the KTX key/value metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyValue<'a> {
    pub key: &'a str,
    /// Raw value bytes; string values keep their trailing NUL.
    pub value: &'a [u8],
}

/// Walks the records of a key/value metadata block.
///
/// Each record is `keyAndValueByteSize:u32`, a NUL-terminated UTF-8 key, the
/// value bytes, then padding up to the next 4-byte boundary. Iteration stops
/// after the first malformed record.
pub struct KeyValueIter<'a> {
    cursor: ByteCursor<'a>,
    block: &'a [u8],
    base_offset: u64,
    byte_order: ByteOrder,
    done: bool,
}

impl<'a> KeyValueIter<'a> {
    /// `block` is the metadata bytes alone; `base_offset` is where they start in
    /// the container and only feeds error offsets.
    pub fn new(block: &'a [u8], base_offset: u64, byte_order: ByteOrder) -> Self {
        KeyValueIter {
            cursor: ByteCursor::new(block),
            block,
            base_offset,
            byte_order,
            done: false,
        }
    }

    fn next_record(&mut self) -> Result<KeyValue<'a>> {
        let record_start = self.cursor.position();
        let malformed = TextureError::MalformedKeyValue {
            offset: self.base_offset + record_start,
        };

        let size = self
            .cursor
            .read_u32("keyAndValueByteSize", self.byte_order)
            .map_err(|_| malformed.clone())?;
        let record = self
            .cursor
            .read_bytes("keyAndValue", size as usize)
            .map_err(|_| malformed.clone())?;

        let nul = record.iter().position(|&b| b == 0).ok_or(malformed.clone())?;
        let key = std::str::from_utf8(&record[..nul]).map_err(|_| malformed)?;
        let value = &record[nul + 1..];

        let padded = (self.cursor.position() + 3) & !3;
        self.cursor.seek(padded.min(self.block.len() as u64))?;

        Ok(KeyValue { key, value })
    }
}

impl<'a> Iterator for KeyValueIter<'a> {
    type Item = Result<KeyValue<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursor.remaining() == 0 {
            return None;
        }
        let record = self.next_record();
        self.done = record.is_err();
        Some(record)
    }
}
