use std::ops::Range;

/// One addressable region of texel data inside the parsed buffer.
///
/// Offsets point into the caller's buffer; nothing is copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataBlockDescriptor {
    pub mip_level: u32,
    pub array_layer: u32,
    pub face: u32,
    pub byte_offset: u64,
    pub byte_length: u64,
}

impl DataBlockDescriptor {
    pub fn end(&self) -> u64 {
        self.byte_offset + self.byte_length
    }

    /// Byte range of this block, usable to index the source buffer.
    pub fn range(&self) -> Range<usize> {
        self.byte_offset as usize..self.end() as usize
    }
}
