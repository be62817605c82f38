#![allow(non_snake_case)]

use log::debug;
use std::ops::Range;

use crate::cursor::{ByteCursor, ByteOrder};
use crate::error::{Result, TextureError};
use crate::gl_format::GlFormat;
use crate::options::ZeroMipPolicy;

pub const KTX_IDENTIFIER: [u8; 12] = [
    0xAB, 0x4B, 0x54, 0x58, 0x20, 0x31, 0x31, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A,
];
pub const KTX_HEADER_SIZE: usize = 64;
pub const KTX_ENDIANNESS: u32 = 0x0403_0201;

/// KTX v1 header with every field already converted to host values.
///
/// Counts are stored as they appear in the file; see [`KtxHeader::normalized`]
/// for the zero-as-one view the layout works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KtxHeader {
    pub byteOrder: ByteOrder,
    pub glType: u32,
    pub glTypeSize: u32,
    pub glFormat: u32,
    pub glInternalFormat: u32,
    pub glBaseInternalFormat: u32,
    pub pixelWidth: u32,
    pub pixelHeight: u32,
    pub pixelDepth: u32,
    pub numberOfArrayElements: u32,
    pub numberOfFaces: u32,
    pub numberOfMipmapLevels: u32,
    pub bytesOfKeyValueData: u32,
}

/// Header counts after zero-as-one normalisation and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KtxDimensions {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub array_layers: u32,
    pub faces: u32,
    pub mip_levels: u32,
    /// The file declares an array texture (`numberOfArrayElements != 0`).
    pub is_array: bool,
    pub generate_mipmaps: bool,
}

impl KtxHeader {
    /// Decodes the fixed 64-byte header, resolving byte order from the marker.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < KTX_HEADER_SIZE {
            return Err(TextureError::TruncatedBuffer {
                field: "ktxHeader",
                offset: 0,
                needed: KTX_HEADER_SIZE as u64,
                len: data.len() as u64,
            });
        }

        let mut cursor = ByteCursor::new(data);
        let identifier = cursor.read_bytes("identifier", KTX_IDENTIFIER.len())?;
        if identifier != KTX_IDENTIFIER {
            return Err(TextureError::BadMagic {
                container: "KTX",
                expected: KTX_IDENTIFIER.to_vec(),
                found: identifier.to_vec(),
            });
        }

        let byteOrder = match cursor.read_u32("endianness", ByteOrder::Little)? {
            KTX_ENDIANNESS => ByteOrder::Little,
            marker if marker == KTX_ENDIANNESS.swap_bytes() => ByteOrder::Big,
            found => return Err(TextureError::InvalidEndianness { found }),
        };

        let mut field = |name: &'static str| cursor.read_u32(name, byteOrder);
        let header = KtxHeader {
            byteOrder,
            glType: field("glType")?,
            glTypeSize: field("glTypeSize")?,
            glFormat: field("glFormat")?,
            glInternalFormat: field("glInternalFormat")?,
            glBaseInternalFormat: field("glBaseInternalFormat")?,
            pixelWidth: field("pixelWidth")?,
            pixelHeight: field("pixelHeight")?,
            pixelDepth: field("pixelDepth")?,
            numberOfArrayElements: field("numberOfArrayElements")?,
            numberOfFaces: field("numberOfFaces")?,
            numberOfMipmapLevels: field("numberOfMipmapLevels")?,
            bytesOfKeyValueData: field("bytesOfKeyValueData")?,
        };

        debug!(
            "KTX {:?}-endian, internal format {:#06X}, {}x{}x{}, {} layers, {} faces, {} levels, {} bytes of metadata",
            header.byteOrder,
            header.glInternalFormat,
            header.pixelWidth,
            header.pixelHeight,
            header.pixelDepth,
            header.numberOfArrayElements,
            header.numberOfFaces,
            header.numberOfMipmapLevels,
            header.bytesOfKeyValueData
        );

        Ok(header)
    }

    /// Applies the zero-as-one convention and validates the counts.
    pub fn normalized(&self, zero_mip_policy: ZeroMipPolicy) -> Result<KtxDimensions> {
        if self.pixelWidth == 0 {
            return Err(TextureError::InvalidDimensions {
                field: "pixelWidth",
                value: 0,
            });
        }

        let faces = match self.numberOfFaces {
            0 | 1 => 1,
            6 => 6,
            value => {
                return Err(TextureError::InvalidDimensions {
                    field: "numberOfFaces",
                    value,
                });
            }
        };

        let height = self.pixelHeight.max(1);
        if faces == 6 && self.pixelWidth != height {
            return Err(TextureError::InvalidCubemap {
                width: self.pixelWidth,
                height,
            });
        }

        let generate_mipmaps = match (self.numberOfMipmapLevels, zero_mip_policy) {
            (0, ZeroMipPolicy::Reject) => {
                return Err(TextureError::InvalidDimensions {
                    field: "numberOfMipmapLevels",
                    value: 0,
                });
            }
            (0, ZeroMipPolicy::FlagForGeneration) => true,
            _ => false,
        };

        Ok(KtxDimensions {
            width: self.pixelWidth,
            height,
            depth: self.pixelDepth.max(1),
            array_layers: self.numberOfArrayElements.max(1),
            faces,
            mip_levels: self.numberOfMipmapLevels.max(1),
            is_array: self.numberOfArrayElements != 0,
            generate_mipmaps,
        })
    }

    /// Locates the key/value metadata block, checking it fits in `data`.
    pub fn key_value_range(&self, data: &[u8]) -> Result<Range<u64>> {
        let mut cursor = ByteCursor::new(data);
        cursor.seek(KTX_HEADER_SIZE as u64)?;
        let start = cursor.position();
        cursor.skip("keyValueData", u64::from(self.bytesOfKeyValueData))?;
        Ok(start..cursor.position())
    }

    pub fn gl_format(&self) -> GlFormat {
        GlFormat {
            glType: self.glType,
            glTypeSize: self.glTypeSize,
            glFormat: self.glFormat,
            glInternalFormat: self.glInternalFormat,
            glBaseInternalFormat: self.glBaseInternalFormat,
        }
    }
}
