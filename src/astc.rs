#![allow(non_snake_case)]

use log::debug;

use crate::cursor::{ByteCursor, ByteOrder};
use crate::error::{Result, TextureError};
use crate::pixel::{ASTC_BLOCK_BYTES, BlockDim, PixelFormat};

pub const ASTC_MAGIC: u32 = 0x5CA1_AB13;
pub const ASTC_HEADER_SIZE: usize = 16;

/// Decoded 16-byte ASTC file header.
///
/// Layout: `magic:u32le, blockDimX:u8, blockDimY:u8, blockDimZ:u8`, then three
/// 24-bit little-endian sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AstcHeader {
    pub magic: u32,
    pub blockDim: BlockDim,
    pub xSize: u32,
    pub ySize: u32,
    pub zSize: u32,
    pub format: PixelFormat,
}

impl AstcHeader {
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < ASTC_HEADER_SIZE {
            return Err(TextureError::TruncatedBuffer {
                field: "astcHeader",
                offset: 0,
                needed: ASTC_HEADER_SIZE as u64,
                len: data.len() as u64,
            });
        }

        let mut cursor = ByteCursor::new(data);
        let magic = cursor.read_u32("magic", ByteOrder::Little)?;
        if magic != ASTC_MAGIC {
            return Err(TextureError::BadMagic {
                container: "ASTC",
                expected: ASTC_MAGIC.to_le_bytes().to_vec(),
                found: data[..4].to_vec(),
            });
        }

        let blockDim = BlockDim::new(
            cursor.read_u8("blockDimX")?,
            cursor.read_u8("blockDimY")?,
            cursor.read_u8("blockDimZ")?,
        );
        let format = PixelFormat::from_block_dim(blockDim).ok_or(TextureError::InvalidBlockSize {
            x: blockDim.x,
            y: blockDim.y,
            z: blockDim.z,
        })?;

        let xSize = read_size(&mut cursor, "xSize")?;
        let ySize = read_size(&mut cursor, "ySize")?;
        let zSize = read_size(&mut cursor, "zSize")?;

        debug!("ASTC {blockDim} footprint, {xSize}x{ySize}x{zSize} texels");

        Ok(AstcHeader {
            magic,
            blockDim,
            xSize,
            ySize,
            zSize,
            format,
        })
    }

    /// Number of blocks along each axis, rounding partial blocks up.
    pub fn block_counts(&self) -> (u32, u32, u32) {
        (
            self.xSize.div_ceil(u32::from(self.blockDim.x)),
            self.ySize.div_ceil(u32::from(self.blockDim.y)),
            self.zSize.div_ceil(u32::from(self.blockDim.z)),
        )
    }

    /// Payload size implied by the header: one 16-byte block per footprint.
    pub fn expected_data_len(&self) -> u64 {
        let (bx, by, bz) = self.block_counts();
        u64::from(bx) * u64::from(by) * u64::from(bz) * ASTC_BLOCK_BYTES
    }
}

fn read_size(cursor: &mut ByteCursor<'_>, field: &'static str) -> Result<u32> {
    let value = cursor.read_u24(field, ByteOrder::Little)?;
    if value == 0 {
        return Err(TextureError::InvalidDimensions { field, value });
    }
    Ok(value)
}
