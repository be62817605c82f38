use std::fmt;

/// Every ASTC block encodes 128 bits regardless of its footprint.
pub const ASTC_BLOCK_BYTES: u64 = 16;

/// Texel footprint covered by one compressed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockDim {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl BlockDim {
    pub const fn new(x: u8, y: u8, z: u8) -> Self {
        BlockDim { x, y, z }
    }
}

impl fmt::Display for BlockDim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.z == 1 {
            write!(f, "{}x{}", self.x, self.y)
        } else {
            write!(f, "{}x{}x{}", self.x, self.y, self.z)
        }
    }
}

/// Pixel format tag handed to the renderer.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    ASTC_4x4,
    ASTC_5x4,
    ASTC_5x5,
    ASTC_6x5,
    ASTC_6x6,
    ASTC_8x5,
    ASTC_8x6,
    ASTC_8x8,
    ASTC_10x5,
    ASTC_10x6,
    ASTC_10x8,
    ASTC_10x10,
    ASTC_12x10,
    ASTC_12x12,
    ASTC_3x3x3,
    ASTC_4x3x3,
    ASTC_4x4x3,
    ASTC_4x4x4,
    ASTC_5x4x4,
    ASTC_5x5x4,
    ASTC_5x5x5,
    ASTC_6x5x5,
    ASTC_6x6x5,
    ASTC_6x6x6,
    /// KTX payload in a format this crate does not interpret; see the GL fields.
    KTX_RAW,
}

pub(crate) const ASTC_2D_FORMATS: [PixelFormat; 14] = [
    PixelFormat::ASTC_4x4,
    PixelFormat::ASTC_5x4,
    PixelFormat::ASTC_5x5,
    PixelFormat::ASTC_6x5,
    PixelFormat::ASTC_6x6,
    PixelFormat::ASTC_8x5,
    PixelFormat::ASTC_8x6,
    PixelFormat::ASTC_8x8,
    PixelFormat::ASTC_10x5,
    PixelFormat::ASTC_10x6,
    PixelFormat::ASTC_10x8,
    PixelFormat::ASTC_10x10,
    PixelFormat::ASTC_12x10,
    PixelFormat::ASTC_12x12,
];

pub(crate) const ASTC_3D_FORMATS: [PixelFormat; 10] = [
    PixelFormat::ASTC_3x3x3,
    PixelFormat::ASTC_4x3x3,
    PixelFormat::ASTC_4x4x3,
    PixelFormat::ASTC_4x4x4,
    PixelFormat::ASTC_5x4x4,
    PixelFormat::ASTC_5x5x4,
    PixelFormat::ASTC_5x5x5,
    PixelFormat::ASTC_6x5x5,
    PixelFormat::ASTC_6x6x5,
    PixelFormat::ASTC_6x6x6,
];

impl PixelFormat {
    /// Footprint of an ASTC format, `None` for everything else.
    pub const fn block_dim(self) -> Option<BlockDim> {
        let (x, y, z) = match self {
            PixelFormat::ASTC_4x4 => (4, 4, 1),
            PixelFormat::ASTC_5x4 => (5, 4, 1),
            PixelFormat::ASTC_5x5 => (5, 5, 1),
            PixelFormat::ASTC_6x5 => (6, 5, 1),
            PixelFormat::ASTC_6x6 => (6, 6, 1),
            PixelFormat::ASTC_8x5 => (8, 5, 1),
            PixelFormat::ASTC_8x6 => (8, 6, 1),
            PixelFormat::ASTC_8x8 => (8, 8, 1),
            PixelFormat::ASTC_10x5 => (10, 5, 1),
            PixelFormat::ASTC_10x6 => (10, 6, 1),
            PixelFormat::ASTC_10x8 => (10, 8, 1),
            PixelFormat::ASTC_10x10 => (10, 10, 1),
            PixelFormat::ASTC_12x10 => (12, 10, 1),
            PixelFormat::ASTC_12x12 => (12, 12, 1),
            PixelFormat::ASTC_3x3x3 => (3, 3, 3),
            PixelFormat::ASTC_4x3x3 => (4, 3, 3),
            PixelFormat::ASTC_4x4x3 => (4, 4, 3),
            PixelFormat::ASTC_4x4x4 => (4, 4, 4),
            PixelFormat::ASTC_5x4x4 => (5, 4, 4),
            PixelFormat::ASTC_5x5x4 => (5, 5, 4),
            PixelFormat::ASTC_5x5x5 => (5, 5, 5),
            PixelFormat::ASTC_6x5x5 => (6, 5, 5),
            PixelFormat::ASTC_6x6x5 => (6, 6, 5),
            PixelFormat::ASTC_6x6x6 => (6, 6, 6),
            PixelFormat::KTX_RAW => return None,
        };
        Some(BlockDim::new(x, y, z))
    }

    /// Looks up the canonical ASTC format for a footprint.
    pub fn from_block_dim(dim: BlockDim) -> Option<Self> {
        ASTC_2D_FORMATS
            .iter()
            .chain(ASTC_3D_FORMATS.iter())
            .copied()
            .find(|format| format.block_dim() == Some(dim))
    }

    pub const fn is_astc(self) -> bool {
        !matches!(self, PixelFormat::KTX_RAW)
    }
}
