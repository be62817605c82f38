//! Error type shared by every parsing stage.

use thiserror::Error;

/// Result type for texture container parsing.
pub type Result<T> = core::result::Result<T, TextureError>;

/// Errors produced while decoding an ASTC or KTX container.
///
/// The first failure aborts the parse; no partial descriptor is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextureError {
    /// Fewer bytes remain than the field being read requires.
    #[error("truncated buffer reading `{field}`: need {needed} bytes at offset {offset}, buffer is {len} bytes")]
    TruncatedBuffer {
        field: &'static str,
        offset: u64,
        needed: u64,
        len: u64,
    },

    /// A cursor seek landed past the end of the buffer.
    #[error("offset {offset} is out of range for a {len} byte buffer")]
    OutOfRange { offset: u64, len: u64 },

    /// The magic number or identifier does not match the container signature.
    #[error("bad {container} magic: expected {expected:02X?}, found {found:02X?}")]
    BadMagic {
        container: &'static str,
        expected: Vec<u8>,
        found: Vec<u8>,
    },

    /// The KTX endianness marker is neither `0x04030201` nor its byte swap.
    #[error("invalid KTX endianness marker {found:#010X}")]
    InvalidEndianness { found: u32 },

    /// A declared dimension or count violates the container rules.
    #[error("invalid value {value} for `{field}`")]
    InvalidDimensions { field: &'static str, value: u32 },

    /// The ASTC block footprint is not one of the canonical footprints.
    #[error("unsupported ASTC block footprint {x}x{y}x{z}")]
    InvalidBlockSize { x: u8, y: u8, z: u8 },

    /// A cubemap whose faces are not square.
    #[error("cubemap faces must be square, got {width}x{height}")]
    InvalidCubemap { width: u32, height: u32 },

    /// A level's image size cannot be split evenly across its sub-images.
    #[error("mip level {level}: image size {image_size} does not split into {sub_images} equal sub-images")]
    InvalidImageSize {
        level: u32,
        image_size: u32,
        sub_images: u64,
    },

    /// The computed layout reaches past the end of the buffer.
    #[error("`{field}` ends at byte {end}, past the {len} byte buffer")]
    BufferOverrun {
        field: &'static str,
        end: u64,
        len: u64,
    },

    /// A key/value metadata record does not fit inside the metadata block.
    #[error("malformed key/value record at offset {offset}")]
    MalformedKeyValue { offset: u64 },

    /// Neither the ASTC nor the KTX signature matched.
    #[error("unrecognized texture container format")]
    UnrecognizedFormat,
}
