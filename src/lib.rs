//! Parser for ASTC and KTX v1 texture containers.
//!
//! [`TextureDescriptor::from_bytes`] sniffs the container, validates its header
//! and computes where every mip level, array layer and cubemap face lives in the
//! buffer. Nothing is decompressed or copied.

pub mod astc;
pub mod cursor;
pub mod error;
pub mod gl_format;
pub mod header;
pub mod kvd;
pub mod layout;
pub mod level;
pub mod options;
pub mod pixel;
pub mod sniff;
pub mod texture;

#[cfg(test)]
mod test_prelude;

pub use cursor::ByteOrder;
pub use error::{Result, TextureError};
pub use level::DataBlockDescriptor;
pub use options::{CubemapImageSize, ParseOptions, ZeroMipPolicy};
pub use pixel::{BlockDim, PixelFormat};
pub use sniff::{ContainerFormat, sniff_format};
pub use texture::TextureDescriptor;
