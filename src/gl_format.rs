#![allow(non_upper_case_globals)]

use crate::pixel::{ASTC_2D_FORMATS, ASTC_3D_FORMATS, PixelFormat};

pub const GL_COMPRESSED_RGBA_ASTC_4x4_KHR: u32 = 0x93B0;
pub const GL_COMPRESSED_RGBA_ASTC_12x12_KHR: u32 = 0x93BD;
pub const GL_COMPRESSED_RGBA_ASTC_3x3x3_OES: u32 = 0x93C0;
pub const GL_COMPRESSED_RGBA_ASTC_6x6x6_OES: u32 = 0x93C9;
pub const GL_COMPRESSED_SRGB8_ALPHA8_ASTC_4x4_KHR: u32 = 0x93D0;
pub const GL_COMPRESSED_SRGB8_ALPHA8_ASTC_12x12_KHR: u32 = 0x93DD;
pub const GL_COMPRESSED_SRGB8_ALPHA8_ASTC_3x3x3_OES: u32 = 0x93E0;
pub const GL_COMPRESSED_SRGB8_ALPHA8_ASTC_6x6x6_OES: u32 = 0x93E9;

/// OpenGL format fields carried in a KTX header.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlFormat {
    pub glType: u32,
    pub glTypeSize: u32,
    pub glFormat: u32,
    pub glInternalFormat: u32,
    pub glBaseInternalFormat: u32,
}

impl GlFormat {
    /// Compressed formats store zero in `glType` and `glFormat`.
    pub fn is_compressed(&self) -> bool {
        self.glType == 0 && self.glFormat == 0
    }
}

/// Maps an ASTC `glInternalFormat` to its pixel format and sRGB flag.
pub fn astc_format_for_gl_internal(internal_format: u32) -> Option<(PixelFormat, bool)> {
    let lookup = |table: &[PixelFormat], base: u32| table[(internal_format - base) as usize];
    match internal_format {
        GL_COMPRESSED_RGBA_ASTC_4x4_KHR..=GL_COMPRESSED_RGBA_ASTC_12x12_KHR => Some((
            lookup(&ASTC_2D_FORMATS[..], GL_COMPRESSED_RGBA_ASTC_4x4_KHR),
            false,
        )),
        GL_COMPRESSED_SRGB8_ALPHA8_ASTC_4x4_KHR..=GL_COMPRESSED_SRGB8_ALPHA8_ASTC_12x12_KHR => Some((
            lookup(&ASTC_2D_FORMATS[..], GL_COMPRESSED_SRGB8_ALPHA8_ASTC_4x4_KHR),
            true,
        )),
        GL_COMPRESSED_RGBA_ASTC_3x3x3_OES..=GL_COMPRESSED_RGBA_ASTC_6x6x6_OES => Some((
            lookup(&ASTC_3D_FORMATS[..], GL_COMPRESSED_RGBA_ASTC_3x3x3_OES),
            false,
        )),
        GL_COMPRESSED_SRGB8_ALPHA8_ASTC_3x3x3_OES..=GL_COMPRESSED_SRGB8_ALPHA8_ASTC_6x6x6_OES => Some((
            lookup(&ASTC_3D_FORMATS[..], GL_COMPRESSED_SRGB8_ALPHA8_ASTC_3x3x3_OES),
            true,
        )),
        _ => None,
    }
}
