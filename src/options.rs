/// How a KTX `mipmapCount` of zero is interpreted.
///
/// A zero count asks the loader to build the mip chain at load time, so the file
/// itself only holds the base level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ZeroMipPolicy {
    /// Treat the texture as having exactly one level.
    #[default]
    NormalizeToOne,
    /// One level in the layout, and [`TextureDescriptor::generate_mipmaps`] is set.
    ///
    /// [`TextureDescriptor::generate_mipmaps`]: crate::texture::TextureDescriptor::generate_mipmaps
    FlagForGeneration,
    /// Fail with [`TextureError::InvalidDimensions`](crate::error::TextureError::InvalidDimensions).
    Reject,
}

/// What a KTX `imageSize` field covers for non-array cubemaps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CubemapImageSize {
    /// `imageSize` spans every layer and face of the level.
    #[default]
    WholeLevel,
    /// `imageSize` is the size of a single face, and each face is padded to 4 bytes.
    /// Only applies when the raw `arrayElementCount` is zero and there are six faces.
    PerFace,
}

/// Knobs for [`TextureDescriptor::from_bytes_with`].
///
/// [`TextureDescriptor::from_bytes_with`]: crate::texture::TextureDescriptor::from_bytes_with
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub zero_mip_policy: ZeroMipPolicy,
    pub cubemap_image_size: CubemapImageSize,
    /// Require the ASTC payload to hold every block the header declares.
    pub strict_astc_payload: bool,
}

impl ParseOptions {
    pub fn with_zero_mip_policy(mut self, policy: ZeroMipPolicy) -> Self {
        self.zero_mip_policy = policy;
        self
    }

    pub fn with_cubemap_image_size(mut self, mode: CubemapImageSize) -> Self {
        self.cubemap_image_size = mode;
        self
    }

    pub fn with_strict_astc_payload(mut self, strict: bool) -> Self {
        self.strict_astc_payload = strict;
        self
    }
}
