use crate::astc::ASTC_MAGIC;
use crate::error::{Result, TextureError};
use crate::header::KTX_IDENTIFIER;

/// Container formats recognised by [`sniff_format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerFormat {
    Astc,
    Ktx,
}

impl ContainerFormat {
    pub fn name(self) -> &'static str {
        match self {
            ContainerFormat::Astc => "ASTC",
            ContainerFormat::Ktx => "KTX",
        }
    }
}

/// Classifies a buffer by its leading signature.
///
/// The 12-byte KTX identifier is checked before the 4-byte ASTC magic. Buffers
/// shorter than the KTX identifier are rejected outright.
pub fn sniff_format(data: &[u8]) -> Result<ContainerFormat> {
    if data.len() < KTX_IDENTIFIER.len() {
        return Err(TextureError::UnrecognizedFormat);
    }
    if data[..KTX_IDENTIFIER.len()] == KTX_IDENTIFIER {
        return Ok(ContainerFormat::Ktx);
    }
    if u32::from_le_bytes([data[0], data[1], data[2], data[3]]) == ASTC_MAGIC {
        return Ok(ContainerFormat::Astc);
    }
    Err(TextureError::UnrecognizedFormat)
}
