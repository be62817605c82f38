use log::debug;
use std::ops::Range;

use crate::astc::{ASTC_MAGIC, AstcHeader};
use crate::cursor::ByteOrder;
use crate::error::{Result, TextureError};
use crate::gl_format::{GlFormat, astc_format_for_gl_internal};
use crate::header::{KTX_IDENTIFIER, KtxHeader};
use crate::kvd::KeyValueIter;
use crate::layout::{astc_layout, ktx_layout};
use crate::level::DataBlockDescriptor;
use crate::options::ParseOptions;
use crate::pixel::{ASTC_BLOCK_BYTES, BlockDim, PixelFormat};
use crate::sniff::{ContainerFormat, sniff_format};

/// Parsed description of a texture container.
///
/// Only produced by a successful parse and never modified afterwards. Layout
/// entries are offsets into the buffer that was parsed; the caller has to keep
/// that buffer alive to read the texel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDescriptor {
    container: ContainerFormat,
    width: u32,
    height: u32,
    depth: u32,
    array_layers: u32,
    faces: u32,
    mip_levels: u32,
    pixel_format: PixelFormat,
    block_dim: Option<BlockDim>,
    srgb: bool,
    generate_mipmaps: bool,
    byte_order: ByteOrder,
    gl_format: Option<GlFormat>,
    key_value_data: Range<u64>,
    layout: Vec<DataBlockDescriptor>,
}

impl TextureDescriptor {
    /// Parses an ASTC or KTX container with default options.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with(data, &ParseOptions::default())
    }

    pub fn from_bytes_with(data: &[u8], options: &ParseOptions) -> Result<Self> {
        let container = match sniff_format(data) {
            Ok(container) => container,
            Err(_) if is_signature_prefix(data) => {
                return Err(TextureError::TruncatedBuffer {
                    field: "signature",
                    offset: 0,
                    needed: KTX_IDENTIFIER.len() as u64,
                    len: data.len() as u64,
                });
            }
            Err(err) => return Err(err),
        };
        debug!("parsing {} container, {} bytes", container.name(), data.len());

        match container {
            ContainerFormat::Astc => Self::from_astc(data, options),
            ContainerFormat::Ktx => Self::from_ktx(data, options),
        }
    }

    fn from_astc(data: &[u8], options: &ParseOptions) -> Result<Self> {
        let header = AstcHeader::parse(data)?;
        let layout = astc_layout(&header, data.len() as u64, options.strict_astc_payload)?;

        Ok(TextureDescriptor {
            container: ContainerFormat::Astc,
            width: header.xSize,
            height: header.ySize,
            depth: header.zSize,
            array_layers: 1,
            faces: 1,
            mip_levels: 1,
            pixel_format: header.format,
            block_dim: Some(header.blockDim),
            srgb: false,
            generate_mipmaps: false,
            byte_order: ByteOrder::Little,
            gl_format: None,
            key_value_data: 0..0,
            layout,
        })
    }

    fn from_ktx(data: &[u8], options: &ParseOptions) -> Result<Self> {
        let header = KtxHeader::parse(data)?;
        let dims = header.normalized(options.zero_mip_policy)?;
        let key_value_data = header.key_value_range(data)?;
        let layout = ktx_layout(
            data,
            key_value_data.end,
            header.byteOrder,
            &dims,
            options.cubemap_image_size,
        )?;

        let (pixel_format, srgb) = astc_format_for_gl_internal(header.glInternalFormat)
            .unwrap_or((PixelFormat::KTX_RAW, false));

        debug!(
            "KTX layout: {} blocks over {} levels, format {pixel_format:?}",
            layout.len(),
            dims.mip_levels
        );

        Ok(TextureDescriptor {
            container: ContainerFormat::Ktx,
            width: dims.width,
            height: dims.height,
            depth: dims.depth,
            array_layers: dims.array_layers,
            faces: dims.faces,
            mip_levels: dims.mip_levels,
            pixel_format,
            block_dim: pixel_format.block_dim(),
            srgb,
            generate_mipmaps: dims.generate_mipmaps,
            byte_order: header.byteOrder,
            gl_format: Some(header.gl_format()),
            key_value_data,
            layout,
        })
    }

    pub fn container(&self) -> ContainerFormat {
        self.container
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn array_layers(&self) -> u32 {
        self.array_layers
    }

    pub fn faces(&self) -> u32 {
        self.faces
    }

    pub fn mip_levels(&self) -> u32 {
        self.mip_levels
    }

    pub fn is_cubemap(&self) -> bool {
        self.faces == 6
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /// ASTC footprint, also set for KTX files carrying ASTC data.
    pub fn block_dim(&self) -> Option<BlockDim> {
        self.block_dim
    }

    pub fn srgb(&self) -> bool {
        self.srgb
    }

    /// Set when the file asked for mipmaps to be generated at load time.
    pub fn generate_mipmaps(&self) -> bool {
        self.generate_mipmaps
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Raw GL format fields, KTX only.
    pub fn gl_format(&self) -> Option<GlFormat> {
        self.gl_format
    }

    /// Byte range of the KTX key/value metadata, empty for ASTC.
    pub fn key_value_data(&self) -> Range<u64> {
        self.key_value_data.clone()
    }

    pub fn layout(&self) -> &[DataBlockDescriptor] {
        &self.layout
    }

    /// Texel extent of a mip level, `None` past the last level.
    pub fn level_extent(&self, level: u32) -> Option<(u32, u32, u32)> {
        if level >= self.mip_levels {
            return None;
        }
        let shrink = |dim: u32| dim.checked_shr(level).unwrap_or(0).max(1);
        Some((shrink(self.width), shrink(self.height), shrink(self.depth)))
    }

    /// All blocks of one mip level, ordered by array layer then face.
    pub fn level_blocks(&self, level: u32) -> &[DataBlockDescriptor] {
        if level >= self.mip_levels {
            return &[];
        }
        let per_level = self.array_layers as usize * self.faces as usize;
        let start = level as usize * per_level;
        &self.layout[start..start + per_level]
    }

    pub fn block(&self, level: u32, array_layer: u32, face: u32) -> Option<&DataBlockDescriptor> {
        if array_layer >= self.array_layers || face >= self.faces {
            return None;
        }
        let index = array_layer as usize * self.faces as usize + face as usize;
        self.level_blocks(level).get(index)
    }

    /// Borrows a block's bytes from the buffer this descriptor was parsed from.
    pub fn block_bytes<'b>(&self, block: &DataBlockDescriptor, data: &'b [u8]) -> Option<&'b [u8]> {
        data.get(block.range())
    }

    /// Bytes per row of blocks in the base level, for ASTC-tagged textures.
    pub fn bytes_per_row(&self) -> Option<u64> {
        let dim = self.block_dim?;
        Some(u64::from(self.width.div_ceil(u32::from(dim.x))) * ASTC_BLOCK_BYTES)
    }

    /// Iterates the KTX key/value metadata inside `data`.
    pub fn key_value_pairs<'b>(&self, data: &'b [u8]) -> KeyValueIter<'b> {
        let block = data
            .get(self.key_value_data.start as usize..self.key_value_data.end as usize)
            .unwrap_or(&[]);
        KeyValueIter::new(block, self.key_value_data.start, self.byte_order)
    }
}

/// Whether a buffer too short to sniff still starts like a known signature.
fn is_signature_prefix(data: &[u8]) -> bool {
    let astc = ASTC_MAGIC.to_le_bytes();
    let n = data.len().min(astc.len());
    data.len() < KTX_IDENTIFIER.len()
        && (KTX_IDENTIFIER.starts_with(data) || astc[..n] == data[..n])
}
