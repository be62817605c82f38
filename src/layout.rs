//! Byte layout of the texel data held in a container.
//!
//! Descriptors are ordered mip level first, then array layer, then face. Every
//! entry of a given level has the same length.

use log::{debug, trace};

use crate::astc::{ASTC_HEADER_SIZE, AstcHeader};
use crate::cursor::{ByteCursor, ByteOrder};
use crate::error::{Result, TextureError};
use crate::header::KtxDimensions;
use crate::level::DataBlockDescriptor;
use crate::options::CubemapImageSize;

const KTX_ALIGNMENT: u64 = 4;

/// Single-entry layout covering everything after the ASTC header.
///
/// With `strict_payload` the payload must also hold every block the header
/// declares.
pub fn astc_layout(
    header: &AstcHeader,
    data_len: u64,
    strict_payload: bool,
) -> Result<Vec<DataBlockDescriptor>> {
    let offset = ASTC_HEADER_SIZE as u64;
    if data_len < offset {
        return Err(TextureError::TruncatedBuffer {
            field: "astcHeader",
            offset: 0,
            needed: offset,
            len: data_len,
        });
    }
    if strict_payload {
        let end = offset
            .checked_add(header.expected_data_len())
            .ok_or(TextureError::BufferOverrun {
                field: "astcBlocks",
                end: u64::MAX,
                len: data_len,
            })?;
        if end > data_len {
            return Err(TextureError::BufferOverrun {
                field: "astcBlocks",
                end,
                len: data_len,
            });
        }
    }

    Ok(vec![DataBlockDescriptor {
        mip_level: 0,
        array_layer: 0,
        face: 0,
        byte_offset: offset,
        byte_length: data_len - offset,
    }])
}

/// Walks the KTX mip chain starting at `data_start`.
///
/// Each level is `imageSize:u32` followed by the image data, padded so the
/// next level starts on a 4-byte boundary.
pub fn ktx_layout(
    data: &[u8],
    data_start: u64,
    byte_order: ByteOrder,
    dims: &KtxDimensions,
    cubemap_image_size: CubemapImageSize,
) -> Result<Vec<DataBlockDescriptor>> {
    let len = data.len() as u64;
    let mut cursor = ByteCursor::new(data);
    cursor.seek(data_start)?;

    let per_face =
        cubemap_image_size == CubemapImageSize::PerFace && !dims.is_array && dims.faces == 6;
    let sub_images = u64::from(dims.array_layers) * u64::from(dims.faces);
    let overrun = |field, end: Option<u64>| TextureError::BufferOverrun {
        field,
        end: end.unwrap_or(u64::MAX),
        len,
    };

    let mut layout = Vec::new();
    for level in 0..dims.mip_levels {
        let image_size = cursor.read_u32("imageSize", byte_order)?;
        if image_size == 0 {
            return Err(TextureError::InvalidImageSize {
                level,
                image_size,
                sub_images,
            });
        }

        // (length of each sub-image, distance between sub-images, bytes used by the level)
        let (block_len, stride, level_len) = if per_face {
            let block_len = u64::from(image_size);
            let stride = align(block_len).ok_or(overrun("imageData", None))?;
            (block_len, stride, stride * 6)
        } else {
            if u64::from(image_size) % sub_images != 0 {
                return Err(TextureError::InvalidImageSize {
                    level,
                    image_size,
                    sub_images,
                });
            }
            let block_len = u64::from(image_size) / sub_images;
            (block_len, block_len, u64::from(image_size))
        };

        let base = cursor.position();
        let end = base.checked_add(level_len);
        match end {
            Some(end) if end <= len => {}
            _ => return Err(overrun("imageData", end)),
        }

        debug!(
            "level {level}: imageSize {image_size} at offset {base}, {sub_images} x {block_len} bytes"
        );

        for array_layer in 0..dims.array_layers {
            for face in 0..dims.faces {
                let index = u64::from(array_layer) * u64::from(dims.faces) + u64::from(face);
                let entry = DataBlockDescriptor {
                    mip_level: level,
                    array_layer,
                    face,
                    byte_offset: base + index * stride,
                    byte_length: block_len,
                };
                trace!("{entry:?}");
                layout.push(entry);
            }
        }

        let next = base.checked_add(level_len).and_then(align);
        match next {
            Some(next) if next <= len => cursor.seek(next)?,
            // Padding after the final level may be missing from the buffer.
            Some(_) if level + 1 == dims.mip_levels => {}
            _ => return Err(overrun("mipPadding", next)),
        }
    }

    Ok(layout)
}

fn align(offset: u64) -> Option<u64> {
    Some(offset.checked_add(KTX_ALIGNMENT - 1)? & !(KTX_ALIGNMENT - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{KTX_HEADER_SIZE, KtxHeader};
    use crate::options::ZeroMipPolicy;
    use crate::test_prelude::*;

    fn layout_of(data: &[u8], mode: CubemapImageSize) -> Result<Vec<DataBlockDescriptor>> {
        let header = KtxHeader::parse(data)?;
        let dims = header.normalized(ZeroMipPolicy::default())?;
        let start = header.key_value_range(data)?.end;
        ktx_layout(data, start, header.byteOrder, &dims, mode)
    }

    #[test]
    fn single_level_single_image() {
        let data = KtxBuilder::new(4, 4).sub_image_len(16).build();
        let layout = layout_of(&data, CubemapImageSize::WholeLevel).unwrap();
        assert_eq!(
            layout,
            vec![DataBlockDescriptor {
                mip_level: 0,
                array_layer: 0,
                face: 0,
                byte_offset: KTX_HEADER_SIZE as u64 + 4,
                byte_length: 16,
            }]
        );
    }

    #[test]
    fn orders_by_level_then_layer_then_face() {
        let data = KtxBuilder::new(8, 8)
            .array_elements(2)
            .faces(6)
            .mip_levels(2)
            .sub_image_len(8)
            .build();
        let layout = layout_of(&data, CubemapImageSize::WholeLevel).unwrap();
        assert_eq!(layout.len(), 2 * 2 * 6);

        let keys = layout
            .iter()
            .map(|e| (e.mip_level, e.array_layer, e.face))
            .collect::<Vec<_>>();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        // level 0: 64 header + 4 imageSize, 12 sub-images of 8 bytes
        assert_eq!(layout[0].byte_offset, 68);
        assert_eq!(layout[11].byte_offset, 68 + 11 * 8);
        // level 1 follows: 68 + 96 + 4
        assert_eq!(layout[12].byte_offset, 168);
        assert!(layout.iter().all(|e| e.byte_length == 8));
    }

    #[test]
    fn levels_are_padded_to_four_bytes() {
        let data = KtxBuilder::new(2, 2)
            .mip_levels(2)
            .sub_image_len(3)
            .build();
        let layout = layout_of(&data, CubemapImageSize::WholeLevel).unwrap();
        assert_eq!(layout[0].byte_offset, 68);
        assert_eq!(layout[0].byte_length, 3);
        // 68 + 3 -> padded to 72, then 4 bytes of imageSize
        assert_eq!(layout[1].byte_offset, 76);
    }

    #[test]
    fn uneven_image_size_is_rejected() {
        let data = KtxBuilder::new(8, 8)
            .array_elements(3)
            .image_sizes(&[10])
            .build();
        assert_eq!(
            layout_of(&data, CubemapImageSize::WholeLevel),
            Err(TextureError::InvalidImageSize {
                level: 0,
                image_size: 10,
                sub_images: 3
            })
        );
    }

    #[test]
    fn zero_image_size_is_rejected() {
        let data = KtxBuilder::new(8, 8).image_sizes(&[0]).build();
        assert!(matches!(
            layout_of(&data, CubemapImageSize::WholeLevel),
            Err(TextureError::InvalidImageSize { image_size: 0, .. })
        ));
    }

    #[test]
    fn image_past_end_overruns() {
        let mut data = KtxBuilder::new(4, 4).sub_image_len(16).build();
        data.truncate(data.len() - 1);
        assert_eq!(
            layout_of(&data, CubemapImageSize::WholeLevel),
            Err(TextureError::BufferOverrun {
                field: "imageData",
                end: 84,
                len: 83
            })
        );
    }

    #[test]
    fn huge_image_size_overruns_without_overflow() {
        let data = KtxBuilder::new(4, 4).image_sizes(&[u32::MAX]).build();
        assert!(matches!(
            layout_of(&data, CubemapImageSize::WholeLevel),
            Err(TextureError::BufferOverrun { .. })
        ));
    }

    #[test]
    fn missing_level_size_is_truncated() {
        let mut data = KtxBuilder::new(4, 4).mip_levels(2).sub_image_len(4).build();
        data.truncate(72);
        assert!(matches!(
            layout_of(&data, CubemapImageSize::WholeLevel),
            Err(TextureError::TruncatedBuffer {
                field: "imageSize",
                ..
            })
        ));
    }

    #[test]
    fn per_face_cubemap_uses_face_sized_images() {
        let data = KtxBuilder::new(4, 4)
            .faces(6)
            .per_face_image_size()
            .sub_image_len(6)
            .build();
        let layout = layout_of(&data, CubemapImageSize::PerFace).unwrap();
        assert_eq!(layout.len(), 6);
        for (face, entry) in layout.iter().enumerate() {
            assert_eq!(entry.face, face as u32);
            assert_eq!(entry.byte_length, 6);
            // each face padded from 6 to 8 bytes
            assert_eq!(entry.byte_offset, 68 + face as u64 * 8);
        }
    }

    #[test]
    fn per_face_mode_leaves_array_cubemaps_alone() {
        let data = KtxBuilder::new(4, 4)
            .faces(6)
            .array_elements(2)
            .sub_image_len(4)
            .build();
        let layout = layout_of(&data, CubemapImageSize::PerFace).unwrap();
        assert_eq!(layout.len(), 12);
        assert!(layout.iter().all(|e| e.byte_length == 4));
    }
}
