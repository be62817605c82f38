//! Synthetic container builders shared by the unit tests.

use crate::cursor::ByteOrder;
use crate::header::{KTX_ENDIANNESS, KTX_IDENTIFIER};

fn put_u32(out: &mut Vec<u8>, order: ByteOrder, value: u32) {
    match order {
        ByteOrder::Little => out.extend_from_slice(&value.to_le_bytes()),
        ByteOrder::Big => out.extend_from_slice(&value.to_be_bytes()),
    }
}

fn pad_to_four(out: &mut Vec<u8>) {
    while out.len() % 4 != 0 {
        out.push(0);
    }
}

/// Encodes an ASTC header followed by `payload_len` bytes of block data.
pub(crate) fn astc_bytes(block: (u8, u8, u8), size: (u32, u32, u32), payload_len: usize) -> Vec<u8> {
    let mut out = vec![0x13, 0xAB, 0xA1, 0x5C, block.0, block.1, block.2];
    for value in [size.0, size.1, size.2] {
        out.extend_from_slice(&value.to_le_bytes()[..3]);
    }
    out.extend((0..payload_len).map(|i| i as u8));
    out
}

/// Encodes one key/value metadata record, padding included.
pub(crate) fn key_value_record(order: ByteOrder, key: &str, value: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    put_u32(&mut out, order, (key.len() + 1 + value.len()) as u32);
    out.extend_from_slice(key.as_bytes());
    out.push(0);
    out.extend_from_slice(value);
    pad_to_four(&mut out);
    out
}

/// Builds KTX v1 buffers in either byte order.
///
/// By default every level holds `sub_image_len` bytes per layer and face, filled
/// with the level index so slices can be told apart.
pub(crate) struct KtxBuilder {
    order: ByteOrder,
    gl_type: u32,
    gl_format: u32,
    gl_internal_format: u32,
    width: u32,
    height: u32,
    depth: u32,
    array_elements: u32,
    faces: u32,
    mip_levels: u32,
    key_value_data: Vec<u8>,
    sub_image_len: u32,
    image_sizes: Option<Vec<u32>>,
    per_face_image_size: bool,
}

impl KtxBuilder {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        KtxBuilder {
            order: ByteOrder::Little,
            gl_type: 0x1401, // GL_UNSIGNED_BYTE
            gl_format: 0x1908, // GL_RGBA
            gl_internal_format: 0x8058, // GL_RGBA8
            width,
            height,
            depth: 0,
            array_elements: 0,
            faces: 1,
            mip_levels: 1,
            key_value_data: Vec::new(),
            sub_image_len: 4,
            image_sizes: None,
            per_face_image_size: false,
        }
    }

    pub(crate) fn byte_order(mut self, order: ByteOrder) -> Self {
        self.order = order;
        self
    }

    /// Switches to a compressed internal format (`glType`/`glFormat` zero).
    pub(crate) fn gl_internal_format(mut self, internal: u32) -> Self {
        self.gl_type = 0;
        self.gl_format = 0;
        self.gl_internal_format = internal;
        self
    }

    pub(crate) fn depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub(crate) fn array_elements(mut self, count: u32) -> Self {
        self.array_elements = count;
        self
    }

    pub(crate) fn faces(mut self, count: u32) -> Self {
        self.faces = count;
        self
    }

    pub(crate) fn mip_levels(mut self, count: u32) -> Self {
        self.mip_levels = count;
        self
    }

    pub(crate) fn key_value_data(mut self, data: &[u8]) -> Self {
        self.key_value_data = data.to_vec();
        self
    }

    pub(crate) fn sub_image_len(mut self, len: u32) -> Self {
        self.sub_image_len = len;
        self
    }

    /// Overrides the `imageSize` fields written per level. Payload bytes still
    /// follow the default sizing.
    pub(crate) fn image_sizes(mut self, sizes: &[u32]) -> Self {
        self.image_sizes = Some(sizes.to_vec());
        self
    }

    /// Writes `imageSize` as the size of one face, padding each face.
    pub(crate) fn per_face_image_size(mut self) -> Self {
        self.per_face_image_size = true;
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let order = self.order;
        let mut out = KTX_IDENTIFIER.to_vec();
        put_u32(&mut out, order, KTX_ENDIANNESS);
        for value in [
            self.gl_type,
            1, // glTypeSize
            self.gl_format,
            self.gl_internal_format,
            0x1908, // glBaseInternalFormat
            self.width,
            self.height,
            self.depth,
            self.array_elements,
            self.faces,
            self.mip_levels,
            self.key_value_data.len() as u32,
        ] {
            put_u32(&mut out, order, value);
        }
        out.extend_from_slice(&self.key_value_data);

        let sub_images = self.array_elements.max(1) * self.faces.max(1);
        for level in 0..self.mip_levels.max(1) {
            let natural = if self.per_face_image_size {
                self.sub_image_len
            } else {
                self.sub_image_len * sub_images
            };
            let size = self
                .image_sizes
                .as_ref()
                .and_then(|sizes| sizes.get(level as usize).copied())
                .unwrap_or(natural);
            put_u32(&mut out, order, size);

            for _ in 0..sub_images {
                out.extend(std::iter::repeat_n(level as u8, self.sub_image_len as usize));
                if self.per_face_image_size {
                    pad_to_four(&mut out);
                }
            }
            pad_to_four(&mut out);
        }
        out
    }
}
