use super::safe_math::{safe_add_uint32, safe_multiply_uint32};
use crate::gl;

/// Byte sizes of an image upload as laid out in client memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDataSizes {
    /// Total bytes; the last row is not padded
    pub size: u32,
    pub unpadded_row_size: u32,
    pub padded_row_size: u32,
}

/// Size in bytes of one element of `ty`, 0 when unknown
pub fn bytes_per_element(ty: u32) -> u32 {
    match ty {
        gl::FLOAT_32_UNSIGNED_INT_24_8_REV => 8,
        gl::FLOAT
        | gl::UNSIGNED_INT_24_8_OES
        | gl::UNSIGNED_INT
        | gl::INT
        | gl::UNSIGNED_INT_2_10_10_10_REV
        | gl::UNSIGNED_INT_10F_11F_11F_REV
        | gl::UNSIGNED_INT_5_9_9_9_REV => 4,
        gl::HALF_FLOAT
        | gl::HALF_FLOAT_OES
        | gl::UNSIGNED_SHORT
        | gl::SHORT
        | gl::UNSIGNED_SHORT_5_6_5
        | gl::UNSIGNED_SHORT_4_4_4_4
        | gl::UNSIGNED_SHORT_5_5_5_1 => 2,
        gl::UNSIGNED_BYTE | gl::BYTE => 1,
        _ => 0,
    }
}

/// Number of elements making up one pixel, 0 when unknown
pub fn elements_per_group(format: u32, ty: u32) -> u32 {
    match ty {
        // Packed types hold the whole pixel in one element
        gl::UNSIGNED_SHORT_5_6_5
        | gl::UNSIGNED_SHORT_4_4_4_4
        | gl::UNSIGNED_SHORT_5_5_5_1
        | gl::UNSIGNED_INT_24_8_OES
        | gl::UNSIGNED_INT_2_10_10_10_REV
        | gl::UNSIGNED_INT_10F_11F_11F_REV
        | gl::UNSIGNED_INT_5_9_9_9_REV
        | gl::FLOAT_32_UNSIGNED_INT_24_8_REV => 1,
        _ => match format {
            gl::RGB => 3,
            gl::LUMINANCE_ALPHA | gl::RG => 2,
            gl::RGBA | gl::BGRA_EXT => 4,
            gl::ALPHA
            | gl::LUMINANCE
            | gl::RED
            | gl::DEPTH_COMPONENT
            | gl::DEPTH_COMPONENT24_OES
            | gl::DEPTH_COMPONENT16 => 1,
            _ => 0,
        },
    }
}

/// Bytes per pixel for a (format, type) pair, 0 when the pair is not recognized
pub fn compute_image_group_size(format: u32, ty: u32) -> u32 {
    bytes_per_element(ty) * elements_per_group(format, ty)
}

fn pad_row(unpadded_row_size: u32, unpack_alignment: u32) -> Option<u32> {
    debug_assert!(
        [1, 2, 4, 8].contains(&unpack_alignment),
        "invalid unpack alignment {}",
        unpack_alignment
    );

    let temp = safe_add_uint32(unpadded_row_size, unpack_alignment - 1)?;
    Some(temp / unpack_alignment * unpack_alignment)
}

/// Row size of an image rounded up to `unpack_alignment`
pub fn compute_image_padded_row_size(
    width: u32,
    format: u32,
    ty: u32,
    unpack_alignment: u32,
) -> Option<u32> {
    let bytes_per_group = compute_image_group_size(format, ty);
    if bytes_per_group == 0 {
        return None;
    }

    let unpadded_row_size = safe_multiply_uint32(width, bytes_per_group)?;
    pad_row(unpadded_row_size, unpack_alignment)
}

/// Compute the client memory footprint of a `width * height * depth` image
///
/// Rows are padded to `unpack_alignment` except for the very last one. Fails on overflow.
pub fn compute_image_data_sizes(
    width: u32,
    height: u32,
    depth: u32,
    format: u32,
    ty: u32,
    unpack_alignment: u32,
) -> Option<ImageDataSizes> {
    let bytes_per_group = compute_image_group_size(format, ty);
    let row_size = safe_multiply_uint32(width, bytes_per_group)?;
    let num_rows = safe_multiply_uint32(height, depth)?;

    if num_rows > 1 {
        let padded_row_size = pad_row(row_size, unpack_alignment)?;
        let all_but_last_row = safe_multiply_uint32(num_rows - 1, padded_row_size)?;

        Some(ImageDataSizes {
            size: safe_add_uint32(all_but_last_row, row_size)?,
            unpadded_row_size: row_size,
            padded_row_size,
        })
    } else {
        Some(ImageDataSizes {
            size: safe_multiply_uint32(num_rows, row_size)?,
            unpadded_row_size: row_size,
            padded_row_size: row_size,
        })
    }
}

/// Bytes per pixel of a renderbuffer storage format, 0 when unknown
pub fn renderbuffer_bytes_per_pixel(format: u32) -> u32 {
    match format {
        gl::STENCIL_INDEX8 => 1,
        gl::RGBA4 | gl::RGB565 | gl::RGB5_A1 | gl::DEPTH_COMPONENT16 => 2,
        gl::RGB
        | gl::RGBA
        | gl::DEPTH24_STENCIL8_OES
        | gl::RGB8_OES
        | gl::RGBA8_OES
        | gl::DEPTH_COMPONENT24_OES => 4,
        _ => 0,
    }
}
