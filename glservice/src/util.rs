//! Stateless GL helpers: enum names, image size arithmetic, error bits and uniform names

mod enum_names;
pub use enum_names::*;

mod image;
pub use image::*;

mod safe_math;
pub use safe_math::*;

mod uniform;
pub use uniform::*;

use crate::gl;

bitflags::bitflags! {
    /// Set of pending GL errors, one bit per error code
    ///
    /// Bit order is the order in which pending errors are reported.
    #[derive(Default)]
    pub struct ErrorBits: u32 {
        const INVALID_ENUM = 1 << 0;
        const INVALID_VALUE = 1 << 1;
        const INVALID_OPERATION = 1 << 2;
        const OUT_OF_MEMORY = 1 << 3;
        const INVALID_FRAMEBUFFER_OPERATION = 1 << 4;
        const CONTEXT_LOST = 1 << 5;
    }
}

/// Map a GL error code to its bit, empty for `GL_NO_ERROR` and unknown codes
pub fn gl_error_to_error_bit(error: u32) -> ErrorBits {
    match error {
        gl::INVALID_ENUM => ErrorBits::INVALID_ENUM,
        gl::INVALID_VALUE => ErrorBits::INVALID_VALUE,
        gl::INVALID_OPERATION => ErrorBits::INVALID_OPERATION,
        gl::OUT_OF_MEMORY => ErrorBits::OUT_OF_MEMORY,
        gl::INVALID_FRAMEBUFFER_OPERATION => ErrorBits::INVALID_FRAMEBUFFER_OPERATION,
        gl::CONTEXT_LOST_KHR => ErrorBits::CONTEXT_LOST,
        _ => ErrorBits::empty(),
    }
}

/// Map a single error bit back to its GL error code, `GL_NO_ERROR` for anything else
pub fn gl_error_bit_to_gl_error(bit: ErrorBits) -> u32 {
    if bit == ErrorBits::INVALID_ENUM {
        gl::INVALID_ENUM
    } else if bit == ErrorBits::INVALID_VALUE {
        gl::INVALID_VALUE
    } else if bit == ErrorBits::INVALID_OPERATION {
        gl::INVALID_OPERATION
    } else if bit == ErrorBits::OUT_OF_MEMORY {
        gl::OUT_OF_MEMORY
    } else if bit == ErrorBits::INVALID_FRAMEBUFFER_OPERATION {
        gl::INVALID_FRAMEBUFFER_OPERATION
    } else if bit == ErrorBits::CONTEXT_LOST {
        gl::CONTEXT_LOST_KHR
    } else {
        gl::NO_ERROR
    }
}

impl ErrorBits {
    /// The pending bit reported first, scanning from bit 0 upwards
    pub fn lowest(self) -> Option<ErrorBits> {
        if self.is_empty() {
            None
        } else {
            Some(ErrorBits::from_bits_truncate(1 << self.bits().trailing_zeros()))
        }
    }
}

/// Per-context helper state
///
/// The only state GL helpers need is the size of the two variable-length `glGet` results, which
/// depends on what the driver advertises.
#[derive(Debug, Default, Clone)]
pub struct GlesUtil {
    num_compressed_texture_formats: i32,
    num_shader_binary_formats: i32,
}

impl GlesUtil {
    pub fn new(num_compressed_texture_formats: i32, num_shader_binary_formats: i32) -> Self {
        Self {
            num_compressed_texture_formats,
            num_shader_binary_formats,
        }
    }

    pub fn num_compressed_texture_formats(&self) -> i32 {
        self.num_compressed_texture_formats
    }

    pub fn set_num_compressed_texture_formats(&mut self, num: i32) {
        self.num_compressed_texture_formats = num;
    }

    pub fn num_shader_binary_formats(&self) -> i32 {
        self.num_shader_binary_formats
    }

    pub fn set_num_shader_binary_formats(&mut self, num: i32) {
        self.num_shader_binary_formats = num;
    }

    /// Number of values a `glGet*` query for `pname` writes, 0 when `pname` is not a known state
    pub fn gl_get_num_values_returned(&self, pname: u32) -> i32 {
        match pname {
            gl::COMPRESSED_TEXTURE_FORMATS => self.num_compressed_texture_formats,
            gl::SHADER_BINARY_FORMATS => self.num_shader_binary_formats,
            gl::BLEND_COLOR
            | gl::COLOR_CLEAR_VALUE
            | gl::COLOR_WRITEMASK
            | gl::SCISSOR_BOX
            | gl::VIEWPORT => 4,
            gl::ALIASED_LINE_WIDTH_RANGE
            | gl::ALIASED_POINT_SIZE_RANGE
            | gl::DEPTH_RANGE
            | gl::MAX_VIEWPORT_DIMS => 2,
            gl::ACTIVE_TEXTURE
            | gl::ARRAY_BUFFER_BINDING
            | gl::ELEMENT_ARRAY_BUFFER_BINDING
            | gl::FRAMEBUFFER_BINDING
            | gl::RENDERBUFFER_BINDING
            | gl::CURRENT_PROGRAM
            | gl::TEXTURE_BINDING_2D
            | gl::TEXTURE_BINDING_CUBE_MAP
            | gl::PACK_ALIGNMENT
            | gl::UNPACK_ALIGNMENT
            | gl::MAX_RENDERBUFFER_SIZE
            | gl::MAX_SAMPLES
            | gl::MAX_TEXTURE_SIZE
            | gl::MAX_CUBE_MAP_TEXTURE_SIZE
            | gl::MAX_VERTEX_ATTRIBS
            | gl::MAX_TEXTURE_IMAGE_UNITS
            | gl::MAX_VERTEX_TEXTURE_IMAGE_UNITS
            | gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS
            | gl::MAX_VERTEX_UNIFORM_VECTORS
            | gl::MAX_FRAGMENT_UNIFORM_VECTORS
            | gl::MAX_VARYING_VECTORS
            | gl::NUM_COMPRESSED_TEXTURE_FORMATS
            | gl::NUM_SHADER_BINARY_FORMATS
            | gl::DEPTH_TEST
            | gl::BLEND
            | gl::CULL_FACE
            | gl::SCISSOR_TEST
            | gl::STENCIL_TEST => 1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ERRORS: [u32; 6] = [
        gl::INVALID_ENUM,
        gl::INVALID_VALUE,
        gl::INVALID_OPERATION,
        gl::OUT_OF_MEMORY,
        gl::INVALID_FRAMEBUFFER_OPERATION,
        gl::CONTEXT_LOST_KHR,
    ];

    #[test]
    fn error_bits_round_trip() {
        for (i, &error) in ERRORS.iter().enumerate() {
            let bit = gl_error_to_error_bit(error);
            assert_eq!(bit.bits(), 1 << i);
            assert_eq!(gl_error_bit_to_gl_error(bit), error);
        }
    }

    #[test]
    fn no_error_has_no_bit() {
        assert!(gl_error_to_error_bit(gl::NO_ERROR).is_empty());
        assert!(gl_error_to_error_bit(gl::RGBA4).is_empty());
        assert_eq!(gl_error_bit_to_gl_error(ErrorBits::empty()), gl::NO_ERROR);
        assert_eq!(
            gl_error_bit_to_gl_error(ErrorBits::INVALID_ENUM | ErrorBits::INVALID_VALUE),
            gl::NO_ERROR
        );
    }

    #[test]
    fn lowest_bit_first() {
        let bits = ErrorBits::OUT_OF_MEMORY | ErrorBits::INVALID_VALUE;
        assert_eq!(bits.lowest(), Some(ErrorBits::INVALID_VALUE));
        assert_eq!(ErrorBits::empty().lowest(), None);
    }

    #[test]
    fn num_values_returned() {
        let mut util = GlesUtil::new(3, 1);
        assert_eq!(util.gl_get_num_values_returned(gl::COMPRESSED_TEXTURE_FORMATS), 3);
        assert_eq!(util.gl_get_num_values_returned(gl::SHADER_BINARY_FORMATS), 1);
        assert_eq!(util.gl_get_num_values_returned(gl::VIEWPORT), 4);
        assert_eq!(util.gl_get_num_values_returned(gl::DEPTH_RANGE), 2);
        assert_eq!(util.gl_get_num_values_returned(gl::MAX_RENDERBUFFER_SIZE), 1);
        assert_eq!(util.gl_get_num_values_returned(gl::RGBA4), 0);

        util.set_num_compressed_texture_formats(7);
        assert_eq!(util.gl_get_num_values_returned(gl::COMPRESSED_TEXTURE_FORMATS), 7);
    }
}
