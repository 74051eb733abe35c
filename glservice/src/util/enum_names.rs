use crate::gl;

/// Name of a GL enum value
pub struct EnumToString {
    pub value: u32,
    pub name: &'static str,
}

macro_rules! enum_table {
    ($($name:ident),* $(,)?) => {
        &[$(EnumToString { value: gl::$name, name: concat!("GL_", stringify!($name)) }),*]
    };
}

static ERROR_NAMES: &[EnumToString] = enum_table![
    NO_ERROR,
    INVALID_ENUM,
    INVALID_VALUE,
    INVALID_OPERATION,
    OUT_OF_MEMORY,
    INVALID_FRAMEBUFFER_OPERATION,
    CONTEXT_LOST_KHR,
];

// Values shared between several enums (GL_NONE/GL_ZERO/GL_NO_ERROR, GL_ONE/GL_TRUE) are listed
// once, under the name GL error messages expect.
static ENUM_NAMES: &[EnumToString] = enum_table![
    // Errors
    NO_ERROR,
    INVALID_ENUM,
    INVALID_VALUE,
    INVALID_OPERATION,
    OUT_OF_MEMORY,
    INVALID_FRAMEBUFFER_OPERATION,
    CONTEXT_LOST_KHR,
    // Pixel formats
    ALPHA,
    RGB,
    RGBA,
    LUMINANCE,
    LUMINANCE_ALPHA,
    RED,
    RG,
    BGRA_EXT,
    DEPTH_COMPONENT,
    DEPTH_STENCIL,
    // Pixel types
    BYTE,
    UNSIGNED_BYTE,
    SHORT,
    UNSIGNED_SHORT,
    INT,
    UNSIGNED_INT,
    FLOAT,
    HALF_FLOAT,
    HALF_FLOAT_OES,
    UNSIGNED_SHORT_4_4_4_4,
    UNSIGNED_SHORT_5_5_5_1,
    UNSIGNED_SHORT_5_6_5,
    UNSIGNED_INT_24_8,
    UNSIGNED_INT_2_10_10_10_REV,
    UNSIGNED_INT_10F_11F_11F_REV,
    UNSIGNED_INT_5_9_9_9_REV,
    FLOAT_32_UNSIGNED_INT_24_8_REV,
    // Renderbuffer formats
    RGBA4,
    RGB5_A1,
    RGB565,
    RGB8_OES,
    RGBA8_OES,
    DEPTH_COMPONENT16,
    DEPTH_COMPONENT24_OES,
    DEPTH24_STENCIL8_OES,
    STENCIL_INDEX8,
    // Objects and targets
    RENDERBUFFER,
    FRAMEBUFFER,
    TEXTURE_2D,
    TEXTURE_CUBE_MAP,
    ARRAY_BUFFER,
    ELEMENT_ARRAY_BUFFER,
    // Renderbuffer parameters
    RENDERBUFFER_WIDTH,
    RENDERBUFFER_HEIGHT,
    RENDERBUFFER_INTERNAL_FORMAT,
    RENDERBUFFER_SAMPLES,
    // Texture parameters
    TEXTURE_MIN_FILTER,
    TEXTURE_MAG_FILTER,
    TEXTURE_WRAP_S,
    TEXTURE_WRAP_T,
    NEAREST,
    LINEAR,
    NEAREST_MIPMAP_NEAREST,
    LINEAR_MIPMAP_NEAREST,
    NEAREST_MIPMAP_LINEAR,
    LINEAR_MIPMAP_LINEAR,
    REPEAT,
    CLAMP_TO_EDGE,
    MIRRORED_REPEAT,
    // Pixel store
    PACK_ALIGNMENT,
    UNPACK_ALIGNMENT,
    // Implementation limits
    MAX_RENDERBUFFER_SIZE,
    MAX_SAMPLES,
    MAX_TEXTURE_SIZE,
    VERSION,
    EXTENSIONS,
];

fn lookup(table: &[EnumToString], value: u32) -> Option<&'static str> {
    table.iter().find(|e| e.value == value).map(|e| e.name)
}

fn hex_string(value: u32) -> String {
    format!("0x{:04X}", value)
}

/// Name of any known GL enum, or its hex value
pub fn get_string_enum(value: u32) -> String {
    lookup(ENUM_NAMES, value)
        .map(str::to_owned)
        .unwrap_or_else(|| hex_string(value))
}

/// Name of a GL error code, or its hex value
pub fn get_string_error(value: u32) -> String {
    lookup(ERROR_NAMES, value)
        .map(str::to_owned)
        .unwrap_or_else(|| hex_string(value))
}

pub fn get_string_bool(value: u32) -> &'static str {
    if value != 0 {
        "GL_TRUE"
    } else {
        "GL_FALSE"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_enums() {
        assert_eq!(get_string_enum(gl::INVALID_ENUM), "GL_INVALID_ENUM");
        assert_eq!(get_string_enum(gl::RGBA4), "GL_RGBA4");
        assert_eq!(get_string_enum(gl::NO_ERROR), "GL_NO_ERROR");
        assert_eq!(get_string_enum(gl::TEXTURE_MAG_FILTER), "GL_TEXTURE_MAG_FILTER");
    }

    #[test]
    fn unknown_enums_are_hex() {
        assert_eq!(get_string_enum(0x1234_5678), "0x12345678");
        assert_eq!(get_string_enum(0x12), "0x0012");
        assert_eq!(get_string_error(gl::RGBA4), "0x8056");
    }

    #[test]
    fn errors() {
        assert_eq!(get_string_error(gl::OUT_OF_MEMORY), "GL_OUT_OF_MEMORY");
        assert_eq!(get_string_error(gl::CONTEXT_LOST_KHR), "GL_CONTEXT_LOST_KHR");
    }

    #[test]
    fn bools() {
        assert_eq!(get_string_bool(0), "GL_FALSE");
        assert_eq!(get_string_bool(1), "GL_TRUE");
        assert_eq!(get_string_bool(7), "GL_TRUE");
    }
}
