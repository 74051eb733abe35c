//! Exposed OpenGL enums
//!
//! Desktop bindings are re-exported as-is. The constants below are GLES2 or extension enums that
//! command-buffer clients send but that are missing from (or renamed in) the desktop headers.

pub use ::glow::*;

pub const ALPHA: u32 = 0x1906;
pub const LUMINANCE: u32 = 0x1909;
pub const LUMINANCE_ALPHA: u32 = 0x190A;

pub const BGRA_EXT: u32 = 0x80E1;
pub const HALF_FLOAT_OES: u32 = 0x8D61;
pub const UNSIGNED_INT_24_8_OES: u32 = 0x84FA;

pub const RGB8_OES: u32 = 0x8051;
pub const RGBA8_OES: u32 = 0x8058;
pub const DEPTH_COMPONENT24_OES: u32 = 0x81A6;
pub const DEPTH24_STENCIL8_OES: u32 = 0x88F0;

pub const CONTEXT_LOST_KHR: u32 = 0x0507;

pub const ALIASED_POINT_SIZE_RANGE: u32 = 0x846D;
pub const MAX_VERTEX_UNIFORM_VECTORS: u32 = 0x8DFB;
pub const MAX_FRAGMENT_UNIFORM_VECTORS: u32 = 0x8DFD;
pub const MAX_VARYING_VECTORS: u32 = 0x8DFC;
