//! Service-side helpers for a GL command buffer decoder
//!
//! Tracks the errors the decoder reports to clients, logs them without flooding, and keeps the
//! registry of renderbuffer objects along with the memory they use.

mod context;
pub use context::*;

pub mod gl;
pub mod log;
pub mod util;

mod debug_marker;
pub use debug_marker::*;

pub mod logger;
pub use logger::{Logger, LoggerConfig, Origin};

mod error_state;
pub use error_state::*;

mod feature_info;
pub use feature_info::*;

mod memory_tracker;
pub use memory_tracker::*;

mod renderbuffer_manager;
pub use renderbuffer_manager::*;

#[cfg(test)]
mod test_util;

pub use glow;

pub mod prelude {
    pub use super::GlApi;
    pub use super::{ErrorState, ErrorStateClient};
    pub use super::{Logger, LoggerConfig};
    pub use super::{Renderbuffer, RenderbufferManager};

    pub use super::origin;

    pub use cgmath;
}
