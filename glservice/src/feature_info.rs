//! Driver capabilities relevant to the service layer

use scan_fmt::scan_fmt;

use crate::context::GlApi;
use crate::gl;

#[derive(thiserror::Error, Debug)]
pub enum FeatureError {
    /// `GL_VERSION` did not start with a `major.minor` version
    #[error("Unrecognized GL version string: {0:?}")]
    UnrecognizedVersion(String),
    /// The driver reported a nonsensical implementation limit
    #[error("Invalid value {value} for {name}")]
    InvalidLimit { name: &'static str, value: i32 },
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct GlVersion {
    pub major: i32,
    pub minor: i32,
}

impl GlVersion {
    pub const fn new(major: i32, minor: i32) -> Self {
        GlVersion { major, minor }
    }
}

/// Capabilities of the driver a context runs on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureInfo {
    pub version: GlVersion,
    /// The driver natively implements OpenGL ES
    pub is_es: bool,
    /// 24-bit depth renderbuffers are available
    pub oes_depth24: bool,
    pub max_renderbuffer_size: i32,
    pub max_samples: i32,
}

impl FeatureInfo {
    /// Capabilities for a driver reporting `version_string`, with no renderbuffer support yet
    pub fn new(version_string: &str) -> Result<Self, FeatureError> {
        let is_es = version_string.starts_with("OpenGL ES");
        let version = parse_version(version_string)?;

        Ok(Self {
            version,
            is_es,
            // Desktop GL always has 24-bit depth
            oes_depth24: !is_es,
            max_renderbuffer_size: 0,
            max_samples: 0,
        })
    }

    /// Query capabilities from a current context
    pub fn initialize(gl: &dyn GlApi) -> Result<Self, FeatureError> {
        let version_string = gl.get_string(gl::VERSION);
        let mut info = Self::new(&version_string)?;

        if info.is_es {
            info.oes_depth24 = gl.has_extension("GL_OES_depth24");
        }

        let max_renderbuffer_size = gl.get_integer(gl::MAX_RENDERBUFFER_SIZE);
        if max_renderbuffer_size <= 0 {
            return Err(FeatureError::InvalidLimit {
                name: "GL_MAX_RENDERBUFFER_SIZE",
                value: max_renderbuffer_size,
            });
        }

        let max_samples = gl.get_integer(gl::MAX_SAMPLES);
        if max_samples < 0 {
            return Err(FeatureError::InvalidLimit {
                name: "GL_MAX_SAMPLES",
                value: max_samples,
            });
        }

        info.max_renderbuffer_size = max_renderbuffer_size;
        info.max_samples = max_samples;

        log::info!(
            "GL {}.{}{}, max renderbuffer size {}, max samples {}, depth24: {}",
            info.version.major,
            info.version.minor,
            if info.is_es { " ES" } else { "" },
            info.max_renderbuffer_size,
            info.max_samples,
            info.oes_depth24
        );

        Ok(info)
    }

    pub fn with_depth24(mut self, oes_depth24: bool) -> Self {
        self.oes_depth24 = oes_depth24;
        self
    }

    pub fn with_limits(mut self, max_renderbuffer_size: i32, max_samples: i32) -> Self {
        self.max_renderbuffer_size = max_renderbuffer_size;
        self.max_samples = max_samples;
        self
    }
}

fn parse_version(version_string: &str) -> Result<GlVersion, FeatureError> {
    scan_fmt!(version_string, "{d}.{d}", i32, i32)
        .or_else(|_| scan_fmt!(version_string, "OpenGL ES {d}.{d}", i32, i32))
        .map(|(major, minor)| GlVersion::new(major, minor))
        .map_err(|_| FeatureError::UnrecognizedVersion(version_string.to_owned()))
}
