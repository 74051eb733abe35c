//! Driver binding used by the service layer

/// The part of a GL driver the service layer talks to directly
///
/// Everything here must be called on the thread that owns the context. Service ids are the raw
/// object names handed out by the driver.
pub trait GlApi {
    /// Pop the next error from the driver's error queue
    fn get_error(&self) -> u32;

    /// Delete renderbuffer objects by service id
    fn delete_renderbuffers(&self, service_ids: &[u32]);

    /// Query a string parameter such as `GL_VERSION`
    fn get_string(&self, pname: u32) -> String;

    /// Query a single integer parameter such as `GL_MAX_RENDERBUFFER_SIZE`
    fn get_integer(&self, pname: u32) -> i32;

    fn has_extension(&self, name: &str) -> bool;
}

#[cfg(not(target_arch = "wasm32"))]
impl GlApi for glow::Context {
    fn get_error(&self) -> u32 {
        use glow::HasContext;
        unsafe { HasContext::get_error(self) }
    }

    fn delete_renderbuffers(&self, service_ids: &[u32]) {
        use glow::HasContext;

        for id in service_ids {
            // Name 0 is never handed out by the driver
            if let Some(name) = std::num::NonZeroU32::new(*id) {
                unsafe { self.delete_renderbuffer(glow::NativeRenderbuffer(name)) };
            }
        }
    }

    fn get_string(&self, pname: u32) -> String {
        use glow::HasContext;
        unsafe { self.get_parameter_string(pname) }
    }

    fn get_integer(&self, pname: u32) -> i32 {
        use glow::HasContext;
        unsafe { self.get_parameter_i32(pname) }
    }

    fn has_extension(&self, name: &str) -> bool {
        use glow::HasContext;
        self.supported_extensions().contains(name)
    }
}
