//! Virtual GL error register
//!
//! Command validation records errors here instead of returning them. The next `glGetError` from
//! the client sees either the driver's own error or one of the synthesized ones, in GL order.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::context::GlApi;
use crate::gl;
use crate::logger::{Logger, Origin};
use crate::util::{self, ErrorBits};

/// Receives notifications about conditions the embedder must act on
pub trait ErrorStateClient {
    /// The driver reported that the context was lost
    fn on_context_lost_error(&self);

    /// A `GL_OUT_OF_MEMORY` error was recorded
    fn on_out_of_memory_error(&self);
}

pub struct ErrorState {
    gl: Rc<dyn GlApi>,
    client: Rc<dyn ErrorStateClient>,
    logger: Rc<Logger>,
    error_bits: Cell<ErrorBits>,
    last_error: RefCell<String>,
}

impl ErrorState {
    pub fn new(gl: Rc<dyn GlApi>, client: Rc<dyn ErrorStateClient>, logger: Rc<Logger>) -> Self {
        Self {
            gl,
            client,
            logger,
            error_bits: Cell::new(ErrorBits::empty()),
            last_error: RefCell::new(String::new()),
        }
    }

    pub fn logger(&self) -> &Rc<Logger> {
        &self.logger
    }

    /// Most recent message passed to [`ErrorState::set_gl_error`]
    pub fn last_error(&self) -> String {
        self.last_error.borrow().clone()
    }

    /// Errors recorded but not yet returned by [`ErrorState::get_gl_error`]
    pub fn pending_errors(&self) -> ErrorBits {
        self.error_bits.get()
    }

    /// Pop the next error, driver errors first
    pub fn get_gl_error(&self) -> u32 {
        let mut error = self.get_error_handle_context_loss();
        let bits = self.error_bits.get();

        if error == gl::NO_ERROR {
            if let Some(bit) = bits.lowest() {
                error = util::gl_error_bit_to_gl_error(bit);
            }
        }

        // A driver error also consumes the matching synthesized one
        if error != gl::NO_ERROR {
            self.error_bits
                .set(bits - util::gl_error_to_error_bit(error));
        }

        log::trace!("get_gl_error: {}", util::get_string_error(error));
        error
    }

    /// Pop the driver's next error, turning context loss into a client notification
    ///
    /// Context loss is not exposed as an error code since clients of the command buffer do not see
    /// the robustness extension that defines it.
    pub fn get_error_handle_context_loss(&self) -> u32 {
        let error = self.gl.get_error();

        if error == gl::CONTEXT_LOST_KHR {
            log::debug!("driver reported context loss");
            self.client.on_context_lost_error();
            gl::NO_ERROR
        } else {
            error
        }
    }

    /// Record `error`; a non-empty `msg` is also logged and kept as the last error message
    pub fn set_gl_error(&self, origin: Origin, error: u32, function_name: &str, msg: &str) {
        if !msg.is_empty() {
            *self.last_error.borrow_mut() = msg.to_owned();

            if self.logger.log_synthesized_gl_errors() {
                self.logger.log_message(
                    origin,
                    &format!(
                        "GL ERROR: {} : {}: {}",
                        util::get_string_enum(error),
                        function_name,
                        msg
                    ),
                );
            }
        }

        self.error_bits
            .set(self.error_bits.get() | util::gl_error_to_error_bit(error));

        if error == gl::OUT_OF_MEMORY {
            self.client.on_out_of_memory_error();
        }
    }

    pub fn set_gl_error_invalid_enum(
        &self,
        origin: Origin,
        function_name: &str,
        value: u32,
        label: &str,
    ) {
        self.set_gl_error(
            origin,
            gl::INVALID_ENUM,
            function_name,
            &format!("{} was {}", label, util::get_string_enum(value)),
        );
    }

    /// Record a bad integer parameter; with `GL_INVALID_ENUM` the value is shown as an enum
    pub fn set_gl_error_invalid_parami(
        &self,
        origin: Origin,
        error: u32,
        function_name: &str,
        pname: u32,
        param: i32,
    ) {
        let value = if error == gl::INVALID_ENUM {
            util::get_string_enum(param as u32)
        } else {
            param.to_string()
        };

        self.set_gl_error(
            origin,
            error,
            function_name,
            &format!("trying to set {} to {}", util::get_string_enum(pname), value),
        );
    }

    /// Record a bad float parameter; with `GL_INVALID_ENUM` the value is shown as an enum
    pub fn set_gl_error_invalid_paramf(
        &self,
        origin: Origin,
        error: u32,
        function_name: &str,
        pname: u32,
        param: f32,
    ) {
        let value = if error == gl::INVALID_ENUM {
            util::get_string_enum(param as u32)
        } else {
            param.to_string()
        };

        self.set_gl_error(
            origin,
            error,
            function_name,
            &format!("trying to set {} to {}", util::get_string_enum(pname), value),
        );
    }

    /// Read the driver's next error and record it as a synthesized one
    ///
    /// Pending synthesized errors are left untouched.
    pub fn peek_gl_error(&self, origin: Origin, function_name: &str) -> u32 {
        let error = self.get_error_handle_context_loss();

        if error != gl::NO_ERROR {
            self.set_gl_error(origin, error, function_name, "<- error peeked from the driver");
        }

        error
    }

    /// Move every pending driver error into the synthesized set
    pub fn copy_real_gl_errors_to_wrapper(&self, origin: Origin, function_name: &str) {
        loop {
            let error = self.get_error_handle_context_loss();
            if error == gl::NO_ERROR {
                break;
            }

            self.set_gl_error(
                origin,
                error,
                function_name,
                "<- error from previous GL command",
            );
        }
    }

    /// Drain the driver's error queue without recording anything
    ///
    /// # Panics
    ///
    /// Panics if the driver reports anything but context loss or out of memory, both of which can
    /// legitimately happen on a lost device. Callers use this on paths that must not produce
    /// driver errors.
    pub fn clear_real_gl_errors(&self, origin: Origin, function_name: &str) {
        loop {
            let error = self.gl.get_error();
            if error == gl::NO_ERROR {
                break;
            }

            if error != gl::CONTEXT_LOST_KHR && error != gl::OUT_OF_MEMORY {
                self.logger.log_message(
                    origin,
                    &format!(
                        "GL ERROR: {} : {}: was unhandled",
                        util::get_string_enum(error),
                        function_name
                    ),
                );

                panic!("GL error {} was unhandled", util::get_string_error(error));
            }
        }
    }
}
