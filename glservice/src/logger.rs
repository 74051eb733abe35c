//! Bounded diagnostic sink for GL errors

use std::cell::{Cell, RefCell};

use crate::debug_marker::DebugMarkerManager;

/// Target used for every record emitted by [`Logger`]
pub const LOG_TARGET: &str = "glservice";

/// Source location of the command that triggered a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub file: &'static str,
    pub line: u32,
}

impl Origin {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }
}

/// Capture the current source location as an [`Origin`]
#[macro_export]
macro_rules! origin {
    () => {
        $crate::logger::Origin::new(file!(), line!())
    };
}

/// Secondary message sink, called with the message sequence number and the prefixed message
pub type MsgCallback = Box<dyn FnMut(u32, &str)>;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Number of messages reported before the logger goes quiet
    pub max_messages: u32,
    /// Report every message, ignoring `max_messages`
    pub disable_error_limit: bool,
    /// Whether errors synthesized by validation are logged at all
    pub log_synthesized_gl_errors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_messages: 256,
            disable_error_limit: false,
            log_synthesized_gl_errors: true,
        }
    }
}

/// Per-context message sink
///
/// Messages go to the `log` facade at error level and to the optional message callback. Once
/// `max_messages` have been reported, a single warning is emitted and every further message is
/// dropped by both sinks.
pub struct Logger {
    prefix: String,
    max_messages: u32,
    disable_error_limit: bool,
    log_synthesized_gl_errors: Cell<bool>,
    message_count: Cell<u32>,
    limit_reported: Cell<bool>,
    markers: RefCell<DebugMarkerManager>,
    msg_callback: RefCell<Option<MsgCallback>>,
}

impl Logger {
    /// Create a logger; `prefix` identifies the context when no debug marker is active
    pub fn new(prefix: impl Into<String>, config: LoggerConfig) -> Self {
        Self {
            prefix: prefix.into(),
            max_messages: config.max_messages,
            disable_error_limit: config.disable_error_limit,
            log_synthesized_gl_errors: Cell::new(config.log_synthesized_gl_errors),
            message_count: Cell::new(0),
            limit_reported: Cell::new(false),
            markers: RefCell::new(DebugMarkerManager::new()),
            msg_callback: RefCell::new(None),
        }
    }

    pub fn log_message(&self, origin: Origin, msg: &str) {
        let count = self.message_count.get();

        if count < self.max_messages || self.disable_error_limit {
            let prefixed_msg = format!("{}: {}", self.log_prefix(), msg);
            self.message_count.set(count.saturating_add(1));

            // Build the record manually so it carries the command's location
            log::logger().log(
                &log::Record::builder()
                    .args(format_args!("{}", prefixed_msg))
                    .level(log::Level::Error)
                    .target(LOG_TARGET)
                    .module_path_static(Some(module_path!()))
                    .file_static(Some(origin.file))
                    .line(Some(origin.line))
                    .build(),
            );

            // Must not log through this logger again from inside the callback
            if let Some(callback) = self.msg_callback.borrow_mut().as_mut() {
                callback(count, &prefixed_msg);
            }
        } else if !self.limit_reported.get() {
            self.limit_reported.set(true);
            log::warn!(
                target: LOG_TARGET,
                "{}: too many GL errors, not reporting any more for this context",
                self.log_prefix()
            );
        }
    }

    /// Install the secondary sink, replacing any previous one
    pub fn set_msg_callback<F>(&self, callback: F)
    where
        F: FnMut(u32, &str) + 'static,
    {
        *self.msg_callback.borrow_mut() = Some(Box::new(callback));
    }

    pub fn clear_msg_callback(&self) {
        *self.msg_callback.borrow_mut() = None;
    }

    /// Current debug marker, or the context prefix when no marker is set
    pub fn log_prefix(&self) -> String {
        let markers = self.markers.borrow();
        let marker = markers.marker();

        if marker.is_empty() {
            self.prefix.clone()
        } else {
            marker.to_owned()
        }
    }

    pub fn message_count(&self) -> u32 {
        self.message_count.get()
    }

    pub fn log_synthesized_gl_errors(&self) -> bool {
        self.log_synthesized_gl_errors.get()
    }

    pub fn set_log_synthesized_gl_errors(&self, enabled: bool) {
        self.log_synthesized_gl_errors.set(enabled);
    }

    pub fn push_group_marker(&self, name: &str) {
        self.markers.borrow_mut().push_group(name);
    }

    pub fn pop_group_marker(&self) {
        self.markers.borrow_mut().pop_group();
    }

    pub fn set_marker(&self, marker: &str) {
        self.markers.borrow_mut().set_marker(marker);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::test_util::{capture_logs, captured};

    fn small_logger(max_messages: u32) -> Logger {
        Logger::new(
            "ctx",
            LoggerConfig {
                max_messages,
                ..Default::default()
            },
        )
    }

    #[test]
    fn formats_with_prefix_and_origin() {
        capture_logs();
        let logger = small_logger(4);

        logger.log_message(Origin::new("decoder.rs", 42), "bad things");

        let records = captured();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, log::Level::Error);
        assert_eq!(records[0].target, LOG_TARGET);
        assert_eq!(records[0].message, "ctx: bad things");
        assert_eq!(records[0].file.as_deref(), Some("decoder.rs"));
        assert_eq!(records[0].line, Some(42));
        assert_eq!(logger.message_count(), 1);
    }

    #[test]
    fn drops_after_cap() {
        capture_logs();
        let logger = small_logger(3);

        for i in 0..10 {
            logger.log_message(crate::origin!(), &format!("message {}", i));
        }

        assert_eq!(logger.message_count(), 3);

        let records = captured();
        let errors: Vec<_> = records
            .iter()
            .filter(|r| r.level == log::Level::Error)
            .map(|r| r.message.as_str())
            .collect();
        assert_eq!(errors, vec!["ctx: message 0", "ctx: message 1", "ctx: message 2"]);

        let warnings = records
            .iter()
            .filter(|r| r.level == log::Level::Warn)
            .count();
        assert_eq!(warnings, 1);
    }

    #[test]
    fn callback_shares_the_cap() {
        capture_logs();
        let logger = small_logger(2);
        let received = Rc::new(RefCell::new(Vec::new()));

        let sink = received.clone();
        logger.set_msg_callback(move |id, msg| sink.borrow_mut().push((id, msg.to_owned())));

        for _ in 0..5 {
            logger.log_message(crate::origin!(), "oops");
        }

        assert_eq!(
            *received.borrow(),
            vec![(0, "ctx: oops".to_owned()), (1, "ctx: oops".to_owned())]
        );
    }

    #[test]
    fn limit_can_be_disabled() {
        capture_logs();
        let logger = Logger::new(
            "ctx",
            LoggerConfig {
                max_messages: 1,
                disable_error_limit: true,
                ..Default::default()
            },
        );

        for _ in 0..5 {
            logger.log_message(crate::origin!(), "oops");
        }

        assert_eq!(logger.message_count(), 5);
        assert_eq!(captured().len(), 5);
    }

    #[test]
    fn marker_replaces_prefix() {
        capture_logs();
        let logger = small_logger(8);

        logger.push_group_marker("frame");
        logger.set_marker("draw");
        logger.log_message(crate::origin!(), "oops");
        logger.pop_group_marker();
        logger.log_message(crate::origin!(), "oops");

        let messages: Vec<_> = captured().into_iter().map(|r| r.message).collect();
        assert_eq!(messages, vec!["frame.draw: oops", "ctx: oops"]);
    }

    #[test]
    fn synthesized_flag_defaults_on() {
        let logger = small_logger(1);
        assert!(logger.log_synthesized_gl_errors());
        logger.set_log_synthesized_gl_errors(false);
        assert!(!logger.log_synthesized_gl_errors());
    }
}
