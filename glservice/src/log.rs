//! env_logger setup for embedders of the service

use std::sync::Once;

static INIT: Once = Once::new();

/// Logger builder configured from `GLSERVICE_LOG` and `GLSERVICE_LOG_STYLE`
pub fn builder() -> env_logger::Builder {
    env_logger::Builder::from_env(
        env_logger::Env::new()
            .filter_or("GLSERVICE_LOG", "glservice=info")
            .write_style("GLSERVICE_LOG_STYLE"),
    )
}

/// Install the global logger; later calls, or a logger installed by someone else, are ignored
pub fn init() {
    INIT.call_once(|| {
        if builder().try_init().is_err() {
            ::log::debug!("a logger is already installed, keeping it");
        }
    });
}
