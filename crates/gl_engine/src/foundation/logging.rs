//! Logging setup and the engine's logging collaborator
//!
//! The global `env_logger` backend is installed once with [`init`], early in
//! `main`. Engine components never log through hidden globals of their own;
//! they are handed a [`Logger`] that tags every message with its target.

use std::fmt;
use std::sync::Once;

use log::{Level, LevelFilter};

pub use log::{debug, error, info, trace, warn};

/// Backend configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset, in `env_logger` syntax
    pub default_filter: String,
    /// ANSI coloring behavior
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Install the global logger
///
/// `RUST_LOG` wins over `config.default_filter`. Later calls are ignored.
pub fn init(config: &LoggingConfig) {
    INIT.call_once(|| {
        let env = env_logger::Env::default().default_filter_or(config.default_filter.as_str());
        let result = env_logger::Builder::from_env(env)
            .write_style(config.write_style)
            .format_timestamp_millis()
            .try_init();

        if let Err(err) = result {
            eprintln!("logger already installed: {err}");
        }
        log::debug!("logging initialized");
    });
}

/// Explicitly constructed logging collaborator
///
/// Forwards plain strings to the `log` facade under a fixed target. Cloning is
/// cheap and clones log under the same target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    target: String,
    max_level: LevelFilter,
}

impl Logger {
    /// Logger for `target` passing every level
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            max_level: LevelFilter::Trace,
        }
    }

    /// Restrict the levels this logger forwards
    #[must_use]
    pub const fn with_level(mut self, max_level: LevelFilter) -> Self {
        self.max_level = max_level;
        self
    }

    /// Target attached to every record
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Most verbose level forwarded
    pub const fn max_level(&self) -> LevelFilter {
        self.max_level
    }

    /// Whether a message at `level` passes this logger's own filter
    ///
    /// The global backend may still drop it.
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }

    /// Forward `message` at `level`
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        if self.enabled(level) {
            log::log!(target: self.target.as_str(), level, "{message}");
        }
    }

    /// Forward at [`Level::Trace`]
    pub fn trace(&self, message: impl fmt::Display) {
        self.log(Level::Trace, message);
    }

    /// Forward at [`Level::Debug`]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, message);
    }

    /// Forward at [`Level::Info`]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    /// Forward at [`Level::Warn`]
    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Level::Warn, message);
    }

    /// Forward at [`Level::Error`]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new("game")
    }
}
