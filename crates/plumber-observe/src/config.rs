use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::{LoggerFormat, LoggerLevel};

/// Logger configuration. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub level: LoggerLevel,
    /// Include event targets (module paths) in output.
    pub with_targets: bool,
    /// Allow ANSI colors; only honoured when stderr is a terminal.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Whether text output gets ANSI colors.
    ///
    /// Log lines go to stderr, so its terminal state decides: redirecting
    /// stdout keeps colors, redirecting stderr to a file drops them.
    pub fn should_use_color(&self) -> bool {
        self.color_for(std::io::stderr().is_terminal())
    }

    fn color_for(&self, writer_is_terminal: bool) -> bool {
        self.use_color && writer_is_terminal
    }
}
