//! Logger settings

use crate::logging::{LogFormat, LogOutput};
use std::collections::HashMap;

/// Settings for the process-wide logger
///
/// The TOML `[logging]` section (`crate::config::LoggingConfig`) is turned into
/// one of these by `to_logger_config`.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Most verbose level that is written
    pub level: log::LevelFilter,
    pub output: LogOutput,
    pub format: LogFormat,
    /// Fields added to every entry
    pub context_fields: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: log::LevelFilter::Info,
            output: LogOutput::Stderr,
            format: LogFormat::Human,
            context_fields: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON on stdout, for log collectors
    pub fn production() -> Self {
        Self { output: LogOutput::Stdout, format: LogFormat::Json, ..Self::default() }
    }

    pub fn development() -> Self {
        Self { level: log::LevelFilter::Debug, ..Self::default() }
    }

    pub fn with_level(mut self, level: log::LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_context_field(mut self, key: &str, value: &str) -> Self {
        self.context_fields.insert(key.to_string(), value.to_string());
        self
    }
}
