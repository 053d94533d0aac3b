//! Logging configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

use crate::logging::{LogFormat, LogOutput};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Env: CG_LOG_LEVEL
    pub level: String,
    /// `human`, `json` or `logfmt`
    /// Env: CG_LOG_FORMAT
    pub format: String,
    /// `stdout` or `stderr`
    pub output: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "human".to_string(), output: "stderr".to_string() }
    }
}

impl LoggingConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(level) = env::var("CG_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(format) = env::var("CG_LOG_FORMAT") {
            self.format = format;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.level.parse::<log::LevelFilter>().is_err() {
            bail!("Invalid log level: {}", self.level);
        }
        Ok(())
    }

    /// Logger settings for [`crate::logging::init_logging`]
    ///
    /// Unknown format or output names fall back to the defaults.
    pub fn to_logger_config(&self) -> crate::logging::LoggingConfig {
        let level = self.level.parse::<log::LevelFilter>().unwrap_or(log::LevelFilter::Info);
        let format = match self.format.to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "logfmt" => LogFormat::Logfmt,
            _ => LogFormat::Human,
        };
        let output = match self.output.to_ascii_lowercase().as_str() {
            "stdout" => LogOutput::Stdout,
            _ => LogOutput::Stderr,
        };

        crate::logging::LoggingConfig::new().with_level(level).with_format(format).with_output(output)
    }
}
