//! Log outputs and the entry passed to formatters

use std::collections::HashMap;

use crate::diagnostics::DIAGNOSTIC_TARGET;
use crate::logging::LoggingConfig;

/// Where log lines are written
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
}

/// A structured log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub level: log::Level,
    pub message: String,
    /// Usually the module path
    pub target: String,
    pub fields: HashMap<String, serde_json::Value>,
    /// `file:line` when the record carries it
    pub location: Option<(String, u32)>,
}

impl LogEntry {
    pub fn new(level: log::Level, message: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now(),
            level,
            message: message.into(),
            target: target.into(),
            fields: HashMap::new(),
            location: None,
        }
    }

    /// Build an entry from a `log` record
    ///
    /// Configuration diagnostics (`[code] detail`) get their code split out
    /// into a `diagnostic` field.
    pub fn from_log_record(record: &log::Record, config: &LoggingConfig) -> Self {
        let mut entry = Self::new(record.level(), record.args().to_string(), record.target());

        if let (Some(file), Some(line)) = (record.file(), record.line()) {
            entry.location = Some((file.to_string(), line));
        }

        for (key, value) in &config.context_fields {
            entry.fields.insert(key.clone(), serde_json::Value::String(value.clone()));
        }

        if entry.target == DIAGNOSTIC_TARGET {
            if let Some((code, detail)) = split_diagnostic(&entry.message) {
                let (code, detail) = (code.to_string(), detail.to_string());
                entry.fields.insert("diagnostic".to_string(), serde_json::Value::String(code));
                entry.message = detail;
            }
        }

        entry
    }

    pub fn with_field(mut self, key: &str, value: serde_json::Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }
}

fn split_diagnostic(message: &str) -> Option<(&str, &str)> {
    let rest = message.strip_prefix('[')?;
    let (code, detail) = rest.split_once(']')?;
    Some((code, detail.trim_start()))
}
