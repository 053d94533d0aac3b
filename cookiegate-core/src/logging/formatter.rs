//! Log line formats

use crate::logging::destinations::LogEntry;

/// How log lines are rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// `2024-01-15 10:30:00.000 WARN  [cookiegate::config] ... diagnostic=duplicate-name`
    Human,
    /// One JSON object per line
    Json,
    /// `key=value` pairs
    Logfmt,
}

impl LogFormat {
    pub fn format_entry(&self, entry: &LogEntry) -> String {
        match self {
            LogFormat::Json => format_json(entry),
            LogFormat::Human => format_human(entry),
            LogFormat::Logfmt => format_logfmt(entry),
        }
    }
}

fn field_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Fields in key order so output is stable
fn sorted_fields(entry: &LogEntry) -> Vec<(&String, &serde_json::Value)> {
    let mut fields: Vec<_> = entry.fields.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));
    fields
}

fn format_json(entry: &LogEntry) -> String {
    let mut json = serde_json::Map::new();

    json.insert("timestamp".to_string(), serde_json::Value::String(entry.timestamp.to_rfc3339()));
    json.insert("level".to_string(), serde_json::Value::String(entry.level.to_string()));
    json.insert("message".to_string(), serde_json::Value::String(entry.message.clone()));
    json.insert("target".to_string(), serde_json::Value::String(entry.target.clone()));

    if let Some((file, line)) = &entry.location {
        json.insert("file".to_string(), serde_json::Value::String(file.clone()));
        json.insert("line".to_string(), serde_json::Value::Number(serde_json::Number::from(*line)));
    }

    for (key, value) in &entry.fields {
        json.insert(key.clone(), value.clone());
    }

    serde_json::to_string(&json).unwrap_or_else(|_| "Failed to serialize log entry".to_string())
}

fn format_human(entry: &LogEntry) -> String {
    let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f");
    let mut message = format!("{} {:5} [{}] {}", timestamp, entry.level, entry.target, entry.message);

    for (key, value) in sorted_fields(entry) {
        message.push_str(&format!(" {}={}", key, field_text(value)));
    }

    message
}

fn format_logfmt(entry: &LogEntry) -> String {
    let mut parts = vec![
        format!("timestamp={}", entry.timestamp.to_rfc3339()),
        format!("level={}", entry.level),
        format!("target={}", entry.target),
        format!("message=\"{}\"", entry.message.replace('"', "\\\"")),
    ];

    for (key, value) in sorted_fields(entry) {
        let value = match value {
            serde_json::Value::Number(_) | serde_json::Value::Bool(_) => value.to_string(),
            _ => format!("\"{}\"", field_text(value).replace('"', "\\\"")),
        };
        parts.push(format!("{}={}", key, value));
    }

    parts.join(" ")
}
