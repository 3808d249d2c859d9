//! Normalized log record

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The structured record produced by normalization and handed to a backend.
///
/// `level` and `timestamp` are always present; everything else (message,
/// caller metadata, error projections) lives in `fields`. Serializes flat:
///
/// ```json
/// {"level":"info","timestamp":"2025-01-08T10:30:45.123Z","message":"Hello","pid":123}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl LogRecord {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            fields: Map::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_message(self, message: impl Into<String>) -> Self {
        self.with_field("message", Value::String(message.into()))
    }

    /// The `message` field, when it is text.
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Whether the record carries `key`, counting `level` and `timestamp`.
    pub fn contains_key(&self, key: &str) -> bool {
        matches!(key, "level" | "timestamp") || self.fields.contains_key(key)
    }

    /// Field names in the record, `level` and `timestamp` first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        ["level", "timestamp"]
            .into_iter()
            .chain(self.fields.keys().map(String::as_str))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_only_required_keys() {
        let record = LogRecord::new(LogLevel::Info);
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["level", "timestamp"]);
        assert!(record.message().is_none());
    }

    #[test]
    fn test_flat_serialization() {
        let record = LogRecord::new(LogLevel::Warn)
            .with_message("disk almost full")
            .with_field("free_mb", 12);

        let parsed: Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(parsed["level"], "warn");
        assert_eq!(parsed["message"], "disk almost full");
        assert_eq!(parsed["free_mb"], 12);
        assert!(parsed["timestamp"].is_string());
        assert!(parsed.get("fields").is_none());
    }

    #[test]
    fn test_from_json() {
        let record = LogRecord::from_json(
            r#"{"level":"audit","timestamp":"2025-01-08T10:30:45Z","message":"login","user":"alice"}"#,
        )
        .unwrap();

        assert_eq!(record.level, LogLevel::Audit);
        assert_eq!(record.message(), Some("login"));
        assert_eq!(record.get("user"), Some(&Value::from("alice")));
        assert!(!record.fields.contains_key("level"));
    }
}
