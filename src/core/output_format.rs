//! Output encodings for log records
//!
//! - Json: one JSON object per line; fields outside [`TOP_LEVEL_KEYS`]
//!   are nested under `metadata`
//! - Text: human-readable line for terminals

use super::log_record::LogRecord;
use super::timestamp::TimestampFormat;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Keys kept at the top level of the JSON encoding.
pub const TOP_LEVEL_KEYS: [&str; 7] = [
    "level",
    "message",
    "timestamp",
    "correlation",
    "event",
    "label",
    "tags",
];

/// Name of the nested object holding every other field.
pub const METADATA_KEY: &str = "metadata";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Machine-readable JSON line (default)
    ///
    /// Example: `{"level":"info","message":"Request processed","metadata":{"pid":123},"timestamp":"2025-01-08T10:30:45.123Z"}`
    #[default]
    Json,

    /// Human-readable text
    ///
    /// Example: `[2025-01-08T10:30:45.123Z] [INFO   ] Request processed pid=123`
    Text,
}

impl OutputFormat {
    pub fn format(&self, record: &LogRecord, timestamp_format: &TimestampFormat) -> String {
        match self {
            OutputFormat::Json => {
                serde_json::to_string(&Self::to_json_value(record, timestamp_format))
                    .unwrap_or_default()
            }
            OutputFormat::Text => Self::format_text(record, timestamp_format),
        }
    }

    /// Build the JSON object written by the JSON encoding.
    pub fn to_json_value(record: &LogRecord, timestamp_format: &TimestampFormat) -> Value {
        let mut json_obj = Map::new();
        let mut metadata = Map::new();

        json_obj.insert(
            "level".to_string(),
            Value::String(record.level.to_str().to_string()),
        );
        json_obj.insert(
            "timestamp".to_string(),
            timestamp_format.to_json_value(&record.timestamp),
        );

        for (key, value) in &record.fields {
            if TOP_LEVEL_KEYS.contains(&key.as_str()) {
                json_obj.insert(key.clone(), value.clone());
            } else {
                metadata.insert(key.clone(), value.clone());
            }
        }

        if !metadata.is_empty() {
            json_obj.insert(METADATA_KEY.to_string(), Value::Object(metadata));
        }

        Value::Object(json_obj)
    }

    fn format_text(record: &LogRecord, timestamp_format: &TimestampFormat) -> String {
        let message = record.fields.get("message").map(text_value).unwrap_or_default();
        let mut line = format!(
            "[{}] [{:7}] {}",
            timestamp_format.format(&record.timestamp),
            record.level.to_str().to_uppercase(),
            message
        );

        for (key, value) in record.fields.iter().filter(|(k, _)| k.as_str() != "message") {
            line.push(' ');
            line.push_str(key);
            line.push('=');
            line.push_str(&text_value(value));
        }

        line
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "plain" => Ok(OutputFormat::Text),
            _ => Err(format!("Invalid output format: '{}'", s)),
        }
    }
}

/// Escape line breaks and tabs so one record stays on one line.
/// Strings are escaped; any other value is written as compact JSON.
fn text_value(value: &Value) -> String {
    match value {
        Value::String(s) => sanitize(s),
        other => other.to_string(),
    }
}

pub(crate) fn sanitize(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
