//! Timestamp rendering for record output

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How appenders render a record's `timestamp`.
///
/// Records keep a `DateTime<Utc>` regardless; this only affects output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Milliseconds since the epoch, written as a JSON number
    UnixMillis,

    /// strftime pattern, e.g. `%d/%b/%Y:%H:%M:%S %z` for access-log style
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, at: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => at.to_rfc3339(),
            TimestampFormat::UnixMillis => at.timestamp_millis().to_string(),
            TimestampFormat::Custom(pattern) => at.format(pattern).to_string(),
        }
    }

    #[must_use]
    pub fn to_json_value(&self, at: &DateTime<Utc>) -> Value {
        match self {
            TimestampFormat::UnixMillis => Value::from(at.timestamp_millis()),
            _ => Value::String(self.format(at)),
        }
    }
}
