//! Record normalization and sensitive-field redaction
//!
//! Inputs are folded left to right into a record that starts as
//! `{ level: info, timestamp: now }`:
//!
//! - text sets `message` (last one wins)
//! - fields deep-merge into the record
//! - an error merges its projection and forces `level` to `error`
//!
//! Afterwards every top-level field named in [`IgnoredFields`] is removed.

use super::log_input::LogInput;
use super::log_level::LogLevel;
use super::log_record::LogRecord;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Field names stripped from every record unless configured otherwise.
pub const DEFAULT_IGNORED_FIELDS: [&str; 4] = ["password", "secret", "token", "client_secret"];

/// Set of top-level field names removed during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredFields {
    names: BTreeSet<String>,
}

impl IgnoredFields {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn none() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Parse a comma-separated list. Entries are trimmed, blanks dropped.
    pub fn parse_list(list: &str) -> Self {
        Self::new(
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty()),
        )
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for IgnoredFields {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORED_FIELDS)
    }
}

/// Folds heterogeneous inputs into a single [`LogRecord`].
///
/// # Example
///
/// ```
/// use rust_log_facade::{LogInput, LogLevel, Normalizer};
/// use serde_json::json;
///
/// let normalizer = Normalizer::default();
/// let record = normalizer.normalize([
///     LogInput::from("user login"),
///     LogInput::from(json!({ "user": "alice", "password": "hunter2" })),
/// ]);
///
/// assert_eq!(record.level, LogLevel::Info);
/// assert_eq!(record.message(), Some("user login"));
/// assert!(record.get("password").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    ignored: IgnoredFields,
}

impl Normalizer {
    pub fn new(ignored: IgnoredFields) -> Self {
        Self { ignored }
    }

    pub fn ignored_fields(&self) -> &IgnoredFields {
        &self.ignored
    }

    pub fn normalize<I>(&self, inputs: I) -> LogRecord
    where
        I: IntoIterator,
        I::Item: Into<LogInput>,
    {
        let mut record = LogRecord::new(LogLevel::Info);

        for input in inputs {
            match input.into() {
                LogInput::Text(text) => {
                    record.fields.insert("message".to_string(), Value::String(text));
                }
                LogInput::Fields(fields) => merge_fields(&mut record, fields),
                LogInput::Failure(info) => {
                    merge_fields(&mut record, info.to_fields());
                    record.level = LogLevel::Error;
                }
            }
        }

        self.redact(&mut record);
        record
    }

    /// Remove ignored top-level fields in place.
    pub fn redact(&self, record: &mut LogRecord) {
        if self.ignored.is_empty() {
            return;
        }
        record.fields.retain(|key, _| !self.ignored.contains(key));
    }
}

/// `level` and `timestamp` keys update the record's own slots when they
/// parse and are discarded otherwise.
fn merge_fields(record: &mut LogRecord, fields: Map<String, Value>) {
    for (key, value) in fields {
        match key.as_str() {
            "level" => {
                if let Some(level) = value.as_str().and_then(|s| s.parse::<LogLevel>().ok()) {
                    record.level = level;
                }
            }
            "timestamp" => {
                if let Some(ts) = value
                    .as_str()
                    .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                {
                    record.timestamp = ts.with_timezone(&Utc);
                }
            }
            _ => match record.fields.get_mut(&key) {
                Some(existing) => deep_merge(existing, value),
                None => {
                    record.fields.insert(key, value);
                }
            },
        }
    }
}

/// Objects merge key by key; any other value replaces the target.
fn deep_merge(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(target_map), Value::Object(incoming_map)) => {
            for (key, value) in incoming_map {
                match target_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target_map.insert(key, value);
                    }
                }
            }
        }
        (target, incoming) => *target = incoming,
    }
}
