//! Heterogeneous inputs accepted by the normalizer and emitters

use serde_json::{Map, Value};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;

/// One argument passed to an emitter.
///
/// Call sites may pass a plain message, a bag of metadata, an error, or
/// any mix of them; the normalizer folds them into one record in order.
#[derive(Debug, Clone, PartialEq)]
pub enum LogInput {
    Text(String),
    Fields(Map<String, Value>),
    Failure(ErrorInfo),
}

impl LogInput {
    /// Wrap any error value.
    pub fn failure<E: StdError + ?Sized>(err: &E) -> Self {
        LogInput::Failure(ErrorInfo::from_error(err))
    }
}

impl From<&str> for LogInput {
    fn from(s: &str) -> Self {
        LogInput::Text(s.to_string())
    }
}

impl From<String> for LogInput {
    fn from(s: String) -> Self {
        LogInput::Text(s)
    }
}

impl From<&String> for LogInput {
    fn from(s: &String) -> Self {
        LogInput::Text(s.clone())
    }
}

impl From<Map<String, Value>> for LogInput {
    fn from(fields: Map<String, Value>) -> Self {
        LogInput::Fields(fields)
    }
}

/// JSON strings become text and objects become fields. Any other JSON
/// value has no recognized shape and yields an empty field set.
impl From<Value> for LogInput {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => LogInput::Text(s),
            Value::Object(map) => LogInput::Fields(map),
            _ => LogInput::Fields(Map::new()),
        }
    }
}

impl From<ErrorInfo> for LogInput {
    fn from(info: ErrorInfo) -> Self {
        LogInput::Failure(info)
    }
}

/// Plain projection of an error value.
///
/// # Example
///
/// ```
/// use rust_log_facade::ErrorInfo;
///
/// let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config missing");
/// let info = ErrorInfo::from_error(&err).with_code("ENOENT").with_status(404);
///
/// assert_eq!(info.message, "config missing");
/// assert!(info.stack.starts_with("Error: config missing"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorInfo {
    pub name: String,
    pub message: String,
    pub stack: String,
    pub code: Option<Value>,
    pub status: Option<Value>,
    /// Additional custom properties carried by the error.
    pub extra: Map<String, Value>,
}

impl ErrorInfo {
    /// Build an error projection with a given name and message.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        Self {
            stack: format!("{}: {}", name, message),
            name,
            message,
            code: None,
            status: None,
            extra: Map::new(),
        }
    }

    /// Project any `std::error::Error`.
    ///
    /// `stack` holds `name: message`, one `caused by:` line per source,
    /// and the captured backtrace when backtraces are enabled.
    pub fn from_error<E: StdError + ?Sized>(err: &E) -> Self {
        let mut info = Self::new(short_type_name::<E>(), err.to_string());

        let mut source = err.source();
        while let Some(cause) = source {
            info.stack.push_str("\n    caused by: ");
            info.stack.push_str(&cause.to_string());
            source = cause.source();
        }

        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            info.stack.push('\n');
            info.stack.push_str(&backtrace.to_string());
        }

        info
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<Value>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<Value>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Flatten into record fields. Named fields override `extra`.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = self.extra.clone();
        fields.insert("name".to_string(), Value::String(self.name.clone()));
        fields.insert("message".to_string(), Value::String(self.message.clone()));
        fields.insert("stack".to_string(), Value::String(self.stack.clone()));
        if let Some(code) = &self.code {
            fields.insert("code".to_string(), code.clone());
        }
        if let Some(status) = &self.status {
            fields.insert("status".to_string(), status.clone());
        }
        fields
    }
}

impl<E: StdError> From<&E> for ErrorInfo {
    fn from(err: &E) -> Self {
        ErrorInfo::from_error(err)
    }
}

/// Last path segment of a type name; trait objects and unnameable
/// types fall back to `Error`.
fn short_type_name<E: ?Sized>() -> String {
    let full = std::any::type_name::<E>();
    if full.starts_with("dyn ") || full.starts_with('&') {
        return "Error".to_string();
    }
    let base = full.split('<').next().unwrap_or(full);
    match base.rsplit("::").next() {
        Some("Error") | None | Some("") => "Error".to_string(),
        Some(name) => name.to_string(),
    }
}
