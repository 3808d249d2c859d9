//! Logging macros accepting mixed inputs.
//!
//! Each argument after the facade is converted with
//! [`LogInput::from`](crate::LogInput), so strings, JSON values and
//! [`ErrorInfo`](crate::ErrorInfo) can be passed side by side.
//!
//! # Examples
//!
//! ```
//! use rust_log_facade::{log_info, log_error, ErrorInfo, LogFacade, LoggerConfig};
//! use serde_json::json;
//!
//! let log = LogFacade::new(LoggerConfig::default().with_console(false).with_file(false));
//!
//! log_info!(log, "Server started");
//!
//! let port = 8080;
//! log_info!(log, format!("listening on {}", port), json!({ "port": port }));
//!
//! let record = log_error!(log, ErrorInfo::new("DbError", "pool exhausted"), json!({ "pool": "main" }));
//! assert_eq!(record.message(), Some("pool exhausted"));
//! ```

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let log = LogFacade::new(LoggerConfig::default().with_console(false).with_file(false));
/// use rust_log_facade::log_at;
/// let record = log_at!(log, LogLevel::Http, "GET / 200");
/// assert_eq!(record.level, LogLevel::Http);
/// ```
#[macro_export]
macro_rules! log_at {
    ($facade:expr, $level:expr $(, $arg:expr)* $(,)?) => {{
        let inputs: ::std::vec::Vec<$crate::LogInput> =
            ::std::vec![$($crate::LogInput::from($arg)),*];
        $facade.log($level, inputs)
    }};
}

/// Log an error-level record.
#[macro_export]
macro_rules! log_error {
    ($facade:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($facade, $crate::LogLevel::Error $(, $arg)*)
    };
}

/// Log a warning-level record.
#[macro_export]
macro_rules! log_warn {
    ($facade:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($facade, $crate::LogLevel::Warn $(, $arg)*)
    };
}

/// Log an info-level record.
#[macro_export]
macro_rules! log_info {
    ($facade:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($facade, $crate::LogLevel::Info $(, $arg)*)
    };
}

#[macro_export]
macro_rules! log_http {
    ($facade:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($facade, $crate::LogLevel::Http $(, $arg)*)
    };
}

#[macro_export]
macro_rules! log_verbose {
    ($facade:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($facade, $crate::LogLevel::Verbose $(, $arg)*)
    };
}

/// Log a debug-level record.
#[macro_export]
macro_rules! log_debug {
    ($facade:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($facade, $crate::LogLevel::Debug $(, $arg)*)
    };
}

#[macro_export]
macro_rules! log_silly {
    ($facade:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($facade, $crate::LogLevel::Silly $(, $arg)*)
    };
}

/// Log a business event.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let log = LogFacade::new(LoggerConfig::default().with_console(false).with_file(false));
/// use rust_log_facade::log_event;
/// use serde_json::json;
/// let record = log_event!(log, "order placed", json!({ "event": "order.placed", "order_id": 7 }));
/// assert_eq!(record.get("event"), Some(&json!("order.placed")));
/// ```
#[macro_export]
macro_rules! log_event {
    ($facade:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($facade, $crate::LogLevel::Event $(, $arg)*)
    };
}

/// Log an audit-trail record.
#[macro_export]
macro_rules! log_audit {
    ($facade:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($facade, $crate::LogLevel::Audit $(, $arg)*)
    };
}
