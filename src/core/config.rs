//! Environment-driven configuration
//!
//! Every option has a default. Values that are absent or fail to parse
//! resolve to that default; reading configuration never fails.

use super::log_level::LogLevel;
use super::normalizer::IgnoredFields;
use super::output_format::OutputFormat;
use std::path::PathBuf;

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "LOG_";

pub const ENABLED_VAR: &str = "ENABLED";
pub const LEVEL_VAR: &str = "LEVEL";
pub const USE_CONSOLE_VAR: &str = "USE_CONSOLE";
pub const USE_FILE_VAR: &str = "USE_FILE";
pub const FILE_PATH_VAR: &str = "FILE_PATH";
pub const IGNORED_FIELDS_VAR: &str = "IGNORED_FIELDS";
pub const FORMAT_VAR: &str = "FORMAT";
pub const COLORS_VAR: &str = "COLORS";
pub const MAX_FILES_VAR: &str = "MAX_FILES";
pub const COMPRESS_VAR: &str = "COMPRESS";

pub const DEFAULT_FILE_PATH: &str = "./logs/app-%DATE%.log";
pub const DEFAULT_MAX_FILES: usize = 14;

/// Resolved facade and backend settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggerConfig {
    /// Master switch for emitters
    pub enabled: bool,
    /// Backend threshold
    pub level: LogLevel,
    pub use_console: bool,
    pub use_file: bool,
    /// File pattern; `%DATE%` is replaced with the local date
    pub file_path: PathBuf,
    pub ignored_fields: IgnoredFields,
    /// Console encoding
    pub format: OutputFormat,
    pub colors: bool,
    /// Number of dated files kept by the file transport
    pub max_files: usize,
    /// Gzip files once the date rolls over
    pub compress: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Audit,
            use_console: true,
            use_file: true,
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
            ignored_fields: IgnoredFields::default(),
            format: OutputFormat::Json,
            colors: true,
            max_files: DEFAULT_MAX_FILES,
            compress: false,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from the process environment using `LOG_*`.
    pub fn from_env() -> Self {
        Self::from_env_prefixed(DEFAULT_ENV_PREFIX)
    }

    /// Read configuration from the process environment with a custom prefix.
    pub fn from_env_prefixed(prefix: &str) -> Self {
        Self::from_lookup(prefix, |key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_log_facade::{LogLevel, LoggerConfig};
    ///
    /// let config = LoggerConfig::from_lookup("APP_LOG_", |key| match key {
    ///     "APP_LOG_LEVEL" => Some("info".to_string()),
    ///     "APP_LOG_USE_FILE" => Some("no".to_string()),
    ///     _ => None,
    /// });
    ///
    /// assert_eq!(config.level, LogLevel::Info);
    /// assert!(!config.use_file);
    /// assert!(config.use_console);
    /// ```
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let reader = EnvReader { prefix, lookup };
        let defaults = Self::default();

        Self {
            enabled: reader.flag(ENABLED_VAR, defaults.enabled),
            level: reader.parsed(LEVEL_VAR, defaults.level),
            use_console: reader.flag(USE_CONSOLE_VAR, defaults.use_console),
            use_file: reader.flag(USE_FILE_VAR, defaults.use_file),
            file_path: reader
                .non_empty(FILE_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.file_path),
            ignored_fields: reader
                .raw(IGNORED_FIELDS_VAR)
                .map(|list| IgnoredFields::parse_list(&list))
                .unwrap_or(defaults.ignored_fields),
            format: reader.parsed(FORMAT_VAR, defaults.format),
            colors: reader.flag(COLORS_VAR, defaults.colors),
            max_files: reader.parsed(MAX_FILES_VAR, defaults.max_files),
            compress: reader.flag(COMPRESS_VAR, defaults.compress),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_console(mut self, use_console: bool) -> Self {
        self.use_console = use_console;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_file(mut self, use_file: bool) -> Self {
        self.use_file = use_file;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = path.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_ignored_fields(mut self, ignored: IgnoredFields) -> Self {
        self.ignored_fields = ignored;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

struct EnvReader<'a, F> {
    prefix: &'a str,
    lookup: F,
}

impl<F> EnvReader<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn raw(&self, name: &str) -> Option<String> {
        (self.lookup)(&format!("{}{}", self.prefix, name))
    }

    fn non_empty(&self, name: &str) -> Option<String> {
        self.raw(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn flag(&self, name: &str, default: bool) -> bool {
        self.non_empty(name)
            .and_then(|v| parse_flag(&v))
            .unwrap_or(default)
    }

    fn parsed<T: std::str::FromStr>(&self, name: &str, default: T) -> T {
        self.non_empty(name)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}

/// Parse a boolean flag, accepting the usual spellings.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = LoggerConfig::from_lookup("LOG_", |_| None);
        assert_eq!(config, LoggerConfig::default());
        assert!(config.enabled);
        assert_eq!(config.level, LogLevel::Audit);
        assert_eq!(config.file_path, PathBuf::from("./logs/app-%DATE%.log"));
        assert!(config.ignored_fields.contains("client_secret"));
    }

    #[test]
    fn test_reads_every_option() {
        let config = LoggerConfig::from_lookup(
            "LOG_",
            lookup_from(&[
                ("LOG_ENABLED", "false"),
                ("LOG_LEVEL", "Debug"),
                ("LOG_USE_CONSOLE", "0"),
                ("LOG_USE_FILE", "off"),
                ("LOG_FILE_PATH", "/var/log/svc-%DATE%.log"),
                ("LOG_IGNORED_FIELDS", "password,apiKey"),
                ("LOG_FORMAT", "text"),
                ("LOG_COLORS", "no"),
                ("LOG_MAX_FILES", "3"),
                ("LOG_COMPRESS", "yes"),
            ]),
        );

        assert!(!config.enabled);
        assert_eq!(config.level, LogLevel::Debug);
        assert!(!config.use_console);
        assert!(!config.use_file);
        assert_eq!(config.file_path, PathBuf::from("/var/log/svc-%DATE%.log"));
        assert!(config.ignored_fields.contains("apiKey"));
        assert!(!config.ignored_fields.contains("token"));
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.colors);
        assert_eq!(config.max_files, 3);
        assert!(config.compress);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = LoggerConfig::from_lookup(
            "LOG_",
            lookup_from(&[
                ("LOG_ENABLED", "maybe"),
                ("LOG_LEVEL", "loud"),
                ("LOG_MAX_FILES", "-2"),
                ("LOG_FILE_PATH", "   "),
            ]),
        );

        assert!(config.enabled);
        assert_eq!(config.level, LogLevel::Audit);
        assert_eq!(config.max_files, DEFAULT_MAX_FILES);
        assert_eq!(config.file_path, PathBuf::from(DEFAULT_FILE_PATH));
    }

    #[test]
    fn test_empty_ignored_list_disables_redaction() {
        let config = LoggerConfig::from_lookup("LOG_", lookup_from(&[("LOG_IGNORED_FIELDS", "")]));
        assert!(config.ignored_fields.is_empty());
    }

    #[test]
    fn test_custom_prefix() {
        let config = LoggerConfig::from_lookup(
            "BILLING_LOG_",
            lookup_from(&[("BILLING_LOG_LEVEL", "warn"), ("LOG_LEVEL", "silly")]),
        );
        assert_eq!(config.level, LogLevel::Warn);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" on "), Some(true));
        assert_eq!(parse_flag("No"), Some(false));
        assert_eq!(parse_flag("2"), None);
    }
}
