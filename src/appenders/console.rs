//! Console appender implementation

use crate::core::{Appender, LogLevel, LogRecord, OutputFormat, Result, TimestampFormat};
use colored::{Color, Colorize};
use std::collections::HashMap;

/// Level-to-color mapping used by the console's text encoding.
///
/// Starts with a color for every severity, including the custom
/// `event` and `audit` levels. Registering a level again replaces its
/// color; the map never holds more than one entry per level.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    colors: HashMap<LogLevel, Color>,
}

impl ColorMap {
    pub fn new() -> Self {
        Self {
            colors: LogLevel::ALL
                .iter()
                .map(|level| (*level, level.default_color()))
                .collect(),
        }
    }

    pub fn register(&mut self, level: LogLevel, color: Color) -> &mut Self {
        self.colors.insert(level, color);
        self
    }

    pub fn color_for(&self, level: LogLevel) -> Color {
        self.colors
            .get(&level)
            .copied()
            .unwrap_or_else(|| level.default_color())
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ConsoleAppender {
    use_colors: bool,
    colors: ColorMap,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            colors: ColorMap::new(),
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Set the output format for this appender
    ///
    /// # Example
    ///
    /// ```
    /// use rust_log_facade::appenders::ConsoleAppender;
    /// use rust_log_facade::OutputFormat;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_output_format(OutputFormat::Text);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_color_map(mut self, colors: ColorMap) -> Self {
        self.colors = colors;
        self
    }

    pub fn color_map_mut(&mut self) -> &mut ColorMap {
        &mut self.colors
    }

    /// Render a record the way `append` prints it.
    pub fn render(&self, record: &LogRecord) -> String {
        let line = self.output_format.format(record, &self.timestamp_format);

        // JSON stays uncolored so it remains parseable
        if !self.use_colors || self.output_format != OutputFormat::Text {
            return line;
        }

        let level_tag = format!("{:7}", record.level.to_str().to_uppercase());
        let colored_tag = level_tag
            .color(self.colors.color_for(record.level))
            .to_string();
        line.replacen(&level_tag, &colored_tag, 1)
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let output = self.render(record);

        // Route errors to stderr, others to stdout
        match record.level {
            LogLevel::Error => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
