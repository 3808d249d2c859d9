//! Daily rotating file appender
//!
//! Writes one record per line to a path built from a pattern such as
//! `./logs/app-%DATE%.log`. `%DATE%` is replaced by the appender's local
//! date (`YYYY-MM-DD`), read from its clock on every append. Record
//! timestamps are data only and never pick the file. When the clock moves
//! to a later date the current file is closed, optionally gzipped, and a
//! new one is opened. Only the newest `max_files` dated files are kept.

use crate::core::{Appender, LogRecord, LoggerError, OutputFormat, Result, TimestampFormat};
use chrono::{Local, NaiveDate};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Placeholder replaced with the current date.
pub const DATE_TOKEN: &str = "%DATE%";

const DATE_FORMAT: &str = "%Y-%m-%d";
const GZ_SUFFIX: &str = ".gz";

/// Source of "today" used to choose the active file.
type DateClock = Box<dyn Fn() -> NaiveDate + Send + Sync>;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// # Examples
///
/// ```no_run
/// use rust_log_facade::appenders::DailyFileAppender;
///
/// let appender = DailyFileAppender::new("./logs/app-%DATE%.log")
///     .unwrap()
///     .with_max_files(7)
///     .with_compression(true);
/// ```
pub struct DailyFileAppender {
    pattern: PathBuf,
    clock: DateClock,
    current_date: NaiveDate,
    current_path: PathBuf,
    writer: Option<BufWriter<File>>,
    max_files: usize,
    compress: bool,
    output_format: OutputFormat,
    timestamp_format: TimestampFormat,
}

impl DailyFileAppender {
    /// Open today's file for `pattern`.
    ///
    /// # Errors
    ///
    /// Returns error if the directory or file cannot be created
    pub fn new<P: AsRef<Path>>(pattern: P) -> Result<Self> {
        Self::with_clock(pattern, local_today)
    }

    /// Open the file for `pattern` using `clock` as the source of today's
    /// date, both now and for every later rollover check.
    ///
    /// # Errors
    ///
    /// Returns error if the pattern is empty or the file cannot be created
    pub fn with_clock<P, F>(pattern: P, clock: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn() -> NaiveDate + Send + Sync + 'static,
    {
        let pattern = pattern.as_ref().to_path_buf();
        if pattern.as_os_str().is_empty() {
            return Err(LoggerError::config("DailyFileAppender", "file path pattern is empty"));
        }

        let date = clock();
        let current_path = resolve_pattern(&pattern, date);
        let writer = Some(BufWriter::new(open_log_file(&current_path)?));

        Ok(Self {
            pattern,
            clock: Box::new(clock),
            current_date: date,
            current_path,
            writer,
            max_files: crate::core::config::DEFAULT_MAX_FILES,
            compress: false,
            output_format: OutputFormat::Json,
            timestamp_format: TimestampFormat::default(),
        })
    }

    /// Number of dated files to keep; `0` keeps everything.
    #[must_use]
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    #[must_use]
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

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

    /// Path currently written to
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.current_path
    }

    #[must_use]
    pub fn pattern(&self) -> &Path {
        &self.pattern
    }

    #[must_use]
    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    fn rotates(&self) -> bool {
        self.pattern.to_string_lossy().contains(DATE_TOKEN)
    }

    /// Switch to the file for `date`. Dates at or before the current one
    /// are ignored, so a clock stepping backwards never reopens an older
    /// file.
    fn roll_to(&mut self, date: NaiveDate) -> Result<()> {
        if !self.rotates() || date <= self.current_date {
            return Ok(());
        }

        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.current_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        let previous = std::mem::replace(&mut self.current_path, resolve_pattern(&self.pattern, date));
        self.current_date = date;
        self.writer = Some(BufWriter::new(open_log_file(&self.current_path)?));

        tracing::debug!(
            from = %previous.display(),
            to = %self.current_path.display(),
            "rotated log file"
        );

        if self.compress && previous.exists() {
            compress_file(&previous)?;
        }
        self.prune();
        Ok(())
    }

    /// Delete the oldest dated files beyond `max_files`.
    fn prune(&self) {
        if self.max_files == 0 {
            return;
        }

        let mut dated = self.dated_files();
        if dated.len() <= self.max_files {
            return;
        }
        dated.sort_by(|a, b| a.0.cmp(&b.0));

        let excess = dated.len() - self.max_files;
        for (_, path) in dated.into_iter().take(excess) {
            if path == self.current_path {
                continue;
            }
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove old log file");
            }
        }
    }

    /// Files in the log directory whose names match the pattern, with
    /// their dates. Compressed files count toward retention.
    fn dated_files(&self) -> Vec<(NaiveDate, PathBuf)> {
        let Some(file_pattern) = self.pattern.file_name().and_then(|n| n.to_str()) else {
            return Vec::new();
        };
        let Some((prefix, suffix)) = file_pattern.split_once(DATE_TOKEN) else {
            return Vec::new();
        };
        let dir = self.current_path.parent().filter(|p| !p.as_os_str().is_empty());
        let dir = dir.unwrap_or_else(|| Path::new("."));

        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                let stem = name.strip_suffix(GZ_SUFFIX).unwrap_or(&name);
                let date_part = stem.strip_prefix(prefix)?.strip_suffix(suffix)?;
                let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()?;
                Some((date, entry.path()))
            })
            .collect()
    }
}

impl Appender for DailyFileAppender {
    fn name(&self) -> &str {
        "daily-file"
    }

    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let today = (self.clock)();
        if let Err(e) = self.roll_to(today) {
            tracing::warn!(error = %e, "log rotation failed, continuing with current file");
            if self.writer.is_none() {
                self.writer = Some(BufWriter::new(open_log_file(&self.current_path)?));
            }
        }

        let line = self.output_format.format(record, &self.timestamp_format);
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        writeln!(writer, "{}", line).map_err(|e| {
            LoggerError::file_appender(
                self.current_path.display().to_string(),
                format!("Failed to write log record: {}", e),
            )
        })
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.current_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }
}

impl Drop for DailyFileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}

/// Substitute `%DATE%` in `pattern` with `date`.
pub fn resolve_pattern(pattern: &Path, date: NaiveDate) -> PathBuf {
    let pattern = pattern.to_string_lossy();
    PathBuf::from(pattern.replace(DATE_TOKEN, &date.format(DATE_FORMAT).to_string()))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            LoggerError::io_operation("create log directory", parent.display().to_string(), e)
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            LoggerError::file_appender(path.display().to_string(), format!("Failed to open: {}", e))
        })
}

/// Gzip `path` to `path.gz`, streaming through a temporary file. The
/// original is removed only after the archive is complete.
fn compress_file(path: &Path) -> Result<()> {
    let mut gz_name = path.as_os_str().to_owned();
    gz_name.push(GZ_SUFFIX);
    let gz_path = PathBuf::from(gz_name);
    let mut tmp_name = gz_path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let result = (|| -> std::io::Result<()> {
        let mut reader = BufReader::with_capacity(64 * 1024, File::open(path)?);
        let output = BufWriter::with_capacity(64 * 1024, File::create(&tmp_path)?);
        let mut encoder = flate2::write::GzEncoder::new(output, flate2::Compression::default());

        let mut buffer = vec![0u8; 64 * 1024];
        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            encoder.write_all(&buffer[..bytes_read])?;
        }
        encoder.finish()?.flush()?;
        fs::rename(&tmp_path, &gz_path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(LoggerError::io_operation(
            "compress log file",
            path.display().to_string(),
            e,
        ));
    }

    if let Err(e) = fs::remove_file(path) {
        tracing::warn!(
            path = %path.display(),
            error = %e,
            "compressed log file but could not remove the original"
        );
    }
    Ok(())
}
