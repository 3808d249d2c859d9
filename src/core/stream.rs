//! Line-oriented writer that forwards text to the `info` emitter

use super::{facade::LogFacade, log_record::LogRecord};
use std::io;

/// Adapter for components that only know how to write text lines,
/// such as HTTP access loggers.
///
/// Bytes written through [`io::Write`] are buffered until a newline; each
/// complete non-empty line becomes one `info` record. A trailing partial
/// line is emitted on `flush` or drop.
pub struct LogStream<'a> {
    facade: &'a LogFacade,
    pending: Vec<u8>,
}

impl<'a> LogStream<'a> {
    pub fn new(facade: &'a LogFacade) -> Self {
        Self {
            facade,
            pending: Vec::new(),
        }
    }

    /// Log one line at `info` with trailing whitespace removed.
    pub fn write_line(&self, line: &str) -> LogRecord {
        self.facade.info([line.trim_end()])
    }

    fn emit_pending_lines(&mut self) {
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit_bytes(&line);
        }
    }

    fn emit_bytes(&self, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes);
        let line = text.trim_end();
        if !line.is_empty() {
            self.write_line(line);
        }
    }
}

impl io::Write for LogStream<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.emit_pending_lines();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.emit_bytes(&rest);
        }
        Ok(())
    }
}

impl Drop for LogStream<'_> {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}
