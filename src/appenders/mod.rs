//! Appender implementations

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "file")]
pub mod daily_file;

#[cfg(feature = "console")]
pub use console::{ColorMap, ConsoleAppender};
#[cfg(feature = "file")]
pub use daily_file::DailyFileAppender;

pub use crate::core::Appender;
