//! Basic facade usage example
//!
//! Demonstrates the level emitters, mixed inputs and field redaction on
//! the console.
//!
//! Run with: cargo run --example basic_usage

use rust_log_facade::prelude::*;
use rust_log_facade::{log_audit, log_warn};
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Rust Log Facade - Basic Usage Example ===\n");

    let config = LoggerConfig::default()
        .with_file(false)
        .with_format(OutputFormat::Text);
    let log = LogFacade::new(config);

    println!("1. Logging at every level:");
    for level in LogLevel::ALL {
        log.log(level, [format!("This is a {} message", level)]);
    }

    println!("\n2. Mixed inputs with redaction:");
    let record = log.info([
        LogInput::from("user signed in"),
        LogInput::from(json!({ "user_id": 42, "password": "hunter2" })),
    ]);
    println!("   returned record has password: {}", record.contains_key("password"));

    println!("\n3. Errors keep the emitter's level:");
    let failure = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream timed out");
    log_warn!(log, LogInput::failure(&failure), json!({ "upstream": "billing" }));

    println!("\n4. Raising the threshold to WARN:");
    log.reconfigure(
        LoggerConfig::default()
            .with_file(false)
            .with_format(OutputFormat::Text)
            .with_level(LogLevel::Warn),
    );
    log.info(["Info message (hidden)"]);
    log.warn(["Warning message (visible)"]);
    let audit = log_audit!(log, "role granted (hidden, still returned)");
    println!("   audit record returned at level {}", audit.level);

    log.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
