//! Daily file logging example
//!
//! Writes JSON lines to a date-stamped file and prints the result.
//!
//! Run with: cargo run --example file_logging

use chrono::Local;
use rust_log_facade::appenders::daily_file::resolve_pattern;
use rust_log_facade::prelude::*;
use serde_json::json;
use std::path::Path;

fn main() -> Result<()> {
    println!("=== Rust Log Facade - File Logging Example ===\n");

    let pattern = Path::new("demo_logs/app-%DATE%.log");
    let config = LoggerConfig::default()
        .with_console(false)
        .with_file_path(pattern)
        .with_max_files(7);
    let log = LogFacade::new(config);

    println!("Logging to {}", resolve_pattern(pattern, Local::now().date_naive()).display());

    log.info(["Application started"]);
    log.http([json!({ "message": "GET /orders 200", "duration_ms": 12 })]);
    log.event([
        LogInput::from("order placed"),
        LogInput::from(json!({ "event": "order.placed", "order_id": 7, "token": "t" })),
    ]);
    log.error([LogInput::from(
        ErrorInfo::new("PaymentError", "card declined").with_status(402),
    )]);

    let mut stream = log.stream();
    use std::io::Write;
    writeln!(stream, "POST /checkout 201")?;
    drop(stream);

    log.flush()?;

    let contents = std::fs::read_to_string(resolve_pattern(pattern, Local::now().date_naive()))?;
    println!("\n{}", contents);

    println!("=== Example completed successfully! ===");
    Ok(())
}
