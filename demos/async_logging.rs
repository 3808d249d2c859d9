//! Asynchronous backend example
//!
//! Builds an async multi-appender backend, injects it into the facade and
//! logs from several threads.
//!
//! Run with: cargo run --example async_logging

use rust_log_facade::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    println!("=== Rust Log Facade - Async Logging Example ===\n");

    let logger = Logger::builder()
        .min_level(LogLevel::Event)
        .appender(ConsoleAppender::with_colors(true).with_output_format(OutputFormat::Text))
        .appender(DailyFileAppender::new("demo_logs/async-%DATE%.log")?)
        .async_mode(1000)
        .build();

    let log = Arc::new(LogFacade::with_backend(LoggerConfig::default(), Arc::new(logger)));

    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let log = Arc::clone(&log);
            thread::spawn(move || {
                for job in 0..5 {
                    log.event([json!({ "message": "job finished", "worker": worker, "job": job })]);
                }
            })
        })
        .collect();

    for worker in workers {
        let _ = worker.join();
    }

    log.audit(["audit records are above the threshold and stay off the backend"]);
    log.flush()?;

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
