//! Criterion benchmarks for rust_log_facade

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_log_facade::prelude::*;
use rust_log_facade::Normalizer;
use serde_json::json;
use std::sync::Arc;

struct Discard;

impl Appender for Discard {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        black_box(record);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "discard"
    }
}

fn quiet() -> LoggerConfig {
    LoggerConfig::default().with_console(false).with_file(false)
}

// ============================================================================
// Normalization Benchmarks
// ============================================================================

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    group.throughput(Throughput::Elements(1));

    let normalizer = Normalizer::default();

    group.bench_function("text_only", |b| {
        b.iter(|| normalizer.normalize([black_box("request served")]));
    });

    group.bench_function("text_and_fields", |b| {
        b.iter(|| {
            normalizer.normalize([
                LogInput::from(black_box("request served")),
                LogInput::from(json!({"status": 200, "path": "/orders", "password": "x"})),
            ])
        });
    });

    group.bench_function("nested_merge", |b| {
        b.iter(|| {
            normalizer.normalize([
                json!({"request": {"id": "r1", "headers": {"accept": "json"}}}),
                json!({"request": {"headers": {"host": "api"}}, "message": "merged"}),
            ])
        });
    });

    group.bench_function("with_error", |b| {
        let failure = ErrorInfo::new("DbError", "connection refused").with_code("ECONNREFUSED");
        b.iter(|| normalizer.normalize([LogInput::from(failure.clone())]));
    });

    group.finish();
}

// ============================================================================
// Emit Benchmarks
// ============================================================================

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");
    group.throughput(Throughput::Elements(1));

    let sync_logger = Logger::builder().appender(Discard).build();
    let sync_facade = LogFacade::with_backend(quiet(), Arc::new(sync_logger));

    group.bench_function("sync_info", |b| {
        b.iter(|| sync_facade.info([black_box("Info message")]));
    });

    let async_logger = Logger::builder().async_mode(10_000).appender(Discard).build();
    let async_facade = LogFacade::with_backend(quiet(), Arc::new(async_logger));

    group.bench_function("async_info", |b| {
        b.iter(|| async_facade.info([black_box("Info message")]));
    });

    let disabled = LogFacade::new(quiet().with_enabled(false));

    group.bench_function("disabled", |b| {
        b.iter(|| disabled.info([black_box("Info message")]));
    });

    group.finish();
}

// ============================================================================
// Level Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");

    let logger = Logger::builder()
        .min_level(LogLevel::Warn)
        .appender(Discard)
        .build();
    let facade = LogFacade::with_backend(quiet(), Arc::new(logger));

    group.bench_function("filtered_debug", |b| {
        b.iter(|| facade.debug([black_box("Filtered")]));
    });

    group.bench_function("can_emit", |b| {
        b.iter(|| facade.can_emit(black_box(LogLevel::Silly)));
    });

    group.finish();
}

// ============================================================================
// Encoding Benchmarks
// ============================================================================

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");

    let record = LogRecord::new(LogLevel::Info)
        .with_message("Request processed")
        .with_field("user_id", 12345)
        .with_field("tags", json!(["api", "v2"]));
    let timestamps = TimestampFormat::default();

    group.bench_function("json", |b| {
        b.iter(|| OutputFormat::Json.format(black_box(&record), &timestamps));
    });

    group.bench_function("text", |b| {
        b.iter(|| OutputFormat::Text.format(black_box(&record), &timestamps));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_normalize,
    bench_emit,
    bench_level_filtering,
    bench_encoding,
);
criterion_main!(benches);
