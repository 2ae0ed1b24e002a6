//! Basic usage example
//!
//! Demonstrates console output, fan-out to a file and scoped loggers.
//!
//! Run with: cargo run --example basic_usage

use rust_sink_logger::prelude::*;
use rust_sink_logger::{info, warn};
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Sink Logger - Basic Usage Example ===\n");

    let file = FileSink::builder(|| Some("basic_usage.log".into()))
        .flush_interval(Duration::from_millis(200))
        .build()?;

    let sink = CompositeSink::builder()
        .sink(ConsoleSink::new())
        .sink(file)
        .build();

    println!("1. Logging at each severity:");
    sink.info("Application started", None)?;
    sink.warn("Configuration file missing, using defaults", None)?;
    sink.error("Could not reach metrics endpoint", None)?;

    println!("\n2. Scoped loggers:");
    let http = sink.scope("http")?;
    let handler = http.scope("users")?;
    http.info("Listening on :8080", None)?;
    handler.info("GET /users/42", None)?;
    handler.warn("Explicit scope wins", Some("audit"))?;

    println!("\n3. Formatting macros:");
    info!(handler, "Served {} bytes in {} ms", 5120, 3)?;
    warn!(sink, scope: "cache", "Hit ratio dropped to {:.1}%", 61.5)?;

    println!("\n4. Errors and JSON payloads:");
    let missing = std::fs::read_to_string("does-not-exist.toml").unwrap_err();
    sink.error_report("Failed to load settings", &ErrorReport::new(&missing), None)?;
    sink.info_json(
        "Request payload",
        &serde_json::json!({ "user": 42, "roles": ["admin"] }),
        Some("http"),
    )?;

    sink.flush()?;
    println!(
        "\nCounts: info={} warn={} error={}",
        sink.count_of(Severity::Info),
        sink.count_of(Severity::Warn),
        sink.count_of(Severity::Error)
    );
    println!("Log written to basic_usage.log");

    Ok(())
}
