//! File logging example
//!
//! Demonstrates daily log files, flush outcomes and retention cleanup.
//!
//! Run with: cargo run --example file_logging

use rust_sink_logger::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Sink Logger - File Logging Example ===\n");

    let log_dir = PathBuf::from("file_logging_demo");

    // One file per day; parent directories are created on first flush
    let sink = FileSink::builder({
        let log_dir = log_dir.clone();
        move || {
            let day = chrono::Local::now().format("%Y-%m-%d");
            Some(log_dir.join(format!("app-{}.log", day)))
        }
    })
    .flush_interval(Duration::from_millis(250))
    .on_error(Arc::new(|err: &LoggerError, lost: &[String]| {
        eprintln!("Lost {} entries: {}", lost.len(), err);
    }))
    .build()?;

    println!("1. Buffered writes:");
    for i in 0..10 {
        sink.info(&format!("Processing item {}", i), Some("worker"))?;
    }
    println!("   Pending before flush: {}", sink.pending());

    match sink.flush_now() {
        FlushOutcome::Written { path, entries } => {
            println!("   Wrote {} entries to {}", entries, path.display());
        }
        other => println!("   Flush outcome: {:?}", other),
    }

    println!("\n2. Files written so far:");
    for path in sink.files_written() {
        println!("   {}", path.display());
    }

    println!("\n3. Retention cleanup (files older than 7 days):");
    let cleaner = RetentionCleaner::builder(&log_dir, r"^app-\d{4}-\d{2}-\d{2}\.log$")
        .retention(Duration::from_secs(7 * 24 * 3600))
        .on_deleted(Arc::new(|file: &DeletedFile| {
            println!("   Deleted {} ({} bytes)", file.path.display(), file.size);
        }))
        .build()?;
    println!("   Removed {} file(s)", cleaner.sweep());

    sink.dispose()?;
    cleaner.dispose();
    println!("\nDone");

    Ok(())
}
