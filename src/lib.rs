//! # Rust Sink Logger
//!
//! Composable logging sinks with buffered file output and retention cleanup.
//!
//! ## Features
//!
//! - **Buffered File Sink**: Non-blocking enqueue, timed background flush,
//!   destination resolved per flush
//! - **Console Sink**: Color-coded, lock-serialized terminal output
//! - **Composition**: Fan-out with [`CompositeSink`], scope labels with
//!   [`ScopedLogger`]
//! - **Retention**: Periodic pattern-based cleanup of aged log files
//!
//! ## Example
//!
//! ```
//! use rust_sink_logger::prelude::*;
//! use std::time::Duration;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("app.log");
//!
//! let file = FileSink::builder({
//!         let path = path.clone();
//!         move || Some(path.clone())
//!     })
//!     .flush_interval(Duration::from_millis(500))
//!     .build()
//!     .unwrap();
//!
//! let sink = CompositeSink::builder()
//!     .sink(ConsoleSink::new())
//!     .sink(file)
//!     .build();
//!
//! let http = sink.scope("http").unwrap();
//! http.info("listening on :8080", None).unwrap();
//!
//! sink.flush().unwrap();
//! let contents = std::fs::read_to_string(&path).unwrap();
//! assert!(contents.contains("[http] listening on :8080"));
//! ```

pub mod config;
pub mod core;
pub mod macros;
pub mod retention;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        ErrorReport, Event, FileFormatter, ConsoleFormatter, Formatter, JsonFormatter,
        LoggerError, OutputFormat, Result, Severity, Sink, SinkExt,
    };
    pub use crate::retention::{DeletedFile, RetentionCleaner};
    pub use crate::sinks::{CompositeSink, ConsoleSink, FileSink, FlushOutcome, ScopedLogger};
}

pub use self::config::{ConsoleConfig, FileSinkConfig, LoggingConfig, LoggingSetup, RetentionConfig};
pub use self::core::{
    ConsoleFormatter, ErrorReport, Event, FileFormatter, FlushMetrics, Formatter, JsonFormatter,
    LoggerError, OutputFormat, Result, Severity, SeverityCounters, Sink, SinkExt,
    TIMESTAMP_FORMAT,
};
pub use retention::{DeletedFile, FileDeletedCallback, RetentionCleaner, RetentionCleanerBuilder, SWEEP_INTERVAL};
pub use sinks::{
    CompositeSink, CompositeSinkBuilder, ConsoleSink, FileSink, FileSinkBuilder,
    FlushErrorCallback, FlushOutcome, PathResolver, ScopedLogger, DEFAULT_FLUSH_INTERVAL,
    SCOPE_SEPARATOR,
};
