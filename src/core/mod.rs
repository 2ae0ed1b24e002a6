//! Core sink types and traits

pub mod error;
pub mod event;
pub mod format;
pub mod metrics;
pub mod severity;
pub mod sink;
pub(crate) mod ticker;

pub use error::{LoggerError, Result};
pub use event::{ErrorReport, Event};
pub use format::{ConsoleFormatter, FileFormatter, Formatter, JsonFormatter, OutputFormat, TIMESTAMP_FORMAT};
pub use metrics::{FlushMetrics, SeverityCounters};
pub use severity::Severity;
pub use sink::{Sink, SinkExt};
