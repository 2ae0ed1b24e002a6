//! Sink implementations

pub mod composite;
pub mod console;
pub mod file;
pub mod scoped;

pub use composite::{CompositeSink, CompositeSinkBuilder};
pub use console::ConsoleSink;
pub use file::{FileSink, FileSinkBuilder, FlushErrorCallback, FlushOutcome, PathResolver, DEFAULT_FLUSH_INTERVAL};
pub use scoped::{ScopedLogger, SCOPE_SEPARATOR};

// Re-export traits for convenience
pub use crate::core::{Sink, SinkExt};
