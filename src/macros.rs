//! Logging macros for ergonomic message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. They evaluate to
//! the `Result` of the underlying sink call.
//!
//! # Examples
//!
//! ```
//! use rust_sink_logger::prelude::*;
//! use rust_sink_logger::{info, warn};
//!
//! let sink = CompositeSink::builder().build();
//!
//! // Basic logging
//! info!(sink, "Server started").unwrap();
//!
//! // With format arguments
//! let port = 8080;
//! info!(sink, "Server listening on port {}", port).unwrap();
//!
//! // With an explicit scope
//! warn!(sink, scope: "http", "Slow request: {} ms", 1250).unwrap();
//!
//! assert_eq!(sink.count_of(Severity::Info), 2);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_sink_logger::prelude::*;
/// # let sink = CompositeSink::builder().build();
/// use rust_sink_logger::log;
/// log!(sink, Severity::Info, "Simple message").unwrap();
/// log!(sink, Severity::Error, scope: "api", "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($sink:expr, $severity:expr, scope: $scope:expr, $($arg:tt)+) => {
        {
            use $crate::Sink as _;
            ($sink).log($severity, &format!($($arg)+), Some($scope))
        }
    };
    ($sink:expr, $severity:expr, $($arg:tt)+) => {
        {
            use $crate::Sink as _;
            ($sink).log($severity, &format!($($arg)+), None)
        }
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($sink:expr, $($arg:tt)+) => {
        $crate::log!($sink, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a warn-level message.
#[macro_export]
macro_rules! warn {
    ($sink:expr, $($arg:tt)+) => {
        $crate::log!($sink, $crate::Severity::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_sink_logger::prelude::*;
/// # let sink = CompositeSink::builder().build();
/// use rust_sink_logger::error;
/// error!(sink, "Failed to connect to {}", "db-01").unwrap();
/// assert_eq!(sink.count_of(Severity::Error), 1);
/// ```
#[macro_export]
macro_rules! error {
    ($sink:expr, $($arg:tt)+) => {
        $crate::log!($sink, $crate::Severity::Error, $($arg)+)
    };
}
