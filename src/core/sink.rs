//! Sink trait for log output destinations

use super::{error::Result, event::ErrorReport, severity::Severity};
use crate::sinks::scoped::ScopedLogger;

/// A destination for log events.
///
/// `log` is the single entry point every implementation provides; the
/// severity helpers route through it. `scope` arguments are per-call scope
/// overrides, `None` meaning "use whatever scope the sink applies".
pub trait Sink: Send + Sync {
    fn log(&self, severity: Severity, text: &str, scope: Option<&str>) -> Result<()>;

    fn flush(&self) -> Result<()>;

    /// Number of accepted events of the given severity
    fn count_of(&self, severity: Severity) -> u64;

    fn name(&self) -> &str;

    /// Scope label this sink attaches to events, if any
    fn scope_label(&self) -> Option<&str> {
        None
    }

    /// Stop background work and release resources. Must be idempotent.
    fn dispose(&self) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn info(&self, text: &str, scope: Option<&str>) -> Result<()> {
        self.log(Severity::Info, text, scope)
    }

    #[inline]
    fn warn(&self, text: &str, scope: Option<&str>) -> Result<()> {
        self.log(Severity::Warn, text, scope)
    }

    #[inline]
    fn error(&self, text: &str, scope: Option<&str>) -> Result<()> {
        self.log(Severity::Error, text, scope)
    }

    /// Error event carrying the rendered type, message and causes of `report`
    fn error_report(&self, text: &str, report: &ErrorReport, scope: Option<&str>) -> Result<()> {
        self.log(Severity::Error, &report.render(text), scope)
    }

    /// Info event with a compact JSON payload appended to the text
    fn info_json(&self, text: &str, value: &serde_json::Value, scope: Option<&str>) -> Result<()> {
        let payload = serde_json::to_string(value)?;
        self.log(Severity::Info, &format!("{} {}", text, payload), scope)
    }
}

/// Scoping for any sink, including `dyn Sink`.
pub trait SinkExt: Sink {
    /// Borrow this sink under a scope label
    ///
    /// # Example
    ///
    /// ```
    /// use rust_sink_logger::prelude::*;
    ///
    /// let sink = CompositeSink::builder().build();
    /// let db = sink.scope("db").unwrap();
    /// let pool = db.scope("pool").unwrap();
    /// assert_eq!(pool.scope_label(), Some("db | pool"));
    ///
    /// pool.warn("connection slow", None).unwrap();
    /// assert_eq!(sink.count_of(Severity::Warn), 1);
    /// ```
    fn scope(&self, label: &str) -> Result<ScopedLogger<'_, Self>> {
        ScopedLogger::new(self, label)
    }
}

impl<S: Sink + ?Sized> SinkExt for S {}
