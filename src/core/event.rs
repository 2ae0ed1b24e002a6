//! Log event structure

use super::severity::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One log line, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    severity: Severity,
    text: String,
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
}

impl Event {
    /// Sanitize text to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so every entry stays on a single line of the log file.
    fn sanitize(text: &str) -> String {
        text.replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(severity: Severity, text: &str, scope: Option<&str>) -> Self {
        Self::at(severity, text, scope, Utc::now())
    }

    /// Build an event with an explicit timestamp
    pub fn at(severity: Severity, text: &str, scope: Option<&str>, timestamp: DateTime<Utc>) -> Self {
        Self {
            severity,
            text: Self::sanitize(text),
            timestamp,
            scope: scope.map(Self::sanitize),
        }
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[inline]
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
}

/// Rendered view of an error value: type, message and cause chain.
///
/// # Example
///
/// ```
/// use rust_sink_logger::ErrorReport;
///
/// let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config missing");
/// let report = ErrorReport::new(&err);
/// assert_eq!(report.message(), "config missing");
/// assert!(report.type_name().contains("io::error::Error"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    type_name: String,
    message: String,
    causes: Vec<String>,
}

impl ErrorReport {
    /// Report named after the static type of `error`.
    ///
    /// For `&dyn Error` or `Box<dyn Error>` the static type is the trait
    /// object itself, so the name reads `dyn core::error::Error`. Use
    /// [`ErrorReport::named`] when the concrete type is known to the caller.
    pub fn new<E: std::error::Error + ?Sized>(error: &E) -> Self {
        Self::named(std::any::type_name::<E>(), error)
    }

    /// Report with an explicit type name
    pub fn named<E: std::error::Error + ?Sized>(type_name: &str, error: &E) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            type_name: type_name.to_string(),
            message: error.to_string(),
            causes,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn causes(&self) -> &[String] {
        &self.causes
    }

    /// Text of an error event: caller text, then `(type) message`, then one
    /// line per cause.
    pub fn render(&self, text: &str) -> String {
        let mut rendered = format!("{}\n({}) {}", text, self.type_name, self.message);
        for cause in &self.causes {
            rendered.push_str("\n   caused by: ");
            rendered.push_str(cause);
        }
        rendered
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.type_name, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;

    #[test]
    fn test_text_is_sanitized() {
        let event = Event::new(Severity::Info, "line one\nline two\tend", Some("a\nb"));
        assert_eq!(event.text(), "line one\\nline two\\tend");
        assert_eq!(event.scope(), Some("a\\nb"));
    }

    #[test]
    fn test_timestamp_is_utc_now() {
        let before = Utc::now();
        let event = Event::new(Severity::Warn, "x", None);
        let after = Utc::now();
        assert!(event.timestamp() >= before && event.timestamp() <= after);
        assert_eq!(event.scope(), None);
    }

    #[test]
    fn test_error_report_type_name_of_trait_object() {
        let boxed: Box<dyn std::error::Error> = Box::new(std::fmt::Error);

        let report = ErrorReport::new(boxed.as_ref());
        assert!(report.type_name().contains("dyn "));

        let report = ErrorReport::named("std::fmt::Error", boxed.as_ref());
        assert_eq!(report.type_name(), "std::fmt::Error");
        assert_eq!(report.message(), "an error occurred when formatting an argument");
        assert_eq!(
            report.render("format failed"),
            "format failed\n(std::fmt::Error) an error occurred when formatting an argument"
        );
    }

    #[test]
    fn test_error_report_walks_cause_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = LoggerError::io_operation("appending to log file", "write failed", io_err);

        let report = ErrorReport::new(&err);
        assert!(report.type_name().ends_with("LoggerError"));
        assert_eq!(report.causes(), ["disk on fire".to_string()]);

        let rendered = report.render("flush failed");
        assert!(rendered.starts_with("flush failed\n("));
        assert!(rendered.contains("write failed"));
        assert!(rendered.ends_with("caused by: disk on fire"));
    }
}
