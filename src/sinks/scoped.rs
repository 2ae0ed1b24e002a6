//! Scope-labelling decorator

use crate::core::error::{LoggerError, Result};
use crate::core::severity::Severity;
use crate::core::sink::Sink;

/// Separator between the labels of nested scoped loggers
pub const SCOPE_SEPARATOR: &str = " | ";

/// Borrowed view of a sink that tags every event with a scope label.
///
/// Wrapping another `ScopedLogger` joins both labels with
/// [`SCOPE_SEPARATOR`]. A scope passed explicitly at call time replaces the
/// whole composed label. Disposal of the inner sink stays with its owner.
pub struct ScopedLogger<'a, S: Sink + ?Sized> {
    inner: &'a S,
    label: String,
}

impl<'a, S: Sink + ?Sized> ScopedLogger<'a, S> {
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `label` is empty.
    pub fn new(inner: &'a S, label: &str) -> Result<Self> {
        if label.is_empty() {
            return Err(LoggerError::invalid_argument("label", "cannot be empty"));
        }

        let label = match inner.scope_label() {
            Some(parent) => format!("{}{}{}", parent, SCOPE_SEPARATOR, label),
            None => label.to_string(),
        };

        Ok(Self { inner, label })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn inner(&self) -> &'a S {
        self.inner
    }
}

impl<S: Sink + ?Sized> Sink for ScopedLogger<'_, S> {
    fn log(&self, severity: Severity, text: &str, scope: Option<&str>) -> Result<()> {
        self.inner
            .log(severity, text, Some(scope.unwrap_or(&self.label)))
    }

    fn flush(&self) -> Result<()> {
        self.inner.flush()
    }

    fn count_of(&self, severity: Severity) -> u64 {
        self.inner.count_of(severity)
    }

    fn name(&self) -> &str {
        "scoped"
    }

    fn scope_label(&self) -> Option<&str> {
        Some(&self.label)
    }
}
