//! Event formatting
//!
//! A formatter turns one [`Event`] into one display line (without the
//! trailing newline). Sinks take any `Formatter`, including plain closures:
//! - [`FileFormatter`]: `| INF | 08.01.2025 10:30:45.123 [scope] text`
//! - [`ConsoleFormatter`]: `08.01.2025 10:30:45.123 [INFO] [scope] text`
//! - [`JsonFormatter`]: one JSON object per line

use super::event::Event;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Timestamp layout shared by the text formatters (`dd.MM.yyyy HH:mm:ss.fff`)
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S%.3f";

pub trait Formatter: Send + Sync {
    fn format(&self, event: &Event) -> String;
}

impl<F> Formatter for F
where
    F: Fn(&Event) -> String + Send + Sync,
{
    fn format(&self, event: &Event) -> String {
        self(event)
    }
}

/// Default line format of file sinks
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFormatter;

impl Formatter for FileFormatter {
    fn format(&self, event: &Event) -> String {
        let timestamp = event.timestamp().format(TIMESTAMP_FORMAT);
        match event.scope() {
            Some(scope) => format!(
                "| {} | {} [{}] {}",
                event.severity().prefix(),
                timestamp,
                scope,
                event.text()
            ),
            None => format!(
                "| {} | {} {}",
                event.severity().prefix(),
                timestamp,
                event.text()
            ),
        }
    }
}

/// Default line format of console sinks
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormatter;

impl Formatter for ConsoleFormatter {
    fn format(&self, event: &Event) -> String {
        let timestamp = event.timestamp().format(TIMESTAMP_FORMAT);
        match event.scope() {
            Some(scope) => format!(
                "{} [{}] [{}] {}",
                timestamp,
                event.severity(),
                scope,
                event.text()
            ),
            None => format!("{} [{}] {}", timestamp, event.severity(), event.text()),
        }
    }
}

/// JSON format for machine processing
///
/// Example: `{"severity":"INFO","text":"Request processed","timestamp":"2025-01-08T10:30:45.123Z","scope":"http"}`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, event: &Event) -> String {
        let mut json_obj = serde_json::Map::new();
        json_obj.insert(
            "severity".to_string(),
            serde_json::Value::String(event.severity().to_str().to_string()),
        );
        json_obj.insert(
            "text".to_string(),
            serde_json::Value::String(event.text().to_string()),
        );
        json_obj.insert(
            "timestamp".to_string(),
            serde_json::Value::String(
                event.timestamp().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            ),
        );
        if let Some(scope) = event.scope() {
            json_obj.insert(
                "scope".to_string(),
                serde_json::Value::String(scope.to_string()),
            );
        }

        serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default()
    }
}

/// Named output formats, used by declarative configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// [`FileFormatter`] layout
    #[default]
    Text,
    /// [`ConsoleFormatter`] layout
    Console,
    /// [`JsonFormatter`] layout
    Json,
}

impl OutputFormat {
    pub fn formatter(&self) -> Arc<dyn Formatter> {
        match self {
            OutputFormat::Text => Arc::new(FileFormatter),
            OutputFormat::Console => Arc::new(ConsoleFormatter),
            OutputFormat::Json => Arc::new(JsonFormatter),
        }
    }
}
