//! Declarative sink configuration
//!
//! A [`LoggingConfig`] describes which sinks to build and is usually read
//! from a JSON document:
//!
//! ```
//! use rust_sink_logger::prelude::*;
//! use rust_sink_logger::LoggingConfig;
//!
//! let config = LoggingConfig::from_json_str(r#"{
//!     "console": { "colors": false },
//!     "retention": {
//!         "directory": "/tmp/app-logs",
//!         "pattern": "^app-.*\\.log$",
//!         "retention_secs": 604800
//!     }
//! }"#).unwrap();
//!
//! let setup = config.build().unwrap();
//! assert_eq!(setup.sink.len(), 1);
//! assert!(setup.cleaner.is_some());
//! ```

use crate::core::error::{LoggerError, Result};
use crate::core::format::OutputFormat;
use crate::retention::RetentionCleaner;
use crate::sinks::composite::CompositeSink;
use crate::sinks::console::ConsoleSink;
use crate::sinks::file::{FileSink, DEFAULT_FLUSH_INTERVAL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_true() -> bool {
    true
}

fn default_flush_interval_ms() -> u64 {
    DEFAULT_FLUSH_INTERVAL.as_millis() as u64
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_true")]
    pub colors: bool,
    #[serde(default = "ConsoleConfig::default_format")]
    pub format: OutputFormat,
}

impl ConsoleConfig {
    fn default_format() -> OutputFormat {
        OutputFormat::Console
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            colors: true,
            format: OutputFormat::Console,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSinkConfig {
    pub path: PathBuf,
    #[serde(default = "default_flush_interval_ms")]
    pub flush_interval_ms: u64,
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionConfig {
    pub directory: PathBuf,
    #[serde(default)]
    pub recursive: bool,
    pub pattern: String,
    pub retention_secs: u64,
}

/// Which sinks to build, and whether to prune old files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub console: Option<ConsoleConfig>,
    #[serde(default)]
    pub file: Option<FileSinkConfig>,
    #[serde(default)]
    pub retention: Option<RetentionConfig>,
}

/// Sinks and background workers built from a [`LoggingConfig`]
pub struct LoggingSetup {
    /// Console sink first, then file sink, as configured
    pub sink: CompositeSink,
    pub cleaner: Option<RetentionCleaner>,
}

impl LoggingConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logging configuration",
                format!("Failed to read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&contents)
    }

    /// Build the configured sinks and start their background threads
    pub fn build(&self) -> Result<LoggingSetup> {
        let mut builder = CompositeSink::builder();

        if let Some(ref console) = self.console {
            builder = builder.sink(
                ConsoleSink::with_colors(console.colors)
                    .with_shared_formatter(console.format.formatter()),
            );
        }

        if let Some(ref file) = self.file {
            if file.flush_interval_ms == 0 {
                return Err(LoggerError::config(
                    "FileSink",
                    "flush_interval_ms must be positive",
                ));
            }
            let path = file.path.clone();
            builder = builder.sink(
                FileSink::builder(move || Some(path.clone()))
                    .flush_interval(Duration::from_millis(file.flush_interval_ms))
                    .shared_formatter(file.format.formatter())
                    .build()?,
            );
        }

        let cleaner = match self.retention {
            Some(ref retention) => Some(RetentionCleaner::new(
                retention.directory.clone(),
                retention.recursive,
                &retention.pattern,
                Duration::from_secs(retention.retention_secs),
            )?),
            None => None,
        };

        Ok(LoggingSetup {
            sink: builder.build(),
            cleaner,
        })
    }
}
