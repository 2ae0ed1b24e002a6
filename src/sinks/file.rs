//! Buffered file sink with timed flush
//!
//! Logging calls only push onto an unbounded queue. A background ticker
//! drains the queue on a fixed interval and appends the formatted lines to
//! whatever file the path resolver names at that moment, so a resolver can
//! roll over to a new file per day (or switch output off) without touching
//! the producers.

use crate::core::error::{LoggerError, Result};
use crate::core::event::Event;
use crate::core::format::{FileFormatter, Formatter};
use crate::core::metrics::{FlushMetrics, SeverityCounters};
use crate::core::severity::Severity;
use crate::core::sink::Sink;
use crate::core::ticker::Ticker;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default period between background flushes
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(1);

/// Decides the destination file at flush time; `None` skips the flush and
/// discards what was drained.
pub type PathResolver = Arc<dyn Fn() -> Option<PathBuf> + Send + Sync>;

/// Receives a failed append and the texts of the entries it lost
pub type FlushErrorCallback = Arc<dyn Fn(&LoggerError, &[String]) + Send + Sync>;

/// What a single flush did with the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Queue was empty; the resolver was not consulted
    Idle,
    /// Entries were appended to `path`
    Written { path: PathBuf, entries: usize },
    /// The resolver returned no destination; drained entries were dropped
    Discarded { entries: usize },
    /// The append failed; drained entries were handed to the error callback
    Failed { path: PathBuf, entries: usize },
}

impl FlushOutcome {
    /// Number of entries drained from the queue
    pub fn entries(&self) -> usize {
        match self {
            FlushOutcome::Idle => 0,
            FlushOutcome::Written { entries, .. }
            | FlushOutcome::Discarded { entries }
            | FlushOutcome::Failed { entries, .. } => *entries,
        }
    }
}

struct FileSinkShared {
    sender: Sender<Event>,
    receiver: Receiver<Event>,
    resolver: PathResolver,
    formatter: Arc<dyn Formatter>,
    on_error: Option<FlushErrorCallback>,
    counters: SeverityCounters,
    metrics: FlushMetrics,
    files_written: Mutex<HashSet<PathBuf>>,
    /// Serializes drain+append so batches reach the file in queue order
    flush_lock: Mutex<()>,
    /// Cleared by dispose. Producers hold the read guard across check and
    /// send, so once the write guard is taken every accepted entry is queued.
    accepting: RwLock<bool>,
}

impl FileSinkShared {
    fn flush(&self) -> FlushOutcome {
        let _guard = self.flush_lock.lock();

        // Snapshot of the queue length bounds the drain under constant producers
        let queued = self.receiver.len();
        let batch: Vec<Event> = self.receiver.try_iter().take(queued).collect();
        if batch.is_empty() {
            return FlushOutcome::Idle;
        }

        let path = match (self.resolver)() {
            Some(path) => path,
            None => {
                self.metrics.record_discarded(batch.len());
                return FlushOutcome::Discarded {
                    entries: batch.len(),
                };
            }
        };

        let mut output = String::new();
        for event in &batch {
            output.push_str(&self.formatter.format(event));
            output.push('\n');
        }

        match Self::append(&path, &output) {
            Ok(()) => {
                self.files_written.lock().insert(path.clone());
                self.metrics.record_written(batch.len());
                FlushOutcome::Written {
                    path,
                    entries: batch.len(),
                }
            }
            Err(e) => {
                self.metrics.record_failed(batch.len());
                let texts: Vec<String> = batch.iter().map(|event| event.text().to_string()).collect();
                match self.on_error {
                    Some(ref callback) => callback(&e, &texts),
                    None => eprintln!(
                        "[LOGGER ERROR] File sink dropped {} entries: {}",
                        texts.len(),
                        e
                    ),
                }
                FlushOutcome::Failed {
                    path,
                    entries: batch.len(),
                }
            }
        }
    }

    fn append(path: &Path, output: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    LoggerError::io_operation(
                        "create log directory",
                        format!("Failed to create directory '{}'", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("Failed to open '{}'", path.display()),
                    e,
                )
            })?;

        file.write_all(output.as_bytes()).map_err(|e| {
            LoggerError::io_operation(
                "appending to log file",
                format!("Failed to write '{}'", path.display()),
                e,
            )
        })
    }
}

/// Buffered file sink
///
/// # Examples
///
/// ```no_run
/// use rust_sink_logger::prelude::*;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// // Fixed file, flushed every second
/// let sink = FileSink::new("/var/log/app.log").unwrap();
/// sink.info("service started", None).unwrap();
///
/// // One file per UTC day, flushed every 250 ms
/// let daily = FileSink::builder(|| {
///         let day = chrono::Utc::now().format("%Y-%m-%d");
///         Some(format!("/var/log/app-{}.log", day).into())
///     })
///     .flush_interval(Duration::from_millis(250))
///     .on_error(Arc::new(|err: &LoggerError, lost: &[String]| eprintln!("{} entries lost: {}", lost.len(), err)))
///     .build()
///     .unwrap();
/// daily.warn("disk usage at 91%", Some("storage")).unwrap();
/// ```
pub struct FileSink {
    shared: Arc<FileSinkShared>,
    ticker: Mutex<Option<Ticker>>,
    disposed: AtomicBool,
}

impl FileSink {
    /// Sink appending to a fixed path with default settings
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        Self::builder(move || Some(path.clone())).build()
    }

    pub fn builder<F>(resolver: F) -> FileSinkBuilder
    where
        F: Fn() -> Option<PathBuf> + Send + Sync + 'static,
    {
        FileSinkBuilder::new(Arc::new(resolver))
    }

    /// Drain the queue now, reporting what happened to the drained entries
    pub fn flush_now(&self) -> FlushOutcome {
        self.shared.flush()
    }

    /// Every path this sink has successfully appended to
    pub fn files_written(&self) -> HashSet<PathBuf> {
        self.shared.files_written.lock().clone()
    }

    /// Path the next flush would write to
    pub fn current_log_file(&self) -> Option<PathBuf> {
        (self.shared.resolver)()
    }

    /// Entries queued and not yet drained
    pub fn pending(&self) -> usize {
        self.shared.receiver.len()
    }

    pub fn flush_interval(&self) -> Option<Duration> {
        self.ticker.lock().as_ref().map(Ticker::interval)
    }

    /// Change the background flush period
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for a zero interval and `LoggerStopped`
    /// once the sink is disposed.
    pub fn set_flush_interval(&self, interval: Duration) -> Result<()> {
        match self.ticker.lock().as_ref() {
            Some(ticker) => ticker.set_interval("FileSink", interval),
            None => Err(LoggerError::LoggerStopped),
        }
    }

    pub fn metrics(&self) -> &FlushMetrics {
        &self.shared.metrics
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

impl Sink for FileSink {
    fn log(&self, severity: Severity, text: &str, scope: Option<&str>) -> Result<()> {
        let accepting = self.shared.accepting.read();
        if !*accepting {
            return Err(LoggerError::LoggerStopped);
        }

        self.shared.counters.record(severity);
        // The shared state holds a receiver, so the channel cannot be disconnected
        let _ = self.shared.sender.send(Event::new(severity, text, scope));
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.shared.flush();
        Ok(())
    }

    fn count_of(&self, severity: Severity) -> u64 {
        self.shared.counters.get(severity)
    }

    fn name(&self) -> &str {
        "file"
    }

    fn dispose(&self) -> Result<()> {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        // Waits for in-flight sends, so the final flush sees all of them
        *self.shared.accepting.write() = false;
        let ticker = self.ticker.lock().take();
        if let Some(mut ticker) = ticker {
            ticker.stop();
        }
        self.shared.flush();
        Ok(())
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure buffered entries reach disk
        let _ = self.dispose();
    }
}

/// Builder for [`FileSink`]
pub struct FileSinkBuilder {
    resolver: PathResolver,
    flush_interval: Duration,
    formatter: Arc<dyn Formatter>,
    on_error: Option<FlushErrorCallback>,
}

impl FileSinkBuilder {
    fn new(resolver: PathResolver) -> Self {
        Self {
            resolver,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            formatter: Arc::new(FileFormatter),
            on_error: None,
        }
    }

    /// Set the period of the background flush
    #[must_use = "builder methods return a new value"]
    pub fn flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }

    /// Set the line formatter (default: [`FileFormatter`])
    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Set a shared line formatter
    #[must_use = "builder methods return a new value"]
    pub fn shared_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Set a callback for failed appends
    ///
    /// Without one, failures are reported on stderr.
    #[must_use = "builder methods return a new value"]
    pub fn on_error(mut self, callback: FlushErrorCallback) -> Self {
        self.on_error = Some(callback);
        self
    }

    /// Build the sink and start its flush thread
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for a zero flush interval, or an IO
    /// error if the background thread cannot be spawned.
    pub fn build(self) -> Result<FileSink> {
        let (sender, receiver) = unbounded();
        let shared = Arc::new(FileSinkShared {
            sender,
            receiver,
            resolver: self.resolver,
            formatter: self.formatter,
            on_error: self.on_error,
            counters: SeverityCounters::new(),
            metrics: FlushMetrics::new(),
            files_written: Mutex::new(HashSet::new()),
            flush_lock: Mutex::new(()),
            accepting: RwLock::new(true),
        });

        let shared_clone = Arc::clone(&shared);
        let ticker = Ticker::spawn("file-sink-flush", self.flush_interval, move || {
            shared_clone.flush();
        })
        .map_err(|e| match e {
            LoggerError::InvalidConfiguration { message, .. } => {
                LoggerError::config("FileSink", format!("flush {}", message))
            }
            other => other,
        })?;

        Ok(FileSink {
            shared,
            ticker: Mutex::new(Some(ticker)),
            disposed: AtomicBool::new(false),
        })
    }
}
