//! Log file retention management
//!
//! A [`RetentionCleaner`] sweeps a directory every [`SWEEP_INTERVAL`] and
//! deletes files whose name matches a pattern and whose last modification is
//! older than the retention window. It works independently of any sink, so a
//! file still being appended to is not protected.

use crate::core::error::{LoggerError, Result};
use crate::core::ticker::Ticker;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use walkdir::WalkDir;

/// Fixed period between sweeps
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Metadata of a file removed by a sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedFile {
    pub path: PathBuf,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

/// Invoked once per successfully deleted file
pub type FileDeletedCallback = Arc<dyn Fn(&DeletedFile) + Send + Sync>;

struct CleanerShared {
    directory: PathBuf,
    recursive: bool,
    pattern: Regex,
    retention: Duration,
    on_deleted: Option<FileDeletedCallback>,
}

impl CleanerShared {
    fn sweep(&self, now: SystemTime) -> usize {
        let cutoff = now.checked_sub(self.retention).unwrap_or(SystemTime::UNIX_EPOCH);

        let mut deleted_count = 0;
        for path in self.candidate_files() {
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };
            if !self.pattern.is_match(name) {
                continue;
            }

            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(_) => continue,
            };
            let modified = match metadata.modified() {
                Ok(modified) => modified,
                Err(_) => continue,
            };
            if modified >= cutoff {
                continue;
            }

            // Best effort: one undeletable file must not end the sweep
            if fs::remove_file(&path).is_ok() {
                deleted_count += 1;
                if let Some(ref callback) = self.on_deleted {
                    callback(&DeletedFile {
                        path: path.clone(),
                        size: metadata.len(),
                        modified: modified.into(),
                    });
                }
            }
        }

        deleted_count
    }

    /// Regular files under the directory; the root itself plus, when
    /// recursive, every nested directory. Symlinks are not followed.
    fn candidate_files(&self) -> Vec<PathBuf> {
        let mut walker = WalkDir::new(&self.directory).follow_links(false);
        if !self.recursive {
            walker = walker.max_depth(1);
        }

        walker
            .into_iter()
            // Unreadable entries are skipped, as is a missing root
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .collect()
    }
}

/// Periodic age-based cleanup of log files
///
/// # Examples
///
/// ```no_run
/// use rust_sink_logger::RetentionCleaner;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let cleaner = RetentionCleaner::builder("/var/log/app", r"^app-\d{4}-\d{2}-\d{2}\.log$")
///     .recursive(true)
///     .retention(Duration::from_secs(7 * 24 * 3600))
///     .on_deleted(Arc::new(|file: &rust_sink_logger::DeletedFile| {
///         println!("removed {}", file.path.display());
///     }))
///     .build()
///     .unwrap();
///
/// // Sweep immediately instead of waiting for the timer
/// let removed = cleaner.sweep();
/// println!("{} old log files removed", removed);
/// ```
pub struct RetentionCleaner {
    shared: Arc<CleanerShared>,
    ticker: Mutex<Option<Ticker>>,
    disposed: AtomicBool,
}

impl RetentionCleaner {
    /// Start a cleaner with no deletion callback
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `pattern` is not a valid regex.
    pub fn new(
        directory: impl Into<PathBuf>,
        recursive: bool,
        pattern: &str,
        retention: Duration,
    ) -> Result<Self> {
        Self::builder(directory, pattern)
            .recursive(recursive)
            .retention(retention)
            .build()
    }

    pub fn builder(directory: impl Into<PathBuf>, pattern: &str) -> RetentionCleanerBuilder {
        RetentionCleanerBuilder::new(directory.into(), pattern)
    }

    /// Run one sweep now; returns the number of deleted files
    pub fn sweep(&self) -> usize {
        self.shared.sweep(SystemTime::now())
    }

    pub fn directory(&self) -> &Path {
        &self.shared.directory
    }

    pub fn is_recursive(&self) -> bool {
        self.shared.recursive
    }

    pub fn pattern(&self) -> &Regex {
        &self.shared.pattern
    }

    pub fn retention(&self) -> Duration {
        self.shared.retention
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Stop the periodic sweep; a sweep already running completes first.
    /// Repeated calls are no-ops.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        let ticker = self.ticker.lock().take();
        if let Some(mut ticker) = ticker {
            ticker.stop();
        }
    }
}

impl Drop for RetentionCleaner {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Builder for [`RetentionCleaner`]
pub struct RetentionCleanerBuilder {
    directory: PathBuf,
    pattern: String,
    recursive: bool,
    retention: Duration,
    on_deleted: Option<FileDeletedCallback>,
    sweep_interval: Duration,
}

impl RetentionCleanerBuilder {
    fn new(directory: PathBuf, pattern: &str) -> Self {
        Self {
            directory,
            pattern: pattern.to_string(),
            recursive: false,
            retention: Duration::from_secs(7 * 24 * 3600),
            on_deleted: None,
            sweep_interval: SWEEP_INTERVAL,
        }
    }

    /// Include nested directories
    #[must_use = "builder methods return a new value"]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set the maximum age of kept files (default: 7 days)
    #[must_use = "builder methods return a new value"]
    pub fn retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    /// Set a callback invoked for each deleted file
    #[must_use = "builder methods return a new value"]
    pub fn on_deleted(mut self, callback: FileDeletedCallback) -> Self {
        self.on_deleted = Some(callback);
        self
    }

    #[cfg(test)]
    fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Build the cleaner and start its sweep thread
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for an invalid pattern, or an IO error
    /// if the background thread cannot be spawned.
    pub fn build(self) -> Result<RetentionCleaner> {
        let pattern = Regex::new(&self.pattern).map_err(|e| {
            LoggerError::config(
                "RetentionCleaner",
                format!("invalid file name pattern '{}': {}", self.pattern, e),
            )
        })?;

        let shared = Arc::new(CleanerShared {
            directory: self.directory,
            recursive: self.recursive,
            pattern,
            retention: self.retention,
            on_deleted: self.on_deleted,
        });

        let shared_clone = Arc::clone(&shared);
        let ticker = Ticker::spawn("retention-sweep", self.sweep_interval, move || {
            shared_clone.sweep(SystemTime::now());
        })?;

        Ok(RetentionCleaner {
            shared,
            ticker: Mutex::new(Some(ticker)),
            disposed: AtomicBool::new(false),
        })
    }
}
