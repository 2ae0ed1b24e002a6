//! Fan-out sink
//!
//! Every call is counted once by the composite and then forwarded, in
//! construction order, to each owned sink. A failing sink does not stop the
//! fan-out: the remaining sinks still receive the call and the first error is
//! returned. Disposal reaches every owned sink and reports all failures
//! together.

use crate::core::error::{LoggerError, Result};
use crate::core::metrics::SeverityCounters;
use crate::core::severity::Severity;
use crate::core::sink::Sink;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct CompositeSink {
    sinks: Vec<Box<dyn Sink>>,
    counters: SeverityCounters,
    disposed: AtomicBool,
}

impl CompositeSink {
    pub fn new(sinks: Vec<Box<dyn Sink>>) -> Self {
        Self {
            sinks,
            counters: SeverityCounters::new(),
            disposed: AtomicBool::new(false),
        }
    }

    /// Create a builder for CompositeSink
    ///
    /// # Example
    /// ```
    /// use rust_sink_logger::prelude::*;
    ///
    /// let sink = CompositeSink::builder()
    ///     .sink(ConsoleSink::with_colors(false))
    ///     .build();
    /// assert_eq!(sink.len(), 1);
    /// ```
    #[must_use]
    pub fn builder() -> CompositeSinkBuilder {
        CompositeSinkBuilder::new()
    }

    pub fn sinks(&self) -> &[Box<dyn Sink>] {
        &self.sinks
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Run `op` on every sink, keeping the first error
    fn for_each_sink<F>(&self, operation: &str, mut op: F) -> Result<()>
    where
        F: FnMut(&dyn Sink) -> Result<()>,
    {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = op(sink.as_ref()) {
                if first_error.is_some() {
                    eprintln!(
                        "[LOGGER ERROR] Sink '{}' failed to {}: {}",
                        sink.name(),
                        operation,
                        e
                    );
                } else {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Sink for CompositeSink {
    fn log(&self, severity: Severity, text: &str, scope: Option<&str>) -> Result<()> {
        if self.disposed.load(Ordering::Acquire) {
            return Err(LoggerError::LoggerStopped);
        }
        self.counters.record(severity);
        self.for_each_sink("log", |sink| sink.log(severity, text, scope))
    }

    fn flush(&self) -> Result<()> {
        self.for_each_sink("flush", |sink| sink.flush())
    }

    fn count_of(&self, severity: Severity) -> u64 {
        self.counters.get(severity)
    }

    fn name(&self) -> &str {
        "composite"
    }

    fn dispose(&self) -> Result<()> {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        let failures: Vec<String> = self
            .sinks
            .iter()
            .filter_map(|sink| {
                sink.dispose()
                    .err()
                    .map(|e| format!("{}: {}", sink.name(), e))
            })
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LoggerError::dispose_failed(failures))
        }
    }
}

impl Drop for CompositeSink {
    fn drop(&mut self) {
        if let Err(e) = self.dispose() {
            eprintln!("[LOGGER ERROR] Failed to dispose sinks during shutdown: {}", e);
        }
    }
}

/// Builder for constructing CompositeSink with a fluent API
pub struct CompositeSinkBuilder {
    sinks: Vec<Box<dyn Sink>>,
}

impl CompositeSinkBuilder {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Add a sink; calls reach sinks in the order they were added
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed(mut self, sink: Box<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn build(self) -> CompositeSink {
        CompositeSink::new(self.sinks)
    }
}

impl Default for CompositeSinkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sink::SinkExt;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    type Journal = Arc<Mutex<Vec<String>>>;

    /// Appends `"<id>:<text>"` to a shared journal; optionally fails
    struct JournalSink {
        id: &'static str,
        journal: Journal,
        fail_log: bool,
        fail_dispose: bool,
        counters: SeverityCounters,
        disposals: Arc<AtomicUsize>,
    }

    impl JournalSink {
        fn new(id: &'static str, journal: &Journal) -> Self {
            Self {
                id,
                journal: Arc::clone(journal),
                fail_log: false,
                fail_dispose: false,
                counters: SeverityCounters::new(),
                disposals: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl Sink for JournalSink {
        fn log(&self, severity: Severity, text: &str, scope: Option<&str>) -> Result<()> {
            self.counters.record(severity);
            self.journal.lock().push(format!(
                "{}:{}:{}:{}",
                self.id,
                severity,
                scope.unwrap_or("-"),
                text
            ));
            if self.fail_log {
                return Err(LoggerError::other(format!("{} refused", self.id)));
            }
            Ok(())
        }

        fn flush(&self) -> Result<()> {
            self.journal.lock().push(format!("{}:flush", self.id));
            Ok(())
        }

        fn count_of(&self, severity: Severity) -> u64 {
            self.counters.get(severity)
        }

        fn name(&self) -> &str {
            self.id
        }

        fn dispose(&self) -> Result<()> {
            self.disposals.fetch_add(1, Ordering::SeqCst);
            if self.fail_dispose {
                return Err(LoggerError::other("dispose refused"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_forwards_in_construction_order() {
        let journal = Journal::default();
        let sink = CompositeSink::builder()
            .sink(JournalSink::new("a", &journal))
            .sink(JournalSink::new("b", &journal))
            .sink(JournalSink::new("c", &journal))
            .build();

        sink.warn("hello", Some("net")).unwrap();
        assert_eq!(
            *journal.lock(),
            vec!["a:WARN:net:hello", "b:WARN:net:hello", "c:WARN:net:hello"]
        );

        sink.flush().unwrap();
        assert_eq!(journal.lock()[3..], ["a:flush", "b:flush", "c:flush"]);
    }

    #[test]
    fn test_counts_own_calls_only() {
        let journal = Journal::default();
        let sink = CompositeSink::builder()
            .sink(JournalSink::new("a", &journal))
            .build();

        sink.info("1", None).unwrap();
        sink.info("2", None).unwrap();
        sink.error("3", None).unwrap();

        // An event reaching the inner sink directly does not count here
        sink.sinks()[0].info("direct", None).unwrap();

        assert_eq!(sink.count_of(Severity::Info), 2);
        assert_eq!(sink.count_of(Severity::Warn), 0);
        assert_eq!(sink.count_of(Severity::Error), 1);
        assert_eq!(sink.sinks()[0].count_of(Severity::Info), 3);
    }

    #[test]
    fn test_failing_sink_does_not_stop_fan_out() {
        let journal = Journal::default();
        let mut failing = JournalSink::new("a", &journal);
        failing.fail_log = true;

        let sink = CompositeSink::builder()
            .sink(failing)
            .sink(JournalSink::new("b", &journal))
            .build();

        let result = sink.info("x", None);
        assert!(matches!(result, Err(LoggerError::Other(ref m)) if m == "a refused"));
        assert_eq!(*journal.lock(), vec!["a:INFO:-:x", "b:INFO:-:x"]);
        assert_eq!(sink.count_of(Severity::Info), 1);
    }

    #[test]
    fn test_dispose_reaches_all_and_aggregates() {
        let journal = Journal::default();
        let mut first = JournalSink::new("a", &journal);
        first.fail_dispose = true;
        let first_disposals = Arc::clone(&first.disposals);
        let second = JournalSink::new("b", &journal);
        let second_disposals = Arc::clone(&second.disposals);

        let sink = CompositeSink::new(vec![Box::new(first), Box::new(second)]);

        match sink.dispose() {
            Err(LoggerError::DisposeFailed { failures }) => {
                assert_eq!(failures, vec!["a: dispose refused".to_string()]);
            }
            other => panic!("unexpected dispose result: {:?}", other),
        }
        assert_eq!(second_disposals.load(Ordering::SeqCst), 1);

        // Idempotent: nothing is disposed twice, including from Drop
        sink.dispose().unwrap();
        drop(sink);
        assert_eq!(first_disposals.load(Ordering::SeqCst), 1);
        assert_eq!(second_disposals.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_scoped_composite() {
        let journal = Journal::default();
        let sink = CompositeSink::builder()
            .sink(JournalSink::new("a", &journal))
            .sink(JournalSink::new("b", &journal))
            .build();

        let scoped = sink.scope("jobs").unwrap();
        scoped.info("run", None).unwrap();

        assert_eq!(*journal.lock(), vec!["a:INFO:jobs:run", "b:INFO:jobs:run"]);
        assert_eq!(scoped.count_of(Severity::Info), 1);
    }

    #[test]
    fn test_empty_composite() {
        let sink = CompositeSink::builder().build();
        assert!(sink.is_empty());
        sink.info("nowhere", None).unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.count_of(Severity::Info), 1);
    }
}
