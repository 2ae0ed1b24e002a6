//! Console sink implementation

use crate::core::error::Result;
use crate::core::event::Event;
use crate::core::format::{ConsoleFormatter, Formatter};
use crate::core::metrics::SeverityCounters;
use crate::core::severity::Severity;
use crate::core::sink::Sink;
#[cfg(feature = "console")]
use colored::Colorize;
use parking_lot::{const_mutex, Mutex};
use std::io::Write;
use std::sync::Arc;

/// Terminal color state is process-wide, so every stdout write goes through
/// this one lock.
static CONSOLE_LOCK: Mutex<()> = const_mutex(());

enum ConsoleTarget {
    Stdout,
    Writer(Mutex<Box<dyn Write + Send>>),
}

/// Synchronous, unbuffered sink writing one colored line per event
pub struct ConsoleSink {
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
    formatter: Arc<dyn Formatter>,
    target: ConsoleTarget,
    counters: SeverityCounters,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::with_colors(true)
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            formatter: Arc::new(ConsoleFormatter),
            target: ConsoleTarget::Stdout,
            counters: SeverityCounters::new(),
        }
    }

    /// Write to `writer` instead of stdout
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_sink_logger::prelude::*;
    ///
    /// let sink = ConsoleSink::with_colors(false).with_writer(std::io::sink());
    /// sink.info("discarded", None).unwrap();
    /// assert_eq!(sink.count_of(Severity::Info), 1);
    /// ```
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.target = ConsoleTarget::Writer(Mutex::new(Box::new(writer)));
        self
    }

    /// Set the line formatter (default: [`ConsoleFormatter`])
    #[must_use]
    pub fn with_formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    #[must_use]
    pub fn with_shared_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    fn render(&self, event: &Event) -> String {
        let line = self.formatter.format(event);
        #[cfg(feature = "console")]
        if self.use_colors {
            return line.color(event.severity().color_code()).to_string();
        }
        line
    }

    fn write_line(&self, line: &str) -> Result<()> {
        match self.target {
            ConsoleTarget::Stdout => {
                let _guard = CONSOLE_LOCK.lock();
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", line)?;
            }
            ConsoleTarget::Writer(ref writer) => {
                let mut writer = writer.lock();
                writeln!(writer, "{}", line)?;
            }
        }
        Ok(())
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn log(&self, severity: Severity, text: &str, scope: Option<&str>) -> Result<()> {
        self.counters.record(severity);
        let event = Event::new(severity, text, scope);
        self.write_line(&self.render(&event))
    }

    fn flush(&self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stdout => {
                let _guard = CONSOLE_LOCK.lock();
                std::io::stdout().flush()?;
            }
            ConsoleTarget::Writer(ref writer) => writer.lock().flush()?,
        }
        Ok(())
    }

    fn count_of(&self, severity: Severity) -> u64 {
        self.counters.get(severity)
    }

    fn name(&self) -> &str {
        "console"
    }
}
