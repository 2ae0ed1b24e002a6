//! Periodic background task
//!
//! A `Ticker` owns one named thread that runs a task every `interval`.
//! The interval can change while running; stopping wakes the thread
//! immediately and waits for an in-flight run to finish.

use super::error::{LoggerError, Result};
use crossbeam_channel::{unbounded, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

enum Command {
    Reschedule,
}

pub(crate) struct Ticker {
    control: Option<Sender<Command>>,
    handle: Option<thread::JoinHandle<()>>,
    interval_ms: Arc<AtomicU64>,
}

impl Ticker {
    pub(crate) fn spawn<F>(name: &str, interval: Duration, mut task: F) -> Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let interval_ms = Arc::new(AtomicU64::new(Self::to_millis(name, interval)?));
        let interval_clone = Arc::clone(&interval_ms);
        let (control, commands) = unbounded();
        let thread_name = name.to_string();

        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || loop {
                let wait = Duration::from_millis(interval_clone.load(Ordering::Relaxed));
                match commands.recv_timeout(wait) {
                    Ok(Command::Reschedule) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {
                        // One panicking run must not end the schedule
                        let result =
                            std::panic::catch_unwind(std::panic::AssertUnwindSafe(&mut task));
                        if let Err(panic_info) = result {
                            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                                s.to_string()
                            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                                s.clone()
                            } else {
                                "Unknown panic".to_string()
                            };
                            eprintln!(
                                "[LOGGER CRITICAL] Background task '{}' panicked: {}. \
                                 It will run again on the next tick.",
                                thread_name, panic_msg
                            );
                        }
                    }
                }
            })
            .map_err(|e| {
                LoggerError::io_operation(
                    "spawning background thread",
                    format!("Failed to start '{}'", name),
                    e,
                )
            })?;

        Ok(Self {
            control: Some(control),
            handle: Some(handle),
            interval_ms,
        })
    }

    fn to_millis(name: &str, interval: Duration) -> Result<u64> {
        let millis = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        if millis == 0 {
            return Err(LoggerError::config(
                name,
                "interval must be at least one millisecond",
            ));
        }
        Ok(millis)
    }

    pub(crate) fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.load(Ordering::Relaxed))
    }

    /// Change the period; the next run is scheduled from now.
    pub(crate) fn set_interval(&self, name: &str, interval: Duration) -> Result<()> {
        let millis = Self::to_millis(name, interval)?;
        self.interval_ms.store(millis, Ordering::Relaxed);
        if let Some(ref control) = self.control {
            // Stopped tickers have no receiver left; nothing to wake
            let _ = control.send(Command::Reschedule);
        }
        Ok(())
    }

    /// Stop future runs and wait for the thread to exit
    pub(crate) fn stop(&mut self) {
        drop(self.control.take());

        if let Some(handle) = self.handle.take() {
            // Stopping from inside the task itself cannot join its own thread
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if let Err(e) = handle.join() {
                eprintln!("[LOGGER ERROR] Background thread panicked during shutdown: {:?}", e);
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
