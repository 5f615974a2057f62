// src/progress.rs

//! Progress observers for discovery and download
//!
//! Long-running operations report through the [`ProgressTracker`] trait and
//! never know how (or whether) progress is displayed. Implementations:
//! - `SilentProgress`: counts but shows nothing (quiet mode, tests)
//! - `LogProgress`: logs roughly every 10% through tracing
//! - `CallbackProgress`: forwards [`ProgressEvent`]s to a closure
//!
//! The terminal progress bar lives with the CLI commands.
//!
//! # Example
//!
//! ```ignore
//! let progress = LogProgress::new("download", 0);
//! client.download_package_files(&pkg, root, &progress)?;
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::info;

/// Observer notified by discovery and download
///
/// Calls are purely informational; nothing a tracker does can change the
/// result of the operation reporting to it.
pub trait ProgressTracker {
    /// The total number of items became known (or was re-estimated)
    fn set_length(&self, length: u64);

    /// Work on a named item started
    fn set_message(&self, message: &str);

    /// `amount` items completed
    fn increment(&self, amount: u64);

    fn position(&self) -> u64;

    fn length(&self) -> u64;

    /// The operation completed successfully
    fn finish_with_message(&self, message: &str);

    /// The operation was aborted by an error
    fn finish_with_error(&self, message: &str);

    fn is_finished(&self) -> bool;
}

/// No-op tracker that still keeps counts
#[derive(Debug, Default)]
pub struct SilentProgress {
    position: AtomicU64,
    length: AtomicU64,
    finished: AtomicBool,
}

impl SilentProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressTracker for SilentProgress {
    fn set_length(&self, length: u64) {
        self.length.store(length, Ordering::Relaxed);
    }

    fn set_message(&self, _message: &str) {}

    fn increment(&self, amount: u64) {
        self.position.fetch_add(amount, Ordering::Relaxed);
    }

    fn position(&self) -> u64 {
        self.position.load(Ordering::Relaxed)
    }

    fn length(&self) -> u64 {
        self.length.load(Ordering::Relaxed)
    }

    fn finish_with_message(&self, _message: &str) {
        self.finished.store(true, Ordering::Relaxed);
    }

    fn finish_with_error(&self, _message: &str) {
        self.finished.store(true, Ordering::Relaxed);
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Relaxed)
    }
}

/// Logs progress to tracing at info level
///
/// For non-interactive runs where a progress bar would only garble output.
#[derive(Debug)]
pub struct LogProgress {
    name: String,
    position: AtomicU64,
    length: AtomicU64,
    finished: AtomicBool,
}

impl LogProgress {
    pub fn new(name: impl Into<String>, length: u64) -> Self {
        Self {
            name: name.into(),
            position: AtomicU64::new(0),
            length: AtomicU64::new(length),
            finished: AtomicBool::new(false),
        }
    }

    fn log_interval(&self) -> u64 {
        // ~10 lines per run
        std::cmp::max(1, self.length.load(Ordering::Relaxed) / 10)
    }
}

impl ProgressTracker for LogProgress {
    fn set_length(&self, length: u64) {
        self.length.store(length, Ordering::Relaxed);
        info!("{}: {} items", self.name, length);
    }

    fn set_message(&self, message: &str) {
        tracing::debug!("{}: {}", self.name, message);
    }

    fn increment(&self, amount: u64) {
        let old_pos = self.position.fetch_add(amount, Ordering::Relaxed);
        let new_pos = old_pos + amount;
        let length = self.length.load(Ordering::Relaxed);
        let interval = self.log_interval();

        if length > 0 && new_pos / interval > old_pos / interval {
            let percent = (new_pos * 100) / length;
            info!("{}: {}% ({}/{})", self.name, percent, new_pos, length);
        }
    }

    fn position(&self) -> u64 {
        self.position.load(Ordering::Relaxed)
    }

    fn length(&self) -> u64 {
        self.length.load(Ordering::Relaxed)
    }

    fn finish_with_message(&self, message: &str) {
        self.finished.store(true, Ordering::Relaxed);
        info!("{}: {}", self.name, message);
    }

    fn finish_with_error(&self, message: &str) {
        self.finished.store(true, Ordering::Relaxed);
        info!("{}: ERROR - {}", self.name, message);
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Relaxed)
    }
}

/// Events emitted by [`CallbackProgress`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Total became known
    Length(u64),
    /// An item started
    Started(String),
    /// Position changed
    Position { current: u64, total: u64 },
    Finished(String),
    Error(String),
}

/// Calls a user-provided function on every progress event
pub struct CallbackProgress<F>
where
    F: Fn(ProgressEvent),
{
    callback: F,
    position: AtomicU64,
    length: AtomicU64,
    finished: AtomicBool,
}

impl<F> CallbackProgress<F>
where
    F: Fn(ProgressEvent),
{
    pub fn new(callback: F) -> Self {
        Self {
            callback,
            position: AtomicU64::new(0),
            length: AtomicU64::new(0),
            finished: AtomicBool::new(false),
        }
    }
}

impl<F> ProgressTracker for CallbackProgress<F>
where
    F: Fn(ProgressEvent),
{
    fn set_length(&self, length: u64) {
        self.length.store(length, Ordering::Relaxed);
        (self.callback)(ProgressEvent::Length(length));
    }

    fn set_message(&self, message: &str) {
        (self.callback)(ProgressEvent::Started(message.to_string()));
    }

    fn increment(&self, amount: u64) {
        let current = self.position.fetch_add(amount, Ordering::Relaxed) + amount;
        let total = self.length.load(Ordering::Relaxed);
        (self.callback)(ProgressEvent::Position { current, total });
    }

    fn position(&self) -> u64 {
        self.position.load(Ordering::Relaxed)
    }

    fn length(&self) -> u64 {
        self.length.load(Ordering::Relaxed)
    }

    fn finish_with_message(&self, message: &str) {
        self.finished.store(true, Ordering::Relaxed);
        (self.callback)(ProgressEvent::Finished(message.to_string()));
    }

    fn finish_with_error(&self, message: &str) {
        self.finished.store(true, Ordering::Relaxed);
        (self.callback)(ProgressEvent::Error(message.to_string()));
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Relaxed)
    }
}
