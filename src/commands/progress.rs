// src/commands/progress.rs

//! Terminal progress display for discovery and download
//!
//! Bridges the library's [`ProgressTracker`] to an indicatif bar, and picks
//! the right tracker for the current output (bar, log lines or nothing).

use indicatif::{ProgressBar, ProgressStyle};
use obs_mirror::{LogProgress, ProgressTracker, SilentProgress};
use std::io::IsTerminal;
use std::time::Duration;

/// indicatif bar with a `prefix (pos/len) [bar] percent` layout
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new(prefix: &str) -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix:.bold} ({pos}/{len}) [{bar:40.green/dim}] {percent}% {wide_msg}")
                .expect("Invalid progress bar template")
                .progress_chars("##-"),
        );
        bar.set_prefix(prefix.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }
}

impl ProgressTracker for BarProgress {
    fn set_length(&self, length: u64) {
        self.bar.set_length(length);
    }

    fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    fn increment(&self, amount: u64) {
        self.bar.inc(amount);
    }

    fn position(&self) -> u64 {
        self.bar.position()
    }

    fn length(&self) -> u64 {
        self.bar.length().unwrap_or(0)
    }

    fn finish_with_message(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    fn finish_with_error(&self, message: &str) {
        self.bar.abandon_with_message(format!("FAILED: {message}"));
    }

    fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

/// Tracker for an operation called `name`
///
/// Quiet mode shows nothing, a terminal gets a bar, anything else gets
/// periodic log lines.
pub fn tracker(name: &str, quiet: bool) -> Box<dyn ProgressTracker> {
    if quiet {
        Box::new(SilentProgress::new())
    } else if std::io::stderr().is_terminal() {
        Box::new(BarProgress::new(name))
    } else {
        Box::new(LogProgress::new(name, 0))
    }
}
