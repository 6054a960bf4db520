//! Progress display while scanning
//!
//! Provides visual feedback on stderr using indicatif. Report lines are
//! printed through [`Progress::suspend`] and log lines through
//! [`crate::logging::StderrAroundBar`] so they never tear the spinner.

use crate::logging;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Spinner counting reported manifests
pub struct Progress {
    /// Current spinner, absent when disabled
    bar: Option<ProgressBar>,
    /// Manifests reported so far
    reported: u64,
}

impl Progress {
    /// Create a progress reporter; a disabled one draws nothing
    pub fn new(enabled: bool) -> Self {
        let bar = enabled.then(|| {
            let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
            let style = ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            spinner.set_style(style);
            spinner.set_message("scanning...");
            spinner.enable_steady_tick(Duration::from_millis(80));
            logging::set_active_bar(Some(spinner.clone()));
            spinner
        });
        Self { bar, reported: 0 }
    }

    /// Record one more reported manifest
    pub fn inc(&mut self) {
        self.reported += 1;
        if let Some(ref bar) = self.bar {
            bar.set_message(reported_message(self.reported));
        }
    }

    /// Run `f` with the spinner hidden
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        match self.bar {
            Some(ref bar) => bar.suspend(f),
            None => f(),
        }
    }

    /// Finish and clear the spinner
    pub fn finish_and_clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            logging::set_active_bar(None);
            bar.finish_and_clear();
        }
    }
}

fn reported_message(reported: u64) -> String {
    format!("{} manifests reported", reported)
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.finish_and_clear();
    }
}
