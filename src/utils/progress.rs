//! Progress indicators for silent mode
//!
//! The report goes to stdout in silent mode, so the bar is drawn on stderr
//! (indicatif's default) and hides itself when stderr is not a terminal.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress tracker for probe collection
pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    /// Create a new progress tracker for the given number of probes
    pub fn new(total_probes: u64) -> Self {
        let bar = ProgressBar::new(total_probes);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress template")
                .progress_chars("#>-"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Record one received probe result
    pub fn advance(&self, domain: &str) {
        self.bar.inc(1);
        self.bar.set_message(domain.to_string());
    }

    /// Finish and clear the progress bar
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}
