//! Progress display on stderr
//!
//! A spinner while metadata files load, and a counting bar while packages
//! are looked up. Both are no-ops when progress is turned off.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";
const LOOKUP_TEMPLATE: &str = "{spinner:.cyan} {msg:<32} [{bar:30.cyan/blue}] {pos}/{len}";

/// Progress indicator, hidden when disabled
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Spinner for an operation of unknown length
    pub fn spinner(enabled: bool, message: &str) -> Self {
        let bar = enabled.then(|| {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template(SPINNER_TEMPLATE) {
                bar.set_style(style);
            }
            bar.set_message(message.to_string());
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        });
        Self { bar }
    }

    /// Bar counting `total` package lookups
    pub fn lookups(enabled: bool, total: u64) -> Self {
        let bar = (enabled && total > 0).then(|| {
            let bar = ProgressBar::new(total);
            if let Ok(style) = ProgressStyle::default_bar().template(LOOKUP_TEMPLATE) {
                bar.set_style(style.progress_chars("=> "));
            }
            bar.set_message("Looking up packages");
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        });
        Self { bar }
    }

    /// Record one finished lookup
    pub fn advance(&self, package: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(package.to_string());
            bar.inc(1);
        }
    }

    /// Remove the indicator from the terminal
    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
