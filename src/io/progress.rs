//! Piece-by-piece progress display for the command line

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {pos}/{len} pieces")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar advanced once per cut piece
///
/// A hidden manager reports nothing, which keeps call sites free of
/// `Option` checks when output is suppressed.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a visible progress bar
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(PROGRESS_STYLE.clone());
        Self { bar }
    }

    /// Create a manager that draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Label the bar for a new puzzle
    pub fn start(&self, label: &str) {
        self.bar.set_message(label.to_string());
        self.bar.set_position(0);
    }

    /// Report `done` of `total` pieces finished
    pub fn update(&self, done: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(done as u64);
    }

    /// Mark the puzzle as completed
    pub fn finish(&self, label: &str) {
        self.bar.finish_with_message(format!("✓ {label}"));
    }

    /// Remove the bar after a failure
    pub fn abandon(&self) {
        self.bar.abandon();
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}
