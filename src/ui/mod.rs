//! Progress reporting
//!
//! Operations report through an explicit [`ProgressSink`] handed down to the
//! traversal and the byte-copy primitive. Sinks are purely observational:
//! nothing in the engine consults them for decisions, and every method has a
//! no-op default so library callers can implement only what they need.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Receiver for per-entry events and byte-level transfer progress.
pub trait ProgressSink: Sync {
    /// A file or directory was copied.
    fn entry_copied(&self, _rel: &Path) {}

    /// A file or directory was skipped (pattern, depth or up-to-date).
    fn entry_skipped(&self, _rel: &Path) {}

    /// A file or directory failed.
    fn entry_failed(&self, _rel: &Path) {}

    /// A destination/source entry was removed (mirror and move passes).
    fn entry_removed(&self, _rel: &Path) {}

    /// Byte progress within a single file transfer.
    fn transfer_progress(&self, _bytes_written: u64, _bytes_total: u64) {}
}

/// Sink that discards all events (quiet mode, library default).
pub struct NullSink;

impl ProgressSink for NullSink {}

/// Console sink: a byte progress bar during transfers and, in verbose mode,
/// one line per entry. Failures are always surfaced.
pub struct ConsoleSink {
    bar: ProgressBar,
    verbose: bool,
}

impl ConsoleSink {
    pub fn new(verbose: bool) -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) =
            ProgressStyle::with_template("{bytes}/{total_bytes} [{bar:40.cyan/blue}]")
        {
            bar.set_style(style.progress_chars("=> "));
        }

        Self { bar, verbose }
    }

    /// Clear the transfer bar once the operation is done, so the summary
    /// prints on a clean line.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn line(&self, message: String) {
        // println through the bar keeps the bar rendering intact.
        self.bar.println(message);
    }
}

impl ProgressSink for ConsoleSink {
    fn entry_copied(&self, rel: &Path) {
        if self.verbose {
            self.line(format!("Copied: {}", rel.display()));
        }
    }

    fn entry_skipped(&self, rel: &Path) {
        if self.verbose {
            self.line(format!("Skipped: {}", rel.display()));
        }
    }

    fn entry_failed(&self, rel: &Path) {
        self.line(format!("Failed: {}", rel.display()));
    }

    fn entry_removed(&self, rel: &Path) {
        if self.verbose {
            self.line(format!("Removed: {}", rel.display()));
        }
    }

    fn transfer_progress(&self, bytes_written: u64, bytes_total: u64) {
        if self.bar.length() != Some(bytes_total) {
            self.bar.set_length(bytes_total);
        }
        self.bar.set_position(bytes_written);
    }
}
