//! Command dispatch and result presentation

use crate::config::{Config, Mode};
use crate::ops;
use crate::types::{OperationReport, RocopyError};
use crate::ui::{ConsoleSink, NullSink, ProgressSink};

/// Run the configured operation and return its result record.
pub fn run(config: &Config) -> Result<OperationReport, RocopyError> {
    if config.quiet {
        dispatch(config, &NullSink)
    } else {
        let sink = ConsoleSink::new(config.verbose);
        let report = dispatch(config, &sink);
        sink.finish();
        report
    }
}

fn dispatch(config: &Config, sink: &dyn ProgressSink) -> Result<OperationReport, RocopyError> {
    let opts = config.options();
    let src = config.source.as_path();
    let dst = config.destination.as_path();

    match config.mode {
        Mode::Copy => ops::copy(src, dst, &opts, sink).map(OperationReport::Copy),
        Mode::Mirror => ops::mirror(src, dst, &opts, sink).map(OperationReport::Mirror),
        Mode::Move => ops::move_tree(src, dst, &opts, sink).map(OperationReport::Move),
        Mode::Sync => ops::sync(src, dst, &opts, sink).map(OperationReport::Sync),
    }
}

/// Render the result record as the human summary table.
pub fn format_summary(report: &OperationReport) -> String {
    let mut lines = Vec::new();

    match report {
        OperationReport::Copy(stats) | OperationReport::Sync(stats) => {
            lines.push("Files:".to_string());
            lines.push(format!("  Copied: {}", stats.files_copied));
            lines.push(format!("  Skipped: {}", stats.files_skipped));
            lines.push(format!("  Failed: {}", stats.files_failed));
            lines.push("Directories:".to_string());
            lines.push(format!("  Copied: {}", stats.dirs_copied));
            lines.push(format!("  Skipped: {}", stats.dirs_skipped));
            lines.push(format!("  Failed: {}", stats.dirs_failed));
        }
        OperationReport::Mirror(stats) => {
            lines.push("Files:".to_string());
            lines.push(format!("  Copied: {}", stats.copy.files_copied));
            lines.push(format!("  Removed: {}", stats.files_removed));
            lines.push(format!("  Skipped: {}", stats.copy.files_skipped));
            lines.push(format!("  Failed: {}", stats.copy.files_failed));
            lines.push("Directories:".to_string());
            lines.push(format!("  Copied: {}", stats.copy.dirs_copied));
            lines.push(format!("  Removed: {}", stats.dirs_removed));
            lines.push(format!("  Skipped: {}", stats.copy.dirs_skipped));
            lines.push(format!("  Failed: {}", stats.copy.dirs_failed));
        }
        OperationReport::Move(stats) => {
            lines.push("Files:".to_string());
            lines.push(format!("  Moved: {}", stats.files_moved));
            lines.push(format!("  Skipped: {}", stats.files_skipped));
            lines.push(format!("  Failed: {}", stats.files_failed));
            lines.push("Directories:".to_string());
            lines.push(format!("  Moved: {}", stats.dirs_moved));
            lines.push(format!("  Skipped: {}", stats.dirs_skipped));
            lines.push(format!("  Failed: {}", stats.dirs_failed));
        }
    }

    lines.join("\n")
}
