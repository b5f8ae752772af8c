//! Result records accumulated during an operation
//!
//! Every mode returns a fixed-shape record: counters are always present and
//! the per-entry path lists are populated only in detailed mode (they stay
//! empty otherwise, they never disappear from the shape). Serialized field
//! names keep the camelCase convention of the original wire format.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Accumulated outcome of one traversal (copy and sync modes).
///
/// Invariant: when `detailed` is set, each counter equals the length of its
/// corresponding path list. All mutation goes through the `record_*` methods
/// to keep that invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyStats {
    pub files_copied: usize,
    pub files_failed: usize,
    pub files_skipped: usize,
    pub dirs_copied: usize,
    pub dirs_failed: usize,
    pub dirs_skipped: usize,

    /// Whether the path lists below are populated
    #[serde(skip)]
    pub detailed: bool,

    pub files_copied_list: Vec<PathBuf>,
    pub files_failed_list: Vec<PathBuf>,
    pub files_skipped_list: Vec<PathBuf>,
    pub dirs_copied_list: Vec<PathBuf>,
    pub dirs_failed_list: Vec<PathBuf>,
    pub dirs_skipped_list: Vec<PathBuf>,
}

impl CopyStats {
    /// Create an empty accumulator.
    pub fn new(detailed: bool) -> Self {
        Self {
            detailed,
            ..Default::default()
        }
    }

    pub fn record_file_copied(&mut self, rel: &Path) {
        self.files_copied += 1;
        if self.detailed {
            self.files_copied_list.push(rel.to_path_buf());
        }
    }

    pub fn record_file_failed(&mut self, rel: &Path) {
        self.files_failed += 1;
        if self.detailed {
            self.files_failed_list.push(rel.to_path_buf());
        }
    }

    pub fn record_file_skipped(&mut self, rel: &Path) {
        self.files_skipped += 1;
        if self.detailed {
            self.files_skipped_list.push(rel.to_path_buf());
        }
    }

    pub fn record_dir_copied(&mut self, rel: &Path) {
        self.dirs_copied += 1;
        if self.detailed {
            self.dirs_copied_list.push(rel.to_path_buf());
        }
    }

    pub fn record_dir_failed(&mut self, rel: &Path) {
        self.dirs_failed += 1;
        if self.detailed {
            self.dirs_failed_list.push(rel.to_path_buf());
        }
    }

    pub fn record_dir_skipped(&mut self, rel: &Path) {
        self.dirs_skipped += 1;
        if self.detailed {
            self.dirs_skipped_list.push(rel.to_path_buf());
        }
    }

    /// True if any file or directory failed.
    pub fn has_failures(&self) -> bool {
        self.files_failed > 0 || self.dirs_failed > 0
    }

    /// Drop the path lists, leaving only the counters.
    pub fn strip_lists(&mut self) {
        self.detailed = false;
        self.files_copied_list.clear();
        self.files_failed_list.clear();
        self.files_skipped_list.clear();
        self.dirs_copied_list.clear();
        self.dirs_failed_list.clear();
        self.dirs_skipped_list.clear();
    }
}

/// Outcome of a mirror operation: a copy pass plus a removal pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorStats {
    #[serde(flatten)]
    pub copy: CopyStats,

    pub files_removed: usize,
    pub dirs_removed: usize,
    pub files_removed_list: Vec<PathBuf>,
    pub dirs_removed_list: Vec<PathBuf>,
}

impl MirrorStats {
    /// Wrap a finished copy pass; detail mode is inherited from it.
    pub fn from_copy(copy: CopyStats) -> Self {
        Self {
            copy,
            ..Default::default()
        }
    }

    pub fn record_file_removed(&mut self, rel: &Path) {
        self.files_removed += 1;
        if self.copy.detailed {
            self.files_removed_list.push(rel.to_path_buf());
        }
    }

    pub fn record_dir_removed(&mut self, rel: &Path) {
        self.dirs_removed += 1;
        if self.copy.detailed {
            self.dirs_removed_list.push(rel.to_path_buf());
        }
    }

    pub fn has_failures(&self) -> bool {
        self.copy.has_failures()
    }

    pub fn strip_lists(&mut self) {
        self.copy.strip_lists();
        self.files_removed_list.clear();
        self.dirs_removed_list.clear();
    }
}

/// Outcome of a move operation: the copy pass with copied renamed to moved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveStats {
    pub files_moved: usize,
    pub files_failed: usize,
    pub files_skipped: usize,
    pub dirs_moved: usize,
    pub dirs_failed: usize,
    pub dirs_skipped: usize,

    #[serde(skip)]
    pub detailed: bool,

    pub files_moved_list: Vec<PathBuf>,
    pub files_failed_list: Vec<PathBuf>,
    pub files_skipped_list: Vec<PathBuf>,
    pub dirs_moved_list: Vec<PathBuf>,
    pub dirs_failed_list: Vec<PathBuf>,
    pub dirs_skipped_list: Vec<PathBuf>,
}

impl From<CopyStats> for MoveStats {
    fn from(copy: CopyStats) -> Self {
        Self {
            files_moved: copy.files_copied,
            files_failed: copy.files_failed,
            files_skipped: copy.files_skipped,
            dirs_moved: copy.dirs_copied,
            dirs_failed: copy.dirs_failed,
            dirs_skipped: copy.dirs_skipped,
            detailed: copy.detailed,
            files_moved_list: copy.files_copied_list,
            files_failed_list: copy.files_failed_list,
            files_skipped_list: copy.files_skipped_list,
            dirs_moved_list: copy.dirs_copied_list,
            dirs_failed_list: copy.dirs_failed_list,
            dirs_skipped_list: copy.dirs_skipped_list,
        }
    }
}

impl MoveStats {
    pub fn has_failures(&self) -> bool {
        self.files_failed > 0 || self.dirs_failed > 0
    }

    pub fn strip_lists(&mut self) {
        self.detailed = false;
        self.files_moved_list.clear();
        self.files_failed_list.clear();
        self.files_skipped_list.clear();
        self.dirs_moved_list.clear();
        self.dirs_failed_list.clear();
        self.dirs_skipped_list.clear();
    }
}

/// The result record of a completed operation, tagged by mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum OperationReport {
    Copy(CopyStats),
    Mirror(MirrorStats),
    Move(MoveStats),
    Sync(CopyStats),
}

impl OperationReport {
    /// True if any per-entry failure was recorded.
    pub fn has_failures(&self) -> bool {
        match self {
            OperationReport::Copy(stats) | OperationReport::Sync(stats) => stats.has_failures(),
            OperationReport::Mirror(stats) => stats.has_failures(),
            OperationReport::Move(stats) => stats.has_failures(),
        }
    }
}
