//! Options - per-operation traversal settings

use crate::types::Pattern;

/// Settings for a single copy/mirror/move/sync operation.
///
/// The four pattern sets are independent: include/exclude, each split into
/// file and directory rules. A non-empty include set always wins over the
/// exclude set for the matching kind.
#[derive(Debug, Clone)]
pub struct Options {
    /// File include patterns; when non-empty, files must match one
    pub include_files: Vec<Pattern>,

    /// Directory include patterns; when non-empty, directories must match one
    pub include_dirs: Vec<Pattern>,

    /// File exclude patterns (ignored when include_files is non-empty)
    pub exclude_files: Vec<Pattern>,

    /// Directory exclude patterns (ignored when include_dirs is non-empty)
    pub exclude_dirs: Vec<Pattern>,

    /// Depth limit: 0 = unlimited, positive counts from the root,
    /// negative counts from the deepest leaves
    pub level: i32,

    /// Traverse through symbolic links instead of skipping them
    pub follow_links: bool,

    /// Overwrite destination files even when they are newer
    pub force_overwrite: bool,

    /// Copy source file stats (mtime/atime, permission bits) to destination
    pub preserve_stats: bool,

    /// Populate the per-entry path lists in the result record
    pub detailed: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            include_files: Vec::new(),
            include_dirs: Vec::new(),
            exclude_files: Vec::new(),
            exclude_dirs: Vec::new(),
            level: 0,
            follow_links: false,
            force_overwrite: false,
            preserve_stats: true,
            detailed: false,
        }
    }
}
