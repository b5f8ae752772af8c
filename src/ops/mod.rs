//! Operation modes: copy, mirror, move and sync
//!
//! Every mode is the traversal engine plus mode-specific bookkeeping. The
//! deletion passes of mirror and move run with the detailed path lists
//! forced on internally, because those lists are the protection record: an
//! entry the copy pass skipped or failed to copy is never deleted.

use crate::executor;
use crate::pattern;
use crate::scanner;
use crate::types::{CopyStats, MirrorStats, MoveStats, Options, RocopyError};
use crate::ui::ProgressSink;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// One-way copy of `src` into `dst`. Existing destination entries with no
/// source counterpart are left alone.
pub fn copy(
    src: &Path,
    dst: &Path,
    opts: &Options,
    sink: &dyn ProgressSink,
) -> Result<CopyStats, RocopyError> {
    executor::traverse(src, dst, opts, sink)
}

/// Make `dst` an exact filtered replica of `src`: a copy pass, then a
/// bottom-up removal pass over the destination deleting everything without
/// a source counterpart.
///
/// Entries the copy pass skipped or failed, and destination entries
/// matching an exclude pattern, are protected from removal. Directories
/// that stay non-empty because of protected content are recorded as failed
/// rather than force-deleted.
pub fn mirror(
    src: &Path,
    dst: &Path,
    opts: &Options,
    sink: &dyn ProgressSink,
) -> Result<MirrorStats, RocopyError> {
    let detailed_opts = Options {
        detailed: true,
        ..opts.clone()
    };
    let copy_pass = executor::traverse(src, dst, &detailed_opts, sink)?;

    let src = std::path::absolute(src)?;
    let dst = std::path::absolute(dst)?;
    let mut stats = MirrorStats::from_copy(copy_pass);

    // An unfollowed symlink source was a one-entry copy; there is no
    // tree to reconcile against.
    let walkable_src =
        src.is_dir() && (opts.follow_links || !executor::path_is_symlink(&src));

    if walkable_src && dst.is_dir() {
        // The depth window is re-evaluated against the source tree, the
        // same window the copy pass used.
        let max_depth = scanner::max_depth(&src);

        for visit in scanner::walk_bottom_up(&dst, opts.follow_links) {
            let rel = visit.rel.as_path();
            let is_root = rel == Path::new(".");

            if visit.is_symlink && !opts.follow_links {
                continue;
            }
            if scanner::outside_level(rel, max_depth, opts.level) {
                continue;
            }
            if !is_root && dir_protected(rel, &stats.copy, opts) {
                continue;
            }

            let dst_dir = if is_root { dst.clone() } else { dst.join(rel) };
            let Ok(files) = scanner::list_files(&dst_dir) else {
                stats.copy.record_dir_failed(rel);
                sink.entry_failed(rel);
                continue;
            };

            for name in files {
                let rel_file = if is_root {
                    PathBuf::from(&name)
                } else {
                    rel.join(&name)
                };

                if entry_exists(&src.join(&rel_file)) {
                    continue;
                }
                if file_protected(&rel_file, &stats.copy, opts) {
                    continue;
                }

                if fs::remove_file(dst_dir.join(&name)).is_ok() {
                    stats.record_file_removed(&rel_file);
                    sink.entry_removed(&rel_file);
                } else {
                    stats.copy.record_file_failed(&rel_file);
                    sink.entry_failed(&rel_file);
                }
            }

            // The destination root itself always stays.
            if is_root || entry_exists(&src.join(rel)) {
                continue;
            }

            // Only empty directories are removed; a directory kept
            // non-empty by protected content is a failure, not a
            // force-delete.
            if fs::remove_dir(&dst_dir).is_ok() {
                stats.record_dir_removed(rel);
                sink.entry_removed(rel);
            } else {
                stats.copy.record_dir_failed(rel);
                sink.entry_failed(rel);
            }
        }
    }

    if !opts.detailed {
        stats.strip_lists();
    }
    Ok(stats)
}

/// Relocate `src` into `dst`: a copy pass, then deletion of every source
/// entry the copy pass actually transferred. Skipped and failed entries
/// stay behind, and directories only disappear once emptied; the source
/// root itself is removed when nothing is left in it.
pub fn move_tree(
    src: &Path,
    dst: &Path,
    opts: &Options,
    sink: &dyn ProgressSink,
) -> Result<MoveStats, RocopyError> {
    let detailed_opts = Options {
        detailed: true,
        ..opts.clone()
    };
    let copy_pass = executor::traverse(src, dst, &detailed_opts, sink)?;

    let src = std::path::absolute(src)?;
    let mut stats = copy_pass;

    // An unfollowed symlink source is pruned as a single entry below,
    // never through the link.
    let src_is_symlink = executor::path_is_symlink(&src);

    if src.is_dir() && (opts.follow_links || !src_is_symlink) {
        // Deletion never traverses through links regardless of the copy
        // pass's follow setting.
        for visit in scanner::walk_bottom_up(&src, false) {
            let rel = visit.rel.as_path();
            let is_root = rel == Path::new(".");

            if !is_root
                && (list_contains(&stats.dirs_skipped_list, rel)
                    || list_contains(&stats.dirs_failed_list, rel))
            {
                continue;
            }

            let src_dir = if is_root { src.clone() } else { src.join(rel) };

            // An unfollowed symlinked directory was copied as nothing; its
            // contents live elsewhere, so only the link itself goes.
            if visit.is_symlink {
                let _ = fs::remove_file(&src_dir).or_else(|_| fs::remove_dir(&src_dir));
                continue;
            }

            if let Ok(files) = scanner::list_files(&src_dir) {
                for name in files {
                    let rel_file = if is_root {
                        PathBuf::from(&name)
                    } else {
                        rel.join(&name)
                    };

                    if list_contains(&stats.files_skipped_list, &rel_file)
                        || list_contains(&stats.files_failed_list, &rel_file)
                    {
                        continue;
                    }

                    if fs::remove_file(src_dir.join(&name)).is_err() {
                        stats.record_file_failed(&rel_file);
                        sink.entry_failed(&rel_file);
                    }
                }
            }

            // Succeeds only once the directory is empty; leftovers mean
            // protected content stays where it is.
            let _ = fs::remove_dir(&src_dir);
        }
    } else if (src.is_file() || src_is_symlink) && stats.files_copied > 0 {
        if fs::remove_file(&src).is_err() {
            // The result lists hold operation-relative paths; for a
            // single-entry source that is its basename.
            let rel = src
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| src.clone());
            stats.record_file_failed(&rel);
            sink.entry_failed(&rel);
        }
    }

    let mut stats = MoveStats::from(stats);
    if !opts.detailed {
        stats.strip_lists();
    }
    Ok(stats)
}

/// Bidirectional synchronization: a copy pass in each direction, so both
/// sides end up holding the union of the two trees. Nothing is ever
/// deleted. The merged record counts each entry once even when both passes
/// touched it.
pub fn sync(
    a: &Path,
    b: &Path,
    opts: &Options,
    sink: &dyn ProgressSink,
) -> Result<CopyStats, RocopyError> {
    let detailed_opts = Options {
        detailed: true,
        ..opts.clone()
    };

    let forward = executor::traverse(a, b, &detailed_opts, sink)?;
    let backward = executor::traverse(b, a, &detailed_opts, sink)?;

    let mut merged = CopyStats::new(true);
    merged.files_copied_list = merge_lists(forward.files_copied_list, backward.files_copied_list);
    merged.files_failed_list = merge_lists(forward.files_failed_list, backward.files_failed_list);
    merged.files_skipped_list =
        merge_lists(forward.files_skipped_list, backward.files_skipped_list);
    merged.dirs_copied_list = merge_lists(forward.dirs_copied_list, backward.dirs_copied_list);
    merged.dirs_failed_list = merge_lists(forward.dirs_failed_list, backward.dirs_failed_list);
    merged.dirs_skipped_list = merge_lists(forward.dirs_skipped_list, backward.dirs_skipped_list);

    merged.files_copied = merged.files_copied_list.len();
    merged.files_failed = merged.files_failed_list.len();
    merged.files_skipped = merged.files_skipped_list.len();
    merged.dirs_copied = merged.dirs_copied_list.len();
    merged.dirs_failed = merged.dirs_failed_list.len();
    merged.dirs_skipped = merged.dirs_skipped_list.len();

    if !opts.detailed {
        merged.strip_lists();
    }
    Ok(merged)
}

/// Set union of two pass lists, first-pass order preserved.
fn merge_lists(first: Vec<PathBuf>, second: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut merged = Vec::new();

    for path in first.into_iter().chain(second) {
        if seen.insert(path.clone()) {
            merged.push(path);
        }
    }

    merged
}

/// Presence check that counts broken symlinks as existing.
fn entry_exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

fn list_contains(list: &[PathBuf], rel: &Path) -> bool {
    list.iter().any(|p| p == rel)
}

fn dir_protected(rel: &Path, copy_pass: &CopyStats, opts: &Options) -> bool {
    list_contains(&copy_pass.dirs_skipped_list, rel)
        || list_contains(&copy_pass.dirs_failed_list, rel)
        || pattern::matches_any(rel, false, &opts.exclude_dirs)
}

fn file_protected(rel: &Path, copy_pass: &CopyStats, opts: &Options) -> bool {
    list_contains(&copy_pass.files_skipped_list, rel)
        || list_contains(&copy_pass.files_failed_list, rel)
        || pattern::matches_any(rel, true, &opts.exclude_files)
}
