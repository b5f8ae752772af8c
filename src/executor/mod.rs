//! Traversal engine
//!
//! One bottom-up pass over the source tree driving the file-copy primitive.
//! All four operation modes are built on this single traversal: copy uses it
//! directly, mirror/move add a deletion pass over its bookkeeping, and sync
//! runs it once in each direction.

mod copy;

pub use copy::{copy_one_file, is_same_path, mkdir, CopyOutcome, CHUNK_SIZE};

use crate::pattern;
use crate::scanner;
use crate::types::{CopyStats, Options, RocopyError};
use crate::ui::ProgressSink;
use std::path::{Path, PathBuf};

/// Copy a source tree (or single file) into a destination.
///
/// The walk is bottom-up and depth/pattern filtering is applied per
/// directory; files within an accepted directory are then checked against
/// the file pattern sets individually by the copy primitive. Per-entry
/// failures are recorded in the returned stats, never propagated; only a
/// same-path pair or a missing source aborts the operation.
pub fn traverse(
    src: &Path,
    dst: &Path,
    opts: &Options,
    sink: &dyn ProgressSink,
) -> Result<CopyStats, RocopyError> {
    let src = std::path::absolute(src)?;
    let dst = std::path::absolute(dst)?;

    if src == dst || is_same_path(&src, &dst) {
        return Err(RocopyError::SamePath { path: src });
    }

    // An unfollowed symlink source is a one-entry traversal: the link
    // itself is copied, its target is never walked.
    if src.is_file() || (!opts.follow_links && path_is_symlink(&src)) {
        return Ok(copy_single_file(&src, &dst, opts, sink));
    }
    if src.is_dir() {
        return Ok(copy_tree(&src, &dst, opts, sink));
    }

    Err(RocopyError::InvalidSource { path: src })
}

/// Single-file source: a directory destination means "into", anything else
/// is the literal destination path.
fn copy_single_file(src: &Path, dst: &Path, opts: &Options, sink: &dyn ProgressSink) -> CopyStats {
    let mut stats = CopyStats::new(opts.detailed);

    let dst = if dst.is_dir() {
        match src.file_name() {
            Some(name) => dst.join(name),
            None => dst.to_path_buf(),
        }
    } else {
        dst.to_path_buf()
    };

    // Patterns and the result lists see only the basename here; there is
    // no tree for the path to be relative to.
    let rel = src
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| src.to_path_buf());

    match copy_one_file(
        src,
        &dst,
        &rel,
        &opts.include_files,
        &opts.exclude_files,
        opts.force_overwrite,
        opts.preserve_stats,
        sink,
    ) {
        CopyOutcome::Copied => {
            stats.record_file_copied(&rel);
            sink.entry_copied(&rel);
        }
        CopyOutcome::Skipped => {
            stats.record_file_skipped(&rel);
            sink.entry_skipped(&rel);
        }
        CopyOutcome::Failed => {
            stats.record_file_failed(&rel);
            sink.entry_failed(&rel);
        }
    }

    stats
}

/// Whether the path itself is a symbolic link (never resolved).
pub(crate) fn path_is_symlink(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

fn copy_tree(src: &Path, dst: &Path, opts: &Options, sink: &dyn ProgressSink) -> CopyStats {
    let mut stats = CopyStats::new(opts.detailed);

    // The destination root exists even when filtering later skips the
    // root's own contents.
    if !mkdir(dst) {
        stats.record_dir_failed(Path::new("."));
        sink.entry_failed(Path::new("."));
        return stats;
    }

    // The depth window of a negative level is measured against the source
    // tree as it is before the operation.
    let max_depth = scanner::max_depth(src);

    for visit in scanner::walk_bottom_up(src, opts.follow_links) {
        let rel = visit.rel.as_path();
        let is_root = rel == Path::new(".");

        if visit.is_symlink && !opts.follow_links {
            stats.record_dir_skipped(rel);
            sink.entry_skipped(rel);
            continue;
        }

        if scanner::outside_level(rel, max_depth, opts.level) {
            stats.record_dir_skipped(rel);
            sink.entry_skipped(rel);
            continue;
        }

        // The root itself is never pattern-filtered.
        if !is_root && !pattern::should_process(rel, false, &opts.include_dirs, &opts.exclude_dirs)
        {
            stats.record_dir_skipped(rel);
            sink.entry_skipped(rel);
            continue;
        }

        let src_dir = if is_root { src.to_path_buf() } else { src.join(rel) };
        let dst_dir = if is_root { dst.to_path_buf() } else { dst.join(rel) };

        let files = match scanner::list_files(&src_dir) {
            Ok(files) => files,
            Err(_) => {
                stats.record_dir_failed(rel);
                sink.entry_failed(rel);
                continue;
            }
        };

        // The destination root was created before the walk and is a
        // precondition, not a copied entry.
        if !is_root {
            if !mkdir(&dst_dir) {
                stats.record_dir_failed(rel);
                sink.entry_failed(rel);
                continue;
            }
            stats.record_dir_copied(rel);
            sink.entry_copied(rel);
        }

        for name in files {
            let rel_file = if is_root {
                PathBuf::from(&name)
            } else {
                rel.join(&name)
            };

            match copy_one_file(
                &src_dir.join(&name),
                &dst_dir.join(&name),
                &rel_file,
                &opts.include_files,
                &opts.exclude_files,
                opts.force_overwrite,
                opts.preserve_stats,
                sink,
            ) {
                CopyOutcome::Copied => {
                    stats.record_file_copied(&rel_file);
                    sink.entry_copied(&rel_file);
                }
                CopyOutcome::Skipped => {
                    stats.record_file_skipped(&rel_file);
                    sink.entry_skipped(&rel_file);
                }
                CopyOutcome::Failed => {
                    stats.record_file_failed(&rel_file);
                    sink.entry_failed(&rel_file);
                }
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pattern;
    use crate::ui::NullSink;
    use std::fs;
    use tempfile::TempDir;

    fn options() -> Options {
        Options {
            detailed: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_copy_tree_basic() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(src.join("sub")).expect("Failed to create dirs");
        fs::write(src.join("fileA"), b"A").expect("Failed to write");
        fs::write(src.join("sub/fileB"), b"B").expect("Failed to write");

        let stats = traverse(&src, &dst, &options(), &NullSink).expect("copy should succeed");

        assert_eq!(stats.files_copied, 2);
        assert_eq!(stats.dirs_copied, 1);
        assert_eq!(stats.files_failed, 0);
        assert_eq!(stats.dirs_failed, 0);
        assert_eq!(fs::read(dst.join("fileA")).unwrap(), b"A");
        assert_eq!(fs::read(dst.join("sub/fileB")).unwrap(), b"B");
    }

    #[test]
    fn test_second_run_skips_everything() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(src.join("sub")).expect("Failed to create dirs");
        fs::write(src.join("fileA"), b"A").expect("Failed to write");
        fs::write(src.join("sub/fileB"), b"B").expect("Failed to write");

        traverse(&src, &dst, &options(), &NullSink).expect("first copy should succeed");
        let stats = traverse(&src, &dst, &options(), &NullSink).expect("second copy");

        assert_eq!(stats.files_copied, 0);
        assert_eq!(stats.files_skipped, 2);
    }

    #[test]
    fn test_same_path_is_fatal() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let src = temp.path().join("src");
        fs::create_dir(&src).expect("Failed to create dir");

        let err = traverse(&src, &src, &options(), &NullSink).unwrap_err();
        assert!(matches!(err, RocopyError::SamePath { .. }));
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let src = temp.path().join("nope");
        let dst = temp.path().join("dst");

        let err = traverse(&src, &dst, &options(), &NullSink).unwrap_err();
        assert!(matches!(err, RocopyError::InvalidSource { .. }));
    }

    #[test]
    fn test_single_file_into_directory() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let src = temp.path().join("one.txt");
        let dst = temp.path().join("dst");
        fs::write(&src, b"one").expect("Failed to write");
        fs::create_dir(&dst).expect("Failed to create dir");

        let stats = traverse(&src, &dst, &options(), &NullSink).expect("copy should succeed");

        assert_eq!(stats.files_copied, 1);
        // Single-entry results are recorded by basename, like the
        // relative paths of a tree traversal.
        assert_eq!(stats.files_copied_list, vec![PathBuf::from("one.txt")]);
        assert_eq!(fs::read(dst.join("one.txt")).unwrap(), b"one");
    }

    #[test]
    fn test_single_file_to_explicit_path() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let src = temp.path().join("one.txt");
        let dst = temp.path().join("renamed.txt");
        fs::write(&src, b"one").expect("Failed to write");

        let stats = traverse(&src, &dst, &options(), &NullSink).expect("copy should succeed");

        assert_eq!(stats.files_copied, 1);
        assert_eq!(fs::read(&dst).unwrap(), b"one");
    }

    #[test]
    fn test_excluded_directory_subtree_is_skipped() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(src.join("cache/deep")).expect("Failed to create dirs");
        fs::create_dir(src.join("data")).expect("Failed to create dir");
        fs::write(src.join("cache/c.txt"), b"c").expect("Failed to write");
        fs::write(src.join("cache/deep/d.txt"), b"d").expect("Failed to write");
        fs::write(src.join("data/keep.txt"), b"k").expect("Failed to write");

        let opts = Options {
            exclude_dirs: vec![Pattern::Glob("cache".to_string())],
            ..options()
        };
        let stats = traverse(&src, &dst, &opts, &NullSink).expect("copy should succeed");

        // "cache" and "cache/deep" both match the padded pattern.
        assert_eq!(stats.dirs_skipped, 2);
        assert_eq!(stats.files_copied, 1);
        assert!(!dst.join("cache").exists());
        assert!(dst.join("data/keep.txt").exists());
    }

    #[test]
    fn test_file_exclude_patterns() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(src.join("sub")).expect("Failed to create dirs");
        fs::write(src.join("keep.txt"), b"k").expect("Failed to write");
        fs::write(src.join("sub/drop.log"), b"d").expect("Failed to write");

        let opts = Options {
            exclude_files: vec![Pattern::Glob("*.log".to_string())],
            ..options()
        };
        let stats = traverse(&src, &dst, &opts, &NullSink).expect("copy should succeed");

        assert_eq!(stats.files_copied, 1);
        assert_eq!(stats.files_skipped, 1);
        assert!(dst.join("keep.txt").exists());
        assert!(!dst.join("sub/drop.log").exists());
        // The directory itself is still created.
        assert!(dst.join("sub").is_dir());
    }

    #[test]
    fn test_include_files_win_over_excludes() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir(&src).expect("Failed to create dir");
        fs::write(src.join("a.txt"), b"a").expect("Failed to write");
        fs::write(src.join("b.bin"), b"b").expect("Failed to write");

        let opts = Options {
            include_files: vec![Pattern::Glob("*.txt".to_string())],
            exclude_files: vec![Pattern::Glob("*".to_string())],
            ..options()
        };
        let stats = traverse(&src, &dst, &opts, &NullSink).expect("copy should succeed");

        assert_eq!(stats.files_copied, 1);
        assert_eq!(stats.files_skipped, 1);
        assert!(dst.join("a.txt").exists());
        assert!(!dst.join("b.bin").exists());
    }

    #[test]
    fn test_positive_level_limits_depth() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(src.join("L1/L2")).expect("Failed to create dirs");
        fs::write(src.join("root.txt"), b"r").expect("Failed to write");
        fs::write(src.join("L1/one.txt"), b"1").expect("Failed to write");
        fs::write(src.join("L1/L2/two.txt"), b"2").expect("Failed to write");

        let opts = Options {
            level: 2,
            ..options()
        };
        let stats = traverse(&src, &dst, &opts, &NullSink).expect("copy should succeed");

        // Root (depth 0) and L1 (depth 1) are inside level 2; L1/L2 is not.
        assert_eq!(stats.files_copied, 2);
        assert_eq!(stats.dirs_skipped, 1);
        assert!(dst.join("L1/one.txt").exists());
        assert!(!dst.join("L1/L2").exists());
    }

    #[test]
    fn test_negative_level_keeps_deepest() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(src.join("L1/L2")).expect("Failed to create dirs");
        fs::write(src.join("root.txt"), b"r").expect("Failed to write");
        fs::write(src.join("L1/L2/two.txt"), b"2").expect("Failed to write");

        let opts = Options {
            level: -1,
            ..options()
        };
        let stats = traverse(&src, &dst, &opts, &NullSink).expect("copy should succeed");

        assert_eq!(stats.files_copied, 1);
        assert!(dst.join("L1/L2/two.txt").exists());
        assert!(!dst.join("root.txt").exists());
    }

    #[test]
    #[cfg(unix)]
    fn test_unfollowed_symlink_dir_is_skipped() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(src.join("real")).expect("Failed to create dirs");
        fs::write(src.join("real/f.txt"), b"f").expect("Failed to write");
        std::os::unix::fs::symlink(src.join("real"), src.join("link"))
            .expect("Failed to create symlink");

        let stats = traverse(&src, &dst, &options(), &NullSink).expect("copy should succeed");

        assert_eq!(stats.dirs_skipped, 1);
        assert!(stats.dirs_skipped_list.contains(&PathBuf::from("link")));
        assert!(!dst.join("link").exists());
        assert!(dst.join("real/f.txt").exists());
    }

    #[test]
    #[cfg(unix)]
    fn test_unfollowed_symlink_dir_source_is_single_entry() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let real = temp.path().join("real");
        let link = temp.path().join("link");
        let dst = temp.path().join("dst");
        fs::create_dir(&real).expect("Failed to create dir");
        fs::write(real.join("inner.txt"), b"i").expect("Failed to write");
        std::os::unix::fs::symlink(&real, &link).expect("Failed to create symlink");

        let stats = traverse(&link, &dst, &options(), &NullSink).expect("copy should succeed");

        // The link is the one entry; its target is never walked.
        assert_eq!(stats.files_copied, 1);
        assert_eq!(stats.dirs_copied, 0);
        let meta = fs::symlink_metadata(&dst).expect("Failed to stat dest");
        assert!(meta.file_type().is_symlink(), "dest is the recreated link");
    }

    #[test]
    #[cfg(unix)]
    fn test_followed_symlink_dir_source_is_walked() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let real = temp.path().join("real");
        let link = temp.path().join("link");
        let dst = temp.path().join("dst");
        fs::create_dir(&real).expect("Failed to create dir");
        fs::write(real.join("inner.txt"), b"i").expect("Failed to write");
        std::os::unix::fs::symlink(&real, &link).expect("Failed to create symlink");

        let opts = Options {
            follow_links: true,
            ..options()
        };
        let stats = traverse(&link, &dst, &opts, &NullSink).expect("copy should succeed");

        assert_eq!(stats.files_copied, 1);
        assert_eq!(fs::read(dst.join("inner.txt")).unwrap(), b"i");
    }

    #[test]
    fn test_destination_root_exists_even_when_root_is_depth_skipped() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir(&src).expect("Failed to create dir");
        fs::write(src.join("f.txt"), b"f").expect("Failed to write");

        // Flat tree, level -1: the root itself falls outside the window,
        // but the destination directory is still created.
        let opts = Options {
            level: -1,
            ..options()
        };
        let stats = traverse(&src, &dst, &opts, &NullSink).expect("copy should succeed");

        assert!(dst.is_dir(), "destination root must exist after copy");
        assert_eq!(stats.files_copied, 0);
        assert_eq!(stats.dirs_skipped, 1);
    }

    #[test]
    fn test_detailed_lists_are_relative_paths() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(src.join("sub")).expect("Failed to create dirs");
        fs::write(src.join("sub/fileB"), b"B").expect("Failed to write");

        let stats = traverse(&src, &dst, &options(), &NullSink).expect("copy should succeed");

        assert_eq!(stats.files_copied_list, vec![PathBuf::from("sub/fileB")]);
        assert_eq!(stats.dirs_copied_list, vec![PathBuf::from("sub")]);
    }
}
