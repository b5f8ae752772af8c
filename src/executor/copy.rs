//! File-copy primitive
//!
//! Copies one file's bytes (or recreates one symlink) and optionally its
//! metadata, reporting a tri-state outcome the traversal engine classifies
//! into its counters. The primitive never panics and never propagates
//! errors: every failure mode maps to [`CopyOutcome::Failed`].

use crate::pattern;
use crate::types::Pattern;
use crate::ui::ProgressSink;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

/// Bytes per read in the streaming copy loop.
pub const CHUNK_SIZE: usize = 16 * 1024;

/// Tri-state result of the file-copy primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Bytes were transferred (or a symlink recreated) and post-conditions
    /// verified.
    Copied,

    /// The file failed its pattern check, or the destination is already at
    /// least as new and overwrite was not forced.
    Skipped,

    /// The source was unreadable, the write failed, source and destination
    /// are the same path, or post-verification did not hold.
    Failed,
}

/// Copy a single file from `src` to `dst`.
///
/// `rel` is the path the pattern sets are evaluated against (relative to
/// the operation root). If the source is a symbolic link the link itself is
/// recreated, never its target. Otherwise bytes are streamed in
/// [`CHUNK_SIZE`] chunks with per-chunk progress reported to `sink`, and the
/// source's stats are copied over when `preserve_stats` is set.
///
/// An existing destination with a modification time at or after the
/// source's is left alone unless `force_overwrite` is set.
pub fn copy_one_file(
    src: &Path,
    dst: &Path,
    rel: &Path,
    includes: &[Pattern],
    excludes: &[Pattern],
    force_overwrite: bool,
    preserve_stats: bool,
    sink: &dyn ProgressSink,
) -> CopyOutcome {
    let src_is_symlink = src
        .symlink_metadata()
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);

    // Symlinks are copyable as links whatever they point at (including
    // directories and dangling targets); anything else must be a regular
    // file.
    if !src.is_file() && !src_is_symlink {
        return CopyOutcome::Failed;
    }

    if is_same_path(src, dst) {
        return CopyOutcome::Failed;
    }

    if !pattern::should_process(rel, true, includes, excludes) {
        return CopyOutcome::Skipped;
    }

    if !force_overwrite && destination_is_current(src, dst) {
        return CopyOutcome::Skipped;
    }

    if let Some(parent) = dst.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() && !mkdir(parent) {
            return CopyOutcome::Failed;
        }
    }

    if src_is_symlink {
        if recreate_symlink(src, dst).is_err() {
            return CopyOutcome::Failed;
        }
    } else {
        if stream_copy(src, dst, sink).is_err() {
            return CopyOutcome::Failed;
        }
        if preserve_stats {
            copy_file_stats(src, dst);
        }
    }

    verify_copy(src, dst)
}

/// Check if the two paths point at the same filesystem entity. Paths that
/// cannot be resolved (typically a not-yet-existing destination) are never
/// the same.
pub fn is_same_path(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Create a directory and all missing parents.
///
/// Returns true iff `path` is a directory after the call, so an existing
/// file at `path` (or a failed creation) reads as false.
pub fn mkdir(path: &Path) -> bool {
    if path.exists() {
        return path.is_dir();
    }

    fs::create_dir_all(path).is_ok() && path.is_dir()
}

/// An existing destination is current when its mtime is at or after the
/// source's. Missing destination or unreadable times are never current.
fn destination_is_current(src: &Path, dst: &Path) -> bool {
    let (Ok(src_meta), Ok(dst_meta)) = (fs::metadata(src), fs::metadata(dst)) else {
        return false;
    };

    match (src_meta.modified(), dst_meta.modified()) {
        (Ok(src_mtime), Ok(dst_mtime)) => dst_mtime >= src_mtime,
        _ => false,
    }
}

fn stream_copy(src: &Path, dst: &Path, sink: &dyn ProgressSink) -> io::Result<()> {
    let bytes_total = fs::metadata(src)?.len();
    let mut reader = File::open(src)?;
    let mut writer = File::create(dst)?;

    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut bytes_written = 0u64;

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }

        writer.write_all(&buffer[..bytes_read])?;
        bytes_written += bytes_read as u64;
        sink.transfer_progress(bytes_written, bytes_total);
    }

    writer.flush()
}

#[cfg(unix)]
fn recreate_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    let target = fs::read_link(src)?;
    std::os::unix::fs::symlink(target, dst)
}

#[cfg(windows)]
fn recreate_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    let target = fs::read_link(src)?;
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, dst)
    } else {
        std::os::windows::fs::symlink_file(target, dst)
    }
}

/// Copy mtime/atime and permission bits. Best-effort: unsupported
/// operations on a platform or filesystem must not fail the copy.
fn copy_file_stats(src: &Path, dst: &Path) {
    let Ok(meta) = fs::metadata(src) else {
        return;
    };

    let atime = filetime::FileTime::from_last_access_time(&meta);
    let mtime = filetime::FileTime::from_last_modification_time(&meta);
    let _ = filetime::set_file_times(dst, atime, mtime);
    let _ = fs::set_permissions(dst, meta.permissions());
}

/// Post-condition check: the destination exists and, unless it is a
/// symlink, matches the source's size.
fn verify_copy(src: &Path, dst: &Path) -> CopyOutcome {
    let Ok(dst_meta) = fs::symlink_metadata(dst) else {
        return CopyOutcome::Failed;
    };

    if dst_meta.file_type().is_symlink() {
        return CopyOutcome::Copied;
    }

    match fs::metadata(src) {
        Ok(src_meta) if src_meta.len() == dst_meta.len() => CopyOutcome::Copied,
        _ => CopyOutcome::Failed,
    }
}
