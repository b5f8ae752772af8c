//! Directory enumeration: bottom-up walker and depth calculation
//!
//! The traversal order is load-bearing: directories are visited bottom-up
//! (a directory's entire subtree before the directory itself), so skip and
//! failure bookkeeping for descendants is final before any ancestor
//! decision, which is what the mirror/move deletion passes rely on.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One directory visited during a walk, identified by its path relative to
/// the walk root (`.` for the root itself).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirVisit {
    pub rel: PathBuf,

    /// The directory is itself a symlink. When links are not followed the
    /// walker yields the node but never descends into it.
    pub is_symlink: bool,
}

/// Walk a directory tree bottom-up.
///
/// Children are fully enumerated before their parent, in deterministic name
/// order, and the root (`.`) comes last. Symlinked directories are yielded
/// but only descended into when `follow_links` is set. Unreadable
/// directories are silently yielded without children; the traversal engine
/// surfaces per-entry failures when it touches them.
pub fn walk_bottom_up(root: &Path, follow_links: bool) -> Vec<DirVisit> {
    let mut visits = Vec::new();
    descend(root, Path::new("."), follow_links, &mut visits);

    // The root is always walked, even when the root path is itself a
    // link; link handling applies to entries below it.
    visits.push(DirVisit {
        rel: PathBuf::from("."),
        is_symlink: false,
    });

    visits
}

fn descend(abs: &Path, rel: &Path, follow_links: bool, visits: &mut Vec<DirVisit>) {
    for (name, is_symlink) in subdirectories(abs) {
        let child_abs = abs.join(&name);
        let child_rel = if rel == Path::new(".") {
            PathBuf::from(&name)
        } else {
            rel.join(&name)
        };

        if !is_symlink || follow_links {
            descend(&child_abs, &child_rel, follow_links, visits);
        }

        visits.push(DirVisit {
            rel: child_rel,
            is_symlink,
        });
    }
}

/// Enumerate the subdirectories of `abs` in sorted name order, tagging
/// symlinked ones. Unreadable directories yield nothing.
fn subdirectories(abs: &Path) -> Vec<(OsString, bool)> {
    let entries = match fs::read_dir(abs) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut dirs = Vec::new();
    for entry in entries.flatten() {
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(_) => continue,
        };

        if file_type.is_dir() {
            dirs.push((entry.file_name(), false));
        } else if file_type.is_symlink() && entry.path().is_dir() {
            dirs.push((entry.file_name(), true));
        }
    }

    dirs.sort();
    dirs
}

/// List the non-directory entries of a single directory in sorted name
/// order: regular files, symlinks to files, and broken symlinks. Symlinks
/// to directories are handled as directory visits, not files.
pub fn list_files(dir: &Path) -> io::Result<Vec<OsString>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            continue;
        }
        if file_type.is_symlink() && entry.path().is_dir() {
            continue;
        }

        files.push(entry.file_name());
    }

    files.sort();
    Ok(files)
}

/// Compute the maximum depth of a directory tree.
///
/// Depth is the relative segment count of a directory, with the root itself
/// contributing 1, so any existing tree has depth >= 1 and a tree whose
/// deepest directory is `a/b` has depth 2. Symbolic links are never
/// followed here regardless of the operation's follow setting.
pub fn max_depth(root: &Path) -> usize {
    let mut deepest = 1;
    depth_scan(root, 0, &mut deepest);
    deepest
}

fn depth_scan(abs: &Path, depth: usize, deepest: &mut usize) {
    for (name, is_symlink) in subdirectories(abs) {
        if is_symlink {
            continue;
        }
        if depth + 1 > *deepest {
            *deepest = depth + 1;
        }
        depth_scan(&abs.join(name), depth + 1, deepest);
    }
}

/// Number of path segments between a visited node and the walk root
/// (0 for the root itself).
pub fn segment_count(rel: &Path) -> usize {
    if rel == Path::new(".") {
        0
    } else {
        rel.components().count()
    }
}

/// Check whether a node falls outside the requested depth window.
///
/// `level == 0` never excludes. A positive level keeps nodes whose distance
/// from the root is below it; a negative level keeps nodes whose distance
/// from the deepest leaves is below its magnitude, which needs the tree's
/// precomputed `max_depth`.
pub fn outside_level(rel: &Path, max_depth: usize, level: i32) -> bool {
    if level == 0 {
        return false;
    }

    let segments = segment_count(rel) as i64;
    let depth = if level < 0 {
        max_depth as i64 - segments
    } else {
        segments
    };

    depth >= i64::from(level.unsigned_abs())
}
