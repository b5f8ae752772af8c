//! Pattern matching for include/exclude rules
//!
//! Patterns are matched against `/`-normalized relative paths. Before each
//! check the pattern is re-normalized for the candidate path: when the path
//! has more separator-delimited levels than the pattern, wildcard segments
//! are added per missing level. Directory patterns grow at the tail
//! (`A` -> `A/*/*`), file patterns grow before the final segment so a
//! filename tail keeps anchoring to the basename (`*.txt` -> `*/*.txt`).
//! The normalization depends on the candidate's depth, so it is recomputed
//! for every path rather than cached.

use crate::types::Pattern;
use std::path::Path;

/// Decide whether a relative path should be processed.
///
/// With a non-empty include set the path is accepted iff it matches at
/// least one include pattern; the exclude set is then irrelevant (an
/// explicit include always wins). With an empty include set the path is
/// accepted unless it matches an exclude pattern.
///
/// # Arguments
/// * `rel` - Path relative to the operation root
/// * `is_file` - True when `rel` names a file, false for a directory
/// * `includes` - Include patterns for this kind of entry
/// * `excludes` - Exclude patterns for this kind of entry
pub fn should_process(
    rel: &Path,
    is_file: bool,
    includes: &[Pattern],
    excludes: &[Pattern],
) -> bool {
    if !includes.is_empty() {
        return matches_any(rel, is_file, includes);
    }

    !matches_any(rel, is_file, excludes)
}

/// Check a relative path against a pattern list, normalizing each pattern
/// for this path's depth first.
pub fn matches_any(rel: &Path, is_file: bool, patterns: &[Pattern]) -> bool {
    let path_str = normalize_separators(rel);
    patterns
        .iter()
        .any(|pattern| pattern_matches(pattern, &path_str, is_file))
}

/// Convert a relative path to the `/`-separated form patterns are written in.
fn normalize_separators(rel: &Path) -> String {
    rel.to_string_lossy().replace('\\', "/")
}

fn pattern_matches(pattern: &Pattern, path_str: &str, is_file: bool) -> bool {
    let normalized = if is_file {
        normalize_file_pattern(pattern, path_str)
    } else {
        normalize_dir_pattern(pattern, path_str)
    };

    match normalized {
        Pattern::Glob(text) => glob::Pattern::new(&text)
            .map(|g| g.matches(path_str))
            .unwrap_or(false),
        // Prefix-match semantics: the expression must match at the start of
        // the path but need not consume all of it.
        Pattern::Regex(text) => regex::Regex::new(&format!("^(?:{text})"))
            .map(|re| re.is_match(path_str))
            .unwrap_or(false),
    }
}

/// Pad a directory pattern with one wildcard segment per level the path has
/// beyond the pattern: pattern `A` against `A/B/C` becomes `A/*/*`.
fn normalize_dir_pattern(pattern: &Pattern, path_str: &str) -> Pattern {
    let path_seps = count_separators(path_str);

    match pattern {
        Pattern::Glob(text) => {
            let mut text = text.clone();
            let mut pattern_seps = count_separators(&text);
            while path_seps > pattern_seps {
                text = join_segment(&text, "*");
                pattern_seps += 1;
            }
            Pattern::Glob(text)
        }
        Pattern::Regex(text) => {
            let mut text = text.clone();
            let mut pattern_seps = count_separators(&text);
            while path_seps > pattern_seps {
                text = join_segment(&text, ".*");
                pattern_seps += 1;
            }
            Pattern::Regex(text)
        }
    }
}

/// Pad a file pattern with wildcard segments *before* its final segment, so
/// the tail keeps matching the basename: `*.txt` against `L1/f.txt` becomes
/// `*/*.txt`, and `L1/*.txt` against `L1/L2/f.txt` becomes `L1/*/*.txt`.
fn normalize_file_pattern(pattern: &Pattern, path_str: &str) -> Pattern {
    let path_seps = count_separators(path_str);

    match pattern {
        Pattern::Glob(text) => {
            let (mut head, tail) = split_tail(text);
            let mut pattern_seps = head_levels(&head);
            while path_seps > pattern_seps {
                head = join_segment(&head, "*");
                pattern_seps += 1;
            }
            Pattern::Glob(join_segment(&head, tail))
        }
        Pattern::Regex(text) => {
            let (mut head, tail) = split_tail(text);
            let mut pattern_seps = head_levels(&head);
            while path_seps > pattern_seps {
                head = join_segment(&head, ".*");
                pattern_seps += 1;
            }
            Pattern::Regex(join_segment(&head, tail))
        }
    }
}

fn count_separators(text: &str) -> usize {
    text.matches('/').count()
}

/// Split a file pattern into its directory head and filename tail.
fn split_tail(text: &str) -> (String, &str) {
    match text.rsplit_once('/') {
        Some((head, tail)) => (head.to_string(), tail),
        None => (String::new(), text),
    }
}

/// Number of levels the head already covers (the split itself counts one).
fn head_levels(head: &str) -> usize {
    if head.is_empty() {
        0
    } else {
        count_separators(head) + 1
    }
}

fn join_segment(head: &str, segment: &str) -> String {
    if head.is_empty() {
        segment.to_string()
    } else {
        format!("{head}/{segment}")
    }
}
