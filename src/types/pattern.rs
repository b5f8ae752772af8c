//! Pattern - a single include/exclude rule

use crate::types::RocopyError;

/// Prefix marking a pattern as a regular expression.
///
/// Part of the wire contract between the CLI and the matcher: `re:^L\d+$`
/// is a regex, `*.txt` is a shell glob.
pub const REGEX_PREFIX: &str = "re:";

/// A single include or exclude rule, tagged by kind at parse time.
///
/// Glob patterns use shell-glob semantics where `*` may span path
/// separators; regex patterns use prefix-match semantics against the
/// `/`-normalized relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Literal/wildcard pattern matched with shell-glob rules
    Glob(String),

    /// Regular expression pattern (the `re:` prefix already stripped)
    Regex(String),
}

impl Pattern {
    /// Parse a raw pattern string, honoring the `re:` prefix convention.
    ///
    /// Both kinds are compiled once here so that an invalid expression
    /// fails the whole operation up front rather than silently never
    /// matching mid-traversal.
    pub fn parse(text: &str) -> Result<Self, RocopyError> {
        if let Some(expr) = text.strip_prefix(REGEX_PREFIX) {
            regex::Regex::new(expr).map_err(|e| RocopyError::Pattern {
                pattern: text.to_string(),
                reason: e.to_string(),
            })?;
            Ok(Pattern::Regex(expr.to_string()))
        } else {
            glob::Pattern::new(text).map_err(|e| RocopyError::Pattern {
                pattern: text.to_string(),
                reason: e.to_string(),
            })?;
            Ok(Pattern::Glob(text.to_string()))
        }
    }

    /// Parse a list of raw pattern strings.
    pub fn parse_all(texts: &[String]) -> Result<Vec<Self>, RocopyError> {
        texts.iter().map(|t| Pattern::parse(t)).collect()
    }

    /// The pattern text without its kind tag.
    pub fn text(&self) -> &str {
        match self {
            Pattern::Glob(text) | Pattern::Regex(text) => text,
        }
    }
}
