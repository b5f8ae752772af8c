//! Core type definitions for rocopy

mod error;
mod options;
mod pattern;
mod results;

pub use error::RocopyError;
pub use options::Options;
pub use pattern::{Pattern, REGEX_PREFIX};
pub use results::{CopyStats, MirrorStats, MoveStats, OperationReport};
