//! # rocopy - Robust Directory Copy and Synchronization
//!
//! Filtered tree copy with four modes (copy, mirror, move, sync), depth
//! windows, glob/regex include-exclude patterns, and a fixed-shape result
//! record per operation.

// Module declarations
pub mod commands;
pub mod config;
pub mod executor;
pub mod ops;
pub mod pattern;
pub mod scanner;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use config::{Config, Mode};
pub use types::{CopyStats, MirrorStats, MoveStats, OperationReport, Options, Pattern, RocopyError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
