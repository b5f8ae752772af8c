//! Configuration management
//!
//! The clap surface is kept separate from the validated [`Config`]: the
//! `Cli` struct is raw argument text, `Config::try_from` parses the
//! patterns and checks mode exclusivity, and `validate()` checks the
//! filesystem preconditions right before running.

use crate::types::{Options, Pattern, RocopyError};
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(
    name = "rocopy",
    version,
    about = "Robust directory copy, mirror, move and sync"
)]
pub struct Cli {
    /// Source file or directory
    pub source: PathBuf,

    /// Destination path
    pub destination: PathBuf,

    /// Make the destination an exact replica of the source
    #[arg(long, conflicts_with_all = ["move_mode", "sync"])]
    pub mirror: bool,

    /// Relocate the source into the destination
    #[arg(long = "move", conflicts_with_all = ["mirror", "sync"])]
    pub move_mode: bool,

    /// Two-way merge: both sides end up with the union of both trees
    #[arg(long, conflicts_with_all = ["mirror", "move_mode"])]
    pub sync: bool,

    /// Overwrite destination files even when they are newer
    #[arg(short, long)]
    pub force: bool,

    /// Do not copy file stats (mtime, permission bits)
    #[arg(long)]
    pub nostat: bool,

    /// File include pattern (repeatable; prefix with "re:" for regex)
    #[arg(long = "include-file", visible_alias = "if", value_name = "PATTERN")]
    pub include_files: Vec<String>,

    /// Directory include pattern (repeatable)
    #[arg(long = "include-dir", visible_alias = "id", value_name = "PATTERN")]
    pub include_dirs: Vec<String>,

    /// File exclude pattern (repeatable; ignored when includes are given)
    #[arg(long = "exclude-file", visible_alias = "xf", value_name = "PATTERN")]
    pub exclude_files: Vec<String>,

    /// Directory exclude pattern (repeatable)
    #[arg(long = "exclude-dir", visible_alias = "xd", value_name = "PATTERN")]
    pub exclude_dirs: Vec<String>,

    /// Depth limit: 0 = unlimited, positive from the root, negative from
    /// the deepest leaves
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub level: i32,

    /// Traverse through symbolic links instead of skipping them
    #[arg(long, visible_alias = "fl")]
    pub follow_links: bool,

    /// Suppress progress output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print one line per copied/skipped/removed entry
    #[arg(short, long)]
    pub verbose: bool,

    /// Include per-entry path lists in the result
    #[arg(long)]
    pub detailed: bool,

    /// Print the result record as JSON instead of the summary table
    #[arg(long)]
    pub json: bool,
}

/// Which operation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Copy,
    Mirror,
    Move,
    Sync,
}

/// Validated configuration for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub mode: Mode,

    pub include_files: Vec<Pattern>,
    pub include_dirs: Vec<Pattern>,
    pub exclude_files: Vec<Pattern>,
    pub exclude_dirs: Vec<Pattern>,

    pub level: i32,
    pub follow_links: bool,
    pub force_overwrite: bool,
    pub preserve_stats: bool,
    pub detailed: bool,

    pub quiet: bool,
    pub verbose: bool,
    pub json: bool,
}

impl TryFrom<Cli> for Config {
    type Error = RocopyError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let mode = match (cli.mirror, cli.move_mode, cli.sync) {
            (true, false, false) => Mode::Mirror,
            (false, true, false) => Mode::Move,
            (false, false, true) => Mode::Sync,
            (false, false, false) => Mode::Copy,
            // clap's conflicts_with rules reject combinations earlier.
            _ => {
                return Err(RocopyError::Config(
                    "--mirror, --move and --sync are mutually exclusive".to_string(),
                ))
            }
        };

        let config = Self {
            source: cli.source,
            destination: cli.destination,
            mode,
            include_files: Pattern::parse_all(&cli.include_files)?,
            include_dirs: Pattern::parse_all(&cli.include_dirs)?,
            exclude_files: Pattern::parse_all(&cli.exclude_files)?,
            exclude_dirs: Pattern::parse_all(&cli.exclude_dirs)?,
            level: cli.level,
            follow_links: cli.follow_links,
            force_overwrite: cli.force,
            preserve_stats: !cli.nostat,
            detailed: cli.detailed || cli.json,
            quiet: cli.quiet,
            verbose: cli.verbose,
            json: cli.json,
        };

        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Check filesystem preconditions.
    pub fn validate(&self) -> Result<(), RocopyError> {
        if !self.source.exists() {
            return Err(RocopyError::Config(format!(
                "Source path does not exist: {}",
                self.source.display()
            )));
        }

        if self.mode == Mode::Sync && !self.source.is_dir() {
            return Err(RocopyError::Config(
                "Sync requires a directory source".to_string(),
            ));
        }

        Ok(())
    }

    /// Traversal settings derived from this configuration.
    pub fn options(&self) -> Options {
        Options {
            include_files: self.include_files.clone(),
            include_dirs: self.include_dirs.clone(),
            exclude_files: self.exclude_files.clone(),
            exclude_dirs: self.exclude_dirs.clone(),
            level: self.level,
            follow_links: self.follow_links,
            force_overwrite: self.force_overwrite,
            preserve_stats: self.preserve_stats,
            detailed: self.detailed,
        }
    }
}
