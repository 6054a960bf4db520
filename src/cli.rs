//! CLI argument parsing module for depscan

use crate::config::{ListingOrder, DEFAULT_CONCURRENCY};
use crate::registry::NPM_REGISTRY_URL;
use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Upper bound for `--concurrency`
pub const MAX_CONCURRENCY: usize = 64;

/// Parse a concurrency limit in `1..=MAX_CONCURRENCY`
fn parse_concurrency(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", s))?;
    if (1..=MAX_CONCURRENCY).contains(&n) {
        Ok(n)
    } else {
        Err(format!("must be between 1 and {}", MAX_CONCURRENCY))
    }
}

/// Report outdated npm dependencies for every project under a directory
#[derive(Parser, Debug, Clone)]
#[command(
    name = "depscan",
    version,
    about = "Report outdated npm dependencies for every package.json under a directory"
)]
pub struct CliArgs {
    /// Root directory to scan (default: ~/code)
    #[arg(value_parser = OsStringValueParser::new().map(PathBuf::from))]
    pub path: Option<PathBuf>,

    /// Maximum directory listings and manifest checks in flight
    #[arg(short = 'j', long, default_value_t = DEFAULT_CONCURRENCY, value_parser = parse_concurrency)]
    pub concurrency: usize,

    /// Directory name to skip, in addition to node_modules (can be specified multiple times)
    #[arg(short, long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Order in which entries of a directory are visited
    #[arg(long, value_enum, default_value_t = ListingOrder::Fs)]
    pub sort: ListingOrder,

    /// Descend into symlinked directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// npm registry to query
    #[arg(long, env = "NPM_CONFIG_REGISTRY", default_value = NPM_REGISTRY_URL)]
    pub registry: String,

    /// Output one JSON object per report
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print reports and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Scan root argument, with an empty string treated as absent
    pub fn root_arg(&self) -> Option<&std::path::Path> {
        self.path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Whether the progress spinner should be shown
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}
