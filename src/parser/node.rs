//! Node.js (npm/yarn/pnpm) version specification parser
//!
//! Handles version formats:
//! - Exact: `1.2.3`, `=1.2.3`, `v1.2.3`
//! - Caret: `^1.2.3`
//! - Tilde: `~1.2.3`
//! - Comparison: `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3`
//! - Wildcard: `*`, `1.x`, `1.2.*`, `latest`, empty string
//! - Range: `>=1.0.0 <2.0.0`, `1.0.0 - 2.0.0`
//!
//! Anything else (git URLs, `file:`, `workspace:`, `npm:` aliases, dist tags)
//! is not a registry version and yields `None`.

use crate::domain::{VersionSpec, VersionSpecKind};
use regex::Regex;
use std::sync::LazyLock;

/// Node.js version specification parser
pub struct NodeVersionParser;

// Regex patterns for Node.js version specifications
static CARET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\^\s*v?(\d+\.\d+\.\d+(?:-[\w.]+)?)$").unwrap());
static TILDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^~\s*v?(\d+\.\d+\.\d+(?:-[\w.]+)?)$").unwrap());
static GTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>=\s*v?(\d+\.\d+\.\d+(?:-[\w.]+)?)$").unwrap());
static GT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>\s*v?(\d+\.\d+\.\d+(?:-[\w.]+)?)$").unwrap());
static LTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<=\s*v?(\d+\.\d+\.\d+(?:-[\w.]+)?)$").unwrap());
static LT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<\s*v?(\d+\.\d+\.\d+(?:-[\w.]+)?)$").unwrap());
static EXACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^=?v?(\d+\.\d+\.\d+(?:-[\w.]+)?)$").unwrap());
static WILDCARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?\.)?[xX*]$|^\*$|^latest$").unwrap());
static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[<>=]+\d+\.\d+\.\d+\s+[<>=]+\d+\.\d+\.\d+$|^\d+\.\d+\.\d+\s*-\s*\d+\.\d+\.\d+$")
        .unwrap()
});

impl NodeVersionParser {
    /// Parse a version specification string
    pub fn parse(&self, version_str: &str) -> Option<VersionSpec> {
        let trimmed = version_str.trim();

        // An empty constraint means "any version"
        if trimmed.is_empty() {
            return Some(VersionSpec::new(VersionSpecKind::Wildcard, trimmed, ""));
        }

        let prefixed = [
            (&*CARET_RE, VersionSpecKind::Caret),
            (&*TILDE_RE, VersionSpecKind::Tilde),
            (&*GTE_RE, VersionSpecKind::GreaterOrEqual),
            (&*GT_RE, VersionSpecKind::Greater),
            (&*LTE_RE, VersionSpecKind::LessOrEqual),
            (&*LT_RE, VersionSpecKind::Less),
        ];
        for (re, kind) in prefixed {
            if let Some(caps) = re.captures(trimmed) {
                let version = caps.get(1)?.as_str();
                return Some(VersionSpec::new(kind, trimmed, version));
            }
        }

        // Check for range (>=1.0.0 <2.0.0 or 1.0.0 - 2.0.0)
        if RANGE_RE.is_match(trimmed) {
            // The lower bound stands in for the declared version
            let first_version = trimmed
                .split_whitespace()
                .next()
                .map(|s| s.trim_start_matches(|c: char| !c.is_ascii_digit()))
                .unwrap_or_default();
            return Some(VersionSpec::new(
                VersionSpecKind::Range,
                trimmed,
                first_version,
            ));
        }

        // Check for wildcard (*, 1.x, 1.2.*)
        if WILDCARD_RE.is_match(trimmed) {
            return Some(VersionSpec::new(
                VersionSpecKind::Wildcard,
                trimmed,
                trimmed,
            ));
        }

        // Check for exact version (1.2.3)
        if let Some(caps) = EXACT_RE.captures(trimmed) {
            let version = caps.get(1)?.as_str();
            return Some(VersionSpec::new(VersionSpecKind::Exact, trimmed, version));
        }

        None
    }
}
