//! JSON output formatter for machine processing
//!
//! Emits one object per line so reports can be consumed while the walk
//! is still running.

use crate::domain::UpdateReport;
use crate::output::{OutputFormatter, Verbosity};
use crate::walker::WalkSummary;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level decides whether a summary line is written
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of one report
#[derive(Serialize)]
struct JsonReport {
    /// Absolute directory containing the manifest
    directory: String,
    /// Directory as shown in text output
    display: String,
    /// Number of outdated dependencies
    updates: usize,
}

/// JSON representation of the walk summary
#[derive(Serialize)]
struct JsonSummary {
    reports: usize,
    failed_manifests: usize,
    failed_directories: usize,
    cancelled: bool,
}

fn write_line<T: Serialize>(value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
    let json = serde_json::to_string(value).map_err(std::io::Error::other)?;
    writeln!(writer, "{}", json)
}

impl OutputFormatter for JsonFormatter {
    fn format_report(
        &self,
        report: &UpdateReport,
        root: &Path,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = JsonReport {
            directory: report.directory().display().to_string(),
            display: report.display_path(root),
            updates: report.updates(),
        };
        write_line(&output, writer)
    }

    fn format_summary(
        &self,
        summary: &WalkSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = JsonSummary {
            reports: summary.reports,
            failed_manifests: summary.failed_manifests,
            failed_directories: summary.failed_directories,
            cancelled: summary.cancelled,
        };
        write_line(&output, writer)
    }

    fn wants_summary(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }
}
