//! Text output formatter for human-readable display

use crate::domain::UpdateReport;
use crate::output::{OutputFormatter, Verbosity};
use crate::walker::WalkSummary;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// Width the update count is right-aligned to
const COUNT_WIDTH: usize = 2;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_report(
        &self,
        report: &UpdateReport,
        root: &Path,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        // Pad before coloring so escape codes do not count toward the width
        let count = format!("{:>width$}", report.updates(), width = COUNT_WIDTH);
        let path = report.display_path(root);

        if self.color {
            writeln!(
                writer,
                "{} updates available for {}",
                count.yellow(),
                path.green()
            )
        } else {
            writeln!(writer, "{} updates available for {}", count, path)
        }
    }

    fn format_summary(
        &self,
        summary: &WalkSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let checked = format!("{} manifest(s) checked", summary.reports);
        if self.color {
            write!(writer, "{}:", "Summary".bold())?;
            write!(writer, " {}", checked.green())?;
        } else {
            write!(writer, "Summary: {}", checked)?;
        }

        if summary.failed_manifests > 0 {
            let failed = format!("{} failed", summary.failed_manifests);
            if self.color {
                write!(writer, ", {}", failed.red())?;
            } else {
                write!(writer, ", {}", failed)?;
            }
        }
        if summary.failed_directories > 0 {
            write!(
                writer,
                ", {} unreadable director{}",
                summary.failed_directories,
                if summary.failed_directories == 1 { "y" } else { "ies" }
            )?;
        }
        if summary.cancelled {
            if self.color {
                write!(writer, " {}", "(interrupted)".dimmed())?;
            } else {
                write!(writer, " (interrupted)")?;
            }
        }
        writeln!(writer)
    }

    fn wants_summary(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(formatter: &TextFormatter, report: &UpdateReport, root: &Path) -> String {
        let mut out = Vec::new();
        formatter.format_report(report, root, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn plain() -> TextFormatter {
        TextFormatter::with_color(Verbosity::Normal, false)
    }

    #[test]
    fn test_single_digit_count_is_padded() {
        let report = UpdateReport::new("/home/u/code/pkgA", 3);
        assert_eq!(
            render(&plain(), &report, Path::new("/home/u/code")),
            " 3 updates available for pkgA\n"
        );
    }

    #[test]
    fn test_zero_count_is_reported() {
        let report = UpdateReport::new("/home/u/code/pkgC/sub", 0);
        assert_eq!(
            render(&plain(), &report, Path::new("/home/u/code")),
            " 0 updates available for pkgC/sub\n"
        );
    }

    #[test]
    fn test_wide_counts_are_not_truncated() {
        let root = Path::new("/r");
        assert_eq!(
            render(&plain(), &UpdateReport::new("/r/a", 12), root),
            "12 updates available for a\n"
        );
        assert_eq!(
            render(&plain(), &UpdateReport::new("/r/a", 123), root),
            "123 updates available for a\n"
        );
    }

    #[test]
    fn test_root_manifest_shows_full_path() {
        let report = UpdateReport::new("/home/u/code", 1);
        assert_eq!(
            render(&plain(), &report, Path::new("/home/u/code")),
            " 1 updates available for /home/u/code\n"
        );
    }

    #[test]
    fn test_colored_output_keeps_text() {
        colored::control::set_override(true);
        let formatter = TextFormatter::new(Verbosity::Normal);
        let out = render(&formatter, &UpdateReport::new("/r/web", 4), Path::new("/r"));
        assert!(out.contains("updates available for"));
        assert!(out.contains("web"));
        colored::control::unset_override();
    }

    #[test]
    fn test_format_summary() {
        let formatter = TextFormatter::with_color(Verbosity::Verbose, false);
        let summary = WalkSummary {
            reports: 5,
            failed_manifests: 1,
            failed_directories: 2,
            cancelled: true,
        };
        let mut out = Vec::new();
        formatter.format_summary(&summary, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Summary: 5 manifest(s) checked, 1 failed, 2 unreadable directories (interrupted)\n"
        );
    }

    #[test]
    fn test_wants_summary() {
        assert!(TextFormatter::with_color(Verbosity::Verbose, false).wants_summary());
        assert!(!TextFormatter::with_color(Verbosity::Normal, false).wants_summary());
        assert!(!TextFormatter::with_color(Verbosity::Quiet, false).wants_summary());
    }
}
