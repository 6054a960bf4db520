//! Run controller
//!
//! This module provides:
//! - Workflow coordination: resolve root → build checker → walk → report
//! - Report printing as soon as each manifest is checked
//! - Optional end-of-walk summary

use crate::cancel::CancelToken;
use crate::check::{RegistryUpdateChecker, UpdateChecker};
use crate::cli::CliArgs;
use crate::config::{resolve_root, ScanConfig};
use crate::error::AppError;
use crate::manifest::ExclusionSet;
use crate::output::{create_formatter, OutputConfig};
use crate::progress::Progress;
use crate::registry::{HttpClient, NpmAdapter};
use crate::walker::{TreeWalker, WalkSummary};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Orchestrator for one scan
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Version check adapter handed to the walker
    checker: Arc<dyn UpdateChecker>,
}

impl Orchestrator {
    /// Create an orchestrator backed by the configured npm registry
    pub fn new(args: CliArgs) -> Result<Self, AppError> {
        let client = HttpClient::new().map_err(AppError::Client)?;
        let adapter = NpmAdapter::with_base_url(client, args.registry.clone());
        let checker = Arc::new(RegistryUpdateChecker::new(Arc::new(adapter)));
        Ok(Self { args, checker })
    }

    /// Create an orchestrator with a custom update checker (for testing)
    pub fn with_checker(args: CliArgs, checker: Arc<dyn UpdateChecker>) -> Self {
        Self { args, checker }
    }

    /// Build the scan configuration for an already resolved root
    pub fn scan_config(&self, root: PathBuf) -> ScanConfig {
        ScanConfig::new(root)
            .with_exclusions(ExclusionSet::with_names(self.args.exclude.iter().cloned()))
            .with_concurrency(self.args.concurrency)
            .with_order(self.args.sort)
            .with_follow_symlinks(self.args.follow_symlinks)
    }

    /// Run the scan, writing reports to `out` as they complete
    pub async fn run(
        &self,
        cancel: CancelToken,
        out: &mut dyn Write,
    ) -> Result<WalkSummary, AppError> {
        let root = resolve_root(self.args.root_arg())?;
        let config = Arc::new(self.scan_config(root));
        debug!(
            root = %config.root.display(),
            concurrency = config.concurrency,
            excluded = ?config.exclusions.names().collect::<Vec<_>>(),
            "starting scan"
        );

        let formatter = create_formatter(OutputConfig::from_cli(
            self.args.json,
            self.args.verbose,
            self.args.quiet,
            self.args.no_color,
        ));
        let mut progress = Progress::new(self.args.show_progress());

        let walker = TreeWalker::new(Arc::clone(&config), Arc::clone(&self.checker), cancel);
        let mut stream = walker.walk(&config.root);

        while let Some(report) = stream.next().await {
            progress.inc();
            progress.suspend(|| -> std::io::Result<()> {
                formatter.format_report(&report, &config.root, out)?;
                out.flush()
            })?;
        }
        progress.finish_and_clear();

        let summary = stream.finish().await?;
        debug!(?summary, "scan finished");

        if formatter.wants_summary() {
            formatter.format_summary(&summary, &mut std::io::stderr().lock())?;
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ResolutionError, RootResolutionError};
    use async_trait::async_trait;
    use clap::Parser;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Checker reporting the length of the manifest directory name
    struct NameLengthChecker;

    #[async_trait]
    impl UpdateChecker for NameLengthChecker {
        async fn check_updates(&self, manifest: &Path) -> Result<usize, ResolutionError> {
            Ok(manifest
                .parent()
                .and_then(|p| p.file_name())
                .map(|n| n.len())
                .unwrap_or(0))
        }
    }

    fn orchestrator(args: &[&str]) -> Orchestrator {
        let mut argv = vec!["depscan"];
        argv.extend_from_slice(args);
        Orchestrator::with_checker(CliArgs::parse_from(argv), Arc::new(NameLengthChecker))
    }

    #[test]
    fn test_scan_config_from_args() {
        let orch = orchestrator(&["-j", "3", "-e", "dist", "--sort", "name", "--follow-symlinks"]);
        let config = orch.scan_config(PathBuf::from("/r"));
        assert_eq!(config.concurrency, 3);
        assert!(config.exclusions.contains(std::ffi::OsStr::new("dist")));
        assert!(config.exclusions.contains(std::ffi::OsStr::new("node_modules")));
        assert!(config.follow_symlinks);
    }

    #[tokio::test]
    async fn test_run_prints_reports() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("web")).unwrap();
        fs::write(dir.path().join("web").join("package.json"), "{}").unwrap();
        let root = dir.path().to_string_lossy().to_string();

        let orch = orchestrator(&[root.as_str(), "--no-color", "-q"]);
        let mut out = Vec::new();
        let summary = orch.run(CancelToken::new(), &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), " 3 updates available for web\n");
        assert_eq!(summary.reports, 1);
        assert!(!summary.cancelled);
    }

    #[tokio::test]
    async fn test_run_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope").to_string_lossy().to_string();

        let orch = orchestrator(&[missing.as_str(), "-q"]);
        let mut out = Vec::new();
        let err = orch.run(CancelToken::new(), &mut out).await.unwrap_err();
        assert!(matches!(err, AppError::Root(_)));
        assert!(out.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_unlistable_root_is_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir_all(locked.join("web")).unwrap();
        fs::write(locked.join("web").join("package.json"), "{}").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still list it; nothing to observe then
        let listable = fs::read_dir(&locked).is_ok();
        let root = locked.to_string_lossy().to_string();
        let orch = orchestrator(&[root.as_str(), "-q"]);
        let mut out = Vec::new();
        let result = orch.run(CancelToken::new(), &mut out).await;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if !listable {
            assert!(matches!(
                result,
                Err(AppError::Root(RootResolutionError::Unreadable { .. }))
            ));
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_new_uses_registry_flag() {
        let args = CliArgs::parse_from(["depscan", "--registry", "http://127.0.0.1:9"]);
        assert!(Orchestrator::new(args).is_ok());
    }
}
