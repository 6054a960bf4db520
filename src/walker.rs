//! Concurrent depth-first tree walker
//!
//! Directory listings and manifest checks are tasks on a pool bounded by
//! `ScanConfig::concurrency`. Pending tasks are kept on a stack with each
//! listing's children pushed in reverse, so a single worker visits entries
//! in exact depth-first listing order. More workers keep the same set of
//! reports but may interleave emission across subtrees.

use crate::cancel::CancelToken;
use crate::check::UpdateChecker;
use crate::config::{ListingOrder, ScanConfig};
use crate::domain::{DirectoryEntry, EntryKind, ManifestLocation, UpdateReport};
use crate::error::{AppError, ListingError, ResolutionError};
use crate::manifest::{classify, Classification, ExclusionSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, warn};

/// Reports buffered between the walk and its consumer
const REPORT_BUFFER: usize = 64;

/// Counters describing a finished walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Reports emitted
    pub reports: usize,
    /// Manifests whose check failed
    pub failed_manifests: usize,
    /// Directories that could not be listed
    pub failed_directories: usize,
    /// Whether the walk stopped before visiting everything
    pub cancelled: bool,
}

/// Walks a directory tree and checks every manifest it finds
pub struct TreeWalker {
    context: Arc<WalkContext>,
}

struct WalkContext {
    config: Arc<ScanConfig>,
    checker: Arc<dyn UpdateChecker>,
    cancel: CancelToken,
}

impl TreeWalker {
    /// Create a walker; `cancel` stops all scheduling once triggered
    pub fn new(
        config: Arc<ScanConfig>,
        checker: Arc<dyn UpdateChecker>,
        cancel: CancelToken,
    ) -> Self {
        Self {
            context: Arc::new(WalkContext {
                config,
                checker,
                cancel,
            }),
        }
    }

    /// Start walking `root` in the background
    ///
    /// Must be called from within a tokio runtime. Every call walks from
    /// scratch; the returned stream is single-pass.
    pub fn walk(&self, root: impl Into<PathBuf>) -> ReportStream {
        let (tx, rx) = mpsc::channel(REPORT_BUFFER);
        let driver = tokio::spawn(drive(Arc::clone(&self.context), root.into(), tx));
        ReportStream {
            reports: rx,
            driver,
        }
    }
}

/// Lazily produced reports of one walk
pub struct ReportStream {
    reports: mpsc::Receiver<UpdateReport>,
    driver: JoinHandle<WalkSummary>,
}

impl ReportStream {
    /// Next completed report, or `None` once the walk is over
    pub async fn next(&mut self) -> Option<UpdateReport> {
        self.reports.recv().await
    }

    /// Wait for the walk to end and return its summary
    ///
    /// Reports not yet received are dropped and the walk stops early.
    pub async fn finish(self) -> Result<WalkSummary, AppError> {
        let ReportStream { reports, driver } = self;
        drop(reports);
        driver.await.map_err(|e| AppError::WalkAborted {
            message: e.to_string(),
        })
    }

    /// Drain every report, then return them with the summary
    pub async fn collect(mut self) -> Result<(Vec<UpdateReport>, WalkSummary), AppError> {
        let mut reports = Vec::new();
        while let Some(report) = self.next().await {
            reports.push(report);
        }
        let summary = self.finish().await?;
        Ok((reports, summary))
    }
}

enum Task {
    List(PathBuf),
    Check(ManifestLocation),
}

enum Outcome {
    Listed(Vec<Task>),
    ListFailed(ListingError),
    Checked(UpdateReport),
    CheckFailed(ManifestLocation, ResolutionError),
}

impl Task {
    async fn run(self, ctx: &WalkContext) -> Outcome {
        match self {
            Task::List(dir) => match list_directory(&dir, &ctx.config).await {
                Ok(entries) => Outcome::Listed(plan(entries, &ctx.config.exclusions)),
                Err(e) => Outcome::ListFailed(e),
            },
            Task::Check(manifest) => {
                debug!(manifest = %manifest, "checking");
                match ctx.checker.check_updates(manifest.path()).await {
                    Ok(count) => Outcome::Checked(UpdateReport::new(manifest.directory(), count)),
                    Err(e) => Outcome::CheckFailed(manifest, e),
                }
            }
        }
    }
}

async fn drive(
    ctx: Arc<WalkContext>,
    root: PathBuf,
    reports: mpsc::Sender<UpdateReport>,
) -> WalkSummary {
    let mut summary = WalkSummary::default();
    let mut pending = vec![Task::List(root)];
    let mut in_flight: JoinSet<Outcome> = JoinSet::new();

    loop {
        if ctx.cancel.is_cancelled() {
            summary.cancelled = true;
            break;
        }

        while in_flight.len() < ctx.config.concurrency {
            let Some(task) = pending.pop() else { break };
            let ctx = Arc::clone(&ctx);
            in_flight.spawn(async move { task.run(&ctx).await });
        }

        let joined = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => {
                summary.cancelled = true;
                break;
            }
            joined = in_flight.join_next() => joined,
        };

        // Nothing in flight and nothing pending: the walk is complete
        let Some(joined) = joined else { break };

        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("walk task failed: {}", e);
                continue;
            }
        };

        match outcome {
            Outcome::Listed(children) => pending.extend(children.into_iter().rev()),
            Outcome::ListFailed(e) => {
                warn!("{}", e);
                summary.failed_directories += 1;
            }
            Outcome::Checked(report) => {
                if reports.send(report).await.is_err() {
                    debug!("report consumer dropped, stopping walk");
                    summary.cancelled = true;
                    break;
                }
                summary.reports += 1;
            }
            Outcome::CheckFailed(manifest, e) => {
                warn!("skipping {}: {}", manifest, e);
                summary.failed_manifests += 1;
            }
        }
    }

    if !in_flight.is_empty() {
        debug!(abandoned = in_flight.len(), "abandoning in-flight tasks");
        in_flight.shutdown().await;
    }

    summary
}

/// List the immediate contents of `dir`
async fn list_directory(
    dir: &Path,
    config: &ScanConfig,
) -> Result<Vec<DirectoryEntry>, ListingError> {
    let mut read_dir = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| ListingError::new(dir, e))?;

    let mut entries = Vec::new();
    while let Some(entry) = read_dir
        .next_entry()
        .await
        .map_err(|e| ListingError::new(dir, e))?
    {
        let path = entry.path();
        let kind = match entry.file_type().await {
            Ok(ft) if ft.is_dir() => EntryKind::Directory,
            Ok(ft) if ft.is_file() => EntryKind::File,
            Ok(ft) if ft.is_symlink() => symlink_kind(&path, config.follow_symlinks).await,
            Ok(_) => EntryKind::Other,
            Err(e) => {
                debug!(path = %path.display(), "cannot stat entry: {}", e);
                EntryKind::Other
            }
        };
        entries.push(DirectoryEntry::new(path, entry.file_name(), kind));
    }

    if config.order == ListingOrder::Name {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
    }

    Ok(entries)
}

/// Kind of a symlink's target; unfollowed directory links count as `Other`
async fn symlink_kind(path: &Path, follow: bool) -> EntryKind {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() && follow => EntryKind::Directory,
        Ok(meta) if meta.is_file() => EntryKind::File,
        Ok(_) => EntryKind::Other,
        Err(e) => {
            debug!(path = %path.display(), "dangling symlink: {}", e);
            EntryKind::Other
        }
    }
}

/// Turn one listing into tasks, preserving listing order
fn plan(entries: Vec<DirectoryEntry>, exclusions: &ExclusionSet) -> Vec<Task> {
    entries
        .into_iter()
        .filter(|entry| entry.kind != EntryKind::Other)
        .filter_map(|entry| match classify(&entry.name, entry.is_dir(), exclusions) {
            Classification::Descend => Some(Task::List(entry.path)),
            Classification::CheckManifest => Some(Task::Check(ManifestLocation::new(entry.path))),
            Classification::Skip => {
                debug!(path = %entry.path.display(), "excluded");
                None
            }
            Classification::Ignore => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    /// Checker answering from a table keyed by manifest directory name
    struct TableChecker {
        counts: HashMap<&'static str, usize>,
    }

    #[async_trait]
    impl UpdateChecker for TableChecker {
        async fn check_updates(&self, manifest: &Path) -> Result<usize, ResolutionError> {
            let dir = manifest
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            Ok(self.counts.get(dir).copied().unwrap_or(0))
        }
    }

    fn walker(root: &Path, concurrency: usize, counts: &[(&'static str, usize)]) -> TreeWalker {
        let config = ScanConfig::new(root)
            .with_concurrency(concurrency)
            .with_order(ListingOrder::Name);
        let checker = TableChecker {
            counts: counts.iter().copied().collect(),
        };
        TreeWalker::new(Arc::new(config), Arc::new(checker), CancelToken::new())
    }

    fn touch_manifest(dir: &Path) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("package.json"), "{}").unwrap();
    }

    #[test]
    fn test_plan_preserves_order_and_filters() {
        let entries = vec![
            DirectoryEntry::new("/r/b", "b", EntryKind::Directory),
            DirectoryEntry::new("/r/package.json", "package.json", EntryKind::File),
            DirectoryEntry::new("/r/node_modules", "node_modules", EntryKind::Directory),
            DirectoryEntry::new("/r/README.md", "README.md", EntryKind::File),
            DirectoryEntry::new("/r/link", "link", EntryKind::Other),
            DirectoryEntry::new("/r/a", "a", EntryKind::Directory),
        ];

        let tasks = plan(entries, &ExclusionSet::new());
        assert_eq!(tasks.len(), 3);
        assert!(matches!(&tasks[0], Task::List(p) if p == Path::new("/r/b")));
        assert!(matches!(&tasks[1], Task::Check(m) if m.path() == Path::new("/r/package.json")));
        assert!(matches!(&tasks[2], Task::List(p) if p == Path::new("/r/a")));
    }

    #[tokio::test]
    async fn test_list_directory_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        for name in ["zeta", "alpha", "mid"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        let config = ScanConfig::new(dir.path()).with_order(ListingOrder::Name);
        let entries = list_directory(dir.path(), &config).await.unwrap();
        let names: Vec<_> = entries
            .iter()
            .map(|e| e.name.to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["alpha", "mid", "package.json", "zeta"]);
        assert_eq!(entries[2].kind, EntryKind::File);
        assert_eq!(entries[0].kind, EntryKind::Directory);
    }

    #[tokio::test]
    async fn test_list_directory_missing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone");
        let config = ScanConfig::new(dir.path());
        let err = list_directory(&missing, &config).await.unwrap_err();
        assert_eq!(err.path, missing);
    }

    #[tokio::test]
    async fn test_sequential_walk_is_depth_first() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch_manifest(&root.join("a"));
        touch_manifest(&root.join("a").join("inner"));
        touch_manifest(&root.join("b"));
        touch_manifest(root);

        let (reports, summary) = walker(root, 1, &[]).walk(root).collect().await.unwrap();
        let dirs: Vec<_> = reports.iter().map(|r| r.directory().to_path_buf()).collect();
        assert_eq!(
            dirs,
            vec![
                root.join("a").join("inner"),
                root.join("a"),
                root.join("b"),
                root.to_path_buf(),
            ]
        );
        assert_eq!(summary.reports, 4);
        assert!(!summary.cancelled);
    }

    #[tokio::test]
    async fn test_walk_empty_tree() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();

        let (reports, summary) = walker(dir.path(), 4, &[])
            .walk(dir.path())
            .collect()
            .await
            .unwrap();
        assert!(reports.is_empty());
        assert_eq!(summary, WalkSummary::default());
    }

    #[tokio::test]
    async fn test_walk_counts_come_from_checker() {
        let dir = TempDir::new().unwrap();
        touch_manifest(&dir.path().join("web"));

        let (reports, _) = walker(dir.path(), 2, &[("web", 5)])
            .walk(dir.path())
            .collect()
            .await
            .unwrap();
        assert_eq!(reports, vec![UpdateReport::new(dir.path().join("web"), 5)]);
    }

    #[tokio::test]
    async fn test_missing_root_is_listing_failure() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        let (reports, summary) = walker(&missing, 2, &[])
            .walk(&missing)
            .collect()
            .await
            .unwrap();
        assert!(reports.is_empty());
        assert_eq!(summary.failed_directories, 1);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let dir = TempDir::new().unwrap();
        touch_manifest(&dir.path().join("app"));

        let cancel = CancelToken::new();
        cancel.cancel();
        let walker = TreeWalker::new(
            Arc::new(ScanConfig::new(dir.path())),
            Arc::new(TableChecker {
                counts: HashMap::new(),
            }),
            cancel,
        );

        let (reports, summary) = walker.walk(dir.path()).collect().await.unwrap();
        assert!(reports.is_empty());
        assert!(summary.cancelled);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinked_directories_not_followed_by_default() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("real");
        touch_manifest(&target);
        std::os::unix::fs::symlink(&target, dir.path().join("alias")).unwrap();

        let (reports, _) = walker(dir.path(), 1, &[])
            .walk(dir.path())
            .collect()
            .await
            .unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].directory(), target);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinked_directories_followed_when_enabled() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("real");
        touch_manifest(&target);
        std::os::unix::fs::symlink(&target, dir.path().join("alias")).unwrap();

        let config = ScanConfig::new(dir.path())
            .with_order(ListingOrder::Name)
            .with_follow_symlinks(true);
        let walker = TreeWalker::new(
            Arc::new(config),
            Arc::new(TableChecker {
                counts: HashMap::new(),
            }),
            CancelToken::new(),
        );

        let (reports, _) = walker.walk(dir.path()).collect().await.unwrap();
        let dirs: Vec<_> = reports.iter().map(|r| r.directory().to_path_buf()).collect();
        assert_eq!(dirs, vec![dir.path().join("alias"), target]);
    }
}
