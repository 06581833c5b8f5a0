// src/watch/watcher.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::assets::{AssetPatterns, move_file};
use crate::fs::FileSystem;
use crate::server::ReloadHandle;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive
/// for as long as needed. Dropping this handle stops file watching, which is
/// the clean-shutdown hook for a dev session.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a filesystem watcher that observes the source root recursively and
/// mirrors every changed or added matching file into `dest_root`, with a
/// browser reload after each successful copy.
///
/// Each matching event launches an independent copy task without awaiting
/// it. Overlapping copies of the same file race at the destination and the
/// last write wins; one failed copy never stops later events from being
/// processed.
pub fn spawn_watcher(
    fs: Arc<dyn FileSystem>,
    patterns: Arc<AssetPatterns>,
    source_root: impl Into<PathBuf>,
    dest_root: impl Into<PathBuf>,
    reload: ReloadHandle,
) -> Result<WatcherHandle> {
    let source_root = source_root.into();
    // Canonicalize once so notify's absolute event paths share our prefix.
    let source_root = fs.canonicalize(&source_root).unwrap_or(source_root);
    let dest_root = dest_root.into();

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    // Closure called synchronously by notify whenever an event arrives.
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if event_tx.send(event).is_err() {
                    // We can't log via tracing here easily, so fallback to stderr.
                    eprintln!("plugsync: watcher event receiver dropped");
                }
            }
            Err(err) => {
                eprintln!("plugsync: file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&source_root, RecursiveMode::Recursive)?;

    info!(root = %source_root.display(), "file watcher started");

    // Async task that consumes notify events and launches copies.
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if !is_copy_event(&event.kind) {
                continue;
            }
            debug!(?event, "received notify event");

            for path in event.paths {
                let Some(rel) = relative_str(&source_root, &path) else {
                    continue;
                };
                if !patterns.matches(&rel) {
                    continue;
                }

                let fs = Arc::clone(&fs);
                let source_root = source_root.clone();
                let dest_root = dest_root.clone();
                let reload = reload.clone();

                // Launch the copy without blocking the event loop on it;
                // ordering across overlapping copies is unspecified.
                tokio::spawn(async move {
                    move_file(
                        fs.as_ref(),
                        &source_root,
                        &path,
                        &dest_root,
                        Some(&reload),
                    )
                    .await;
                });
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}

/// Only additions and content changes trigger a copy; removals have no
/// counterpart at the destination.
fn is_copy_event(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}

/// Convert an event path into a string relative to `root`, with forward
/// slashes, for glob matching.
///
/// Falls back to canonicalizing both sides when the direct prefix strip
/// fails (symlinked temp dirs on macOS, mostly). Returns `None` for paths
/// unrelated to `root`.
fn relative_str(root: &Path, path: &Path) -> Option<String> {
    if let Ok(rel) = path.strip_prefix(root) {
        return Some(rel.to_string_lossy().replace('\\', "/"));
    }

    if let (Ok(root_canon), Ok(path_canon)) = (root.canonicalize(), path.canonicalize()) {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            return Some(rel.to_string_lossy().replace('\\', "/"));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};

    #[test]
    fn create_and_modify_events_trigger_copies() {
        assert!(is_copy_event(&EventKind::Create(CreateKind::File)));
        assert!(is_copy_event(&EventKind::Modify(ModifyKind::Any)));
        assert!(!is_copy_event(&EventKind::Remove(RemoveKind::File)));
        assert!(!is_copy_event(&EventKind::Access(
            notify::event::AccessKind::Any
        )));
    }

    #[test]
    fn relative_str_strips_root() {
        let rel = relative_str(Path::new("/tmp/src"), Path::new("/tmp/src/a/b.php"));
        assert_eq!(rel.as_deref(), Some("a/b.php"));
    }

    #[test]
    fn relative_str_rejects_unrelated_path() {
        assert_eq!(
            relative_str(Path::new("/tmp/does-not-exist-a"), Path::new("/tmp/does-not-exist-b/x.php")),
            None
        );
    }
}
