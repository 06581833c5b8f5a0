mod common;
use crate::common::init_tracing;

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use plugsync::assets::AssetPatterns;
use plugsync::fs::{FileSystem, RealFileSystem};
use plugsync::server::ReloadHandle;
use plugsync::watch::spawn_watcher;
use tempfile::TempDir;

/// Poll until `path` exists with the expected content, or give up.
///
/// Watch events go through the OS notification layer, so timing is not
/// deterministic; a generous deadline keeps this stable on slow CI.
async fn wait_for_copy(path: &Path, expected: &str) {
    let deadline = Duration::from_secs(10);
    let poll = Duration::from_millis(100);
    let mut waited = Duration::ZERO;

    loop {
        if let Ok(content) = fs::read_to_string(path) {
            if content == expected {
                return;
            }
        }
        if waited >= deadline {
            panic!("timed out waiting for {} to be mirrored", path.display());
        }
        tokio::time::sleep(poll).await;
        waited += poll;
    }
}

#[tokio::test]
async fn added_and_changed_files_are_mirrored() {
    init_tracing();

    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::create_dir_all(source.path().join("blocks")).unwrap();

    let fsys: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let patterns = Arc::new(AssetPatterns::new(&["php".to_string()]).unwrap());

    let _watcher = spawn_watcher(
        fsys,
        patterns,
        source.path(),
        dest.path(),
        ReloadHandle::new(),
    )
    .unwrap();

    // Give the OS watcher a moment to arm before generating events.
    tokio::time::sleep(Duration::from_millis(300)).await;

    // "add" event
    fs::write(source.path().join("blocks/index.php"), "<?php // v1").unwrap();
    wait_for_copy(&dest.path().join("blocks/index.php"), "<?php // v1").await;

    // "change" event on the same file
    fs::write(source.path().join("blocks/index.php"), "<?php // v2").unwrap();
    wait_for_copy(&dest.path().join("blocks/index.php"), "<?php // v2").await;

    // A different file is still processed after earlier events; one event's
    // outcome never gates the next.
    fs::write(source.path().join("other.php"), "<?php // other").unwrap();
    wait_for_copy(&dest.path().join("other.php"), "<?php // other").await;
}

#[tokio::test]
async fn non_matching_files_are_ignored() {
    init_tracing();

    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    let fsys: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let patterns = Arc::new(AssetPatterns::new(&["php".to_string()]).unwrap());

    let _watcher = spawn_watcher(
        fsys,
        patterns,
        source.path(),
        dest.path(),
        ReloadHandle::new(),
    )
    .unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;

    fs::write(source.path().join("bundle.js"), "js").unwrap();
    fs::write(source.path().join("index.php"), "<?php").unwrap();

    // The matching file arriving proves earlier events were consumed.
    wait_for_copy(&dest.path().join("index.php"), "<?php").await;

    assert!(!dest.path().join("bundle.js").exists());
}
