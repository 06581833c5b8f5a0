// src/build/runner.rs

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::assets::{AssetPatterns, move_file};
use crate::fs::FileSystem;

/// One-shot production copy: mirror every currently-matching source file
/// into `dest_root`, without browser reloads.
///
/// Files are moved one at a time; the sequential pass is a simplicity
/// choice, not a correctness requirement. The call resolves only after
/// every file has been attempted. Individual copy failures are logged by
/// the mover and do not abort the pass, so a build with zero matches (or a
/// missing source root) completes cleanly without creating anything.
pub async fn build(
    fs: &dyn FileSystem,
    patterns: &AssetPatterns,
    source_root: &Path,
    dest_root: &Path,
) -> Result<()> {
    let mut attempted = 0usize;

    // Snapshot the match set before copying so a destination nested under
    // the source root can't feed the scan its own output.
    let files: Vec<_> = patterns.scan(fs, source_root).collect();
    for from in files {
        move_file(fs, source_root, &from, dest_root, None).await;
        attempted += 1;
    }

    info!(attempted, dest = %dest_root.display(), "build complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    fn patterns() -> AssetPatterns {
        AssetPatterns::new(&["php".to_string(), "txt".to_string()]).unwrap()
    }

    #[tokio::test]
    async fn build_copies_every_match() {
        let fs = MockFileSystem::new();
        fs.add_file("src/plugin/index.php", b"<?php");
        fs.add_file("src/plugin/blocks/block.php", b"<?php block");
        fs.add_file("src/plugin/readme.txt", b"readme");
        fs.add_file("src/plugin/app/bundle.js", b"skipped");

        let patterns = patterns();
        build(&fs, &patterns, Path::new("src/plugin"), Path::new("out"))
            .await
            .unwrap();

        assert_eq!(
            fs.file_contents("out/index.php").as_deref(),
            Some(b"<?php".as_slice())
        );
        assert_eq!(
            fs.file_contents("out/blocks/block.php").as_deref(),
            Some(b"<?php block".as_slice())
        );
        assert_eq!(
            fs.file_contents("out/readme.txt").as_deref(),
            Some(b"readme".as_slice())
        );
        assert!(!fs.exists(Path::new("out/app/bundle.js")));
    }

    #[tokio::test]
    async fn build_with_missing_source_root_is_ok() {
        let fs = MockFileSystem::new();
        let patterns = patterns();

        build(&fs, &patterns, Path::new("nowhere"), Path::new("out"))
            .await
            .unwrap();

        assert!(!fs.exists(Path::new("out")));
    }
}
