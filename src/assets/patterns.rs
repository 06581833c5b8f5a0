// src/assets/patterns.rs

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::config::model::SourceSection;
use crate::fs::FileSystem;

/// Compiled glob set selecting the file types that get mirrored.
///
/// One `**/*.<ext>` pattern per configured extension, compiled once from the
/// `[source]` section and never mutated afterwards. Paths are matched
/// relative to the source root, with forward slashes.
#[derive(Clone)]
pub struct AssetPatterns {
    extensions: Vec<String>,
    set: GlobSet,
}

impl fmt::Debug for AssetPatterns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetPatterns")
            .field("extensions", &self.extensions)
            .finish_non_exhaustive()
    }
}

impl AssetPatterns {
    /// Compile the pattern set for the given extensions.
    pub fn new(extensions: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for ext in extensions {
            let pattern = format!("**/*.{ext}");
            let glob = Glob::new(&pattern)
                .with_context(|| format!("invalid glob pattern: {pattern}"))?;
            builder.add(glob);
        }

        Ok(Self {
            extensions: extensions.to_vec(),
            set: builder.build()?,
        })
    }

    /// Convenience: compile directly from the `[source]` config section.
    pub fn from_config(source: &SourceSection) -> Result<Self> {
        Self::new(&source.extensions)
    }

    /// Returns true if a path (relative to the source root, e.g.
    /// `"blocks/index.php"`) is one of the mirrored file types.
    pub fn matches(&self, rel_path: &str) -> bool {
        self.set.is_match(rel_path)
    }

    /// Lazily enumerate all matching files under `root`.
    ///
    /// Each call rescans the filesystem from scratch. A missing or unreadable
    /// source root yields an empty sequence rather than an error: nothing to
    /// mirror is not a failure. No ordering guarantee.
    pub fn scan<'a>(&'a self, fs: &'a dyn FileSystem, root: &Path) -> AssetScan<'a> {
        let pending = if fs.is_dir(root) {
            vec![root.to_path_buf()]
        } else {
            debug!(root = %root.display(), "source root missing, nothing to scan");
            Vec::new()
        };

        AssetScan {
            fs,
            patterns: self,
            root: root.to_path_buf(),
            pending,
        }
    }
}

/// Iterator over matching files, produced by [`AssetPatterns::scan`].
///
/// Walks the tree with an explicit directory stack; unreadable directories
/// are skipped with a debug log instead of aborting the scan.
pub struct AssetScan<'a> {
    fs: &'a dyn FileSystem,
    patterns: &'a AssetPatterns,
    root: PathBuf,
    pending: Vec<PathBuf>,
}

impl Iterator for AssetScan<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        while let Some(path) = self.pending.pop() {
            if self.fs.is_dir(&path) {
                match self.fs.read_dir(&path) {
                    Ok(entries) => self.pending.extend(entries),
                    Err(err) => {
                        debug!(dir = %path.display(), error = %err, "skipping unreadable dir");
                    }
                }
            } else if self.fs.is_file(&path) {
                if let Ok(rel) = path.strip_prefix(&self.root) {
                    let rel_str = rel.to_string_lossy().replace('\\', "/");
                    if self.patterns.matches(&rel_str) {
                        return Some(path);
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    fn patterns() -> AssetPatterns {
        AssetPatterns::new(&[
            "php".to_string(),
            "txt".to_string(),
            "svg".to_string(),
        ])
        .unwrap()
    }

    #[test]
    fn matches_configured_extensions_only() {
        let patterns = patterns();

        assert!(patterns.matches("index.php"));
        assert!(patterns.matches("blocks/nested/readme.txt"));
        assert!(patterns.matches("icons/logo.svg"));
        assert!(!patterns.matches("app/bundle.js"));
        assert!(!patterns.matches("styles/main.css"));
        assert!(!patterns.matches("php")); // no extension at all
    }

    #[test]
    fn scan_walks_nested_dirs() {
        let fs = MockFileSystem::new();
        fs.add_file("src/plugin/index.php", b"<?php");
        fs.add_file("src/plugin/blocks/block.php", b"<?php");
        fs.add_file("src/plugin/readme.txt", b"readme");
        fs.add_file("src/plugin/app/bundle.js", b"js");

        let patterns = patterns();
        let mut found: Vec<String> = patterns
            .scan(&fs, Path::new("src/plugin"))
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect();
        found.sort();

        assert_eq!(
            found,
            vec![
                "src/plugin/blocks/block.php",
                "src/plugin/index.php",
                "src/plugin/readme.txt",
            ]
        );
    }

    #[test]
    fn scan_of_missing_root_is_empty() {
        let fs = MockFileSystem::new();
        let patterns = patterns();

        assert_eq!(patterns.scan(&fs, Path::new("no/such/dir")).count(), 0);
    }

    #[test]
    fn scan_is_restartable() {
        let fs = MockFileSystem::new();
        fs.add_file("src/plugin/index.php", b"<?php");

        let patterns = patterns();
        assert_eq!(patterns.scan(&fs, Path::new("src/plugin")).count(), 1);
        assert_eq!(patterns.scan(&fs, Path::new("src/plugin")).count(), 1);
    }
}
