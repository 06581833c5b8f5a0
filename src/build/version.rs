// src/build/version.rs

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::model::ReleaseSection;
use crate::fs::FileSystem;

/// Stamp the release tag into the version file under `dir`.
///
/// Reads `dir/<version_file>`, replaces every literal occurrence of the
/// placeholder with `tag`, and writes the result back in place. The tag is
/// opaque; no format validation.
///
/// Unlike the copy pipeline this propagates failure: a missing or unreadable
/// version file must fail the production build instead of shipping an
/// unstamped plugin.
pub fn update_version(
    fs: &dyn FileSystem,
    release: &ReleaseSection,
    dir: &Path,
    tag: &str,
) -> Result<()> {
    let path = dir.join(&release.version_file);

    let text = fs
        .read_to_string(&path)
        .with_context(|| format!("reading version file {:?}", path))?;

    let stamped = text.replace(&release.placeholder, tag);

    fs.write(&path, stamped.as_bytes())
        .with_context(|| format!("writing version file {:?}", path))?;

    info!(file = %path.display(), tag, "version stamped");
    Ok(())
}
