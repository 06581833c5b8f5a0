// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{PlugsyncError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::PlugsyncError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.source, raw.dev, raw.release))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_extensions(cfg)?;
    validate_release(cfg)?;
    Ok(())
}

fn validate_extensions(cfg: &RawConfigFile) -> Result<()> {
    if cfg.source.extensions.is_empty() {
        return Err(PlugsyncError::ConfigError(
            "[source].extensions must list at least one file extension".to_string(),
        ));
    }

    for ext in cfg.source.extensions.iter() {
        if ext.is_empty() {
            return Err(PlugsyncError::ConfigError(
                "[source].extensions must not contain empty entries".to_string(),
            ));
        }
        // Extensions are bare suffixes; glob syntax and separators would
        // silently change what gets mirrored.
        if ext.contains(['/', '\\', '*', '.']) || ext.chars().any(char::is_whitespace) {
            return Err(PlugsyncError::ConfigError(format!(
                "[source].extensions entry '{}' must be a bare extension like \"php\"",
                ext
            )));
        }
    }

    Ok(())
}

fn validate_release(cfg: &RawConfigFile) -> Result<()> {
    if cfg.release.version_file.is_empty() {
        return Err(PlugsyncError::ConfigError(
            "[release].version_file must not be empty".to_string(),
        ));
    }
    if cfg.release.version_file.contains(['/', '\\']) {
        return Err(PlugsyncError::ConfigError(format!(
            "[release].version_file '{}' must be a bare filename, not a path",
            cfg.release.version_file
        )));
    }
    if cfg.release.placeholder.is_empty() {
        return Err(PlugsyncError::ConfigError(
            "[release].placeholder must not be empty".to_string(),
        ));
    }
    Ok(())
}
