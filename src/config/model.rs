// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [source]
/// root = "src/plugin"
/// extensions = ["php", "txt", "svg"]
///
/// [dev]
/// url = "http://plugin.test"
/// port = 1234
///
/// [release]
/// version_file = "plugin.php"
/// placeholder = "{% VERSION %}"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// Source tree location and file types from `[source]`.
    #[serde(default)]
    pub source: SourceSection,

    /// Dev server settings from `[dev]`.
    #[serde(default)]
    pub dev: DevSection,

    /// Version stamping settings from `[release]`.
    #[serde(default)]
    pub release: ReleaseSection,
}

/// Validated configuration.
///
/// Only constructed through `TryFrom<RawConfigFile>` (see `validate.rs`), so
/// holders can rely on the invariants checked there.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub source: SourceSection,
    pub dev: DevSection,
    pub release: ReleaseSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        source: SourceSection,
        dev: DevSection,
        release: ReleaseSection,
    ) -> Self {
        Self {
            source,
            dev,
            release,
        }
    }
}

/// `[source]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSection {
    /// Root of the plugin source tree. All copy slugs are relative to this.
    #[serde(default = "default_source_root")]
    pub root: PathBuf,

    /// File extensions to mirror into the output tree.
    ///
    /// Bare extensions without a dot, e.g. `["php", "txt", "svg"]`.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_source_root() -> PathBuf {
    PathBuf::from("src/plugin")
}

fn default_extensions() -> Vec<String> {
    vec!["php".to_string(), "txt".to_string(), "svg".to_string()]
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            root: default_source_root(),
            extensions: default_extensions(),
        }
    }
}

/// `[dev]` section.
///
/// `url` is deliberately optional: its absence means "dev mode not set up",
/// which the guard turns into a user-facing instruction rather than an error.
#[derive(Debug, Clone, Deserialize)]
pub struct DevSection {
    /// Upstream URL the dev proxy forwards to (e.g. a local WordPress site).
    #[serde(default)]
    pub url: Option<String>,

    /// Local port the dev proxy listens on.
    #[serde(default = "default_dev_port")]
    pub port: u16,
}

fn default_dev_port() -> u16 {
    1234
}

impl Default for DevSection {
    fn default() -> Self {
        Self {
            url: None,
            port: default_dev_port(),
        }
    }
}

/// `[release]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseSection {
    /// Single file under the stamped directory that carries the placeholder.
    #[serde(default = "default_version_file")]
    pub version_file: String,

    /// Literal marker replaced with the release tag at build time.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_version_file() -> String {
    "plugin.php".to_string()
}

fn default_placeholder() -> String {
    "{% VERSION %}".to_string()
}

impl Default for ReleaseSection {
    fn default() -> Self {
        Self {
            version_file: default_version_file(),
            placeholder: default_placeholder(),
        }
    }
}
