// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The CLI is a thin invocation surface: every subcommand maps directly onto
//! a library operation and supplies the paths/tag the caller chose.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `plugsync`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "plugsync",
    version,
    about = "Mirror plugin source files into a build tree, with watch mode and live reload.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Plugsync.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Plugsync.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PLUGSYNC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Watch the source tree, mirroring changes and reloading the browser.
    Watch {
        /// Directory the changed files are mirrored into.
        #[arg(long, value_name = "DIR")]
        out_dir: PathBuf,
    },

    /// Mirror all matching source files into the destination once.
    Build {
        /// Destination root for the mirrored tree.
        #[arg(long, value_name = "DIR")]
        dest: PathBuf,
    },

    /// Replace the version placeholder in the release file with a tag.
    Stamp {
        /// Directory containing the version file.
        #[arg(long, value_name = "DIR")]
        dir: PathBuf,

        /// Release tag substituted for the placeholder, verbatim.
        #[arg(long, value_name = "TAG")]
        tag: String,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
