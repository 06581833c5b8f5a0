// src/lib.rs

pub mod assets;
pub mod build;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod guard;
pub mod logging;
pub mod server;
pub mod watch;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::assets::AssetPatterns;
use crate::cli::{CliArgs, Command};
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::fs::{FileSystem, RealFileSystem};
use crate::guard::{print_dev_url_help, require_dev_url};
use crate::server::DevServer;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the extension glob set
/// - the requested operation (watch / build / stamp)
/// - Ctrl-C handling for the watch session
pub async fn run(args: CliArgs) -> Result<ExitCode> {
    let cfg = load_and_validate(&args.config)?;
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    match args.command {
        Command::Watch { out_dir } => run_watch(cfg, fs, out_dir).await,
        Command::Build { dest } => {
            let patterns = AssetPatterns::from_config(&cfg.source)?;
            build::build(fs.as_ref(), &patterns, &cfg.source.root, &dest).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Stamp { dir, tag } => {
            build::update_version(fs.as_ref(), &cfg.release, &dir, &tag)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Dev session: guard the dev URL, start the proxy, watch until Ctrl-C.
async fn run_watch(
    cfg: ConfigFile,
    fs: Arc<dyn FileSystem>,
    out_dir: PathBuf,
) -> Result<ExitCode> {
    let upstream = match require_dev_url(&cfg.dev) {
        Ok(url) => url.to_string(),
        Err(_missing) => {
            print_dev_url_help();
            return Ok(ExitCode::FAILURE);
        }
    };

    let server = DevServer::init(cfg.dev.port, &upstream).await?;

    let patterns = Arc::new(AssetPatterns::from_config(&cfg.source)?);
    let _watcher = watch::spawn_watcher(
        Arc::clone(&fs),
        patterns,
        cfg.source.root.clone(),
        out_dir,
        server.reload_handle(),
    )?;

    tokio::signal::ctrl_c().await?;
    info!("shutting down watch session");

    Ok(ExitCode::SUCCESS)
}
