// src/config/mod.rs

//! Configuration loading and validation for plugsync.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like extension sanity (`validate.rs`).
//!
//! Everything the original workflow read from the process environment (the
//! dev URL in particular) lives in this explicit config instead.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{ConfigFile, DevSection, RawConfigFile, ReleaseSection, SourceSection};
