// src/watch/mod.rs

//! File watching for the dev workflow.
//!
//! This module is responsible for:
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//! - Turning change/add events on matching files into copy tasks with a
//!   browser reload attached.
//!
//! It does **not** decide what matches: that lives in [`crate::assets`].

pub mod watcher;

pub use watcher::{WatcherHandle, spawn_watcher};
