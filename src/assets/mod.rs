// src/assets/mod.rs

//! File selection and mirroring.
//!
//! This module is responsible for:
//! - Compiling the extension glob set from `[source]` (`patterns.rs`).
//! - Copying individual matched files into the destination tree while
//!   preserving their source-relative path (`mover.rs`).
//!
//! It does **not** know whether it is serving a one-shot build or a watch
//! session; callers decide whether a copy should trigger a browser reload.

pub mod mover;
pub mod patterns;

pub use mover::{move_file, slug_for};
pub use patterns::{AssetPatterns, AssetScan};
