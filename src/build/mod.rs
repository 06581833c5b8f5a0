// src/build/mod.rs

//! Production build steps.
//!
//! - [`runner`] mirrors the full matching file set into the output tree
//!   (one-shot, no reloads).
//! - [`version`] stamps the release tag into the version file before
//!   packaging.

pub mod runner;
pub mod version;

pub use runner::build;
pub use version::update_version;
