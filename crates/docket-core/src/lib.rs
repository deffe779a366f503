//! Docket Core: shared error type, configuration trait, and utilities.
//!
//! This crate provides the foundational types used across all Docket crates.
//! It has no internal Docket dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: Configuration abstraction
//! - [`util`]: Async file discovery and lexical path helpers

#![doc = include_str!("../README.md")]

pub mod error;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::ConfigProvider;

// Convenience re-exports from util
pub use util::files::{FileInfo, FindOptions};
pub use util::paths::normalize_lexically;
