//! Utility modules for file operations and path handling.
//!
//! # Modules
//!
//! - [`files`]: Async file discovery and reading utilities
//! - [`paths`]: Lexical path normalization and tilde expansion

pub mod files;
pub mod paths;
