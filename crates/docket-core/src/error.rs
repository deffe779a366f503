//! Error types for Docket operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Docket crates. Uses `thiserror` for derive macros.
//!
//! A rejected slug is not an error: the guide resolver returns a redirect
//! value instead. Everything in here is terminal for the current request or
//! build step.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur in Docket operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific file or directory.
    #[error("I/O error at {}: {source}", path.display())]
    IoWithPath {
        /// Path being read when the error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed part way through.
    #[error("Failed to walk {}: {message}", path.display())]
    Walk {
        /// Root of the walk.
        path: PathBuf,
        /// Error reported by the walker.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Frontmatter did not match the guide schema.
    #[error("Type of frontmatter is not valid: {0}")]
    InvalidFrontmatter(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Wrap a bare I/O error.
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(err)
    }

    /// Wrap an I/O error with the path that produced it.
    pub fn io_with_path(err: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source: err,
        }
    }

    /// Create a walk error for the directory rooted at `path`.
    pub fn walk(path: impl AsRef<Path>, err: impl std::fmt::Display) -> Self {
        Self::Walk {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create an invalid frontmatter error.
    pub fn invalid_frontmatter(msg: impl Into<String>) -> Self {
        Self::InvalidFrontmatter(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Returns `true` for errors caused by a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Io(e) | Self::IoWithPath { source: e, .. } => {
                e.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

/// Result type alias using Docket's Error type.
pub type Result<T> = std::result::Result<T, Error>;
