//! Async file utilities for Docket.
//!
//! Provides the file discovery and reading operations the content crates
//! build on. Everything here is read-only.

use async_walkdir::WalkDir;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{Error, Result};

/// Options for discovering files under a directory.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// File extension to match (without dot), e.g., "mdx"
    pub extension: Option<&'static str>,
    /// Maximum directory depth to search (None = unlimited)
    pub max_depth: Option<usize>,
}

impl FindOptions {
    /// Create options for finding MDX guide files.
    pub fn mdx() -> Self {
        Self::with_extension("mdx")
    }

    /// Create options matching a single extension.
    pub fn with_extension(extension: &'static str) -> Self {
        Self {
            extension: Some(extension),
            max_depth: None,
        }
    }

    /// Set maximum search depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    fn matches_extension(&self, path: &Path) -> bool {
        match self.extension {
            Some(ext) => path.extension().and_then(|e| e.to_str()) == Some(ext),
            None => true,
        }
    }
}

/// Information about a discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Full path to the file.
    pub path: PathBuf,
    /// File stem (filename without extension).
    pub stem: String,
    /// Path relative to the search base.
    pub relative_path: PathBuf,
}

impl FileInfo {
    /// Relative path components with the extension removed from the last one.
    ///
    /// `database/tables.mdx` becomes `["database", "tables"]`.
    pub fn segments(&self) -> Vec<String> {
        let without_ext = self.relative_path.with_extension("");
        without_ext
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect()
    }
}

/// Find all files matching criteria in a directory, recursively.
///
/// Results are sorted by relative path so repeated builds enumerate the
/// same order regardless of what the filesystem returns.
///
/// # Example
///
/// ```no_run
/// # use docket_core::util::files::{find_all_files, FindOptions};
/// # use std::path::Path;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let files = find_all_files(Path::new("content/guides/auth"), FindOptions::mdx()).await?;
/// for file in files {
///     println!("{}", file.relative_path.display());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn find_all_files(base_path: &Path, options: FindOptions) -> Result<Vec<FileInfo>> {
    if !is_dir(base_path).await {
        return Err(Error::not_found(format!(
            "Directory {} does not exist",
            base_path.display()
        )));
    }

    let mut files = Vec::new();
    let mut walker = WalkDir::new(base_path);

    while let Some(entry_result) = walker.next().await {
        let entry = entry_result.map_err(|e| Error::walk(base_path, e))?;
        let path = entry.path();

        // Skip directories
        if path.is_dir() {
            continue;
        }

        let relative_path = path.strip_prefix(base_path).unwrap_or(&path).to_path_buf();

        if let Some(max_depth) = options.max_depth {
            if relative_path.components().count() > max_depth {
                continue;
            }
        }

        if !options.matches_extension(&path) {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        files.push(FileInfo {
            path: path.to_path_buf(),
            stem,
            relative_path,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    log::debug!("found {} files under {}", files.len(), base_path.display());
    Ok(files)
}

/// Read a file's contents as a string.
pub async fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

/// Check if a path exists.
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

/// Check if a path exists and is a regular file.
pub async fn is_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Check if a path exists and is a directory.
pub async fn is_dir(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}
