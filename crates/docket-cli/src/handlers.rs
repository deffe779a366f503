//! Handler functions for guide commands.
//!
//! Each command has a function producing its output value and a thin
//! `handle_*` wrapper printing it.

use docket_content::{GuideLoad, GuideLoader, Slug, StaticParam};
use docket_core::{Error, Result};
use docket_meta::{MetadataGenerator, PageMetadata};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::path::Path;

/// Pages loaded concurrently by `check`.
const CHECK_CONCURRENCY: usize = 16;

// ============================================================================
// params
// ============================================================================

/// Static params for the whole tree, or for one directory.
pub async fn params(loader: &GuideLoader, section: Option<&str>) -> Result<Vec<StaticParam>> {
    loader.static_params(section).await
}

/// `docket params`
pub async fn handle_params(loader: &GuideLoader, section: Option<&str>) -> Result<()> {
    let params = params(loader, section).await?;
    println!("{}", to_json(&params)?);
    Ok(())
}

// ============================================================================
// show
// ============================================================================

/// Human-readable summary of a page, or of the redirect replacing it.
pub async fn show(loader: &GuideLoader, slug: &Slug) -> Result<String> {
    let page = match loader.load(slug).await? {
        GuideLoad::Page(page) => page,
        GuideLoad::Redirect(redirect) => {
            return Ok(format!("redirect: {}", redirect.location));
        }
    };

    let frontmatter = serde_json::to_string_pretty(&page.meta)
        .map_err(|e| Error::serialization(e.to_string()))?;
    Ok(format!(
        "pathname:  {}\nfile:      {}\nedit link: {}\nbody:      {} bytes\nfrontmatter:\n{}",
        page.pathname,
        page.file_path.display(),
        page.edit_link,
        page.content.len(),
        frontmatter
    ))
}

/// `docket show <slug>`
pub async fn handle_show(loader: &GuideLoader, slug: &Slug) -> Result<()> {
    println!("{}", show(loader, slug).await?);
    Ok(())
}

// ============================================================================
// meta
// ============================================================================

/// Read parent metadata from a JSON file.
pub async fn read_parent(path: &Path) -> Result<PageMetadata> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))?;
    serde_json::from_str(&raw)
        .map_err(|e| Error::serialization(format!("{}: {e}", path.display())))
}

/// Metadata for `slug`, merged over the parent metadata.
pub async fn meta(
    generator: &MetadataGenerator<GuideLoader>,
    slug: &Slug,
    parent: Option<&Path>,
) -> Result<PageMetadata> {
    let parent = match parent {
        Some(path) => read_parent(path).await?,
        None => PageMetadata::default(),
    };
    generator.generate(slug, &parent).await
}

/// `docket meta <slug> [--parent FILE]`
pub async fn handle_meta(
    generator: &MetadataGenerator<GuideLoader>,
    slug: &Slug,
    parent: Option<&Path>,
) -> Result<()> {
    let metadata = meta(generator, slug, parent).await?;
    println!("{}", to_json(&metadata)?);
    Ok(())
}

// ============================================================================
// check
// ============================================================================

/// Outcome of loading every static param.
#[derive(Debug, Default, Serialize)]
pub struct CheckReport {
    /// Pages attempted.
    pub checked: usize,
    /// `(slug, reason)` for every page that did not load.
    pub failures: Vec<(String, String)>,
}

impl CheckReport {
    /// Whether every page loaded.
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Load every page the build would pre-render.
pub async fn check(loader: &GuideLoader) -> Result<CheckReport> {
    let params = loader.static_params(None).await?;
    let checked = params.len();

    let mut failures: Vec<(String, String)> = stream::iter(params)
        .map(|param| async move {
            let slug = param.to_slug();
            let failure = match loader.load(&slug).await {
                Ok(GuideLoad::Page(_)) => None,
                Ok(GuideLoad::Redirect(redirect)) => {
                    Some(format!("redirects to {}", redirect.location))
                }
                Err(e) => Some(e.to_string()),
            };
            failure.map(|reason| (slug.to_url_path(), reason))
        })
        .buffer_unordered(CHECK_CONCURRENCY)
        .filter_map(|failure| async move { failure })
        .collect()
        .await;
    failures.sort();

    Ok(CheckReport { checked, failures })
}

/// `docket check`
pub async fn handle_check(loader: &GuideLoader) -> Result<()> {
    let report = check(loader).await?;
    for (slug, reason) in &report.failures {
        log::warn!("{slug}: {reason}");
        println!("FAIL {slug}: {reason}");
    }
    println!(
        "{} pages checked, {} failed",
        report.checked,
        report.failures.len()
    );

    if report.is_ok() {
        Ok(())
    } else {
        Err(Error::invalid_data(format!(
            "{} of {} pages failed to load",
            report.failures.len(),
            report.checked
        )))
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::serialization(e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
