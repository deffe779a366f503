//! Reading, validating, and memoizing guide pages.

use std::path::PathBuf;
use std::sync::Arc;

use docket_core::util::files;
use docket_core::Result;
use serde::Serialize;

use super::frontmatter::{FrontmatterValidator, GuideFrontmatter, GuideSchema};
use super::params::{static_params, StaticParam};
use super::settings::GuideSettings;
use super::slug::{resolve, Redirect, Resolution, ResolvedGuide, Slug};
use crate::cache::MemoCache;
use crate::markdown::extract_frontmatter;

/// A loaded guide page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidePage {
    /// Route of the page, e.g. `/guides/database/overview`.
    pub pathname: String,
    /// Validated frontmatter.
    pub meta: GuideFrontmatter,
    /// Body text after the frontmatter block, unrendered.
    pub content: String,
    /// "Edit this page" URL in the source repository.
    pub edit_link: String,
    /// File the page was read from.
    #[serde(skip)]
    pub file_path: PathBuf,
}

/// Outcome of loading a slug.
#[derive(Debug, Clone, PartialEq)]
pub enum GuideLoad {
    /// The page was loaded (or served from cache).
    Page(Arc<GuidePage>),
    /// The slug may not be served; send the client here instead.
    Redirect(Redirect),
}

impl GuideLoad {
    /// The page, if one was loaded.
    pub fn page(&self) -> Option<&Arc<GuidePage>> {
        match self {
            Self::Page(page) => Some(page),
            Self::Redirect(_) => None,
        }
    }

    /// The redirect, if the slug was rejected.
    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            Self::Redirect(redirect) => Some(redirect),
            Self::Page(_) => None,
        }
    }
}

/// Loads guide pages from the guides root.
///
/// Cloning is cheap and clones share the cache.
#[derive(Clone)]
pub struct GuideLoader {
    settings: Arc<GuideSettings>,
    validator: Arc<dyn FrontmatterValidator>,
    cache: Arc<MemoCache<GuidePage>>,
}

impl std::fmt::Debug for GuideLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuideLoader")
            .field("settings", &self.settings)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl GuideLoader {
    /// A loader with the default schema and a fresh cache.
    pub fn new(settings: GuideSettings) -> Self {
        Self {
            settings: Arc::new(settings),
            validator: Arc::new(GuideSchema),
            cache: Arc::new(MemoCache::new()),
        }
    }

    /// Replace the frontmatter validator.
    pub fn with_validator(mut self, validator: impl FrontmatterValidator + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    /// Use `cache` instead of the loader's own.
    pub fn with_cache(mut self, cache: Arc<MemoCache<GuidePage>>) -> Self {
        self.cache = cache;
        self
    }

    /// The settings this loader reads with.
    pub fn settings(&self) -> &GuideSettings {
        &self.settings
    }

    /// The page cache.
    pub fn cache(&self) -> &Arc<MemoCache<GuidePage>> {
        &self.cache
    }

    /// Route of the page for `slug`.
    pub fn pathname(&self, slug: &Slug) -> String {
        format!(
            "{}/{}",
            self.settings.pathname_prefix.trim_end_matches('/'),
            slug.to_url_path()
        )
    }

    /// Load a page, serving repeat requests from the cache.
    ///
    /// Rejected slugs return [`GuideLoad::Redirect`] before anything is
    /// read, and are never cached.
    ///
    /// # Errors
    ///
    /// A missing or unreadable file and invalid frontmatter are fatal.
    /// Neither is cached.
    pub async fn load(&self, slug: &Slug) -> Result<GuideLoad> {
        let guide = match resolve(&self.settings, slug) {
            Resolution::Resolved(guide) => guide,
            Resolution::Rejected(redirect) => return Ok(GuideLoad::Redirect(redirect)),
        };

        let page = self
            .cache
            .get_or_try_init(slug, || self.read_page(&guide))
            .await?;
        Ok(GuideLoad::Page(page))
    }

    /// Load a page without consulting or filling the cache.
    pub async fn load_uncached(&self, slug: &Slug) -> Result<GuideLoad> {
        match resolve(&self.settings, slug) {
            Resolution::Resolved(guide) => {
                let page = self.read_page(&guide).await?;
                Ok(GuideLoad::Page(Arc::new(page)))
            }
            Resolution::Rejected(redirect) => Ok(GuideLoad::Redirect(redirect)),
        }
    }

    /// Every slug under `directory`, or under all published sections.
    pub async fn static_params(&self, directory: Option<&str>) -> Result<Vec<StaticParam>> {
        static_params(&self.settings, directory).await
    }

    async fn read_page(&self, guide: &ResolvedGuide) -> Result<GuidePage> {
        log::debug!("reading guide {}", guide.file_path.display());
        let source = files::read_file(&guide.file_path).await?;

        let parsed = extract_frontmatter(&source)?;
        let meta = self.validator.validate(&parsed.value_or_empty())?;

        Ok(GuidePage {
            pathname: self.pathname(&guide.slug),
            meta,
            content: parsed.body.to_string(),
            edit_link: self.settings.edit_link(&guide.relative_url_path()),
            file_path: guide.file_path.clone(),
        })
    }
}
