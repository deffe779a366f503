//! Inputs to metadata generation: the parent route and the page.

use async_trait::async_trait;
use docket_content::{GuideFrontmatter, GuideLoad, GuideLoader, Slug};
use docket_core::{Error, Result};

use crate::types::{Alternates, OpenGraph, PageMetadata};

/// Metadata already resolved by the parent route.
///
/// The two fields are fetched separately so they can be awaited alongside
/// the page lookup.
#[async_trait]
pub trait ResolvingMetadata: Send + Sync {
    /// The parent's alternates block.
    async fn alternates(&self) -> Result<Option<Alternates>>;

    /// The parent's Open Graph block.
    async fn open_graph(&self) -> Result<Option<OpenGraph>>;
}

#[async_trait]
impl ResolvingMetadata for PageMetadata {
    async fn alternates(&self) -> Result<Option<Alternates>> {
        Ok(self.alternates.clone())
    }

    async fn open_graph(&self) -> Result<Option<OpenGraph>> {
        Ok(self.open_graph.clone())
    }
}

/// What metadata generation needs to know about a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRef {
    /// Validated frontmatter.
    pub meta: GuideFrontmatter,
    /// Route of the page, of the form `/guides/<section>/...`.
    pub pathname: String,
}

/// Looks up the page for a set of route params.
#[async_trait]
pub trait PageSource<P: ?Sized + Sync>: Send + Sync {
    /// Find the page for `params`.
    async fn page(&self, params: &P) -> Result<PageRef>;
}

#[async_trait]
impl PageSource<Slug> for GuideLoader {
    async fn page(&self, params: &Slug) -> Result<PageRef> {
        match self.load(params).await? {
            GuideLoad::Page(page) => Ok(PageRef {
                meta: page.meta.clone(),
                pathname: page.pathname.clone(),
            }),
            GuideLoad::Redirect(redirect) => Err(Error::not_found(format!(
                "guide `{}` is not published (redirect to {})",
                redirect.requested, redirect.location
            ))),
        }
    }
}
