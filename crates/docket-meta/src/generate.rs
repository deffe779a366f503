//! Merging parent metadata with page frontmatter.

use std::sync::Arc;

use docket_core::Result;

use crate::image::{content_kind, SiteSettings};
use crate::source::{PageRef, PageSource, ResolvingMetadata};
use crate::types::{Alternates, OgImage, OpenGraph, PageMetadata};

/// Builds [`PageMetadata`] for pages found through a [`PageSource`].
#[derive(Debug, Clone)]
pub struct MetadataGenerator<S> {
    source: S,
    site: Arc<SiteSettings>,
}

impl<S> MetadataGenerator<S> {
    /// A generator reading pages from `source`.
    pub fn new(source: S, site: SiteSettings) -> Self {
        Self {
            source,
            site: Arc::new(site),
        }
    }

    /// The site settings.
    pub fn site(&self) -> &SiteSettings {
        &self.site
    }

    /// The page source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Generate metadata for the page at `params`.
    ///
    /// The parent's alternates, the parent's Open Graph block, and the page
    /// are looked up concurrently; the merge starts once all three are in.
    ///
    /// # Errors
    ///
    /// Fails if any of the three lookups fails.
    pub async fn generate<P, R>(&self, params: &P, parent: &R) -> Result<PageMetadata>
    where
        P: ?Sized + Sync,
        S: PageSource<P>,
        R: ResolvingMetadata + ?Sized,
    {
        let (alternates, open_graph, page) = tokio::try_join!(
            parent.alternates(),
            parent.open_graph(),
            self.source.page(params)
        )?;
        Ok(self.merge(alternates, open_graph, &page))
    }

    /// Merge parent blocks with a page. Page values win.
    pub fn merge(
        &self,
        parent_alternates: Option<Alternates>,
        parent_open_graph: Option<OpenGraph>,
        page: &PageRef,
    ) -> PageMetadata {
        let meta = &page.meta;
        let url = self.site.url_for(&page.pathname);

        let alternates = Alternates {
            canonical: Some(
                meta.canonical
                    .clone()
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| url.clone()),
            ),
            ..parent_alternates.unwrap_or_default()
        };

        let image = OgImage {
            url: self.site.image_url(
                content_kind(&page.pathname),
                &meta.title,
                meta.description.as_deref().unwrap_or_default(),
            ),
            width: Some(self.site.image_width),
            height: Some(self.site.image_height),
            alt: Some(meta.title.clone()),
        };

        let open_graph = OpenGraph {
            url: Some(url),
            images: vec![image],
            ..parent_open_graph.unwrap_or_default()
        };

        log::debug!("generated metadata for {}", page.pathname);
        PageMetadata {
            title: Some(self.site.title(&meta.title)),
            description: meta.summary().map(str::to_string),
            alternates: Some(alternates),
            open_graph: Some(open_graph),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use docket_content::{GuideFrontmatter, GuideLoader, GuideSettings, Slug};
    use docket_core::Error;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    struct FixedPage(PageRef);

    #[async_trait]
    impl PageSource<str> for FixedPage {
        async fn page(&self, _params: &str) -> Result<PageRef> {
            Ok(self.0.clone())
        }
    }

    struct FailingParent;

    #[async_trait]
    impl ResolvingMetadata for FailingParent {
        async fn alternates(&self) -> Result<Option<Alternates>> {
            Err(Error::invalid_data("parent layout failed"))
        }

        async fn open_graph(&self) -> Result<Option<OpenGraph>> {
            Ok(None)
        }
    }

    fn page(meta: GuideFrontmatter) -> FixedPage {
        FixedPage(PageRef {
            meta,
            pathname: "/guides/database/overview".to_string(),
        })
    }

    fn parent() -> PageMetadata {
        PageMetadata {
            title: Some("Supabase Docs".into()),
            description: Some("Parent".into()),
            alternates: Some(Alternates {
                canonical: Some("/old".into()),
                languages: BTreeMap::from([("en-US".to_string(), "/docs".to_string())]),
                types: BTreeMap::new(),
            }),
            open_graph: Some(OpenGraph {
                site_name: Some("Supabase".into()),
                kind: Some("article".into()),
                url: Some("/docs".into()),
                ..Default::default()
            }),
        }
    }

    #[tokio::test]
    async fn test_page_canonical_overrides_parent() {
        let mut meta = GuideFrontmatter::titled("Overview");
        meta.canonical = Some("/new".into());
        let generator = MetadataGenerator::new(page(meta), SiteSettings::default());

        let out = generator.generate("ignored", &parent()).await.unwrap();
        let alternates = out.alternates.unwrap();
        assert_eq!(alternates.canonical.as_deref(), Some("/new"));
        assert_eq!(alternates.languages["en-US"], "/docs");
    }

    #[tokio::test]
    async fn test_canonical_falls_back_to_base_path() {
        let generator = MetadataGenerator::new(
            page(GuideFrontmatter::titled("Overview")),
            SiteSettings::default(),
        );

        let out = generator.generate("ignored", &parent()).await.unwrap();
        assert_eq!(
            out.alternates.unwrap().canonical.as_deref(),
            Some("/docs/guides/database/overview")
        );
    }

    #[tokio::test]
    async fn test_title_description_and_open_graph() {
        let mut meta = GuideFrontmatter::titled("Database Overview");
        meta.description = Some("Every project is a Postgres database".into());
        let generator = MetadataGenerator::new(page(meta), SiteSettings::default());

        let out = generator.generate("ignored", &parent()).await.unwrap();
        assert_eq!(out.title.as_deref(), Some("Database Overview | Supabase Docs"));
        assert_eq!(
            out.description.as_deref(),
            Some("Every project is a Postgres database")
        );

        let og = out.open_graph.unwrap();
        assert_eq!(og.site_name.as_deref(), Some("Supabase"));
        assert_eq!(og.kind.as_deref(), Some("article"));
        assert_eq!(og.url.as_deref(), Some("/docs/guides/database/overview"));
        assert_eq!(og.images.len(), 1);

        let image = &og.images[0];
        assert_eq!(
            image.url,
            "https://obuldanrptloktxcffvn.supabase.co/functions/v1/og-images\
             ?site=docs&type=database&title=Database%20Overview\
             &description=Every%20project%20is%20a%20Postgres%20database"
        );
        assert_eq!(image.width, Some(800));
        assert_eq!(image.height, Some(600));
        assert_eq!(image.alt.as_deref(), Some("Database Overview"));
    }

    #[tokio::test]
    async fn test_description_falls_back_to_subtitle() {
        let mut meta = GuideFrontmatter::titled("Auth");
        meta.subtitle = Some("Users & sessions".into());
        let generator = MetadataGenerator::new(page(meta), SiteSettings::default());

        let out = generator.generate("ignored", &PageMetadata::default()).await.unwrap();
        assert_eq!(out.description.as_deref(), Some("Users & sessions"));
        let og = out.open_graph.unwrap();
        assert!(og.images[0].url.ends_with("&title=Auth&description="));
        assert!(og.site_name.is_none());
    }

    #[tokio::test]
    async fn test_image_description_ignores_subtitle() {
        let mut meta = GuideFrontmatter::titled("Auth");
        meta.description = Some("Users & sessions".into());
        meta.subtitle = Some("Not this".into());
        let generator = MetadataGenerator::new(page(meta), SiteSettings::default());

        let out = generator.generate("ignored", &PageMetadata::default()).await.unwrap();
        assert_eq!(out.description.as_deref(), Some("Users & sessions"));
        let url = &out.open_graph.unwrap().images[0].url;
        assert!(url.ends_with("&description=Users%20%26%20sessions"));
        assert!(!url.contains("Not%20this"));
    }

    #[tokio::test]
    async fn test_parent_failure_propagates() {
        let generator = MetadataGenerator::new(
            page(GuideFrontmatter::titled("x")),
            SiteSettings::default(),
        );
        let err = generator.generate("ignored", &FailingParent).await.unwrap_err();
        assert!(err.to_string().contains("parent layout failed"));
    }

    #[tokio::test]
    async fn test_guide_loader_as_source() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("guides");
        std::fs::create_dir_all(root.join("storage")).unwrap();
        std::fs::write(
            root.join("storage").join("uploads.mdx"),
            "---\ntitle: Uploads\ndescription: Upload files\n---\nBody",
        )
        .unwrap();

        let loader = GuideLoader::new(GuideSettings::new(&root));
        let generator = MetadataGenerator::new(loader, SiteSettings::default());

        let out = generator
            .generate(&Slug::new(["storage", "uploads"]), &parent())
            .await
            .unwrap();
        assert_eq!(out.title.as_deref(), Some("Uploads | Supabase Docs"));
        assert_eq!(
            out.open_graph.unwrap().url.as_deref(),
            Some("/docs/guides/storage/uploads")
        );

        let err = generator
            .generate(&Slug::new(["graphql"]), &parent())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
