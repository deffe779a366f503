//! Where guides live and how their URLs are shaped.

use std::path::{Path, PathBuf};

/// Extension of guide content files, without the dot.
pub const GUIDE_EXTENSION: &str = "mdx";

/// Sections of the guides tree that may be served.
///
/// `graphql` is published upstream but federated, so it is not served from
/// this content tree.
pub const PUBLISHED_SECTIONS: &[&str] = &[
    "ai",
    "api",
    "auth",
    "cli",
    "database",
    "functions",
    "getting-started",
    "platform",
    "realtime",
    "resources",
    "self-hosting",
    "storage",
];

/// Default base for "edit this page" links.
pub const DEFAULT_EDIT_LINK_BASE: &str =
    "https://github.com/supabase/supabase/blob/master/apps/docs/content/guides";

/// Default route prefix for guide pathnames.
pub const DEFAULT_PATHNAME_PREFIX: &str = "/guides";

/// Default not-found route used for rejected slugs.
pub const DEFAULT_NOT_FOUND_PATH: &str = "/not-found";

/// Settings for locating and addressing guide pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideSettings {
    /// Directory holding the guide tree.
    pub root: PathBuf,
    /// Top-level sections that may be served.
    pub published_sections: Vec<String>,
    /// Route prefix for pathnames, without a trailing slash.
    pub pathname_prefix: String,
    /// URL that relative content paths are appended to for edit links.
    pub edit_link_base: String,
    /// Route that rejected slugs redirect to.
    pub not_found_path: String,
}

impl GuideSettings {
    /// Settings rooted at `root` with the default sections and URLs.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            published_sections: PUBLISHED_SECTIONS.iter().map(|s| (*s).to_string()).collect(),
            pathname_prefix: DEFAULT_PATHNAME_PREFIX.to_string(),
            edit_link_base: DEFAULT_EDIT_LINK_BASE.to_string(),
            not_found_path: DEFAULT_NOT_FOUND_PATH.to_string(),
        }
    }

    /// Replace the published section allow-list.
    pub fn with_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.published_sections = sections.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the edit link base URL.
    pub fn with_edit_link_base(mut self, base: impl Into<String>) -> Self {
        self.edit_link_base = base.into();
        self
    }

    /// Replace the pathname prefix.
    pub fn with_pathname_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.pathname_prefix = prefix.into();
        self
    }

    /// Replace the not-found route.
    pub fn with_not_found_path(mut self, path: impl Into<String>) -> Self {
        self.not_found_path = path.into();
        self
    }

    /// The guides root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `section` is on the allow-list.
    pub fn is_published(&self, section: &str) -> bool {
        self.published_sections.iter().any(|s| s == section)
    }

    /// Directory for a section, e.g. `root/database`.
    pub fn section_dir(&self, section: &str) -> PathBuf {
        self.root.join(section)
    }

    /// Landing file for a section, e.g. `root/database.mdx`.
    pub fn section_landing(&self, section: &str) -> PathBuf {
        self.root.join(format!("{section}.{GUIDE_EXTENSION}"))
    }

    /// Edit link for a content path relative to the root, using `/` separators.
    pub fn edit_link(&self, relative_url_path: &str) -> String {
        format!(
            "{}/{}.{}",
            self.edit_link_base.trim_end_matches('/'),
            relative_url_path,
            GUIDE_EXTENSION
        )
    }
}
