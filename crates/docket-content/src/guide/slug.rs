//! Slugs and the path guard.
//!
//! [`resolve`] is the only way a slug becomes a file path. It is purely
//! lexical and never touches the filesystem, so a rejected slug is never
//! read.

use std::fmt;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

use docket_core::normalize_lexically;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::settings::{GuideSettings, GUIDE_EXTENSION};

/// Ordered route segments identifying a guide relative to the guides root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(Vec<String>);

impl Slug {
    /// Build a slug from segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parse a `/`-separated URL path such as `database/overview`.
    ///
    /// Empty segments (leading, trailing, or doubled slashes) are dropped.
    pub fn from_url_path(path: &str) -> Self {
        Self::new(path.split('/').filter(|s| !s.is_empty()))
    }

    /// The segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the slug has no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first segment, which names the section.
    pub fn section(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Segments joined with `/`.
    pub fn to_url_path(&self) -> String {
        self.0.join("/")
    }

    /// Consume into the underlying segments.
    pub fn into_segments(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url_path())
    }
}

impl From<Vec<String>> for Slug {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for Slug {
    fn from(segments: &[&str]) -> Self {
        Self::new(segments.iter().copied())
    }
}

/// Destination for a slug that may not be served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    /// The requested path, slug segments joined by `/`.
    pub requested: String,
    /// Where to send the client, e.g. `/not-found?page=secret`.
    pub location: String,
}

impl Redirect {
    /// Redirect to the not-found route, carrying the requested path.
    ///
    /// An empty requested path redirects to the bare route.
    pub fn not_found(not_found_path: &str, requested: impl Into<String>) -> Self {
        let requested = requested.into();
        let location = if requested.is_empty() {
            not_found_path.to_string()
        } else {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("page", &requested)
                .finish();
            format!("{not_found_path}?{query}")
        };
        Self {
            requested,
            location,
        }
    }
}

/// A slug that passed the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGuide {
    /// The slug as requested.
    pub slug: Slug,
    /// Path of the file relative to the root, without extension.
    pub relative_path: PathBuf,
    /// Absolute (or root-relative) path of the `.mdx` file.
    pub file_path: PathBuf,
}

impl ResolvedGuide {
    /// Relative path with `/` separators, for URLs.
    pub fn relative_url_path(&self) -> String {
        self.relative_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Outcome of guarding a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The slug names a file inside a published section.
    Resolved(ResolvedGuide),
    /// The slug escapes the root or names an unpublished section.
    Rejected(Redirect),
}

impl Resolution {
    /// The resolved guide, if accepted.
    pub fn resolved(&self) -> Option<&ResolvedGuide> {
        match self {
            Self::Resolved(guide) => Some(guide),
            Self::Rejected(_) => None,
        }
    }

    /// Whether the slug was rejected.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Map a slug onto a guide file, or reject it.
///
/// The segments are joined with the platform separator, one trailing
/// separator is removed, and `.mdx` is appended under the root. The slug is
/// accepted only when the normalized file path stays inside the root and
/// both the relative path as joined and the normalized relative path begin
/// with a published section.
///
/// # Example
///
/// ```
/// use docket_content::{resolve, GuideSettings, Resolution, Slug};
/// use std::path::PathBuf;
///
/// let settings = GuideSettings::new("/content/guides");
///
/// match resolve(&settings, &Slug::new(["database", "overview"])) {
///     Resolution::Resolved(guide) => assert_eq!(
///         guide.file_path,
///         PathBuf::from("/content/guides/database/overview.mdx")
///     ),
///     Resolution::Rejected(_) => unreachable!(),
/// }
///
/// assert!(resolve(&settings, &Slug::new(["../secret"])).is_rejected());
/// ```
pub fn resolve(settings: &GuideSettings, slug: &Slug) -> Resolution {
    let reject = || {
        log::warn!("rejected guide slug {slug:?}");
        Resolution::Rejected(Redirect::not_found(
            &settings.not_found_path,
            slug.to_url_path(),
        ))
    };

    let joined = slug.segments().join(MAIN_SEPARATOR_STR);
    let relative = joined.strip_suffix(MAIN_SEPARATOR).unwrap_or(&joined);
    if relative.is_empty() || !starts_with_published_section(settings, Path::new(relative)) {
        return reject();
    }

    let root = normalize_lexically(settings.root());
    let file_path =
        normalize_lexically(settings.root().join(format!("{relative}.{GUIDE_EXTENSION}")));
    let inside = match file_path.strip_prefix(&root) {
        Ok(inside) if !inside.as_os_str().is_empty() => inside.to_string_lossy().into_owned(),
        _ => return reject(),
    };

    let suffix = format!(".{GUIDE_EXTENSION}");
    let relative_path = PathBuf::from(inside.strip_suffix(&suffix).unwrap_or(&inside));
    if !starts_with_published_section(settings, &relative_path) {
        return reject();
    }

    Resolution::Resolved(ResolvedGuide {
        slug: slug.clone(),
        relative_path,
        file_path,
    })
}

fn starts_with_published_section(settings: &GuideSettings, relative: &Path) -> bool {
    match relative.components().next() {
        Some(Component::Normal(first)) => first
            .to_str()
            .is_some_and(|section| settings.is_published(section)),
        _ => false,
    }
}
