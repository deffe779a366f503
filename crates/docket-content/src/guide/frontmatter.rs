//! Guide frontmatter schema and validation.
//!
//! The loader never trusts raw YAML: every page goes through a
//! [`FrontmatterValidator`], and a page whose frontmatter fails validation
//! is not rendered at all.

use docket_core::{Error, Result};
use serde::{Deserialize, Serialize};
use yaml_serde::{Mapping, Value};

/// Validated frontmatter of a guide page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideFrontmatter {
    /// Page title.
    pub title: String,

    /// Secondary heading shown under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Summary used for search engines and link previews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Overrides the canonical URL of the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,

    /// Label used in navigation menus instead of the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_label: Option<String>,

    /// Hide the table of contents.
    #[serde(
        default,
        rename = "hideToc",
        alias = "hide_table_of_contents",
        skip_serializing_if = "Option::is_none"
    )]
    pub hide_toc: Option<bool>,

    /// Video shown in place of the table of contents.
    #[serde(default, rename = "tocVideo", skip_serializing_if = "Option::is_none")]
    pub toc_video: Option<String>,

    /// Any other keys, preserved as written.
    #[serde(flatten)]
    pub extra: Mapping,
}

impl GuideFrontmatter {
    /// Frontmatter with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            description: None,
            canonical: None,
            sidebar_label: None,
            hide_toc: None,
            toc_video: None,
            extra: Mapping::new(),
        }
    }

    /// The description, falling back to the subtitle.
    pub fn summary(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .or(self.subtitle.as_deref())
    }
}

/// Checks raw frontmatter and converts it into a [`GuideFrontmatter`].
///
/// Injected into the loader so the schema can be owned elsewhere.
pub trait FrontmatterValidator: Send + Sync {
    /// Validate `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrontmatter`] when `raw` has the wrong shape.
    fn validate(&self, raw: &Value) -> Result<GuideFrontmatter>;
}

/// The default guide schema.
///
/// Requires a mapping with a non-empty string `title`. `subtitle`,
/// `description`, `canonical`, `sidebar_label`, and `tocVideo` must be
/// strings when present; `hideToc` must be a boolean.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuideSchema;

const OPTIONAL_STRINGS: &[&str] = &[
    "subtitle",
    "description",
    "canonical",
    "sidebar_label",
    "tocVideo",
];

impl FrontmatterValidator for GuideSchema {
    fn validate(&self, raw: &Value) -> Result<GuideFrontmatter> {
        let map = raw
            .as_mapping()
            .ok_or_else(|| Error::invalid_frontmatter("expected a mapping"))?;

        match map.get("title") {
            Some(Value::String(title)) if !title.trim().is_empty() => {}
            Some(Value::String(_)) => {
                return Err(Error::invalid_frontmatter("`title` is empty"));
            }
            Some(_) => return Err(Error::invalid_frontmatter("`title` must be a string")),
            None => return Err(Error::invalid_frontmatter("missing `title`")),
        }

        for key in OPTIONAL_STRINGS {
            if let Some(value) = map.get(*key) {
                if !value.is_string() && !value.is_null() {
                    return Err(Error::invalid_frontmatter(format!(
                        "`{key}` must be a string"
                    )));
                }
            }
        }

        yaml_serde::from_value(raw.clone()).map_err(|e| Error::invalid_frontmatter(e.to_string()))
    }
}
