//! Site-wide settings and social preview image URLs.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` leaves alone: alphanumerics and `-_.!~*'()`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Default public base path of the docs site.
pub const DEFAULT_BASE_PATH: &str = "/docs";

/// Default brand appended to every title.
pub const DEFAULT_BRAND: &str = "Supabase Docs";

/// Default social preview image endpoint.
pub const DEFAULT_IMAGE_SERVICE: &str =
    "https://obuldanrptloktxcffvn.supabase.co/functions/v1/og-images";

/// Settings shared by every page of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    /// Public base path prefixed to pathnames, e.g. `/docs`.
    pub base_path: String,
    /// Appended to titles as `"{title} | {brand}"`.
    pub brand: String,
    /// Image service endpoint.
    pub image_service: String,
    /// `site` query parameter sent to the image service.
    pub image_site: String,
    /// Preview image width in pixels.
    pub image_width: u32,
    /// Preview image height in pixels.
    pub image_height: u32,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            brand: DEFAULT_BRAND.to_string(),
            image_service: DEFAULT_IMAGE_SERVICE.to_string(),
            image_site: "docs".to_string(),
            image_width: 800,
            image_height: 600,
        }
    }
}

impl SiteSettings {
    /// Public URL of a pathname: `base_path + pathname`.
    pub fn url_for(&self, pathname: &str) -> String {
        format!("{}{}", self.base_path.trim_end_matches('/'), pathname)
    }

    /// Full page title with the brand suffix.
    pub fn title(&self, title: &str) -> String {
        format!("{title} | {}", self.brand)
    }

    /// Social preview image URL for a page.
    ///
    /// # Example
    ///
    /// ```
    /// use docket_meta::SiteSettings;
    ///
    /// let url = SiteSettings::default().image_url("auth", "Row Level Security", "Secure rows");
    /// assert!(url.ends_with("?site=docs&type=auth&title=Row%20Level%20Security&description=Secure%20rows"));
    /// ```
    pub fn image_url(&self, kind: &str, title: &str, description: &str) -> String {
        format!(
            "{}?site={}&type={}&title={}&description={}",
            self.image_service,
            encode_uri_component(&self.image_site),
            encode_uri_component(kind),
            encode_uri_component(title),
            encode_uri_component(description),
        )
    }
}

/// Percent-encode `value` the way `encodeURIComponent` does.
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Section segment of a guide pathname: `database` in `/guides/database/overview`.
pub fn content_kind(pathname: &str) -> &str {
    pathname.split('/').nth(2).unwrap_or_default()
}
