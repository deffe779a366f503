//! Configuration for the Docket CLI.
//!
//! Provides the [`DocketConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `DOCKET_CONFIG` environment variable
//! 3. XDG default: `~/.config/docket/config.toml`
//! 4. Built-in defaults

use confyg::{env, Confygery};
use docket_content::{GuideSettings, PUBLISHED_SECTIONS};
use docket_content::guide::settings::{
    DEFAULT_EDIT_LINK_BASE, DEFAULT_NOT_FOUND_PATH, DEFAULT_PATHNAME_PREFIX,
};
use docket_core::traits::ConfigProvider;
use docket_core::util::paths::expand_tilde;
use docket_core::{Error, Result};
use docket_meta::image::{DEFAULT_BASE_PATH, DEFAULT_BRAND, DEFAULT_IMAGE_SERVICE};
use docket_meta::SiteSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "DOCKET";

/// Content type passed to [`ConfigProvider::content_path`] for guides.
pub const GUIDES_CONTENT_TYPE: &str = "guides";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Docket CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocketConfig {
    /// Project name.
    pub project_name: String,

    /// Base path for project data. Defaults to the current directory.
    pub base_path: Option<String>,

    /// Guide content configuration.
    pub content: ContentConfig,

    /// Site-wide metadata configuration.
    pub site: SiteConfig,
}

/// Guide content configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Guides root. Defaults to `<base_path>/guides`.
    pub path: Option<String>,

    /// Top-level directories that may be served.
    pub published_sections: Vec<String>,

    /// Prefix of page pathnames.
    pub pathname_prefix: String,

    /// Base URL of "edit this page" links.
    pub edit_link_base: String,

    /// Redirect target for unpublished or unsafe slugs.
    pub not_found_path: String,
}

/// Site-wide metadata configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public base path of the site.
    pub base_path: String,

    /// Brand appended to page titles.
    pub brand: String,

    /// Social preview image endpoint.
    pub image_service: String,

    /// `site` parameter sent to the image endpoint.
    pub image_site: String,

    /// Preview image width in pixels.
    pub image_width: u32,

    /// Preview image height in pixels.
    pub image_height: u32,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for DocketConfig {
    fn default() -> Self {
        Self {
            project_name: "docket".to_string(),
            base_path: None,
            content: ContentConfig::default(),
            site: SiteConfig::default(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path: None,
            published_sections: PUBLISHED_SECTIONS.iter().map(|s| s.to_string()).collect(),
            pathname_prefix: DEFAULT_PATHNAME_PREFIX.to_string(),
            edit_link_base: DEFAULT_EDIT_LINK_BASE.to_string(),
            not_found_path: DEFAULT_NOT_FOUND_PATH.to_string(),
        }
    }
}

impl Default for SiteConfig {
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

// ============================================================================
// Config loading
// ============================================================================

impl DocketConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("content");
        env_opts.add_section("site");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("DOCKET_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("docket").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `DOCKET_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, ENV_PREFIX, &mut vars);
        Ok(vars)
    }

    /// Settings for the guide loader.
    pub fn guide_settings(&self) -> Result<GuideSettings> {
        let root = self.content_path(GUIDES_CONTENT_TYPE)?;
        Ok(GuideSettings::new(root)
            .with_sections(self.content.published_sections.iter().cloned())
            .with_pathname_prefix(self.content.pathname_prefix.clone())
            .with_edit_link_base(self.content.edit_link_base.clone())
            .with_not_found_path(self.content.not_found_path.clone()))
    }

    /// Settings for metadata generation.
    pub fn site_settings(&self) -> SiteSettings {
        SiteSettings {
            base_path: self.site.base_path.clone(),
            brand: self.site.brand.clone(),
            image_service: self.site.image_service.clone(),
            image_site: self.site.image_site.clone(),
            image_width: self.site.image_width,
            image_height: self.site.image_height,
        }
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for DocketConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(expand_tilde(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn content_path(&self, content_type: &str) -> Result<PathBuf> {
        match &self.content.path {
            Some(p) => Ok(expand_tilde(p)),
            None => Ok(self.base_path()?.join(content_type)),
        }
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::Mutex;

    /// Serializes tests that touch process environment variables.
    pub(crate) static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// RAII guard for env var manipulation in tests.
    pub(crate) struct EnvGuard {
        key: String,
        prev: Option<String>,
    }

    impl EnvGuard {
        pub(crate) fn new(key: &str, value: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: callers hold ENV_LOCK.
            unsafe { std::env::set_var(key, value) };
            Self {
                key: key.to_string(),
                prev,
            }
        }

        pub(crate) fn remove(key: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: callers hold ENV_LOCK.
            unsafe { std::env::remove_var(key) };
            Self {
                key: key.to_string(),
                prev,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: the guard is dropped while ENV_LOCK is still held.
            unsafe {
                match &self.prev {
                    Some(val) => std::env::set_var(&self.key, val),
                    None => std::env::remove_var(&self.key),
                }
            }
        }
    }

    fn lock() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn test_docket_config_default() {
        let config = DocketConfig::default();
        assert_eq!(config.project_name, "docket");
        assert!(config.base_path.is_none());
        assert!(config.content.path.is_none());
        assert_eq!(config.content.published_sections.len(), PUBLISHED_SECTIONS.len());
        assert_eq!(config.content.pathname_prefix, "/guides");
        assert_eq!(config.site.base_path, "/docs");
        assert_eq!(config.site.brand, "Supabase Docs");
        assert_eq!(config.site.image_width, 800);
    }

    #[test]
    fn test_docket_config_from_toml() {
        let toml_str = r#"
            project_name = "docs"
            base_path = "/srv/docs"

            [content]
            path = "/srv/docs/content/guides"
            published_sections = ["auth", "database"]

            [site]
            base_path = "/"
            brand = "Acme Docs"
        "#;

        let config: DocketConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.project_name, "docs");
        assert_eq!(config.content.path.as_deref(), Some("/srv/docs/content/guides"));
        assert_eq!(config.content.published_sections, vec!["auth", "database"]);
        assert_eq!(config.content.not_found_path, "/not-found");
        assert_eq!(config.site.brand, "Acme Docs");
        assert_eq!(config.site.image_site, "docs");
    }

    #[test]
    fn test_docket_config_to_toml() {
        let config = DocketConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("project_name = \"docket\""));
        assert!(toml_str.contains("[content]"));
        assert!(toml_str.contains("[site]"));

        let parsed: DocketConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.site.brand, config.site.brand);
        assert_eq!(
            parsed.content.published_sections,
            config.content.published_sections
        );
    }

    #[test]
    fn test_docket_config_load_from_file() {
        let _lock = lock();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                project_name = "loaded"
                [site]
                brand = "Loaded Docs"
            "#,
        )
        .unwrap();

        let config = DocketConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.project_name, "loaded");
        assert_eq!(config.site.brand, "Loaded Docs");
    }

    #[test]
    fn test_docket_config_load_defaults() {
        let _lock = lock();
        let config = DocketConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.project_name, "docket");
        assert_eq!(config.site.base_path, "/docs");
    }

    #[test]
    fn test_docket_config_load_env_overlay() {
        let _lock = lock();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                [site]
                brand = "File Docs"
            "#,
        )
        .unwrap();

        let _guard = EnvGuard::new("DOCKET_SITE_BRAND", "Env Docs");
        let config = DocketConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.site.brand, "Env Docs");
    }

    #[test]
    fn test_docket_config_resolve_config_path_explicit() {
        let path = DocketConfig::resolve_config_path(Some("/explicit/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_docket_config_resolve_config_path_env() {
        let _lock = lock();
        let _guard = EnvGuard::new("DOCKET_CONFIG", "/env/config.toml");
        let path = DocketConfig::resolve_config_path(None);
        assert_eq!(path, Some(PathBuf::from("/env/config.toml")));
    }

    #[test]
    fn test_docket_config_resolve_config_path_default() {
        let _lock = lock();
        let _guard = EnvGuard::remove("DOCKET_CONFIG");
        if let Some(p) = DocketConfig::resolve_config_path(None) {
            assert!(p.ends_with(Path::new("docket").join("config.toml")));
        }
    }

    #[test]
    fn test_docket_config_provider_paths() {
        let config = DocketConfig {
            base_path: Some("/project".into()),
            ..Default::default()
        };
        assert_eq!(config.base_path().unwrap(), PathBuf::from("/project"));
        assert_eq!(
            config.content_path(GUIDES_CONTENT_TYPE).unwrap(),
            PathBuf::from("/project/guides")
        );
    }

    #[test]
    fn test_docket_config_provider_content_path_explicit() {
        let mut config = DocketConfig::default();
        config.content.path = Some("/custom/guides".into());
        assert_eq!(
            config.content_path("anything").unwrap(),
            PathBuf::from("/custom/guides")
        );
    }

    #[test]
    fn test_docket_config_provider_base_path_default() {
        let config = DocketConfig::default();
        assert_eq!(config.base_path().unwrap(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_guide_settings_from_config() {
        let mut config = DocketConfig::default();
        config.content.path = Some("/srv/guides".into());
        config.content.published_sections = vec!["auth".into()];
        config.content.not_found_path = "/404".into();

        let settings = config.guide_settings().unwrap();
        assert_eq!(settings.root(), Path::new("/srv/guides"));
        assert!(settings.is_published("auth"));
        assert!(!settings.is_published("database"));
        assert_eq!(settings.not_found_path, "/404");
    }

    #[test]
    fn test_site_settings_from_config() {
        let mut config = DocketConfig::default();
        config.site.brand = "Acme".into();
        let site = config.site_settings();
        assert_eq!(site.brand, "Acme");
        assert_eq!(site, SiteSettings { brand: "Acme".into(), ..Default::default() });
    }

    #[test]
    fn test_docket_config_to_env_vars() {
        let config = DocketConfig::default();
        let vars = config.to_env_vars().unwrap();
        let map: HashMap<_, _> = vars.into_iter().collect();
        assert_eq!(map.get("DOCKET_PROJECT_NAME").unwrap(), "docket");
        assert_eq!(map.get("DOCKET_SITE_BASE_PATH").unwrap(), "/docs");
        assert_eq!(map.get("DOCKET_SITE_IMAGE_WIDTH").unwrap(), "800");
        assert!(map
            .get("DOCKET_CONTENT_PUBLISHED_SECTIONS")
            .unwrap()
            .contains("\"database\""));
    }

    #[test]
    fn test_docket_config_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DocketConfig>();
    }
}
