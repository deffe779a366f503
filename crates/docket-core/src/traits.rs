//! Core traits for Docket.
//!
//! The primary trait is [`ConfigProvider`], which abstracts where a
//! deployment keeps its content so library crates never read configuration
//! files themselves.

use std::path::PathBuf;

use crate::Result;

/// Trait for deployment-specific configuration.
///
/// Every Docket binary implements this trait to tell the content crates
/// where guides live on disk.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use docket_core::traits::ConfigProvider;
/// use docket_core::Result;
///
/// #[derive(Clone)]
/// struct DocsConfig {
///     root: PathBuf,
/// }
///
/// impl ConfigProvider for DocsConfig {
///     fn project_name(&self) -> &str {
///         "docs"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.root.clone())
///     }
///
///     fn content_path(&self, content_type: &str) -> Result<PathBuf> {
///         Ok(self.root.join("content").join(content_type))
///     }
/// }
///
/// let config = DocsConfig { root: PathBuf::from("/srv/docs") };
/// assert_eq!(
///     config.content_path("guides").unwrap(),
///     PathBuf::from("/srv/docs/content/guides")
/// );
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all project data.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Path for a specific content type.
    ///
    /// `content_type` is a key like `"guides"`. The implementation decides
    /// how to map it onto the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the content type is unknown or the path
    /// cannot be resolved.
    fn content_path(&self, content_type: &str) -> Result<PathBuf>;
}
