//! Static route parameters for build-time pre-rendering.

use docket_core::util::files::{self, find_all_files, FindOptions};
use docket_core::{Error, Result};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use super::settings::{GuideSettings, GUIDE_EXTENSION};
use super::slug::Slug;

/// One pre-renderable route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaticParam {
    /// Route segments.
    pub slug: Vec<String>,
}

impl StaticParam {
    /// A param from segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            slug: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// The param as a [`Slug`].
    pub fn to_slug(&self) -> Slug {
        Slug::from(self.slug.clone())
    }
}

/// Enumerate the slugs to pre-render.
///
/// With `Some(directory)`, every `.mdx` file under `root/directory` becomes
/// a slug relative to that directory. With `None`, every published section
/// is scanned concurrently; slugs are prefixed with the section name, and a
/// section landing file (`root/<section>.mdx`) adds the one-segment slug
/// `[section]`. Section results keep allow-list order and are flattened only
/// once every scan has finished.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when `directory` does not exist, or when a
/// published section has neither a directory nor a landing file.
pub async fn static_params(
    settings: &GuideSettings,
    directory: Option<&str>,
) -> Result<Vec<StaticParam>> {
    match directory {
        Some(directory) => {
            let files =
                find_all_files(&settings.root().join(directory), FindOptions::mdx()).await?;
            let params: Vec<_> = files
                .iter()
                .map(|file| StaticParam::new(file.segments()))
                .collect();
            log::info!("{} static params under {directory}", params.len());
            Ok(params)
        }
        None => {
            let scans = settings
                .published_sections
                .iter()
                .map(|section| section_params(settings, section));
            let params: Vec<_> = try_join_all(scans).await?.into_iter().flatten().collect();
            log::info!(
                "{} static params across {} sections",
                params.len(),
                settings.published_sections.len()
            );
            Ok(params)
        }
    }
}

async fn section_params(settings: &GuideSettings, section: &str) -> Result<Vec<StaticParam>> {
    let dir = settings.section_dir(section);
    let landing = settings.section_landing(section);

    let (scan, has_landing) = tokio::join!(
        find_all_files(&dir, FindOptions::mdx()),
        files::is_file(&landing)
    );

    let mut params: Vec<StaticParam> = match scan {
        Ok(found) => found
            .iter()
            .map(|file| {
                let mut slug = vec![section.to_string()];
                slug.extend(file.segments());
                StaticParam { slug }
            })
            .collect(),
        Err(e) if e.is_not_found() && has_landing => Vec::new(),
        Err(e) if e.is_not_found() => {
            return Err(Error::not_found(format!(
                "published section `{section}` has no directory or `{section}.{GUIDE_EXTENSION}`"
            )));
        }
        Err(e) => return Err(e),
    };

    if has_landing {
        params.push(StaticParam::new([section]));
    }
    log::debug!("section {section}: {} params", params.len());
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;
    use tokio::fs;

    async fn write(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(path, "---\ntitle: x\n---\n").await.unwrap();
    }

    async fn tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "auth.mdx").await;
        write(root, "auth/passwords.mdx").await;
        write(root, "auth/social-login/auth-github.mdx").await;
        write(root, "auth/notes.txt").await;
        write(root, "storage/uploads/standard-uploads.mdx").await;
        temp
    }

    fn settings(temp: &TempDir) -> GuideSettings {
        GuideSettings::new(temp.path()).with_sections(["auth", "storage"])
    }

    #[tokio::test]
    async fn test_directory_params_are_relative() {
        let temp = tree().await;
        let params = static_params(&settings(&temp), Some("auth")).await.unwrap();

        assert_eq!(
            params,
            vec![
                StaticParam::new(["passwords"]),
                StaticParam::new(["social-login", "auth-github"]),
            ]
        );
    }

    #[tokio::test]
    async fn test_all_sections_prefixed_with_landing() {
        let temp = tree().await;
        let params = static_params(&settings(&temp), None).await.unwrap();

        assert_eq!(
            params,
            vec![
                StaticParam::new(["auth", "passwords"]),
                StaticParam::new(["auth", "social-login", "auth-github"]),
                StaticParam::new(["auth"]),
                StaticParam::new(["storage", "uploads", "standard-uploads"]),
            ]
        );
    }

    #[tokio::test]
    async fn test_one_param_per_mdx_file() {
        let temp = tree().await;
        let params = static_params(&settings(&temp), Some("storage"))
            .await
            .unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].slug, ["uploads", "standard-uploads"]);
    }

    #[tokio::test]
    async fn test_landing_only_section() {
        let temp = tree().await;
        write(temp.path(), "cli.mdx").await;
        let settings = GuideSettings::new(temp.path()).with_sections(["cli"]);

        let params = static_params(&settings, None).await.unwrap();
        assert_eq!(params, vec![StaticParam::new(["cli"])]);
    }

    #[tokio::test]
    async fn test_missing_section_is_an_error() {
        let temp = tree().await;
        let settings = GuideSettings::new(temp.path()).with_sections(["auth", "realtime"]);

        let err = static_params(&settings, None).await.unwrap_err();
        assert!(err.to_string().contains("realtime"));
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let temp = tree().await;
        let err = static_params(&settings(&temp), Some("nope"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_static_param_json_shape() {
        let param = StaticParam::new(["auth", "passwords"]);
        assert_eq!(
            serde_json::to_string(&param).unwrap(),
            r#"{"slug":["auth","passwords"]}"#
        );
        assert_eq!(param.to_slug(), Slug::new(["auth", "passwords"]));
    }
}
