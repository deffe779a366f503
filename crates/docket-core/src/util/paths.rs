//! Path helpers.
//!
//! All functions here are lexical: they never consult the filesystem, so a
//! path can be checked before anything is opened.

use std::path::{Component, Path, PathBuf};

/// Collapses `.` and `..` components without touching the filesystem.
///
/// A `..` that would climb above the first component of a relative path is
/// kept, and one that would climb above the root of an absolute path is
/// dropped, matching how `/a/../../b` resolves to `/b`.
///
/// # Example
///
/// ```
/// use docket_core::util::paths::normalize_lexically;
/// use std::path::PathBuf;
///
/// assert_eq!(
///     normalize_lexically("/content/guides/auth/../../secret.mdx"),
///     PathBuf::from("/content/secret.mdx")
/// );
/// ```
pub fn normalize_lexically<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    out.iter().map(|c| c.as_os_str()).collect()
}

/// Expands `~` to the user's home directory.
///
/// If the path starts with `~`, replaces it with the user's home directory.
/// Otherwise returns the path unchanged.
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plain_path_unchanged() {
        assert_eq!(
            normalize_lexically("/content/guides/database/overview.mdx"),
            PathBuf::from("/content/guides/database/overview.mdx")
        );
    }

    #[test]
    fn test_normalize_drops_cur_dir() {
        assert_eq!(
            normalize_lexically("/content/./guides/./auth.mdx"),
            PathBuf::from("/content/guides/auth.mdx")
        );
    }

    #[test]
    fn test_normalize_parent_dir() {
        assert_eq!(
            normalize_lexically("/content/guides/../secret.mdx"),
            PathBuf::from("/content/secret.mdx")
        );
    }

    #[test]
    fn test_normalize_parent_above_root() {
        assert_eq!(
            normalize_lexically("/content/../../../etc/passwd"),
            PathBuf::from("/etc/passwd")
        );
    }

    #[test]
    fn test_normalize_relative_leading_parent_kept() {
        assert_eq!(
            normalize_lexically("../secret.mdx"),
            PathBuf::from("../secret.mdx")
        );
        assert_eq!(
            normalize_lexically("guides/../../x"),
            PathBuf::from("../x")
        );
    }

    #[test]
    fn test_expand_tilde_with_tilde() {
        let path = expand_tilde("~/docs/content");
        assert!(!path.starts_with("~"), "Tilde should be expanded");
        if let Some(home) = dirs::home_dir() {
            assert!(path.starts_with(&home));
            assert!(path.ends_with("docs/content"));
        }
    }

    #[test]
    fn test_expand_tilde_without_tilde() {
        let original = PathBuf::from("/absolute/path");
        assert_eq!(expand_tilde(&original), original);
    }
}
