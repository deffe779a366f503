//! Guide pages: slugs, schema, loading, and route enumeration.
//!
//! The pipeline for one page is linear:
//!
//! 1. [`slug::resolve`] maps route segments onto a file under the guides
//!    root, or a not-found redirect.
//! 2. [`loader::GuideLoader`] reads the file, splits frontmatter from body,
//!    and validates the frontmatter through a [`frontmatter::FrontmatterValidator`].
//! 3. The loader memoizes pages in a [`crate::MemoCache`].
//!
//! [`params::static_params`] enumerates every slug the build should
//! pre-render.

pub mod frontmatter;
pub mod loader;
pub mod params;
pub mod settings;
pub mod slug;
