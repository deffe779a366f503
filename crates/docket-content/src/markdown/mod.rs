//! Markdown document utilities.
//!
//! - [`frontmatter`]: YAML frontmatter extraction
//!
//! These return generic types (`yaml_serde::Value`, `&str`); the guide
//! schema lives in [`crate::guide::frontmatter`].

pub mod frontmatter;

pub use frontmatter::{extract_frontmatter, strip_frontmatter, FrontmatterResult};
