//! Guide content loading for Docket.
//!
//! This crate turns route slugs into validated guide pages read from a
//! directory of `.mdx` files. It renders nothing: the body is handed back
//! verbatim for a downstream renderer.
//!
//! # Modules
//!
//! - [`markdown`]: Frontmatter extraction
//! - [`guide`]: Slug guard, frontmatter schema, loader, static params
//! - [`cache`]: Memo cache used by the loader
//!
//! # Example
//!
//! ```no_run
//! use docket_content::{GuideLoad, GuideLoader, GuideSettings, Slug};
//!
//! # async fn example() -> docket_core::Result<()> {
//! let loader = GuideLoader::new(GuideSettings::new("content/guides"));
//! match loader.load(&Slug::from_url_path("database/overview")).await? {
//!     GuideLoad::Page(page) => println!("{}", page.meta.title),
//!     GuideLoad::Redirect(redirect) => println!("-> {}", redirect.location),
//! }
//! # Ok(())
//! # }
//! ```

#![doc = include_str!("../README.md")]

pub mod cache;
pub mod guide;
pub mod markdown;

pub use cache::MemoCache;
pub use guide::frontmatter::{FrontmatterValidator, GuideFrontmatter, GuideSchema};
pub use guide::loader::{GuideLoad, GuideLoader, GuidePage};
pub use guide::params::{static_params, StaticParam};
pub use guide::settings::{GuideSettings, GUIDE_EXTENSION, PUBLISHED_SECTIONS};
pub use guide::slug::{resolve, Redirect, Resolution, ResolvedGuide, Slug};
pub use markdown::{extract_frontmatter, strip_frontmatter, FrontmatterResult};
