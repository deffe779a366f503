//! Page metadata for Docket guides.
//!
//! # Modules
//!
//! - [`types`]: The metadata model
//! - [`source`]: Parent-route and page lookups
//! - [`image`]: Site settings and social preview image URLs
//! - [`generate`]: The merge itself
//!
//! # Example
//!
//! ```no_run
//! use docket_content::{GuideLoader, GuideSettings, Slug};
//! use docket_meta::{MetadataGenerator, PageMetadata, SiteSettings};
//!
//! # async fn example() -> docket_core::Result<()> {
//! let loader = GuideLoader::new(GuideSettings::new("content/guides"));
//! let generator = MetadataGenerator::new(loader, SiteSettings::default());
//!
//! let parent = PageMetadata::default();
//! let meta = generator
//!     .generate(&Slug::from_url_path("auth/passwords"), &parent)
//!     .await?;
//! println!("{:?}", meta.title);
//! # Ok(())
//! # }
//! ```

#![doc = include_str!("../README.md")]

pub mod generate;
pub mod image;
pub mod source;
pub mod types;

pub use generate::MetadataGenerator;
pub use image::{encode_uri_component, SiteSettings};
pub use source::{PageRef, PageSource, ResolvingMetadata};
pub use types::{Alternates, OgImage, OpenGraph, PageMetadata};
