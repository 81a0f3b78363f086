//! Static HTML site rendering for docmod.
//!
//! Renders a [`docmod_site::Module`] with `minijinja` templates: one page
//! per package plus the module sitemap.

mod builder;
mod template;

pub use builder::{BuildConfig, RenderError, StaticSiteBuilder};
pub use template::{DEFAULT_INDEX_TEMPLATE, DEFAULT_PACKAGE_TEMPLATE};
