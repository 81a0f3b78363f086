//! Static site builder.

use std::path::{Path, PathBuf};

use docmod_site::{Module, Package, SITEMAP_FILE};

use crate::template::Templates;

/// Configuration for static site building.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// Package page template; the built-in template when `None`.
    pub package_template: Option<PathBuf>,
    /// Sitemap page template; the built-in template when `None`.
    pub index_template: Option<PathBuf>,
}

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes the HTML pages of a module.
pub struct StaticSiteBuilder {
    templates: Templates,
}

impl StaticSiteBuilder {
    /// Create a builder, loading template overrides named in `config`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Io` if an override cannot be read and
    /// `RenderError::Template` if a template does not parse.
    pub fn new(config: &BuildConfig) -> Result<Self, RenderError> {
        let templates = Templates::load(
            config.package_template.as_deref(),
            config.index_template.as_deref(),
        )?;
        Ok(Self { templates })
    }

    /// Write one page per package and the sitemap into `output_dir`.
    ///
    /// Creates `output_dir` if needed. Returns the paths written, sitemap last.
    ///
    /// # Errors
    ///
    /// Returns the first template or I/O error; pages written before it
    /// stay on disk.
    pub fn build(&self, module: &Module, output_dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
        std::fs::create_dir_all(output_dir).map_err(|source| RenderError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::with_capacity(module.packages().len() + 1);
        for package in module.packages() {
            let html = self.render_package(module, package)?;
            written.push(write_page(output_dir, &package.file_name, &html)?);
        }

        let index = self.render_index(module)?;
        written.push(write_page(output_dir, SITEMAP_FILE, &index)?);

        tracing::info!(
            pages = written.len(),
            output_dir = %output_dir.display(),
            "Wrote documentation site"
        );

        Ok(written)
    }

    /// Render the page of one package.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Template` if rendering fails.
    pub fn render_package(&self, module: &Module, package: &Package) -> Result<String, RenderError> {
        self.templates.render_package(module, package)
    }

    /// Render the module sitemap.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Template` if rendering fails.
    pub fn render_index(&self, module: &Module) -> Result<String, RenderError> {
        self.templates.render_index(module)
    }
}

fn write_page(output_dir: &Path, file_name: &str, html: &str) -> Result<PathBuf, RenderError> {
    let path = output_dir.join(file_name);
    std::fs::write(&path, html).map_err(|source| RenderError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Wrote page");
    Ok(path)
}
