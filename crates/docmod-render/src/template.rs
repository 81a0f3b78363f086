//! Page templates for static site generation.
//!
//! Built-in templates are embedded at compile time. Either one can be
//! replaced by a file; overrides are registered under the built-in name so
//! HTML auto-escaping applies to them as well.

use std::path::Path;

use docmod_site::{Module, Package};
use minijinja::{Environment, context};
use serde::Serialize;

use crate::builder::RenderError;

/// Name of the package page template.
pub(crate) const PACKAGE_TEMPLATE_NAME: &str = "package.html";

/// Name of the sitemap page template.
pub(crate) const INDEX_TEMPLATE_NAME: &str = "index.html";

/// Built-in package page template.
pub const DEFAULT_PACKAGE_TEMPLATE: &str = include_str!("../templates/package.html");

/// Built-in sitemap page template.
pub const DEFAULT_INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Module fields shown on every page.
#[derive(Serialize)]
struct ModuleData<'a> {
    name: &'a str,
    display_name: &'a str,
    import_path: &'a str,
}

impl<'a> From<&'a Module> for ModuleData<'a> {
    fn from(module: &'a Module) -> Self {
        Self {
            name: &module.name,
            display_name: &module.display_name,
            import_path: &module.import_path,
        }
    }
}

/// The package and sitemap templates of one site.
pub(crate) struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Load the templates, reading overrides from disk.
    pub(crate) fn load(
        package_template: Option<&Path>,
        index_template: Option<&Path>,
    ) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        add_template(&mut env, PACKAGE_TEMPLATE_NAME, package_template, DEFAULT_PACKAGE_TEMPLATE)?;
        add_template(&mut env, INDEX_TEMPLATE_NAME, index_template, DEFAULT_INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render the page of one package.
    pub(crate) fn render_package(
        &self,
        module: &Module,
        package: &Package,
    ) -> Result<String, RenderError> {
        let template = self.env.get_template(PACKAGE_TEMPLATE_NAME)?;
        Ok(template.render(context! {
            module => ModuleData::from(module),
            package => package,
        })?)
    }

    /// Render the module sitemap.
    pub(crate) fn render_index(&self, module: &Module) -> Result<String, RenderError> {
        let template = self.env.get_template(INDEX_TEMPLATE_NAME)?;
        Ok(template.render(context! { module => module })?)
    }
}

fn add_template(
    env: &mut Environment<'static>,
    name: &'static str,
    path: Option<&Path>,
    default: &'static str,
) -> Result<(), RenderError> {
    match path {
        Some(path) => {
            let source = std::fs::read_to_string(path).map_err(|source| RenderError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::debug!(template = name, path = %path.display(), "Using template override");
            env.add_template_owned(name, source)?;
        }
        None => env.add_template(name, default)?,
    }
    Ok(())
}
