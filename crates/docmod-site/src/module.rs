//! Module documentation and sitemap breadcrumbs.
//!
//! [`ModuleBuilder`] assembles every package of a [`RawModule`] and then
//! runs a single annotation pass that sets each package's breadcrumb
//! trail. Packages are stored in a flat `Vec<Package>` sorted by relative
//! path, with a `path_index` map for directory lookups:
//! - O(1) package lookup by relative path
//! - O(d) breadcrumb building where d is the package depth

use std::collections::HashMap;

use docmod_comment::{CommentRenderer, EXTERNAL_SCHEME, LinkResolver, STDLIB_DOC_URL, clean_rel_path};
use serde::Serialize;

use crate::error::BuildError;
use crate::package::{Assembled, Package, PackageAssembler, PathPart, is_hidden, module_name};
use crate::raw::{RawModule, RawPackage};
use crate::source::SourceProvider;

/// File name of the module sitemap page.
pub const SITEMAP_FILE: &str = "index.html";

/// Documentation of a whole module.
#[derive(Clone, Debug, Serialize)]
pub struct Module {
    /// Last segment of the root import path.
    pub name: String,
    /// Name shown at the root of every breadcrumb trail.
    pub display_name: String,
    /// Root import path.
    pub import_path: String,
    /// Package documents sorted by relative path, then package name.
    pub packages: Vec<Package>,
    #[serde(skip)]
    path_index: HashMap<String, usize>,
}

impl Module {
    /// All packages in sitemap order.
    #[must_use]
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// The package owning the directory at `rel_path`.
    #[must_use]
    pub fn get_package(&self, rel_path: &str) -> Option<&Package> {
        self.path_index
            .get(&clean_rel_path(rel_path))
            .map(|&i| &self.packages[i])
    }

    /// Warnings of every package, prefixed with the package import path.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.packages
            .iter()
            .flat_map(|package| {
                package
                    .warnings
                    .iter()
                    .map(move |warning| format!("{}: {warning}", package.import_path))
            })
            .collect()
    }
}

/// Options controlling how a module is built.
#[derive(Clone, Debug)]
pub struct ModuleOptions {
    /// Overrides the display name derived from the extractor output.
    pub display_name: Option<String>,
    /// Keep packages whose name ends in `_test`.
    pub include_tests: bool,
    /// Keep packages below an `internal` directory.
    pub include_internal: bool,
    /// Documentation host for bare import paths in doc links.
    pub stdlib_url: String,
    /// Scheme prefixed to dotted import paths in doc links.
    pub external_scheme: String,
}

impl Default for ModuleOptions {
    fn default() -> Self {
        Self {
            display_name: None,
            include_tests: false,
            include_internal: false,
            stdlib_url: STDLIB_DOC_URL.to_owned(),
            external_scheme: EXTERNAL_SCHEME.to_owned(),
        }
    }
}

/// Builds a [`Module`] from extractor output.
pub struct ModuleBuilder<'a> {
    source: &'a dyn SourceProvider,
    options: ModuleOptions,
}

impl<'a> ModuleBuilder<'a> {
    /// Create a builder reading span-based code snippets from `source`.
    #[must_use]
    pub fn new(source: &'a dyn SourceProvider, options: ModuleOptions) -> Self {
        Self { source, options }
    }

    /// Build the documentation of every package in `raw`.
    ///
    /// Packages are processed one after another. Hidden packages and
    /// packages excluded by [`ModuleOptions`] are left out of the result.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error of any package; nothing is returned
    /// for the other packages in that case.
    pub fn build(&self, raw: &RawModule) -> Result<Module, BuildError> {
        let module_path = raw.import_path.trim_end_matches('/');
        let name = module_name(module_path).to_owned();
        let display_name = self
            .options
            .display_name
            .clone()
            .or_else(|| raw.dir_name.clone().filter(|dir| !dir.is_empty()))
            .unwrap_or_else(|| name.clone());

        let documented = self.documented_packages(raw);
        let renderer = CommentRenderer::new(self.resolver(module_path, &documented));
        let assembler = PackageAssembler::new(module_path, &renderer, self.source)
            .with_display_name(&display_name);

        let mut packages = Vec::with_capacity(documented.len());
        for raw_package in documented {
            match assembler.assemble(raw_package)? {
                Assembled::Finalized(package) => packages.push(*package),
                Assembled::Discarded => {}
            }
        }

        let mut path_index = HashMap::with_capacity(packages.len());
        for (i, package) in packages.iter().enumerate() {
            path_index.entry(package.rel_path.clone()).or_insert(i);
        }

        let mut module = Module {
            name,
            display_name,
            import_path: module_path.to_owned(),
            packages,
            path_index,
        };
        annotate_breadcrumbs(&mut module);

        tracing::info!(
            module = %module.import_path,
            packages = module.packages.len(),
            "Built module documentation"
        );

        Ok(module)
    }

    /// Packages that get a page, in sitemap order: sorted by relative path,
    /// then package name, without excluded and hidden packages.
    fn documented_packages<'r>(&self, raw: &'r RawModule) -> Vec<&'r RawPackage> {
        let mut documented: Vec<&RawPackage> = raw
            .packages
            .iter()
            .filter(|package| {
                if !self.is_included(package) {
                    tracing::debug!(
                        package = %package.name,
                        rel_path = %package.rel_path,
                        "Skipping excluded package"
                    );
                    return false;
                }
                if is_hidden(&package.doc) {
                    tracing::debug!(
                        package = %package.name,
                        rel_path = %package.rel_path,
                        "Skipping hidden package"
                    );
                    return false;
                }
                true
            })
            .collect();
        documented.sort_by_cached_key(|package| {
            (clean_rel_path(&package.rel_path), package.name.clone())
        });
        documented
    }

    /// Link resolver knowing the page of every documented package.
    ///
    /// `packages` is in sitemap order, so the package owning a directory
    /// is the same one the path index and breadcrumbs use.
    fn resolver(&self, module_path: &str, packages: &[&RawPackage]) -> LinkResolver {
        packages.iter().fold(
            LinkResolver::new(module_path)
                .with_stdlib_url(&self.options.stdlib_url)
                .with_external_scheme(&self.options.external_scheme),
            |resolver, package| resolver.with_package(&package.rel_path, &package.name),
        )
    }

    fn is_included(&self, package: &RawPackage) -> bool {
        if !self.options.include_tests && package.name.ends_with("_test") {
            return false;
        }
        if !self.options.include_internal
            && clean_rel_path(&package.rel_path)
                .split('/')
                .any(|segment| segment == "internal")
        {
            return false;
        }
        true
    }
}

/// Set the breadcrumb trail of every package.
fn annotate_breadcrumbs(module: &mut Module) {
    let trails: Vec<Vec<PathPart>> = module
        .packages
        .iter()
        .map(|package| breadcrumbs(module, package))
        .collect();

    for (package, trail) in module.packages.iter_mut().zip(trails) {
        package.path_parts = trail;
    }
}

/// Breadcrumbs of `package`: the module root, then one entry per directory.
///
/// Intermediate directories link to the page of the package owning them,
/// if any. The last entry links to the package's own page.
fn breadcrumbs(module: &Module, package: &Package) -> Vec<PathPart> {
    let mut parts = vec![PathPart::new(module.display_name.clone(), SITEMAP_FILE)];
    if package.rel_path.is_empty() {
        return parts;
    }

    let segments: Vec<&str> = package.rel_path.split('/').collect();
    for depth in 1..=segments.len() {
        let dir_name = segments[depth - 1];
        let doc_file = if depth == segments.len() {
            package.file_name.clone()
        } else {
            let prefix = segments[..depth].join("/");
            module
                .path_index
                .get(&prefix)
                .map(|&i| module.packages[i].file_name.clone())
                .unwrap_or_default()
        };
        parts.push(PathPart::new(dir_name, doc_file));
    }

    parts
}
