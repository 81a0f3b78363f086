//! Package document assembly.
//!
//! [`PackageAssembler`] runs the per-package pipeline in a fixed order:
//!
//! ```text
//! Created ─(doc: hide)──────────────────────────────────────────▶ Discarded
//!    │
//!    ▼
//! DirectivesApplied ─▶ RecordsBuilt ─▶ Reassociated ─▶ Finalized
//! ```
//!
//! A hidden package is discarded before any name, synopsis or body is
//! computed. Otherwise the result is a [`Package`] that is not modified
//! again, except for its breadcrumbs which the module builder sets once.

use std::collections::HashMap;
use std::fmt;

use docmod_comment::{
    CommentRenderer, Symbols, clean_rel_path, file_name, parse_directives, synopsis,
};
use serde::Serialize;

use crate::builder::RecordBuilder;
use crate::error::BuildError;
use crate::raw::{RawFunc, RawPackage, RawValue};
use crate::reassociate::Reassociation;
use crate::record::{Constant, Function, Type, Variable};
use crate::source::SourceProvider;

/// Documentation of one package, ready for a template.
#[derive(Clone, Debug, Serialize)]
pub struct Package {
    /// Root import path of the module.
    pub module_path: String,
    /// Display name of the module, shown at the root of the breadcrumbs.
    pub display_name: String,
    /// Full import path of the package.
    pub import_path: String,
    /// Directory relative to the module root, empty for the root package.
    pub rel_path: String,
    /// Declared package name.
    pub name: String,
    /// First sentence of the package doc, as inline HTML.
    pub synopsis: String,
    pub comment_html: String,
    /// Output file name of the package page.
    pub file_name: String,
    pub constants: Vec<Constant>,
    pub variables: Vec<Variable>,
    pub functions: Vec<Function>,
    pub types: Vec<Type>,
    /// Breadcrumb trail from the module root to this package.
    pub path_parts: Vec<PathPart>,
    /// Recoverable problems found while building the package.
    #[serde(skip)]
    pub warnings: Vec<String>,
    #[serde(skip)]
    type_index: HashMap<String, usize>,
}

impl Package {
    /// Look up a type by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&Type> {
        self.type_index.get(name).map(|&i| &self.types[i])
    }

    /// Whether this is the package at the module root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.rel_path.is_empty()
    }
}

/// One breadcrumb entry: an ancestor directory and its page, if any.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PathPart {
    /// Directory display name.
    pub dir_name: String,
    /// File name of the directory's page; empty when it has no page.
    pub doc_file: String,
}

impl PathPart {
    #[must_use]
    pub fn new(dir_name: impl Into<String>, doc_file: impl Into<String>) -> Self {
        Self {
            dir_name: dir_name.into(),
            doc_file: doc_file.into(),
        }
    }

    /// Whether the entry should be rendered as a link.
    #[must_use]
    pub fn has_link(&self) -> bool {
        !self.doc_file.is_empty()
    }
}

/// Outcome of assembling a package.
#[derive(Debug)]
pub enum Assembled {
    /// The package was built.
    Finalized(Box<Package>),
    /// The package doc carries `doc: hide`.
    Discarded,
}

/// Pipeline stage, logged on each transition.
#[derive(Clone, Copy, Debug)]
enum Stage {
    DirectivesApplied,
    RecordsBuilt,
    Reassociated,
    Finalized,
    Discarded,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DirectivesApplied => "directives-applied",
            Self::RecordsBuilt => "records-built",
            Self::Reassociated => "reassociated",
            Self::Finalized => "finalized",
            Self::Discarded => "discarded",
        };
        f.write_str(name)
    }
}

/// Builds [`Package`] documents for one module.
pub struct PackageAssembler<'a> {
    module_path: &'a str,
    display_name: &'a str,
    renderer: &'a CommentRenderer,
    source: &'a dyn SourceProvider,
}

impl<'a> PackageAssembler<'a> {
    /// Create an assembler.
    ///
    /// # Arguments
    ///
    /// * `module_path` - Root import path of the module
    /// * `renderer` - Comment renderer shared by every package of the module
    /// * `source` - Access to source files for span-based code snippets
    #[must_use]
    pub fn new(
        module_path: &'a str,
        renderer: &'a CommentRenderer,
        source: &'a dyn SourceProvider,
    ) -> Self {
        Self {
            module_path,
            display_name: module_name(module_path),
            renderer,
            source,
        }
    }

    /// Set the module display name; defaults to the module name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: &'a str) -> Self {
        self.display_name = display_name;
        self
    }

    /// Assemble the documentation of one package.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Source` if a code snippet cannot be extracted and
    /// `BuildError::InvalidDeclaration` for malformed declarations.
    pub fn assemble(&self, raw: &RawPackage) -> Result<Assembled, BuildError> {
        let rel_path = clean_rel_path(&raw.rel_path);
        let import_path = raw
            .import_path
            .clone()
            .unwrap_or_else(|| join_import_path(self.module_path, &rel_path));

        let (doc, flags) = parse_directives(&raw.doc);
        if flags.is_hidden() {
            log_stage(&import_path, Stage::Discarded);
            return Ok(Assembled::Discarded);
        }
        log_stage(&import_path, Stage::DirectivesApplied);

        let renderer = self.renderer.for_package(declared_symbols(raw));
        let mut records = RecordBuilder::new(&import_path, &renderer, self.source);
        let constants = records.constants(&raw.consts)?;
        let variables = records.variables(&raw.vars)?;
        let functions = records.functions(&raw.funcs)?;
        let mut types = records.types(&raw.types)?;
        log_stage(&import_path, Stage::RecordsBuilt);

        let type_index: HashMap<String, usize> = types
            .iter()
            .enumerate()
            .map(|(i, ty)| (ty.name.clone(), i))
            .collect();

        let mut pass = Reassociation::new(&import_path, &mut types, &type_index);
        let constants = pass.apply(constants);
        let variables = pass.apply(variables);
        let functions = pass.apply(functions);
        let warnings = pass.into_warnings();
        log_stage(&import_path, Stage::Reassociated);

        let package = Package {
            module_path: self.module_path.to_owned(),
            display_name: self.display_name.to_owned(),
            file_name: file_name(self.module_path, &rel_path, &raw.name),
            synopsis: renderer.render_inline(&synopsis(&doc)),
            comment_html: renderer.render(&doc),
            name: raw.name.clone(),
            constants,
            variables,
            functions,
            types,
            path_parts: Vec::new(),
            warnings,
            type_index,
            import_path,
            rel_path,
        };
        log_stage(&package.import_path, Stage::Finalized);

        Ok(Assembled::Finalized(Box::new(package)))
    }
}

/// Names on the package page that `[Name]` and `[Type.Method]` may link to.
///
/// Hidden records contribute nothing; a hidden type hides its members.
fn declared_symbols(raw: &RawPackage) -> Symbols {
    let mut symbols = Symbols::default();
    add_symbols(&mut symbols, &raw.consts, &raw.vars, &raw.funcs);
    for ty in raw.types.iter().filter(|t| !is_hidden(&t.doc)) {
        symbols.insert(ty.name.clone());
        add_symbols(&mut symbols, &ty.consts, &ty.vars, &ty.funcs);
        for method in ty.methods.iter().filter(|m| !is_hidden(&m.doc)) {
            symbols.insert_method(&ty.name, &method.name);
        }
    }
    symbols
}

fn add_symbols(symbols: &mut Symbols, consts: &[RawValue], vars: &[RawValue], funcs: &[RawFunc]) {
    for value in consts.iter().chain(vars).filter(|v| !is_hidden(&v.doc)) {
        symbols.extend(value.names.iter().cloned());
    }
    for func in funcs.iter().filter(|f| !is_hidden(&f.doc)) {
        symbols.insert(func.name.clone());
    }
}

/// Whether a doc comment carries `doc: hide`.
pub(crate) fn is_hidden(doc: &str) -> bool {
    parse_directives(doc).1.is_hidden()
}

fn log_stage(import_path: &str, stage: Stage) {
    tracing::debug!(package = %import_path, %stage, "Package stage");
}

/// Module name: the last segment of the root import path.
pub(crate) fn module_name(module_path: &str) -> &str {
    let path = module_path.trim_end_matches('/');
    path.rsplit('/').next().unwrap_or(path)
}

/// Import path of the package at `rel_path` inside the module.
fn join_import_path(module_path: &str, rel_path: &str) -> String {
    if rel_path.is_empty() {
        module_path.to_owned()
    } else {
        format!("{module_path}/{rel_path}")
    }
}
