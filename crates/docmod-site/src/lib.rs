//! Package and module documentation model for docmod.
//!
//! This crate turns the raw declarations produced by an external source
//! extractor into the documents consumed by templates:
//! - [`RawModule`]: extractor output, deserialized from JSON
//! - [`PackageAssembler`]: builds one [`Package`] (directives, hiding,
//!   comment rendering, type reassociation)
//! - [`ModuleBuilder`]: builds every package of a [`Module`] and annotates
//!   breadcrumbs
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use docmod_site::{FsSource, ModuleBuilder, ModuleOptions, RawModule};
//!
//! let raw = RawModule::load("docmod.json".as_ref())?;
//! let source = FsSource::new("src");
//! let module = ModuleBuilder::new(&source, ModuleOptions::default()).build(&raw)?;
//!
//! for package in module.packages() {
//!     println!("{} -> {}", package.import_path, package.file_name);
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod module;
mod package;
mod raw;
mod reassociate;
mod record;
mod source;

pub use error::BuildError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MemorySource;
pub use module::{Module, ModuleBuilder, ModuleOptions, SITEMAP_FILE};
pub use package::{Assembled, Package, PackageAssembler, PathPart};
pub use raw::{RawFunc, RawMethod, RawModule, RawPackage, RawSource, RawType, RawValue, SourcePos, SourceSpan};
pub use record::{Constant, Function, Method, Type, Variable};
pub use source::{FsSource, SourceError, SourceProvider};
