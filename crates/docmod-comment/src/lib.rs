//! Doc comment processing for docmod.
//!
//! This crate provides the comment-level building blocks of the
//! documentation pipeline:
//! - [`parse_directives`]: strips `doc:` pragma lines and collects [`Flags`]
//! - [`LinkResolver`]: turns a [`DocLink`] into an absolute or in-page URL
//! - [`Symbols`]: the names a current-package doc link may refer to
//! - [`file_name`]: derives the output file name of a package page
//! - [`synopsis`]: extracts the one-sentence summary of a package doc
//! - [`CommentRenderer`]: renders comment text to HTML, resolving doc links
//!
//! # Example
//!
//! ```
//! use docmod_comment::{CommentRenderer, LinkResolver, Symbols, parse_directives};
//!
//! let (text, flags) = parse_directives("Parse reads [Config] from s[i].\ndoc: type=Config\n");
//! assert_eq!(flags.type_target(), Some("Config"));
//!
//! let mut symbols = Symbols::default();
//! symbols.insert("Config");
//! let renderer = CommentRenderer::new(LinkResolver::new("example.com/mod")).for_package(symbols);
//! let html = renderer.render(&text);
//! assert!(html.contains(r##"<a href="#Config">Config</a> from s[i]"##));
//! ```

mod directive;
mod link;
mod naming;
mod render;
mod synopsis;

pub use directive::{DIRECTIVE_PREFIX, Flags, HIDE_DIRECTIVE, TYPE_DIRECTIVE, parse_directives};
pub use link::{DocLink, EXTERNAL_SCHEME, LinkResolver, STDLIB_DOC_URL, Symbols};
pub use naming::{clean_rel_path, file_name};
pub use render::CommentRenderer;
pub use synopsis::synopsis;
