//! Record building from raw declarations.
//!
//! Every declaration goes through the same steps: parse directives, drop
//! it if hidden, render the remaining comment, then attach its code. Hidden
//! declarations never reach code extraction or any later pass.

use docmod_comment::{CommentRenderer, Flags, parse_directives};

use crate::error::BuildError;
use crate::raw::{RawFunc, RawMethod, RawSource, RawType, RawValue};
use crate::record::{Constant, Function, Method, Type, Variable};
use crate::source::{SnippetReader, SourceProvider};

/// Builds typed records for one package, preserving declaration order.
pub(crate) struct RecordBuilder<'a> {
    package: &'a str,
    renderer: &'a CommentRenderer,
    snippets: SnippetReader<'a>,
}

impl<'a> RecordBuilder<'a> {
    /// Create a builder for the package with import path `package`.
    pub(crate) fn new(
        package: &'a str,
        renderer: &'a CommentRenderer,
        provider: &'a dyn SourceProvider,
    ) -> Self {
        Self {
            package,
            renderer,
            snippets: SnippetReader::new(provider),
        }
    }

    pub(crate) fn constants(&mut self, raws: &[RawValue]) -> Result<Vec<Constant>, BuildError> {
        self.collect(raws, Self::constant)
    }

    pub(crate) fn variables(&mut self, raws: &[RawValue]) -> Result<Vec<Variable>, BuildError> {
        self.collect(raws, Self::variable)
    }

    pub(crate) fn functions(&mut self, raws: &[RawFunc]) -> Result<Vec<Function>, BuildError> {
        self.collect(raws, Self::function)
    }

    pub(crate) fn methods(&mut self, raws: &[RawMethod]) -> Result<Vec<Method>, BuildError> {
        self.collect(raws, Self::method)
    }

    pub(crate) fn types(&mut self, raws: &[RawType]) -> Result<Vec<Type>, BuildError> {
        self.collect(raws, Self::ty)
    }

    fn constant(&mut self, raw: &RawValue) -> Result<Option<Constant>, BuildError> {
        let Some((comment_html, flags)) = self.comment(&raw.doc) else {
            return Ok(None);
        };
        self.require_names(raw, "constant")?;
        Ok(Some(Constant {
            names: raw.names.clone(),
            comment_html,
            code: self.code(&raw.source)?,
            flags,
        }))
    }

    fn variable(&mut self, raw: &RawValue) -> Result<Option<Variable>, BuildError> {
        let Some((comment_html, flags)) = self.comment(&raw.doc) else {
            return Ok(None);
        };
        self.require_names(raw, "variable")?;
        Ok(Some(Variable {
            names: raw.names.clone(),
            comment_html,
            code: self.code(&raw.source)?,
            flags,
        }))
    }

    fn function(&mut self, raw: &RawFunc) -> Result<Option<Function>, BuildError> {
        let Some((comment_html, flags)) = self.comment(&raw.doc) else {
            return Ok(None);
        };
        Ok(Some(Function {
            name: raw.name.clone(),
            comment_html,
            code: self.code(&raw.source)?,
            flags,
        }))
    }

    fn method(&mut self, raw: &RawMethod) -> Result<Option<Method>, BuildError> {
        let Some((comment_html, flags)) = self.comment(&raw.doc) else {
            return Ok(None);
        };
        Ok(Some(Method {
            name: raw.name.clone(),
            comment_html,
            code: self.code(&raw.source)?,
            receiver: raw.recv.clone(),
            embedded_type: raw.embedded.clone().filter(|name| !name.is_empty()),
            level: raw.level,
            flags,
        }))
    }

    /// Build a type and the members the extractor attributed to it.
    ///
    /// A hidden type hides all of its members.
    fn ty(&mut self, raw: &RawType) -> Result<Option<Type>, BuildError> {
        let Some((comment_html, flags)) = self.comment(&raw.doc) else {
            return Ok(None);
        };
        Ok(Some(Type {
            name: raw.name.clone(),
            comment_html,
            code: self.code(&raw.source)?,
            flags,
            constants: self.constants(&raw.consts)?,
            variables: self.variables(&raw.vars)?,
            functions: self.functions(&raw.funcs)?,
            methods: self.methods(&raw.methods)?,
        }))
    }

    /// Parse directives and render the comment; `None` if the record is hidden.
    fn comment(&self, doc: &str) -> Option<(String, Flags)> {
        let (text, flags) = parse_directives(doc);
        if flags.is_hidden() {
            return None;
        }
        Some((self.renderer.render(&text), flags))
    }

    fn code(&mut self, source: &RawSource) -> Result<String, BuildError> {
        self.snippets
            .snippet(source)
            .map_err(|source| BuildError::Source {
                package: self.package.to_owned(),
                source,
            })
    }

    fn require_names(&self, raw: &RawValue, kind: &str) -> Result<(), BuildError> {
        if raw.names.is_empty() {
            return Err(BuildError::InvalidDeclaration {
                package: self.package.to_owned(),
                reason: format!("{kind} declaration without names"),
            });
        }
        Ok(())
    }

    fn collect<R, T>(
        &mut self,
        raws: &[R],
        mut build: impl FnMut(&mut Self, &R) -> Result<Option<T>, BuildError>,
    ) -> Result<Vec<T>, BuildError> {
        raws.iter()
            .filter_map(|raw| build(self, raw).transpose())
            .collect()
    }
}
