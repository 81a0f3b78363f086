//! Source code access for declaration snippets.
//!
//! Declarations either carry their rendered code or a byte span into a
//! source file. [`SnippetReader`] resolves both, reading each file at most
//! once through a [`SourceProvider`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::raw::{RawSource, SourceSpan};

/// Error returned when a code snippet cannot be produced.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Source file could not be read.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Span starts and ends in different files.
    #[error("Span starts in {} but ends in {}", start.display(), end.display())]
    SpanMismatch { start: PathBuf, end: PathBuf },
    /// Span bounds are reversed, past the end of the file, or split a character.
    #[error("Invalid span {start}..{end} in {} ({len} bytes)", path.display())]
    InvalidRange {
        path: PathBuf,
        start: usize,
        end: usize,
        len: usize,
    },
}

/// Read access to the module's source files.
pub trait SourceProvider {
    /// Read a source file.
    ///
    /// # Arguments
    ///
    /// * `path` - File path relative to the module source directory
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Io` if the file cannot be read.
    fn read(&self, path: &Path) -> Result<String, SourceError>;
}

/// Filesystem source rooted at the module directory.
#[derive(Clone, Debug)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create a source reading files relative to `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceProvider for FsSource {
    fn read(&self, path: &Path) -> Result<String, SourceError> {
        let full_path = self.root.join(path);
        std::fs::read_to_string(&full_path).map_err(|source| SourceError::Io {
            path: full_path,
            source,
        })
    }
}

/// Resolves [`RawSource`] values to code text with a per-file cache.
pub(crate) struct SnippetReader<'a> {
    provider: &'a dyn SourceProvider,
    files: HashMap<PathBuf, String>,
}

impl<'a> SnippetReader<'a> {
    pub(crate) fn new(provider: &'a dyn SourceProvider) -> Self {
        Self {
            provider,
            files: HashMap::new(),
        }
    }

    /// Code text of a declaration.
    pub(crate) fn snippet(&mut self, source: &RawSource) -> Result<String, SourceError> {
        match source {
            RawSource::Code(code) => Ok(code.clone()),
            RawSource::Span(span) => self.span(span),
        }
    }

    fn span(&mut self, span: &SourceSpan) -> Result<String, SourceError> {
        if span.start.file != span.end.file {
            return Err(SourceError::SpanMismatch {
                start: span.start.file.clone(),
                end: span.end.file.clone(),
            });
        }

        let path = &span.start.file;
        if !self.files.contains_key(path) {
            let content = self.provider.read(path)?;
            self.files.insert(path.clone(), content);
        }
        let content = &self.files[path];

        let (start, end) = (span.start.offset, span.end.offset);
        if start > end {
            return Err(Self::invalid_range(path, start, end, content));
        }
        content
            .get(start..end)
            .map(str::to_owned)
            .ok_or_else(|| Self::invalid_range(path, start, end, content))
    }

    fn invalid_range(path: &Path, start: usize, end: usize, content: &str) -> SourceError {
        SourceError::InvalidRange {
            path: path.to_path_buf(),
            start,
            end,
            len: content.len(),
        }
    }
}
