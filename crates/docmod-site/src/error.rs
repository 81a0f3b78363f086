//! Error types for documentation building.

use std::path::PathBuf;

use crate::source::SourceError;

/// Error returned when a module or package cannot be built.
///
/// All variants are fatal: the run is aborted without partial output.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Extractor output could not be read.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Extractor output is not valid JSON for the expected shape.
    #[error("Invalid extractor output: {0}")]
    Input(#[source] serde_json::Error),
    /// Source code of a declaration could not be extracted.
    #[error("Package {package}: {source}")]
    Source {
        package: String,
        #[source]
        source: SourceError,
    },
    /// A declaration violates the extractor contract.
    #[error("Package {package}: invalid declaration: {reason}")]
    InvalidDeclaration { package: String, reason: String },
}
