//! Raw declarations produced by the source extractor.
//!
//! The extractor parses the module's sources and writes one JSON document
//! describing every package:
//!
//! ```json
//! {
//!   "import_path": "example.com/mod",
//!   "dir_name": "mod",
//!   "packages": [{
//!     "name": "mod",
//!     "rel_path": "",
//!     "doc": "Package mod does things.\n",
//!     "consts": [{ "names": ["A", "B"], "doc": "", "source": { "code": "const (...)" } }],
//!     "funcs": [{ "name": "New", "doc": "", "source": {
//!       "span": { "start": { "file": "mod.go", "offset": 120 },
//!                 "end": { "file": "mod.go", "offset": 180 } } } }],
//!     "types": [{ "name": "T", "doc": "", "source": { "code": "type T struct{}" },
//!                 "methods": [{ "name": "Run", "recv": "T", "level": 0,
//!                               "doc": "", "source": { "code": "func (T) Run()" } }] }]
//!   }]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::BuildError;

/// A whole module as seen by the extractor.
#[derive(Clone, Debug, Deserialize)]
pub struct RawModule {
    /// Root import path from the module manifest.
    pub import_path: String,
    /// Name of the directory holding the module.
    #[serde(default)]
    pub dir_name: Option<String>,
    /// Every package found under the module root.
    #[serde(default)]
    pub packages: Vec<RawPackage>,
}

impl RawModule {
    /// Parse extractor output.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Input` if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        serde_json::from_str(json).map_err(BuildError::Input)
    }

    /// Read and parse extractor output from a file.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Io` if the file cannot be read and
    /// `BuildError::Input` if it is malformed.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let json = std::fs::read_to_string(path).map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// One package and its declarations, in source order.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawPackage {
    /// Declared package name.
    pub name: String,
    /// Full import path; derived from the module path when absent.
    #[serde(default)]
    pub import_path: Option<String>,
    /// Directory of the package relative to the module root.
    #[serde(default)]
    pub rel_path: String,
    /// Package doc comment.
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub consts: Vec<RawValue>,
    #[serde(default)]
    pub vars: Vec<RawValue>,
    #[serde(default)]
    pub funcs: Vec<RawFunc>,
    #[serde(default)]
    pub types: Vec<RawType>,
}

/// A constant or variable declaration (possibly a group).
#[derive(Clone, Debug, Deserialize)]
pub struct RawValue {
    pub names: Vec<String>,
    #[serde(default)]
    pub doc: String,
    pub source: RawSource,
}

/// A function declaration.
#[derive(Clone, Debug, Deserialize)]
pub struct RawFunc {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    pub source: RawSource,
}

/// A method in a type's method set.
#[derive(Clone, Debug, Deserialize)]
pub struct RawMethod {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    pub source: RawSource,
    /// Receiver type name as written in the declaration.
    pub recv: String,
    /// Embedded type the method was promoted from, if any.
    #[serde(default)]
    pub embedded: Option<String>,
    /// Embedding depth; 0 for methods declared on the type itself.
    #[serde(default)]
    pub level: u32,
}

/// A type declaration with the declarations the extractor attributes to it.
#[derive(Clone, Debug, Deserialize)]
pub struct RawType {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    pub source: RawSource,
    #[serde(default)]
    pub consts: Vec<RawValue>,
    #[serde(default)]
    pub vars: Vec<RawValue>,
    #[serde(default)]
    pub funcs: Vec<RawFunc>,
    #[serde(default)]
    pub methods: Vec<RawMethod>,
}

/// Where the code of a declaration comes from.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawSource {
    /// Code already rendered by the extractor.
    Code(String),
    /// Byte range of a source file.
    Span(SourceSpan),
}

/// Byte range of a declaration in a source file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SourceSpan {
    pub start: SourcePos,
    pub end: SourcePos,
}

/// Byte position in a source file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SourcePos {
    /// File path relative to the module source directory.
    pub file: PathBuf,
    pub offset: usize,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_from_json_minimal() {
        let raw = RawModule::from_json(r#"{"import_path": "example.com/mod"}"#).unwrap();
        assert_eq!(raw.import_path, "example.com/mod");
        assert!(raw.dir_name.is_none());
        assert!(raw.packages.is_empty());
    }

    #[test]
    fn test_from_json_full_package() {
        let json = r#"{
            "import_path": "example.com/mod",
            "dir_name": "mod",
            "packages": [{
                "name": "mod",
                "rel_path": "",
                "doc": "Package mod.\n",
                "consts": [{"names": ["A", "B"], "source": {"code": "const (A = 1; B = 2)"}}],
                "funcs": [{"name": "New", "doc": "New creates.\n", "source": {
                    "span": {"start": {"file": "mod.go", "offset": 10},
                             "end": {"file": "mod.go", "offset": 20}}}}],
                "types": [{"name": "T", "source": {"code": "type T int"},
                           "methods": [{"name": "Run", "recv": "*T", "embedded": "Base", "level": 1,
                                        "source": {"code": "func (b *Base) Run()"}}]}]
            }]
        }"#;
        let raw = RawModule::from_json(json).unwrap();
        let package = &raw.packages[0];

        assert_eq!(package.consts[0].names, vec!["A", "B"]);
        assert_eq!(package.consts[0].doc, "");
        assert_eq!(
            package.funcs[0].source,
            RawSource::Span(SourceSpan {
                start: SourcePos {
                    file: PathBuf::from("mod.go"),
                    offset: 10
                },
                end: SourcePos {
                    file: PathBuf::from("mod.go"),
                    offset: 20
                },
            })
        );
        let method = &package.types[0].methods[0];
        assert_eq!(method.recv, "*T");
        assert_eq!(method.embedded.as_deref(), Some("Base"));
        assert_eq!(method.level, 1);
    }

    #[test]
    fn test_from_json_malformed() {
        let result = RawModule::from_json("{");
        assert!(matches!(result, Err(BuildError::Input(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = RawModule::load(&temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(BuildError::Io { .. })));
    }
}
