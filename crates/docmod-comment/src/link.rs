//! Doc link parsing and URL resolution.
//!
//! Doc links are bracketed references inside comments:
//!
//! | Text                        | Import path     | Receiver | Name  |
//! |-----------------------------|-----------------|----------|-------|
//! | `[Name]`                    |                 |          | Name  |
//! | `[Recv.Name]`               |                 | Recv     | Name  |
//! | `[pkg.Name]`                | pkg             |          | Name  |
//! | `[pkg.Recv.Name]`           | pkg             | Recv     | Name  |
//! | `[example.com/m/sub.Name]`  | example.com/m/sub |        | Name  |
//! | `[encoding/json]`           | encoding/json   |          |       |
//!
//! A leading `*` (pointer to type) is ignored.

use std::collections::{HashMap, HashSet};

use crate::naming::{clean_rel_path, file_name, last_segment};

/// Documentation host for packages outside the module without a domain.
pub const STDLIB_DOC_URL: &str = "https://pkg.go.dev/";

/// Scheme prefixed to import paths that look like URLs.
pub const EXTERNAL_SCHEME: &str = "https://";

/// A parsed cross-reference from a doc comment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocLink {
    /// Import path of the referenced package, empty for the current package.
    pub import_path: String,
    /// Receiver type for method and field references.
    pub recv: String,
    /// Referenced symbol, empty for whole-package links.
    pub name: String,
}

impl DocLink {
    /// Parse the text between the brackets of a doc link.
    ///
    /// Returns `None` when the text is not a doc link (e.g. `[1]` or
    /// `[some words]`), in which case it should be left as plain text.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.strip_prefix('*').unwrap_or(text);
        if text.is_empty() {
            return None;
        }

        if let Some((head, name)) = text.rsplit_once('.')
            && is_identifier(name)
        {
            return Self::parse_symbol(head, name);
        }

        if is_identifier(text) {
            return Some(Self {
                name: text.to_owned(),
                ..Self::default()
            });
        }

        if text.contains('/') && is_import_path(text) {
            return Some(Self {
                import_path: text.to_owned(),
                ..Self::default()
            });
        }

        None
    }

    /// Parse `head.name` where `name` is already known to be an identifier.
    fn parse_symbol(head: &str, name: &str) -> Option<Self> {
        if head.is_empty() {
            return None;
        }

        let (dir, segment) = match head.rsplit_once('/') {
            Some((dir, segment)) => (Some(dir), segment),
            None => (None, head),
        };

        // `pkg.Recv` or `path/pkg.Recv`
        if let Some((pkg, recv)) = segment.rsplit_once('.')
            && is_exported(recv)
            && !pkg.is_empty()
        {
            let import_path = match dir {
                Some(dir) => format!("{dir}/{pkg}"),
                None => pkg.to_owned(),
            };
            if !is_import_path(&import_path) {
                return None;
            }
            return Some(Self {
                import_path,
                recv: recv.to_owned(),
                name: name.to_owned(),
            });
        }

        // `Recv` in the current package
        if dir.is_none() && is_exported(head) {
            return Some(Self {
                recv: head.to_owned(),
                name: name.to_owned(),
                ..Self::default()
            });
        }

        if !is_import_path(head) {
            return None;
        }
        Some(Self {
            import_path: head.to_owned(),
            name: name.to_owned(),
            ..Self::default()
        })
    }

    /// In-page anchor of the referenced symbol, `None` for package links.
    #[must_use]
    pub fn anchor(&self) -> Option<String> {
        if self.name.is_empty() {
            return None;
        }
        if self.recv.is_empty() {
            Some(self.name.clone())
        } else {
            Some(format!("{}.{}", self.recv, self.name))
        }
    }
}

/// Symbols declared by one package.
///
/// A doc link without an import path is only a link when it names one of
/// these: a top-level name, a type name, or `Type.Method`.
#[derive(Clone, Debug, Default)]
pub struct Symbols {
    names: HashSet<String>,
}

impl Symbols {
    /// Add a constant, variable, function or type name.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Add a method of `type_name`.
    pub fn insert_method(&mut self, type_name: &str, name: &str) {
        self.names.insert(format!("{type_name}.{name}"));
    }

    /// Whether the current-package `link` names a declared symbol.
    #[must_use]
    pub fn contains(&self, link: &DocLink) -> bool {
        link.anchor()
            .is_some_and(|anchor| self.names.contains(&anchor))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Extend<String> for Symbols {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.names.extend(iter);
    }
}

impl FromIterator<String> for Symbols {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// Resolves doc links to URLs for one module.
///
/// Same-module references link to the generated page of the referenced
/// package. Package names come from the module namespace registered with
/// [`with_package`](Self::with_package): only packages that get a page
/// should be registered, in sitemap order.
#[derive(Clone, Debug)]
pub struct LinkResolver {
    module_path: String,
    stdlib_url: String,
    external_scheme: String,
    package_names: HashMap<String, String>,
}

impl LinkResolver {
    /// Create a resolver for the module with the given root import path.
    #[must_use]
    pub fn new(module_path: impl Into<String>) -> Self {
        Self {
            module_path: module_path.into(),
            stdlib_url: STDLIB_DOC_URL.to_owned(),
            external_scheme: EXTERNAL_SCHEME.to_owned(),
            package_names: HashMap::new(),
        }
    }

    /// Set the documentation host used for bare import paths.
    #[must_use]
    pub fn with_stdlib_url(mut self, url: impl Into<String>) -> Self {
        self.stdlib_url = url.into();
        self
    }

    /// Set the scheme prefixed to dotted import paths.
    #[must_use]
    pub fn with_external_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.external_scheme = scheme.into();
        self
    }

    /// Register the declared name of the package at `rel_path`.
    ///
    /// The first registration for a path wins.
    #[must_use]
    pub fn with_package(mut self, rel_path: &str, package_name: impl Into<String>) -> Self {
        self.package_names
            .entry(clean_rel_path(rel_path))
            .or_insert_with(|| package_name.into());
        self
    }

    /// Root import path of the module.
    #[must_use]
    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    /// Resolve a doc link to a URL.
    ///
    /// Returns `None` when the link has neither an import path nor a name.
    #[must_use]
    pub fn resolve(&self, link: &DocLink) -> Option<String> {
        let import_path = link.import_path.as_str();

        let mut url = if import_path.is_empty() {
            String::new()
        } else if let Some(rel_path) = self.module_relative(import_path) {
            let package_name = self
                .package_names
                .get(rel_path)
                .map_or_else(|| last_segment(rel_path), String::as_str);
            file_name(&self.module_path, rel_path, package_name)
        } else if import_path.contains('.') {
            format!("{}{import_path}", self.external_scheme)
        } else {
            format!("{}{import_path}", self.stdlib_url)
        };

        if let Some(anchor) = link.anchor() {
            url.push('#');
            url.push_str(&anchor);
        }

        if url.is_empty() { None } else { Some(url) }
    }

    /// Path of `import_path` relative to the module root, if inside the module.
    fn module_relative<'a>(&self, import_path: &'a str) -> Option<&'a str> {
        let rest = import_path.strip_prefix(self.module_path.as_str())?;
        if rest.is_empty() {
            return Some("");
        }
        rest.strip_prefix('/')
    }
}

/// Whether `s` is a valid identifier (letter or `_`, then letters, digits, `_`).
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Whether `s` is an exported identifier.
fn is_exported(s: &str) -> bool {
    is_identifier(s) && s.chars().next().is_some_and(char::is_uppercase)
}

/// Whether `s` looks like an import path.
fn is_import_path(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('/')
        && !s.ends_with('/')
        && s
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '/' | '.' | '_' | '-' | '~'))
}
