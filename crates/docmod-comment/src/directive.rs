//! Comment directive parsing.
//!
//! A directive is a whole line of a doc comment that starts with
//! [`DIRECTIVE_PREFIX`], followed by `key` or `key=value`:
//!
//! ```text
//! Bstart is the initial value of B.
//!
//! doc: type=MyType
//! ```
//!
//! Directive lines are removed from the comment text and collected into
//! [`Flags`]. Parsing never fails: a line with more than one `=` keeps
//! only its key, with an empty value.

use std::collections::BTreeMap;

/// Prefix marking a directive line.
pub const DIRECTIVE_PREFIX: &str = "doc:";

/// Directive that removes the item from the generated documentation.
pub const HIDE_DIRECTIVE: &str = "hide";

/// Directive that moves a top-level item into the named type.
pub const TYPE_DIRECTIVE: &str = "type";

/// Directives collected from one doc comment.
///
/// Keys map to their (possibly empty) values. Empty when the comment
/// had no directive lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Flags(BTreeMap<String, String>);

impl Flags {
    /// Create an empty flag set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a flag, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Value of a flag, `None` if the flag is absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether a flag is present, regardless of its value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Whether the `hide` directive is present.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.contains(HIDE_DIRECTIVE)
    }

    /// Target type of a `type=Name` directive.
    ///
    /// A bare `type` directive without a value names no type.
    #[must_use]
    pub fn type_target(&self) -> Option<&str> {
        self.get(TYPE_DIRECTIVE).filter(|name| !name.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Flags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Strip directive lines from a comment and collect them as flags.
///
/// Returns the comment without its directive lines (all other lines keep
/// their order and line endings) and the collected flags. When the same
/// key appears on several lines, the last one wins.
#[must_use]
pub fn parse_directives(text: &str) -> (String, Flags) {
    let mut stripped = String::with_capacity(text.len());
    let mut flags = Flags::new();

    for line in text.split_inclusive('\n') {
        let Some(body) = line.strip_prefix(DIRECTIVE_PREFIX) else {
            stripped.push_str(line);
            continue;
        };

        let (key, value) = split_directive(body);
        if !key.is_empty() {
            flags.insert(key, value);
        }
    }

    (stripped, flags)
}

/// Split a directive body into key and value.
fn split_directive(body: &str) -> (&str, &str) {
    let mut parts = body.split('=');
    let key = parts.next().unwrap_or_default().trim();
    match (parts.next(), parts.next()) {
        (Some(value), None) => (key, value.trim()),
        // Bare key, or malformed `a=b=c`
        _ => (key, ""),
    }
}
