//! Output file naming for package pages.

/// Normalize a package path relative to the module root.
///
/// Converts backslashes to `/`, drops leading `./` and trailing `/`, and
/// maps the current-directory marker to the empty path.
///
/// Examples:
/// - `"."` -> `""`
/// - `"./a/b/"` -> `"a/b"`
/// - `"a\\b"` -> `"a/b"`
#[must_use]
pub fn clean_rel_path(rel_path: &str) -> String {
    let mut path = rel_path.replace('\\', "/");
    while let Some(rest) = path.strip_prefix("./") {
        path = rest.to_owned();
    }
    let path = path.trim_end_matches('/');
    if path == "." {
        return String::new();
    }
    path.to_owned()
}

/// Derive the `.html` file name of a package page.
///
/// - The root package (empty or `.` path) is named after the last segment
///   of the module import path.
/// - Other packages flatten their relative path with `_`.
/// - When the directory name differs from the declared package name, the
///   package name is appended to keep the name unique.
///
/// Examples (module `example.com/mod`):
/// - `("", "mod")` -> `"mod.html"`
/// - `("a/b", "b")` -> `"a_b.html"`
/// - `("a/b", "c")` -> `"a_b_c.html"`
#[must_use]
pub fn file_name(module_path: &str, rel_path: &str, package_name: &str) -> String {
    let rel_path = rel_path.replace('\\', "/");
    let rel_path = rel_path.trim_end_matches('/');

    let mut name = if rel_path.is_empty() || rel_path == "." {
        last_segment(module_path).to_owned()
    } else {
        let mut flat = rel_path.replace('/', "_");
        if let Some(rest) = flat.strip_prefix("._") {
            flat = rest.to_owned();
        }
        if last_segment(rel_path) != package_name {
            flat.push('_');
            flat.push_str(package_name);
        }
        flat
    };

    name.push_str(".html");
    name
}

/// Last `/`-separated segment of a path.
pub(crate) fn last_segment(path: &str) -> &str {
    let path = path.trim_end_matches('/');
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const MODULE: &str = "example.com/mod";

    #[test]
    fn test_file_name_root_package() {
        assert_eq!(file_name(MODULE, "", "mod"), "mod.html");
        assert_eq!(file_name(MODULE, ".", "mod"), "mod.html");
    }

    #[test]
    fn test_file_name_root_uses_module_segment_not_package_name() {
        assert_eq!(file_name(MODULE, "", "main"), "mod.html");
    }

    #[test]
    fn test_file_name_nested_matching_name() {
        assert_eq!(file_name(MODULE, "a/b", "b"), "a_b.html");
        assert_eq!(file_name(MODULE, "a", "a"), "a.html");
    }

    #[test]
    fn test_file_name_nested_mismatched_name() {
        assert_eq!(file_name(MODULE, "a/b", "c"), "a_b_c.html");
    }

    #[test]
    fn test_file_name_strips_current_dir_marker() {
        assert_eq!(file_name(MODULE, "./a/b", "b"), "a_b.html");
    }

    #[test]
    fn test_file_name_trailing_separator() {
        assert_eq!(file_name(MODULE, "a/b/", "b"), "a_b.html");
    }

    #[test]
    fn test_file_name_windows_separators() {
        assert_eq!(file_name(MODULE, "a\\b", "b"), "a_b.html");
    }

    #[test]
    fn test_file_name_is_deterministic() {
        assert_eq!(
            file_name(MODULE, "x/y", "z"),
            file_name(MODULE, "x/y", "z")
        );
    }

    #[test]
    fn test_clean_rel_path() {
        assert_eq!(clean_rel_path(""), "");
        assert_eq!(clean_rel_path("."), "");
        assert_eq!(clean_rel_path("./"), "");
        assert_eq!(clean_rel_path("./a/b/"), "a/b");
        assert_eq!(clean_rel_path("a\\b"), "a/b");
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("example.com/mod"), "mod");
        assert_eq!(last_segment("mod"), "mod");
        assert_eq!(last_segment("example.com/mod/"), "mod");
    }
}
