//! Configuration management for docmod.
//!
//! Parses `docmod.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `module.display_name`
//! - `links.stdlib_url`

mod expand;

use docmod_comment::{EXTERNAL_SCHEME, STDLIB_DOC_URL};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override extractor output file.
    pub input: Option<PathBuf>,
    /// Override source root for code spans.
    pub source_dir: Option<PathBuf>,
    /// Override site output directory.
    pub output_dir: Option<PathBuf>,
    /// Override package page template.
    pub package_template: Option<PathBuf>,
    /// Override sitemap page template.
    pub index_template: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docmod.toml";

/// Default extractor output file.
const DEFAULT_INPUT: &str = "docmod.json";

/// Default site output directory.
const DEFAULT_OUTPUT_DIR: &str = "site";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Module input configuration (paths are relative strings from TOML).
    module: ModuleConfigRaw,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Template overrides (paths are relative strings from TOML).
    templates: TemplatesConfigRaw,
    /// Doc link configuration.
    pub links: LinksConfig,
    /// Package selection.
    pub packages: PackagesConfig,

    /// Resolved module configuration (set after loading).
    #[serde(skip)]
    pub module_resolved: ModuleConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Resolved template overrides (set after loading).
    #[serde(skip)]
    pub templates_resolved: TemplatesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw module configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ModuleConfigRaw {
    input: Option<String>,
    source_dir: Option<String>,
    display_name: Option<String>,
}

/// Resolved module configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ModuleConfig {
    /// Extractor output file (JSON).
    pub input: PathBuf,
    /// Root directory that source spans are relative to.
    pub source_dir: PathBuf,
    /// Display name shown at the root of breadcrumbs.
    pub display_name: Option<String>,
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
}

/// Resolved output configuration with absolute paths.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Directory the site is written to.
    pub dir: PathBuf,
}

/// Raw template overrides as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TemplatesConfigRaw {
    package: Option<String>,
    index: Option<String>,
}

/// Resolved template overrides. `None` selects the built-in template.
#[derive(Debug, Default)]
pub struct TemplatesConfig {
    /// Package page template.
    pub package: Option<PathBuf>,
    /// Sitemap page template.
    pub index: Option<PathBuf>,
}

/// Doc link configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Documentation host for import paths without a domain.
    pub stdlib_url: String,
    /// Scheme prefixed to import paths with a domain.
    pub external_scheme: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            stdlib_url: STDLIB_DOC_URL.to_owned(),
            external_scheme: EXTERNAL_SCHEME.to_owned(),
        }
    }
}

/// Package selection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PackagesConfig {
    /// Document `_test` packages.
    pub include_tests: bool,
    /// Document packages below `internal` directories.
    pub include_internal: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`links.stdlib_url`").
        field: String,
        /// Error message (e.g., "${`DOCS_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docmod.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(input) = &settings.input {
            self.module_resolved.input.clone_from(input);
        }
        if let Some(source_dir) = &settings.source_dir {
            self.module_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_resolved.dir.clone_from(output_dir);
        }
        if let Some(package) = &settings.package_template {
            self.templates_resolved.package = Some(package.clone());
        }
        if let Some(index) = &settings.index_template {
            self.templates_resolved.index = Some(index.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            module: ModuleConfigRaw::default(),
            output: OutputConfigRaw::default(),
            templates: TemplatesConfigRaw::default(),
            links: LinksConfig::default(),
            packages: PackagesConfig::default(),
            module_resolved: ModuleConfig {
                input: base.join(DEFAULT_INPUT),
                source_dir: base.to_path_buf(),
                display_name: None,
            },
            output_resolved: OutputConfig {
                dir: base.join(DEFAULT_OUTPUT_DIR),
            },
            templates_resolved: TemplatesConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_module()?;
        self.validate_links()?;
        Ok(())
    }

    fn validate_module(&self) -> Result<(), ConfigError> {
        if let Some(display_name) = &self.module_resolved.display_name {
            require_non_empty(display_name, "module.display_name")?;
        }
        Ok(())
    }

    fn validate_links(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.links.stdlib_url, "links.stdlib_url")?;
        require_http_url(&self.links.stdlib_url, "links.stdlib_url")?;

        if !self.links.external_scheme.ends_with("://") {
            return Err(ConfigError::Validation(
                "links.external_scheme must end with ://".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref display_name) = self.module.display_name {
            self.module.display_name =
                Some(expand::expand_env(display_name, "module.display_name")?);
        }
        self.links.stdlib_url = expand::expand_env(&self.links.stdlib_url, "links.stdlib_url")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.module_resolved = ModuleConfig {
            input: resolve(self.module.input.as_deref(), DEFAULT_INPUT),
            source_dir: resolve(self.module.source_dir.as_deref(), "."),
            display_name: self.module.display_name.clone(),
        };

        self.output_resolved = OutputConfig {
            dir: resolve(self.output.dir.as_deref(), DEFAULT_OUTPUT_DIR),
        };

        self.templates_resolved = TemplatesConfig {
            package: self.templates.package.as_deref().map(|p| config_dir.join(p)),
            index: self.templates.index.as_deref().map(|p| config_dir.join(p)),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));

        assert_eq!(
            config.module_resolved.input,
            PathBuf::from("/test/docmod.json")
        );
        assert_eq!(config.module_resolved.source_dir, PathBuf::from("/test"));
        assert_eq!(config.module_resolved.display_name, None);
        assert_eq!(config.output_resolved.dir, PathBuf::from("/test/site"));
        assert_eq!(config.links.stdlib_url, "https://pkg.go.dev/");
        assert_eq!(config.links.external_scheme, "https://");
        assert!(!config.packages.include_tests);
        assert!(!config.packages.include_internal);
        assert!(config.templates_resolved.package.is_none());
    }

    #[test]
    fn test_default_links_match_resolver_defaults() {
        let config = Config::default_with_base(Path::new("/test"));
        let resolver = docmod_comment::LinkResolver::new("example.com/mod");

        let stdlib = docmod_comment::DocLink::parse("fmt.Println").unwrap();
        let external = docmod_comment::DocLink::parse("github.com/a/b.C").unwrap();

        assert_eq!(
            resolver.resolve(&stdlib),
            Some(format!("{}fmt#Println", config.links.stdlib_url))
        );
        assert_eq!(
            resolver.resolve(&external),
            Some(format!("{}github.com/a/b#C", config.links.external_scheme))
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.links.stdlib_url, "https://pkg.go.dev/");
        assert!(config.module.input.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[module]
input = "build/docs.json"
source_dir = "src"
display_name = "mymod"

[output]
dir = "public"

[links]
stdlib_url = "https://docs.example.org/"
external_scheme = "http://"

[templates]
package = "templates/package.html"
index = "templates/index.html"

[packages]
include_tests = true
include_internal = true
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.module_resolved.input,
            PathBuf::from("/project/build/docs.json")
        );
        assert_eq!(config.module_resolved.source_dir, PathBuf::from("/project/src"));
        assert_eq!(config.module_resolved.display_name.as_deref(), Some("mymod"));
        assert_eq!(config.output_resolved.dir, PathBuf::from("/project/public"));
        assert_eq!(config.links.stdlib_url, "https://docs.example.org/");
        assert_eq!(config.links.external_scheme, "http://");
        assert_eq!(
            config.templates_resolved.package,
            Some(PathBuf::from("/project/templates/package.html"))
        );
        assert_eq!(
            config.templates_resolved.index,
            Some(PathBuf::from("/project/templates/index.html"))
        );
        assert!(config.packages.include_tests);
        assert!(config.packages.include_internal);
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.module_resolved.input,
            PathBuf::from("/project/docmod.json")
        );
        assert_eq!(config.module_resolved.source_dir, PathBuf::from("/project/."));
        assert_eq!(config.output_resolved.dir, PathBuf::from("/project/site"));
    }

    #[test]
    fn test_parse_unknown_field_type_fails() {
        let result: Result<Config, _> = toml::from_str("[packages]\ninclude_tests = \"yes\"\n");
        assert!(result.is_err());
    }

    // ========================================================================
    // CLI settings
    // ========================================================================

    #[test]
    fn test_apply_cli_settings_paths() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            input: Some(PathBuf::from("/data/mod.json")),
            source_dir: Some(PathBuf::from("/src/mod")),
            output_dir: Some(PathBuf::from("/out")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.module_resolved.input, PathBuf::from("/data/mod.json"));
        assert_eq!(config.module_resolved.source_dir, PathBuf::from("/src/mod"));
        assert_eq!(config.output_resolved.dir, PathBuf::from("/out"));
    }

    #[test]
    fn test_apply_cli_settings_templates() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            package_template: Some(PathBuf::from("/t/package.html")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.templates_resolved.package,
            Some(PathBuf::from("/t/package.html"))
        );
        assert!(config.templates_resolved.index.is_none());
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.module_resolved.input,
            PathBuf::from("/test/docmod.json")
        );
        assert_eq!(config.output_resolved.dir, PathBuf::from("/test/site"));
    }

    // ========================================================================
    // Environment expansion
    // ========================================================================

    #[test]
    fn test_expand_env_vars_display_name() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var("DOCMOD_TEST_CONFIG_NAME", "Checkout");
        }
        let mut config: Config =
            toml::from_str("[module]\ndisplay_name = \"${DOCMOD_TEST_CONFIG_NAME}\"\n").unwrap();

        config.expand_env_vars().unwrap();

        assert_eq!(config.module.display_name.as_deref(), Some("Checkout"));
        unsafe {
            std::env::remove_var("DOCMOD_TEST_CONFIG_NAME");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_var() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::remove_var("DOCMOD_TEST_CONFIG_MISSING");
        }
        let mut config: Config =
            toml::from_str("[links]\nstdlib_url = \"${DOCMOD_TEST_CONFIG_MISSING}\"\n").unwrap();

        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "links.stdlib_url"));
    }

    // ========================================================================
    // Validation
    // ========================================================================

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_stdlib_url_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.links.stdlib_url = "pkg.go.dev/".to_owned();

        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("links.stdlib_url"));
    }

    #[test]
    fn test_validate_stdlib_url_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.links.stdlib_url = String::new();

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_validate_external_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.links.external_scheme = "https".to_owned();

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("links.external_scheme"));
    }

    #[test]
    fn test_validate_empty_display_name() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.module_resolved.display_name = Some(String::new());

        assert!(config.validate().is_err());
    }

    // ========================================================================
    // Loading
    // ========================================================================

    #[test]
    fn test_load_explicit_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("docmod.toml");
        std::fs::write(
            &path,
            "[module]\ninput = \"out/docmod.json\"\n\n[output]\ndir = \"html\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.module_resolved.input,
            temp_dir.path().join("out/docmod.json")
        );
        assert_eq!(config.output_resolved.dir, temp_dir.path().join("html"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_applies_cli_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("docmod.toml");
        std::fs::write(&path, "[output]\ndir = \"html\"\n").unwrap();
        let settings = CliSettings {
            output_dir: Some(PathBuf::from("/override")),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.output_resolved.dir, PathBuf::from("/override"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("docmod.toml");
        std::fs::write(&path, "[module\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_validates() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("docmod.toml");
        std::fs::write(&path, "[links]\nexternal_scheme = \"https:\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
