//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod json;

pub(crate) use build::BuildArgs;
pub(crate) use json::JsonArgs;

use docmod_config::Config;
use docmod_site::{FsSource, Module, ModuleBuilder, ModuleOptions, RawModule};

use crate::error::CliError;
use crate::output::Output;

/// Module build options from the loaded configuration.
fn module_options(config: &Config) -> ModuleOptions {
    ModuleOptions {
        display_name: config.module_resolved.display_name.clone(),
        include_tests: config.packages.include_tests,
        include_internal: config.packages.include_internal,
        stdlib_url: config.links.stdlib_url.clone(),
        external_scheme: config.links.external_scheme.clone(),
    }
}

/// Load the extractor output and build the module documentation.
///
/// Reassociation warnings are printed and do not fail the build.
fn load_module(config: &Config, output: &Output) -> Result<Module, CliError> {
    tracing::debug!(input = %config.module_resolved.input.display(), "Loading extractor output");
    let raw = RawModule::load(&config.module_resolved.input)?;
    let source = FsSource::new(config.module_resolved.source_dir.clone());
    let module = ModuleBuilder::new(&source, module_options(config)).build(&raw)?;

    for warning in module.warnings() {
        output.warning(&format!("Warning: {warning}"));
    }

    Ok(module)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use docmod_config::CliSettings;
    use pretty_assertions::assert_eq;

    use super::*;

    const INPUT: &str = r#"{
        "import_path": "example.com/mod",
        "packages": [
            {
                "name": "mod",
                "rel_path": ".",
                "doc": "Package mod is the root.\n",
                "funcs": [
                    {"name": "New", "doc": "doc: type=Missing\n", "source": {"code": "func New()"}}
                ]
            },
            {"name": "mod_test", "rel_path": ".", "doc": ""}
        ]
    }"#;

    fn write_project(dir: &Path, config: &str) -> Config {
        std::fs::write(dir.join("docmod.json"), INPUT).unwrap();
        std::fs::write(dir.join("docmod.toml"), config).unwrap();
        Config::load(Some(&dir.join("docmod.toml")), None).unwrap()
    }

    #[test]
    fn test_module_options_from_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = write_project(
            temp_dir.path(),
            "[module]\ndisplay_name = \"Mod\"\n\n[packages]\ninclude_tests = true\n\n\
             [links]\nstdlib_url = \"https://docs.example.org/\"\n",
        );

        let options = module_options(&config);

        assert_eq!(options.display_name.as_deref(), Some("Mod"));
        assert!(options.include_tests);
        assert!(!options.include_internal);
        assert_eq!(options.stdlib_url, "https://docs.example.org/");
        assert_eq!(options.external_scheme, "https://");
    }

    #[test]
    fn test_load_module() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = write_project(temp_dir.path(), "");

        let module = load_module(&config, &Output::new()).unwrap();

        assert_eq!(module.name, "mod");
        let names: Vec<_> = module.packages().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["mod"]);
        assert_eq!(module.warnings().len(), 1);
    }

    #[test]
    fn test_load_module_missing_input() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = CliSettings {
            input: Some(temp_dir.path().join("missing.json")),
            ..CliSettings::default()
        };
        std::fs::write(temp_dir.path().join("docmod.toml"), "").unwrap();
        let config =
            Config::load(Some(&temp_dir.path().join("docmod.toml")), Some(&settings)).unwrap();

        let result = load_module(&config, &Output::new());

        assert!(matches!(result, Err(CliError::Build(_))));
    }
}
