//! `docmod build` command implementation.

use std::path::PathBuf;

use clap::Args;
use docmod_config::{CliSettings, Config};
use docmod_render::{BuildConfig, StaticSiteBuilder};

use super::load_module;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover docmod.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extractor output file (overrides config).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Module source directory for code spans (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Package page template (overrides config).
    #[arg(long)]
    package_template: Option<PathBuf>,

    /// Sitemap page template (overrides config).
    #[arg(long)]
    index_template: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input, source spans or page
    /// writing fail.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            input: self.input,
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            package_template: self.package_template,
            index_template: self.index_template,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Input: {}",
            config.module_resolved.input.display()
        ));
        output.info(&format!("Output: {}", config.output_resolved.dir.display()));

        let module = load_module(&config, &output)?;

        let builder = StaticSiteBuilder::new(&BuildConfig {
            package_template: config.templates_resolved.package.clone(),
            index_template: config.templates_resolved.index.clone(),
        })?;
        let written = builder.build(&module, &config.output_resolved.dir)?;

        output.success(&format!(
            "Built {} pages for {} to {}",
            written.len(),
            module.import_path,
            config.output_resolved.dir.display()
        ));
        Ok(())
    }
}
