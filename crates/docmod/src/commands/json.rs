//! `docmod json` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use docmod_config::{CliSettings, Config};

use super::load_module;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the json command.
#[derive(Args)]
pub(crate) struct JsonArgs {
    /// Path to configuration file (default: auto-discover docmod.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extractor output file (overrides config).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Module source directory for code spans (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

impl JsonArgs {
    /// Execute the json command, writing the module document to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input or source spans fail.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            input: self.input,
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let module = load_module(&config, &output)?;

        let json = if self.pretty {
            serde_json::to_string_pretty(&module)?
        } else {
            serde_json::to_string(&module)?
        };

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}")?;
        Ok(())
    }
}
