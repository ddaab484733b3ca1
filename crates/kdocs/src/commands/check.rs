//! `kdocs check` command implementation.

use std::path::PathBuf;

use clap::Args;
use kdocs_config::Config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover kdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded, the template is
    /// missing, or the menu has invalid entries.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        match &config.config_path {
            Some(path) => output.info(&format!("Config: {}", path.display())),
            None => output.info("Config: none found, using defaults"),
        }

        let mut problems = config.menu_problems();
        let template = &config.render_resolved.template;
        if !template.is_file() {
            problems.push(format!("render.template: {} not found", template.display()));
        }
        // Surfaces unreadable logo files.
        config.render_theme()?;

        if problems.is_empty() {
            output.success("Configuration OK");
            return Ok(());
        }
        for problem in &problems {
            output.warning(problem);
        }
        Err(CliError::Validation(format!(
            "{} configuration problem(s) found",
            problems.len()
        )))
    }
}
