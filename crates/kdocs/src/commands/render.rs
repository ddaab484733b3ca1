//! `kdocs render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use kdocs_config::{CliSettings, Config};
use kdocs_render::{PageParams, PageRenderer};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown files to render.
    #[arg(required = true)]
    sources: Vec<PathBuf>,

    /// Path to configuration file (default: auto-discover kdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTML page template (overrides config).
    #[arg(short, long, env = "KDOCS_TEMPLATE")]
    template: Option<PathBuf>,

    /// Output directory (overrides config). Without one, a single page is
    /// written to stdout.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Page title; disables title detection from the first heading.
    #[arg(long)]
    title: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a file cannot be read or written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            template: self.template,
            output_dir: self.output_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let output_dir = config.render_resolved.output_dir.as_deref();
        if output_dir.is_none() && self.sources.len() > 1 {
            return Err(CliError::Validation(
                "--output-dir is required when rendering more than one file".to_owned(),
            ));
        }

        let template = read_file(&config.render_resolved.template)?;
        let theme = config.render_theme()?;
        let renderer = PageRenderer::new().with_defaults(config.render_defaults());
        let page_params = self.title.map(|title| PageParams::from([("name".to_owned(), title)]));

        if let Some(dir) = output_dir {
            std::fs::create_dir_all(dir)?;
        }

        let mut warning_count = 0;
        for source_path in &self.sources {
            let source = read_file(source_path)?;
            let result = renderer.render(&template, &source, &theme, page_params.as_ref());
            tracing::info!(
                source = %source_path.display(),
                title = ?result.title,
                warnings = result.warnings.len(),
                "Rendered page"
            );

            for warning in &result.warnings {
                output.warning(&format!("{}: {warning}", source_path.display()));
            }
            warning_count += result.warnings.len();

            if let Some(dir) = output_dir {
                let target = output_path(dir, source_path);
                std::fs::write(&target, &result.html)?;
                output.info(&format!("Wrote {}", target.display()));
            } else {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(result.html.as_bytes())?;
                stdout.flush()?;
            }
        }

        if warning_count == 0 {
            output.success(&format!("Rendered {} page(s)", self.sources.len()));
        } else {
            output.warning(&format!(
                "Rendered {} page(s) with {warning_count} warning(s)",
                self.sources.len()
            ));
        }
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Output file for a source: its stem with an `.html` extension inside `dir`.
fn output_path(dir: &Path, source: &Path) -> PathBuf {
    let mut name = source.file_stem().unwrap_or(source.as_os_str()).to_os_string();
    name.push(".html");
    dir.join(name)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_output_path_uses_stem() {
        assert_eq!(
            output_path(Path::new("/out"), Path::new("docs/guide.md")),
            PathBuf::from("/out/guide.html")
        );
    }

    #[test]
    fn test_output_path_without_extension() {
        assert_eq!(
            output_path(Path::new("out"), Path::new("README")),
            PathBuf::from("out/README.html")
        );
    }

    #[test]
    fn test_output_path_keeps_dotted_stem() {
        assert_eq!(
            output_path(Path::new("out"), Path::new("docs/release.v1.md")),
            PathBuf::from("out/release.v1.html")
        );
        assert_ne!(
            output_path(Path::new("out"), Path::new("notes.v1.md")),
            output_path(Path::new("out"), Path::new("notes.v2.md"))
        );
    }

    #[test]
    fn test_read_file_reports_path() {
        let err = read_file(Path::new("/nonexistent/page.md")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read /nonexistent/page.md"));
    }
}
