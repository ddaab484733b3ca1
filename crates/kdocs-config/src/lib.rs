//! Configuration management for kdocs.
//!
//! Parses `kdocs.toml` configuration files with serde and provides
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
//! - `theme.name`
//! - `theme.logo`
//! - `theme.docs_logo`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use kdocs_render::{Defaults, DocMenuEntry, Theme, is_valid_link};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override page template path.
    pub template: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "kdocs.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Render paths (relative strings from TOML).
    render: RenderConfigRaw,
    /// Theme: product name, logos and navigation menu.
    pub theme: ThemeConfig,
    /// Extra or overriding default tables.
    pub defaults: DefaultsConfig,

    /// Resolved render configuration (set after loading).
    #[serde(skip)]
    pub render_resolved: RenderConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw render configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RenderConfigRaw {
    template: Option<String>,
    output_dir: Option<String>,
}

/// Resolved render configuration with absolute paths.
#[derive(Debug, Default)]
pub struct RenderConfig {
    /// HTML page template.
    pub template: PathBuf,
    /// Directory for rendered pages; `None` writes a single page to stdout.
    pub output_dir: Option<PathBuf>,
    /// Directory holding the config file; logo paths resolve against it.
    pub base_dir: PathBuf,
}

/// Theme configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Product name (`@targetname@`).
    pub name: Option<String>,
    /// Logo: inline SVG, data URI, URL, or a file path relative to the config.
    pub logo: Option<String>,
    /// Documentation logo; enables `@targetlogo@`.
    pub docs_logo: Option<String>,
    /// Navigation menu.
    pub menu: Vec<DocMenuEntry>,
}

/// Default table entries layered over the built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Box templates.
    pub boxes: BTreeMap<String, String>,
    /// Macro bodies.
    pub macros: BTreeMap<String, String>,
    /// Setting bodies.
    pub settings: BTreeMap<String, String>,
    /// Menu templates.
    pub menus: BTreeMap<String, String>,
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
        /// Config field path (e.g., "`theme.logo`").
        field: String,
        /// Error message (e.g., "${`KDOCS_LOGO`} not set").
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

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `kdocs.toml` in current directory and parents.
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
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(template) = &settings.template {
            self.render_resolved.template.clone_from(template);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.render_resolved.output_dir = Some(output_dir.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
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
            render: RenderConfigRaw::default(),
            theme: ThemeConfig::default(),
            defaults: DefaultsConfig::default(),
            render_resolved: RenderConfig {
                template: base.join("template.html"),
                output_dir: None,
                base_dir: base.to_path_buf(),
            },
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
        tracing::debug!(path = %path.display(), "Loaded configuration");

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Menu links are not checked here; see [`menu_problems`](Self::menu_problems).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(template) = &self.render.template {
            require_non_empty(template, "render.template")?;
        }
        if let Some(name) = &self.theme.name {
            require_non_empty(name, "theme.name")?;
        }
        Ok(())
    }

    /// Describe every menu entry that would render as an inline error.
    #[must_use]
    pub fn menu_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        collect_menu_problems(&self.theme.menu, "theme.menu", &mut problems);
        problems
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.theme.name, "theme.name")?;
        expand::expand_opt(&mut self.theme.logo, "theme.logo")?;
        expand::expand_opt(&mut self.theme.docs_logo, "theme.docs_logo")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.render_resolved = RenderConfig {
            template: config_dir.join(self.render.template.as_deref().unwrap_or("template.html")),
            output_dir: self.render.output_dir.as_deref().map(|dir| config_dir.join(dir)),
            base_dir: config_dir.to_path_buf(),
        };
    }

    /// Built-in default tables with the `[defaults]` entries layered on top.
    #[must_use]
    pub fn render_defaults(&self) -> Defaults {
        let mut defaults = Defaults::builtin();
        for (name, body) in &self.defaults.boxes {
            defaults = defaults.with_box(name, body);
        }
        for (name, body) in &self.defaults.macros {
            defaults = defaults.with_macro(name, body);
        }
        for (name, body) in &self.defaults.settings {
            defaults = defaults.with_setting(name, body);
        }
        for (name, body) in &self.defaults.menus {
            defaults = defaults.with_menu(name, body);
        }
        defaults
    }

    /// Build the render theme.
    ///
    /// Logo values naming an existing file (relative to the config file) are
    /// replaced by the file's content.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if a logo file exists but cannot be read.
    pub fn render_theme(&self) -> Result<Theme, ConfigError> {
        Ok(Theme {
            name: self.theme.name.clone(),
            logo: self.load_logo(self.theme.logo.as_deref())?,
            docs_logo: self.load_logo(self.theme.docs_logo.as_deref())?,
            doc_menu: self.theme.menu.clone(),
        })
    }

    fn load_logo(&self, value: Option<&str>) -> Result<Option<String>, ConfigError> {
        let Some(value) = value else {
            return Ok(None);
        };
        let path = self.render_resolved.base_dir.join(value);
        if is_logo_reference(value) || !path.is_file() {
            return Ok(Some(value.to_owned()));
        }
        tracing::debug!(path = %path.display(), "Reading logo file");
        Ok(Some(std::fs::read_to_string(path)?))
    }
}

/// Whether a logo value is markup or a URI rather than a file path.
fn is_logo_reference(value: &str) -> bool {
    let value = value.trim_start();
    value.starts_with('<')
        || value.starts_with("data:")
        || value.starts_with("http://")
        || value.starts_with("https://")
}

fn collect_menu_problems(entries: &[DocMenuEntry], field: &str, problems: &mut Vec<String>) {
    for (idx, entry) in entries.iter().enumerate() {
        let entry_field = format!("{field}[{idx}]");
        if let Some(subitems) = &entry.subitems {
            collect_menu_problems(subitems, &format!("{entry_field}.subitems"), problems);
        } else {
            match entry.path.as_deref() {
                Some(path) if is_valid_link(path) => {}
                None if entry.is_divider() => {}
                Some(path) => problems.push(format!(
                    "{entry_field} ({}): invalid link {path:?}, expected an absolute path or http(s) URL",
                    entry.name
                )),
                None => problems.push(format!("{entry_field} ({}): missing path", entry.name)),
            }
        }
    }
}
