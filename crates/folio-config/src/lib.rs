//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [docs]
//! source_dir = "docs"
//! output_dir = "build"
//!
//! [site]
//! title = "My Docs"
//! base_url = "${DOCS_BASE_URL:-/}"
//!
//! [layout]
//! template = "layout.html"
//!
//! [tabs]
//! static = false
//! selections = { language = "js" }
//!
//! [markdown]
//! gfm = true
//!
//! [lint]
//! deny_warnings = false
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `site.title` and `site.base_url` support `${VAR}` (error if unset) and
//! `${VAR:-default}`.

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override build output directory.
    pub output_dir: Option<PathBuf>,
    /// Override site base URL.
    pub base_url: Option<String>,
    /// Override static tabs flag.
    pub static_tabs: Option<bool>,
    /// Override deny-warnings flag.
    pub deny_warnings: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation paths (relative strings from TOML).
    docs: DocsConfigRaw,
    /// Site-wide values.
    pub site: SiteConfig,
    /// Layout template (relative string from TOML).
    layout: LayoutConfigRaw,
    /// Selector group rendering.
    pub tabs: TabsConfig,
    /// Markdown options.
    pub markdown: MarkdownConfig,
    /// Lint policy.
    pub lint: LintConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved layout template path (set after loading).
    #[serde(skip)]
    pub layout_template: Option<PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved documentation paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for pages.
    pub source_dir: PathBuf,
    /// Directory receiving built HTML.
    pub output_dir: PathBuf,
}

/// Site-wide values.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title shown by layouts.
    pub title: String,
    /// Base URL for links back to the site root.
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            base_url: "/".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LayoutConfigRaw {
    template: Option<String>,
}

/// Selector group rendering configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    /// Render groups as CSS-only radio inputs instead of ARIA tabs.
    #[serde(rename = "static")]
    pub static_tabs: bool,
    /// Initial selection store contents (selection key -> panel id).
    pub selections: BTreeMap<String, String>,
}

/// Markdown configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Enable GitHub Flavored Markdown in prose.
    pub gfm: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { gfm: true }
    }
}

/// Lint policy.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Treat content lints as errors in `folio check` and `folio build`.
    pub deny_warnings: bool,
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
        /// Config field path (e.g., "`site.base_url`").
        field: String,
        /// Error message (e.g., "${`DOCS_BASE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
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
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(base_url) = &settings.base_url {
            self.site.base_url.clone_from(base_url);
        }
        if let Some(static_tabs) = settings.static_tabs {
            self.tabs.static_tabs = static_tabs;
        }
        if let Some(deny_warnings) = settings.deny_warnings {
            self.lint.deny_warnings = deny_warnings;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        discover_from(&current)
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            site: SiteConfig::default(),
            layout: LayoutConfigRaw::default(),
            tabs: TabsConfig::default(),
            markdown: MarkdownConfig::default(),
            lint: LintConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                output_dir: base.join("build"),
            },
            layout_template: None,
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
    /// Called automatically after loading from file and after applying CLI
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        require_non_empty(&self.site.base_url, "site.base_url")?;
        self.validate_tabs()?;

        if let Some(template) = &self.layout_template
            && !template.is_file()
        {
            return Err(ConfigError::Validation(format!(
                "layout.template not found: {}",
                template.display()
            )));
        }

        Ok(())
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        let docs = &self.docs_resolved;
        if docs.source_dir == docs.output_dir {
            return Err(ConfigError::Validation(
                "docs.output_dir must differ from docs.source_dir".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_tabs(&self) -> Result<(), ConfigError> {
        for (key, panel_id) in &self.tabs.selections {
            require_non_empty(key, "tabs.selections key")?;
            require_non_empty(panel_id, &format!("tabs.selections.{key}"))?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.title = expand::expand_env(&self.site.title, "site.title")?;
        self.site.base_url = expand::expand_env(&self.site.base_url, "site.base_url")?;
        Ok(())
    }

    /// Resolve relative paths against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            output_dir: resolve(self.docs.output_dir.as_deref(), "build"),
        };
        self.layout_template = self
            .layout
            .template
            .as_deref()
            .map(|template| config_dir.join(template));
    }
}

/// Walk from `start` up through its parents looking for `folio.toml`.
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
