//! CLI command implementations.

mod build;
mod check;
mod render;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_renderer::SelectionStore;
use folio_site::{DefaultLayout, Layout, RenderOptions, Site, SiteInfo, TemplateLayout};

use crate::error::CliError;
use crate::output::Output;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Docs source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Render selector groups as CSS-only radio inputs (overrides config).
    #[arg(long)]
    static_tabs: bool,
}

impl CommonArgs {
    /// CLI overrides from the shared options; commands add their own.
    fn settings(&self) -> CliSettings {
        CliSettings {
            source_dir: self.source_dir.clone(),
            static_tabs: self.static_tabs.then_some(true),
            ..CliSettings::default()
        }
    }

    fn load_config(&self, settings: &CliSettings) -> Result<Config, CliError> {
        let config = Config::load(self.config.as_deref(), Some(settings))?;
        tracing::debug!(
            config = ?config.config_path,
            source_dir = %config.docs_resolved.source_dir.display(),
            "Configuration loaded"
        );
        Ok(config)
    }
}

/// Layout configured for the site: the template when set, else the built-in one.
fn layout(config: &Config) -> Result<Box<dyn Layout>, CliError> {
    let site = SiteInfo {
        title: config.site.title.clone(),
        base_url: config.site.base_url.clone(),
    };
    Ok(match &config.layout_template {
        Some(path) => Box::new(TemplateLayout::from_file(path, site)?),
        None => Box::new(DefaultLayout::new(site)),
    })
}

/// Selection store seeded from `[tabs] selections`.
fn initial_store(config: &Config) -> SelectionStore {
    config
        .tabs
        .selections
        .iter()
        .map(|(key, panel)| (key.as_str(), panel.as_str()))
        .collect()
}

fn render_options(config: &Config) -> RenderOptions {
    RenderOptions {
        static_tabs: config.tabs.static_tabs,
        gfm: config.markdown.gfm,
    }
}

/// Load the site, printing every validation failure.
fn load_site(config: &Config, output: &Output) -> Result<Site, CliError> {
    output.info(&format!(
        "Source: {}",
        config.docs_resolved.source_dir.display()
    ));
    Site::load(&config.docs_resolved.source_dir).map_err(|err| {
        output.validation_errors(err.validation_errors());
        err.into()
    })
}
