//! `folio build` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::CliSettings;

use super::{CommonArgs, initial_store, layout, load_site, render_options};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Site base URL (overrides config).
    #[arg(long, env = "FOLIO_BASE_URL")]
    base_url: Option<String>,

    /// Fail when any page produces content warnings.
    #[arg(long)]
    deny_warnings: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let settings = CliSettings {
            output_dir: self.output_dir.clone(),
            base_url: self.base_url.clone(),
            deny_warnings: self.deny_warnings.then_some(true),
            ..self.common.settings()
        };
        let config = self.common.load_config(&settings)?;
        let output_dir = &config.docs_resolved.output_dir;

        let site = load_site(&config, output)?;
        output.info(&format!("Output: {}", output_dir.display()));

        let layout = layout(&config)?;
        let report = site.build(
            output_dir,
            layout.as_ref(),
            render_options(&config),
            &initial_store(&config),
        )?;

        output.lints(&report.lints);
        if config.lint.deny_warnings && !report.lints.is_empty() {
            return Err(CliError::DeniedWarnings(report.lints.len()));
        }

        output.success(&format!(
            "Built {} page(s) to {}",
            report.written.len(),
            output_dir.display()
        ));
        Ok(())
    }
}
