//! `folio check` command implementation.

use clap::Args;
use folio_config::CliSettings;

use super::{CommonArgs, initial_store, layout, load_site, render_options};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Exit with an error when any content warning is found.
    #[arg(long)]
    deny_warnings: bool,
}

impl CheckArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let settings = CliSettings {
            deny_warnings: self.deny_warnings.then_some(true),
            ..self.common.settings()
        };
        let config = self.common.load_config(&settings)?;
        let site = load_site(&config, output)?;

        let layout = layout(&config)?;
        let lints = site.check(
            layout.as_ref(),
            render_options(&config),
            &initial_store(&config),
        )?;

        output.lints(&lints);
        output.highlight(&format!(
            "{} page(s) checked, {} warning(s)",
            site.pages().len(),
            lints.len()
        ));

        if config.lint.deny_warnings && !lints.is_empty() {
            return Err(CliError::DeniedWarnings(lints.len()));
        }
        output.success("No blocking problems found");
        Ok(())
    }
}
