//! CLI error types.

use folio_config::ConfigError;
use folio_site::SiteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0} content warning(s) with deny_warnings enabled")]
    DeniedWarnings(usize),
}
