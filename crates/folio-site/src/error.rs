//! Error types for page loading, validation and site builds.

use std::path::PathBuf;

/// A page that cannot be published.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Page has an empty id.
    #[error("{}: page has no id", display_source(.source_path.as_ref()))]
    MissingId {
        /// Source file, when the page came from disk.
        source_path: Option<PathBuf>,
    },
    /// Page has an empty title and no `# H1` to fall back on.
    #[error("page '{id}' has no title")]
    MissingTitle {
        /// Page id.
        id: String,
    },
    /// Slug is empty or escapes the output directory.
    #[error("page '{id}' has an invalid slug '{slug}'")]
    InvalidSlug {
        /// Page id.
        id: String,
        /// Offending slug.
        slug: String,
    },
    /// Page has no slug and its id cannot be used as an output path.
    #[error("page id '{id}' is not a valid output path; set a slug")]
    InvalidId {
        /// Offending id.
        id: String,
    },
    /// Two pages share an id.
    #[error("duplicate page id '{id}' ({} and {})", .first.display(), .second.display())]
    DuplicateId {
        /// Duplicated id.
        id: String,
        /// Source of the first page with the id.
        first: PathBuf,
        /// Source of the later page with the id.
        second: PathBuf,
    },
    /// Two pages would write the same output file.
    #[error("{} and {} both write {}", .first.display(), .second.display(), .output.display())]
    DuplicateOutput {
        /// Output path relative to the output directory.
        output: PathBuf,
        /// Source of the first page writing it.
        first: PathBuf,
        /// Source of the later page writing it.
        second: PathBuf,
    },
}

fn display_source(path: Option<&PathBuf>) -> String {
    path.map_or_else(|| "<memory>".to_owned(), |p| p.display().to_string())
}

/// Errors from loading, assembling or building pages.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// I/O error reading or writing a file.
    #[error("{}: {source}", .path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Malformed front matter or page YAML.
    #[error("{}: invalid page metadata: {message}", .path.display())]
    Metadata {
        /// Source file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
    /// A single page failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// One or more pages of a corpus failed validation.
    #[error("{} page(s) failed validation", .0.len())]
    Invalid(Vec<ValidationError>),
    /// Layout template is missing or unusable.
    #[error("layout error: {0}")]
    Layout(String),
}

impl SiteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Validation errors carried by this error, if any.
    #[must_use]
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(e) => std::slice::from_ref(e),
            Self::Invalid(errors) => errors,
            _ => &[],
        }
    }
}
