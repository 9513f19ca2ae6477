//! Content-lint diagnostics.
//!
//! A lint is a non-fatal content problem found while parsing or rendering.
//! The renderer always falls back to a safe default and reports the lint;
//! nothing is shown to the reader.

use std::fmt;

/// Category of a content-lint warning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LintKind {
    /// Admonition type is not a recognized kind.
    UnknownAdmonition,
    /// Selector group default does not name one of its panels.
    UnknownDefaultPanel,
    /// Selector group declares no panels.
    EmptySelectorGroup,
    /// Panel id repeats an earlier panel in the same group.
    DuplicatePanel,
    /// `::: tab` used outside a `::: tabs` group.
    OrphanPanel,
    /// Content inside a `::: tabs` group but outside every panel.
    LooseContent,
    /// Closing `:::` without an open container.
    StrayClose,
    /// Container still open at end of input.
    UnclosedContainer,
    /// Included file could not be resolved or read.
    IncludeFailed,
    /// Include nesting exceeded the configured depth.
    IncludeDepth,
    /// Page has no description.
    MissingDescription,
}

impl LintKind {
    /// Stable kebab-case code for reports.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::UnknownAdmonition => "unknown-admonition",
            Self::UnknownDefaultPanel => "unknown-default-panel",
            Self::EmptySelectorGroup => "empty-selector-group",
            Self::DuplicatePanel => "duplicate-panel",
            Self::OrphanPanel => "orphan-panel",
            Self::LooseContent => "loose-content",
            Self::StrayClose => "stray-close",
            Self::UnclosedContainer => "unclosed-container",
            Self::IncludeFailed => "include-failed",
            Self::IncludeDepth => "include-depth",
            Self::MissingDescription => "missing-description",
        }
    }
}

impl fmt::Display for LintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A content-lint warning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lint {
    /// Lint category.
    pub kind: LintKind,
    /// Source line (1-indexed), when known.
    pub line: Option<usize>,
    /// Human-readable message.
    pub message: String,
}

impl Lint {
    /// Create a lint without a source location.
    #[must_use]
    pub fn new(kind: LintKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            line: None,
            message: message.into(),
        }
    }

    /// Attach a source line.
    #[must_use]
    pub fn at(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Lint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {} [{}]", self.message, self.kind),
            None => write!(f, "{} [{}]", self.message, self.kind),
        }
    }
}
