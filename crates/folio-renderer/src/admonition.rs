//! Admonition call-outs.

use std::fmt::Write;
use std::str::FromStr;

use crate::{Admonition, Lint, LintKind, escape_html};

/// Recognized admonition types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdmonitionKind {
    Note,
    Tip,
    Info,
    Important,
    Warning,
    Danger,
    Caution,
}

impl AdmonitionKind {
    /// All recognized kinds.
    pub const ALL: [Self; 7] = [
        Self::Note,
        Self::Tip,
        Self::Info,
        Self::Important,
        Self::Warning,
        Self::Danger,
        Self::Caution,
    ];

    /// Name used in directive syntax and CSS classes.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Info => "info",
            Self::Important => "important",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Caution => "caution",
        }
    }

    /// Heading shown when the admonition has no label.
    #[must_use]
    pub fn default_title(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Tip => "Tip",
            Self::Info => "Info",
            Self::Important => "Important",
            Self::Warning => "Warning",
            Self::Danger => "Danger",
            Self::Caution => "Caution",
        }
    }
}

impl FromStr for AdmonitionKind {
    type Err = ();

    /// Parse a kind name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Render an admonition around its already-rendered body.
///
/// Recognized kinds produce a styled call-out. An unrecognized kind fails
/// closed: the body is emitted without any wrapper or styling (the label, if
/// any, as a plain paragraph) and a [`LintKind::UnknownAdmonition`] lint is
/// returned.
///
/// ```
/// use folio_renderer::{Admonition, LintKind, render_admonition};
///
/// let admonition = Admonition { kind: "callout-x".to_owned(), label: None, content: Vec::new() };
/// let (html, lint) = render_admonition(&admonition, "<p>Body</p>");
///
/// assert_eq!(html, "<p>Body</p>");
/// assert_eq!(lint.unwrap().kind, LintKind::UnknownAdmonition);
/// ```
#[must_use]
pub fn render_admonition(admonition: &Admonition, body_html: &str) -> (String, Option<Lint>) {
    let label = admonition
        .label
        .as_deref()
        .map(str::trim)
        .filter(|label| !label.is_empty());

    let Ok(kind) = admonition.kind.parse::<AdmonitionKind>() else {
        let mut out = String::with_capacity(body_html.len() + 32);
        if let Some(label) = label {
            let _ = write!(out, "<p>{}</p>", escape_html(label));
        }
        out.push_str(body_html);

        let lint = Lint::new(
            LintKind::UnknownAdmonition,
            format!(
                "unknown admonition type '{}'; rendered as plain content",
                admonition.kind
            ),
        );
        return (out, Some(lint));
    };

    let mut out = String::with_capacity(body_html.len() + 160);
    let _ = write!(
        out,
        r#"<div class="admonition admonition-{name}"><div class="admonition-title">{title}</div><div class="admonition-content">{body_html}</div></div>"#,
        name = kind.name(),
        title = escape_html(label.unwrap_or(kind.default_title())),
    );
    (out, None)
}
