//! Page body blocks.

/// One block of a page body.
///
/// Blocks nest: admonitions and selector panels own their own block lists.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Block {
    /// Markdown prose, rendered with pulldown-cmark.
    Prose {
        /// Markdown source.
        markdown: String,
    },
    /// Code sample. The source is opaque text.
    Code {
        /// Language from the fence info string.
        #[cfg_attr(feature = "serde", serde(default))]
        language: Option<String>,
        /// Code without the surrounding fences.
        source: String,
    },
    /// Typed call-out wrapping nested content.
    Admonition(Admonition),
    /// Mutually exclusive panels sharing a persisted selection.
    Selector(SelectorGroup),
}

impl Block {
    /// Create a prose block.
    #[must_use]
    pub fn prose(markdown: impl Into<String>) -> Self {
        Self::Prose {
            markdown: markdown.into(),
        }
    }

    /// Create a code block.
    #[must_use]
    pub fn code(language: Option<&str>, source: impl Into<String>) -> Self {
        Self::Code {
            language: language.map(str::to_owned),
            source: source.into(),
        }
    }
}

/// Call-out block such as a note or a warning.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Admonition {
    /// Type name as authored (`note`, `warning`, ...).
    ///
    /// Names that are not a known [`AdmonitionKind`](crate::AdmonitionKind)
    /// render as plain content.
    pub kind: String,
    /// Optional short heading.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub label: Option<String>,
    /// Nested blocks.
    #[cfg_attr(feature = "serde", serde(default))]
    pub content: Vec<Block>,
}

/// A set of mutually exclusive panels bound to a selection key.
///
/// Groups sharing a `key` share the reader's choice: picking "Dart" in one
/// group picks it in every other group on the page that has a `dart` panel.
/// The group never owns the selection; see
/// [`SelectorSession`](crate::SelectorSession).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectorGroup {
    /// Persisted-selection namespace (e.g. `"language"`).
    ///
    /// Groups without a key keep a private selection.
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "group", skip_serializing_if = "Option::is_none")
    )]
    pub key: Option<String>,
    /// Panel selected when no stored selection applies.
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "default", skip_serializing_if = "Option::is_none")
    )]
    pub default_panel: Option<String>,
    /// Panels in declaration order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub panels: Vec<Panel>,
}

impl SelectorGroup {
    /// Position of the panel with the given id.
    ///
    /// The first declared panel wins when ids repeat.
    #[must_use]
    pub fn position(&self, panel_id: &str) -> Option<usize> {
        self.panels.iter().position(|p| p.id == panel_id)
    }

    /// Check whether the group declares a panel with the given id.
    #[must_use]
    pub fn contains(&self, panel_id: &str) -> bool {
        self.position(panel_id).is_some()
    }

    /// Drop panels whose id repeats an earlier panel.
    ///
    /// Returns the ids of the dropped panels, in order.
    pub fn dedupe_panels(&mut self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::with_capacity(self.panels.len());
        let mut dropped = Vec::new();
        self.panels.retain(|panel| {
            if seen.contains(&panel.id) {
                dropped.push(panel.id.clone());
                false
            } else {
                seen.push(panel.id.clone());
                true
            }
        });
        dropped
    }
}

/// One labeled content variant within a [`SelectorGroup`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Panel {
    /// Id unique within the group. Selection keys match on ids, never labels.
    pub id: String,
    /// Button label.
    pub label: String,
    /// Nested blocks.
    #[cfg_attr(feature = "serde", serde(default))]
    pub content: Vec<Block>,
}

impl Panel {
    /// Create a panel.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, content: Vec<Block>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            content,
        }
    }
}
