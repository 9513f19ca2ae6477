//! Leaf directive output.

use crate::Block;

/// Output from a leaf directive handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveOutput {
    /// Markdown spliced in place of the directive and parsed recursively.
    Markdown(String),
    /// Ready-made blocks spliced in place of the directive.
    Blocks(Vec<Block>),
    /// Leave the directive line as prose.
    Skip,
}

impl DirectiveOutput {
    /// Create markdown output.
    #[must_use]
    pub fn markdown(s: impl Into<String>) -> Self {
        Self::Markdown(s.into())
    }
}
