//! Leaf directive trait.

use super::{DirectiveArgs, DirectiveContext, DirectiveOutput};
use crate::Lint;

/// Handler for leaf directives: `::name[content]{attrs}` on a line of its own.
///
/// Handlers implement `Send` only (not `Sync`) since each page gets its own
/// parser instance.
pub trait LeafDirective: Send {
    /// Directive name matched against `::name`.
    fn name(&self) -> &str;

    /// Process the directive.
    ///
    /// Returning `Err` records the lint and leaves the directive line as prose.
    fn process(&mut self, args: DirectiveArgs, ctx: &DirectiveContext)
    -> Result<DirectiveOutput, Lint>;
}
