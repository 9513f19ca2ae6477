//! `::include[path]` leaf directive.

use super::{DirectiveArgs, DirectiveContext, DirectiveOutput, LeafDirective};
use crate::{Lint, LintKind};

/// Splices another markdown file into the page.
///
/// Paths resolve against the parser's base directory and may not escape it.
/// The included text is parsed like page content, so it may itself contain
/// directives and further includes.
#[derive(Debug, Default)]
pub struct IncludeDirective;

impl IncludeDirective {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LeafDirective for IncludeDirective {
    fn name(&self) -> &'static str {
        "include"
    }

    fn process(
        &mut self,
        args: DirectiveArgs,
        ctx: &DirectiveContext,
    ) -> Result<DirectiveOutput, Lint> {
        if args.content.is_empty() {
            return Err(Lint::new(LintKind::IncludeFailed, "::include without a path"));
        }

        let path = ctx.resolve_path_safe(&args.content).ok_or_else(|| {
            Lint::new(
                LintKind::IncludeFailed,
                format!(
                    "cannot include '{}': not found under {}",
                    args.content,
                    ctx.base_dir.display()
                ),
            )
        })?;

        ctx.read(&path).map(DirectiveOutput::Markdown).map_err(|e| {
            Lint::new(
                LintKind::IncludeFailed,
                format!("cannot include '{}': {e}", args.content),
            )
        })
    }
}
