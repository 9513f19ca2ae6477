//! `CommonMark` directive syntax.
//!
//! Folio recognizes two directive forms, each taking a whole line:
//!
//! - **Container** (`:::name[label]{attrs}` ... `:::`): wraps blocks. Used for
//!   selector groups (`tabs` / `tab`) and admonitions (`note`, `warning`, ...).
//! - **Leaf** (`::name[content]{attrs}`): self-contained block handled by a
//!   registered [`LeafDirective`], such as [`IncludeDirective`].
//!
//! Directive syntax inside fenced code blocks is left untouched.
//!
//! # Example
//!
//! ```
//! use folio_renderer::directive::{
//!     DirectiveArgs, DirectiveContext, DirectiveOutput, LeafDirective,
//! };
//! use folio_renderer::{Block, BlockParser, Lint};
//!
//! struct VersionDirective;
//!
//! impl LeafDirective for VersionDirective {
//!     fn name(&self) -> &str { "version" }
//!
//!     fn process(
//!         &mut self,
//!         _args: DirectiveArgs,
//!         _ctx: &DirectiveContext,
//!     ) -> Result<DirectiveOutput, Lint> {
//!         Ok(DirectiveOutput::markdown("Current version: **2.1**"))
//!     }
//! }
//!
//! let mut parser = BlockParser::new().with_leaf(VersionDirective);
//! let blocks = parser.parse("::version");
//! assert_eq!(blocks, vec![Block::prose("Current version: **2.1**\n")]);
//! ```

mod args;
mod context;
mod fence;
mod include;
mod leaf;
mod output;
mod parser;

pub use args::DirectiveArgs;
pub use context::DirectiveContext;
pub use include::IncludeDirective;
pub use leaf::LeafDirective;
pub use output::DirectiveOutput;

pub(crate) use fence::{FenceEvent, FenceTracker};
pub(crate) use parser::{ContainerLine, parse_container_line, parse_leaf_line};
