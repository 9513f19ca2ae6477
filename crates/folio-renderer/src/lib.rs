//! Block model, directive parsing and HTML rendering for Folio pages.
//!
//! A page body is an ordered list of [`Block`]s: markdown prose, code samples,
//! admonition call-outs, and selector groups (tabbed panels that share a
//! persisted selection). This crate turns authored markdown into blocks and
//! blocks into HTML.
//!
//! # Architecture
//!
//! Rendering is split into two phases:
//!
//! 1. **Parsing** ([`BlockParser`]): walks the markdown line by line, tracks
//!    code fences, and builds the block tree from `:::` container directives
//!    and `::` leaf directives (such as `::include`).
//!
//! 2. **Rendering** ([`HtmlRenderer`]): renders prose through pulldown-cmark,
//!    styles admonitions, and resolves every selector group against a
//!    [`SelectorSession`] so the active panel reflects the reader's stored
//!    choice.
//!
//! Content problems never fail a render. They are reported as [`Lint`]s.
//!
//! # Example
//!
//! ```
//! use folio_renderer::{BlockParser, HtmlRenderer, SelectionStore, SelectorSession};
//!
//! let markdown = r#"
//! ::: tabs{group="language" default="js"}
//! ::: tab[JavaScript]{#js}
//! Install with npm.
//! :::
//! ::: tab[Dart]{#dart}
//! Install with pub.
//! :::
//! :::
//! "#;
//!
//! let mut parser = BlockParser::new();
//! let blocks = parser.parse(markdown);
//!
//! let store: SelectionStore = [("language", "dart")].into_iter().collect();
//! let mut session = SelectorSession::new(store);
//! let result = HtmlRenderer::new().render(&blocks, &mut session);
//!
//! assert!(result.html.contains(r#"role="tablist""#));
//! assert!(result.lints.is_empty());
//! ```

mod admonition;
mod block;
pub mod directive;
mod html;
mod lint;
mod parse;
mod selection;
mod tabs;
mod util;

pub use admonition::{AdmonitionKind, render_admonition};
pub use block::{Admonition, Block, Panel, SelectorGroup};
pub use html::{HtmlRenderer, RenderResult};
pub use lint::{Lint, LintKind};
pub use parse::{BlockParser, ParserConfig, extract_title};
pub use selection::{GroupId, SelectError, SelectionStore, SelectorSession};
pub use util::escape_html;
