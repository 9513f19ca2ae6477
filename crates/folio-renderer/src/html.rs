//! HTML rendering of block trees.

use std::borrow::Cow;
use std::fmt::Write;

use pulldown_cmark::{Options, Parser, html};

use crate::tabs::{render_group_open, render_panel_open};
use crate::{Block, Lint, SelectorGroup, SelectorSession, escape_html, render_admonition};

/// Result of rendering a page body.
#[derive(Clone, Debug, Default)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Content problems found while rendering (unknown admonitions, unknown
    /// default panels, empty groups, ...).
    pub lints: Vec<Lint>,
}

/// Renders [`Block`] trees to HTML.
///
/// Each selector group is registered with the caller's [`SelectorSession`],
/// and the panel the session resolves is rendered active. The session
/// outlives the render, so a host can apply further selections to the same
/// groups and re-render.
///
/// # Example
///
/// ```
/// use folio_renderer::{Block, HtmlRenderer, SelectionStore, SelectorSession};
///
/// let blocks = vec![Block::prose("Hello *world*"), Block::code(Some("sh"), "flutter run\n")];
/// let mut session = SelectorSession::new(SelectionStore::new());
/// let result = HtmlRenderer::new().render(&blocks, &mut session);
///
/// assert_eq!(
///     result.html,
///     "<p>Hello <em>world</em></p>\n<pre><code class=\"language-sh\">flutter run\n</code></pre>\n"
/// );
/// ```
#[derive(Debug)]
pub struct HtmlRenderer {
    static_tabs: bool,
    gfm: bool,
    group_counter: usize,
    lints: Vec<Lint>,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    /// Create a renderer with interactive tabs and GFM enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            static_tabs: false,
            gfm: true,
            group_counter: 0,
            lints: Vec::new(),
        }
    }

    /// Render selector groups as radio inputs that switch with CSS only.
    #[must_use]
    pub fn with_static_tabs(mut self, enabled: bool) -> Self {
        self.static_tabs = enabled;
        self
    }

    /// Enable or disable GitHub Flavored Markdown in prose.
    ///
    /// GFM is enabled by default: tables, strikethrough, task lists.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render a page body.
    ///
    /// Group element ids are numbered from zero for every call.
    pub fn render(&mut self, blocks: &[Block], session: &mut SelectorSession) -> RenderResult {
        self.group_counter = 0;
        let mut html = String::with_capacity(4096);
        self.render_blocks(blocks, session, &mut html);

        let mut lints = std::mem::take(&mut self.lints);
        lints.extend(session.take_lints());

        RenderResult { html, lints }
    }

    fn render_blocks(&mut self, blocks: &[Block], session: &mut SelectorSession, out: &mut String) {
        for block in blocks {
            match block {
                Block::Prose { markdown } => {
                    html::push_html(out, Parser::new_ext(markdown, self.parser_options()));
                }
                Block::Code { language, source } => render_code(language.as_deref(), source, out),
                Block::Admonition(admonition) => {
                    let mut body = String::new();
                    self.render_blocks(&admonition.content, session, &mut body);
                    let (rendered, lint) = render_admonition(admonition, &body);
                    out.push_str(&rendered);
                    self.lints.extend(lint);
                }
                Block::Selector(group) => self.render_group(group, session, out),
            }
        }
    }

    fn render_group(
        &mut self,
        group: &SelectorGroup,
        session: &mut SelectorSession,
        out: &mut String,
    ) {
        let id = session.register(group);
        let Some(active_id) = session.active(id).map(str::to_owned) else {
            // Empty group: nothing to show
            return;
        };

        // Hand-built trees may repeat panel ids; the session keeps the first
        let group = if has_duplicate_panels(group) {
            let mut deduped = group.clone();
            deduped.dedupe_panels();
            Cow::Owned(deduped)
        } else {
            Cow::Borrowed(group)
        };

        let group_num = self.group_counter;
        self.group_counter += 1;
        let active = group.position(&active_id).unwrap_or_default();

        out.push_str(&render_group_open(group_num, &group, active, self.static_tabs));
        out.push_str(r#"<div class="tabs-panels">"#);
        for (idx, panel) in group.panels.iter().enumerate() {
            out.push_str(&render_panel_open(
                group_num,
                idx,
                &panel.id,
                idx == active,
                self.static_tabs,
            ));
            self.render_blocks(&panel.content, session, out);
            out.push_str("</div>");
        }
        out.push_str("</div></div>");
    }
}

fn has_duplicate_panels(group: &SelectorGroup) -> bool {
    group
        .panels
        .iter()
        .enumerate()
        .any(|(idx, panel)| group.panels[..idx].iter().any(|p| p.id == panel.id))
}

fn render_code(language: Option<&str>, source: &str, out: &mut String) {
    match language {
        Some(lang) => {
            let _ = write!(out, r#"<pre><code class="language-{}">"#, escape_html(lang));
        }
        None => out.push_str("<pre><code>"),
    }
    out.push_str(&escape_html(source));
    out.push_str("</code></pre>\n");
}
