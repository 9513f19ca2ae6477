//! Page assembly: render a page body and wrap it in a layout.

use std::fmt::Write;
use std::path::PathBuf;

use folio_renderer::{HtmlRenderer, Lint, SelectorSession, escape_html};

use crate::{Layout, LayoutContext, Page, SiteError, ValidationError};

/// Rendering switches shared by every page of a build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render selector groups as CSS-only radio inputs.
    pub static_tabs: bool,
    /// Enable GitHub Flavored Markdown in prose.
    pub gfm: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            static_tabs: false,
            gfm: true,
        }
    }
}

/// A complete HTML document for one page.
#[derive(Clone, Debug)]
pub struct Document {
    /// Page id.
    pub id: String,
    /// Output path relative to the output directory.
    pub output_path: PathBuf,
    /// Final HTML.
    pub html: String,
    /// Lints from rendering the body.
    pub lints: Vec<Lint>,
}

/// Render `page` through `layout`.
///
/// Selector groups are resolved against `session`, which the caller seeds
/// with the reader's stored selections. The document's head always carries
/// the escaped title and description (an empty description is rendered
/// empty, never dropped).
///
/// # Errors
///
/// Returns [`SiteError::Validation`] if the page has no id, and
/// [`SiteError::Layout`] if the layout drops the page head.
pub fn assemble(
    page: &Page,
    layout: &dyn Layout,
    session: &mut SelectorSession,
    options: RenderOptions,
) -> Result<Document, SiteError> {
    if page.id.trim().is_empty() {
        return Err(ValidationError::MissingId {
            source_path: page.source_path.clone(),
        }
        .into());
    }

    let rendered = HtmlRenderer::new()
        .with_static_tabs(options.static_tabs)
        .with_gfm(options.gfm)
        .render(&page.body, session);

    let head = render_head(page);
    let html = layout.render(&LayoutContext {
        meta: page.meta(),
        head: &head,
        body: &rendered.html,
    });

    if !html.contains(&head) {
        return Err(SiteError::Layout(format!(
            "layout output for page '{}' omits the page head",
            page.id
        )));
    }

    Ok(Document {
        id: page.id.clone(),
        output_path: page.output_path(),
        html,
        lints: rendered.lints,
    })
}

/// Escaped `<title>` and `<meta>` tags for a page.
fn render_head(page: &Page) -> String {
    let mut head = format!(
        "<title>{}</title>\n<meta name=\"description\" content=\"{}\">",
        escape_html(&page.title),
        escape_html(&page.description)
    );
    if !page.keywords.is_empty() {
        let _ = write!(
            head,
            "\n<meta name=\"keywords\" content=\"{}\">",
            escape_html(&page.keywords.join(", "))
        );
    }
    head
}
