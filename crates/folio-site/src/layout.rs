//! Page layouts.
//!
//! A layout wraps a rendered body into a complete HTML document. Folio ships
//! a built-in [`DefaultLayout`]; sites can supply a [`TemplateLayout`] with
//! `{{ name }}` placeholders instead.

use std::path::Path;
use std::sync::LazyLock;

use folio_renderer::escape_html;
use regex::{Captures, Regex};

use crate::{PageMeta, SiteError};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_.]*)\s*\}\}").unwrap());

/// Placeholders a template may use, besides `vars.NAME`.
const KNOWN_PLACEHOLDERS: [&str; 8] = [
    "head",
    "body",
    "id",
    "title",
    "description",
    "keywords",
    "site_title",
    "base_url",
];

/// Site-wide values available to layouts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteInfo {
    /// Site title.
    pub title: String,
    /// Base URL for links back to the site root.
    pub base_url: String,
}

/// Everything a layout needs to produce one document.
#[derive(Clone, Copy, Debug)]
pub struct LayoutContext<'a> {
    /// Page metadata (unescaped).
    pub meta: PageMeta<'a>,
    /// Escaped `<title>` and `<meta>` tags for the page.
    ///
    /// Layouts must emit this verbatim; assembly rejects output without it.
    pub head: &'a str,
    /// Rendered body HTML.
    pub body: &'a str,
}

/// Wraps rendered pages into documents.
pub trait Layout: Send + Sync {
    /// Produce the final HTML document.
    fn render(&self, ctx: &LayoutContext<'_>) -> String;
}

/// Built-in layout: a minimal HTML5 document.
#[derive(Clone, Debug, Default)]
pub struct DefaultLayout {
    site: SiteInfo,
}

impl DefaultLayout {
    #[must_use]
    pub fn new(site: SiteInfo) -> Self {
        Self { site }
    }
}

impl Layout for DefaultLayout {
    fn render(&self, ctx: &LayoutContext<'_>) -> String {
        let mut out = String::with_capacity(ctx.body.len() + ctx.head.len() + 512);
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        out.push_str(ctx.head);
        out.push_str("\n</head>\n<body>\n");
        if !self.site.title.is_empty() {
            out.push_str(&format!(
                "<header><a class=\"site-title\" href=\"{}\">{}</a></header>\n",
                escape_html(&self.site.base_url),
                escape_html(&self.site.title)
            ));
        }
        out.push_str(&format!(
            "<main id=\"{}\">\n{}</main>\n</body>\n</html>\n",
            escape_html(ctx.meta.id),
            ctx.body
        ));
        out
    }
}

/// Layout read from an HTML template with `{{ name }}` placeholders.
///
/// Supported placeholders: `head`, `body`, `id`, `title`, `description`,
/// `keywords` (comma separated), `site_title`, `base_url`, and `vars.NAME`
/// for front matter variables. Values are HTML-escaped except `head` and
/// `body`. Unknown placeholders render empty.
#[derive(Clone, Debug)]
pub struct TemplateLayout {
    template: String,
    site: SiteInfo,
}

impl TemplateLayout {
    /// Create a layout from template text.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Layout`] if the template lacks a `{{ head }}` or
    /// `{{ body }}` placeholder.
    pub fn new(template: impl Into<String>, site: SiteInfo) -> Result<Self, SiteError> {
        let template = template.into();

        for required in ["head", "body"] {
            let present = PLACEHOLDER
                .captures_iter(&template)
                .any(|caps| &caps[1] == required);
            if !present {
                return Err(SiteError::Layout(format!(
                    "template has no {{{{ {required} }}}} placeholder"
                )));
            }
        }

        for caps in PLACEHOLDER.captures_iter(&template) {
            let name = &caps[1];
            if !KNOWN_PLACEHOLDERS.contains(&name) && !name.starts_with("vars.") {
                tracing::warn!(placeholder = name, "Unknown layout placeholder renders empty");
            }
        }

        Ok(Self { template, site })
    }

    /// Read a template file.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Layout`] if the file does not exist or is unusable.
    pub fn from_file(path: &Path, site: SiteInfo) -> Result<Self, SiteError> {
        let template = std::fs::read_to_string(path).map_err(|e| {
            SiteError::Layout(format!("cannot read template {}: {e}", path.display()))
        })?;
        Self::new(template, site)
    }

    fn value(&self, name: &str, ctx: &LayoutContext<'_>) -> String {
        match name {
            "head" => ctx.head.to_owned(),
            "body" => ctx.body.to_owned(),
            "id" => escape_html(ctx.meta.id),
            "title" => escape_html(ctx.meta.title),
            "description" => escape_html(ctx.meta.description),
            "keywords" => escape_html(&ctx.meta.keywords.join(", ")),
            "site_title" => escape_html(&self.site.title),
            "base_url" => escape_html(&self.site.base_url),
            _ => name
                .strip_prefix("vars.")
                .and_then(|var| ctx.meta.vars.get(var))
                .map(|value| match value {
                    serde_json::Value::String(s) => escape_html(s),
                    other => escape_html(&other.to_string()),
                })
                .unwrap_or_default(),
        }
    }
}

impl Layout for TemplateLayout {
    fn render(&self, ctx: &LayoutContext<'_>) -> String {
        PLACEHOLDER
            .replace_all(&self.template, |caps: &Captures<'_>| self.value(&caps[1], ctx))
            .into_owned()
    }
}
