//! Page records.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use folio_renderer::{Block, BlockParser, Lint, ParserConfig, extract_title};
use serde::{Deserialize, Serialize};

use crate::SiteError;
use crate::frontmatter::{self, FrontMatter};

/// File suffix of pages authored as whole YAML documents.
pub const PAGE_YAML_SUFFIX: &str = ".page.yaml";

/// A documentation page: metadata plus an owned body of blocks.
///
/// The YAML form (`*.page.yaml`) is the serde form of this struct:
///
/// ```yaml
/// id: install
/// title: Install
/// description: Getting the SDK
/// body:
///   - type: prose
///     markdown: Pick your platform.
///   - type: selector
///     group: os
///     panels:
///       - id: mac
///         label: macOS
///         content:
///           - type: code
///             language: sh
///             source: brew install folio
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Stable id, unique across the corpus.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Short description; may be empty.
    #[serde(default)]
    pub description: String,
    /// Output path (without extension) overriding the id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Search keywords.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Custom variables for layout templates.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub vars: HashMap<String, serde_json::Value>,
    /// Page body.
    #[serde(default)]
    pub body: Vec<Block>,
    /// Source file relative to the docs directory.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

/// Metadata handed to layouts.
#[derive(Clone, Copy, Debug)]
pub struct PageMeta<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub keywords: &'a [String],
    pub vars: &'a HashMap<String, serde_json::Value>,
}

/// A page together with the lints found while parsing it.
#[derive(Clone, Debug)]
pub struct ParsedPage {
    pub page: Page,
    pub lints: Vec<Lint>,
}

/// YAML page document: front matter fields plus a body.
#[derive(Deserialize)]
struct PageDocument {
    #[serde(flatten)]
    meta: FrontMatter,
    #[serde(default)]
    body: Vec<Block>,
}

impl Page {
    /// Parse a markdown page with optional front matter.
    ///
    /// `source_path` is the path relative to the docs directory; it supplies
    /// the id when front matter has none. A missing title falls back to the
    /// body's first `# H1`. Lint line numbers refer to the whole source file.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Metadata`] if the front matter is malformed.
    pub fn from_markdown(
        source: &str,
        source_path: Option<&Path>,
        config: ParserConfig,
    ) -> Result<ParsedPage, SiteError> {
        let split = frontmatter::split(source);
        let meta = match split.yaml {
            Some(yaml) => FrontMatter::from_yaml(yaml)
                .map_err(|message| metadata_error(source_path, message))?,
            None => FrontMatter::default(),
        };

        let config = match source_path {
            Some(path) => config.with_source_path(path),
            None => config,
        };
        let mut parser = BlockParser::with_config(config);
        let body = parser.parse(split.body);

        let lints = parser
            .take_lints()
            .into_iter()
            .map(|lint| match lint.line {
                Some(line) => lint.at(line + split.body_offset),
                None => lint,
            })
            .collect();

        Ok(ParsedPage {
            page: Self::from_parts(meta, body, source_path),
            lints,
        })
    }

    /// Parse a page authored as a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Metadata`] if the YAML does not describe a page.
    pub fn from_yaml(source: &str, source_path: Option<&Path>) -> Result<Self, SiteError> {
        let document: PageDocument = serde_yaml::from_str(source)
            .map_err(|e| metadata_error(source_path, format!("invalid YAML: {e}")))?;
        Ok(Self::from_parts(document.meta, document.body, source_path))
    }

    fn from_parts(meta: FrontMatter, body: Vec<Block>, source_path: Option<&Path>) -> Self {
        let id = meta
            .id
            .or_else(|| source_path.map(id_from_path))
            .unwrap_or_default();
        let title = meta
            .title
            .or_else(|| extract_title(&body))
            .unwrap_or_default();

        Self {
            id,
            title,
            description: meta.description.unwrap_or_default(),
            slug: meta.slug,
            keywords: meta.keywords,
            vars: meta.vars,
            body,
            source_path: source_path.map(Path::to_path_buf),
        }
    }

    /// Metadata view for layouts.
    #[must_use]
    pub fn meta(&self) -> PageMeta<'_> {
        PageMeta {
            id: &self.id,
            title: &self.title,
            description: &self.description,
            keywords: &self.keywords,
            vars: &self.vars,
        }
    }

    /// Output file path relative to the output directory: `<slug or id>.html`.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.html", self.output_stem()))
    }

    /// Slug, else id, with surrounding `/` removed.
    pub(crate) fn output_stem(&self) -> &str {
        self.slug.as_deref().unwrap_or(&self.id).trim_matches('/')
    }

    /// Source path for messages, falling back to the id.
    pub(crate) fn display_path(&self) -> PathBuf {
        self.source_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.id))
    }
}

fn metadata_error(source_path: Option<&Path>, message: String) -> SiteError {
    SiteError::Metadata {
        path: source_path.map_or_else(|| PathBuf::from("<memory>"), Path::to_path_buf),
        message,
    }
}

/// Derive a page id from its relative path: extension dropped, `/` separators.
///
/// `guides/auth.md` -> `guides/auth`, `install.page.yaml` -> `install`.
pub(crate) fn id_from_path(path: &Path) -> String {
    let path_str = path.to_string_lossy().replace('\\', "/");
    let without_ext = path_str
        .strip_suffix(PAGE_YAML_SUFFIX)
        .or_else(|| path_str.strip_suffix(".md"))
        .unwrap_or(&path_str);
    without_ext.trim_start_matches("./").to_owned()
}

#[cfg(test)]
mod tests {
    use folio_renderer::{LintKind, Panel, SelectorGroup};
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(source: &str, path: Option<&str>) -> ParsedPage {
        Page::from_markdown(source, path.map(Path::new), ParserConfig::new()).unwrap()
    }

    #[test]
    fn test_from_markdown_with_front_matter() {
        let source = "---\nid: auth-overview\ntitle: Authentication\ndescription: Signing users in\nkeywords: [auth]\n---\n\nIntro.\n";
        let parsed = parse(source, Some("guides/auth.md"));

        assert_eq!(parsed.page.id, "auth-overview");
        assert_eq!(parsed.page.title, "Authentication");
        assert_eq!(parsed.page.description, "Signing users in");
        assert_eq!(parsed.page.keywords, vec!["auth"]);
        assert_eq!(parsed.page.body, vec![Block::prose("Intro.\n")]);
        assert_eq!(parsed.page.source_path, Some(PathBuf::from("guides/auth.md")));
        assert!(parsed.lints.is_empty());
    }

    #[test]
    fn test_id_and_title_fallbacks() {
        let parsed = parse("# Install the SDK\n\nSteps.\n", Some("guides/install.md"));

        assert_eq!(parsed.page.id, "guides/install");
        assert_eq!(parsed.page.title, "Install the SDK");
        assert_eq!(parsed.page.description, "");
    }

    #[test]
    fn test_explicit_empty_id_is_kept() {
        let parsed = parse("---\nid: ''\ntitle: T\n---\n", Some("a.md"));
        assert_eq!(parsed.page.id, "");
    }

    #[test]
    fn test_lint_lines_include_front_matter() {
        let parsed = parse("---\ntitle: T\n---\nText\n:::\n", None);

        assert_eq!(parsed.lints.len(), 1);
        assert_eq!(parsed.lints[0].kind, LintKind::StrayClose);
        assert_eq!(parsed.lints[0].line, Some(5));
    }

    #[test]
    fn test_invalid_front_matter() {
        let err = Page::from_markdown(
            "---\ntitle: [x\n---\n",
            Some(Path::new("bad.md")),
            ParserConfig::new(),
        )
        .unwrap_err();
        assert!(matches!(err, SiteError::Metadata { ref path, .. } if path == Path::new("bad.md")));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r"
title: Install
description: Getting the SDK
body:
  - type: prose
    markdown: Pick your platform.
  - type: selector
    group: os
    default: linux
    panels:
      - id: mac
        label: macOS
        content:
          - type: code
            language: sh
            source: brew install folio
      - id: linux
        label: Linux
";
        let page = Page::from_yaml(yaml, Some(Path::new("install.page.yaml"))).unwrap();

        assert_eq!(page.id, "install");
        assert_eq!(
            page.body[1],
            Block::Selector(SelectorGroup {
                key: Some("os".to_owned()),
                default_panel: Some("linux".to_owned()),
                panels: vec![
                    Panel::new("mac", "macOS", vec![Block::code(Some("sh"), "brew install folio")]),
                    Panel::new("linux", "Linux", Vec::new()),
                ],
            })
        );
    }

    #[test]
    fn test_from_yaml_rejects_unknown_block_type() {
        let yaml = "title: T\nbody:\n  - type: video\n    url: x\n";
        assert!(Page::from_yaml(yaml, None).is_err());
    }

    #[test]
    fn test_output_path() {
        let mut page = parse("# T\n", Some("guides/auth.md")).page;
        assert_eq!(page.output_path(), PathBuf::from("guides/auth.html"));

        page.slug = Some("/sign-in/".to_owned());
        assert_eq!(page.output_path(), PathBuf::from("sign-in.html"));

        page.slug = None;
        page.id = "/rooted".to_owned();
        assert_eq!(page.output_path(), PathBuf::from("rooted.html"));
    }

    #[test]
    fn test_id_from_path() {
        assert_eq!(id_from_path(Path::new("auth.md")), "auth");
        assert_eq!(id_from_path(Path::new("a/b/install.page.yaml")), "a/b/install");
        assert_eq!(id_from_path(Path::new("./notes")), "notes");
    }
}
