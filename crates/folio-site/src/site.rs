//! Site loading and building.
//!
//! [`Site::load`] scans a docs directory, parses every page, and validates
//! the corpus. [`Site::build`] renders all pages in parallel and writes one
//! HTML file per page.
//!
//! Each page renders with its own [`SelectorSession`] seeded from a copy of
//! the build's [`SelectionStore`], so no state is shared between workers.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use folio_renderer::{Lint, ParserConfig, SelectionStore, SelectorSession};
use rayon::prelude::*;

use crate::scanner::{self, SourceKind, SourceRef};
use crate::validate::{check_unique_ids, check_unique_outputs, validate_page};
use crate::{Document, Layout, Page, ParsedPage, RenderOptions, SiteError, assemble};

/// A lint attributed to a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLint {
    /// Page id.
    pub page_id: String,
    /// Source file relative to the docs directory.
    pub source_path: Option<PathBuf>,
    pub lint: Lint,
}

impl PageLint {
    /// Attribute `lint` to `page`.
    #[must_use]
    pub fn new(page: &Page, lint: Lint) -> Self {
        Self {
            page_id: page.id.clone(),
            source_path: page.source_path.clone(),
            lint,
        }
    }

    fn log(&self) {
        tracing::warn!(
            page = %self.page_id,
            code = self.lint.kind.code(),
            line = self.lint.line,
            "{}",
            self.lint.message
        );
    }
}

impl fmt::Display for PageLint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source_path {
            Some(path) => write!(f, "{}: {}", path.display(), self.lint),
            None => write!(f, "{}: {}", self.page_id, self.lint),
        }
    }
}

/// Outcome of a site build.
#[derive(Clone, Debug, Default)]
pub struct BuildReport {
    /// Files written, in page order.
    pub written: Vec<PathBuf>,
    /// Lints from loading and rendering.
    pub lints: Vec<PageLint>,
}

/// A validated documentation corpus.
#[derive(Debug)]
pub struct Site {
    source_dir: PathBuf,
    pages: Vec<Page>,
    lints: Vec<PageLint>,
}

impl Site {
    /// Load and validate every page under `source_dir`.
    ///
    /// `::include` paths resolve against `source_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Io`] or [`SiteError::Metadata`] for the first page
    /// that cannot be read or parsed, and [`SiteError::Invalid`] listing every
    /// validation failure otherwise.
    pub fn load(source_dir: impl Into<PathBuf>) -> Result<Self, SiteError> {
        let source_dir = source_dir.into();
        let refs = scanner::scan(&source_dir);
        tracing::debug!(dir = %source_dir.display(), count = refs.len(), "Scanned page sources");

        let parsed = refs
            .par_iter()
            .map(|source| parse_source(&source_dir, source))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_parsed(source_dir, parsed)
    }

    /// Validate pages that were parsed elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Invalid`] listing every validation failure.
    pub fn from_parsed(
        source_dir: impl Into<PathBuf>,
        parsed: Vec<ParsedPage>,
    ) -> Result<Self, SiteError> {
        let mut pages = Vec::with_capacity(parsed.len());
        let mut lints = Vec::new();
        let mut errors = Vec::new();

        for ParsedPage { page, lints: parse_lints } in parsed {
            match validate_page(&page) {
                Ok(page_lints) => {
                    lints.extend(
                        parse_lints
                            .into_iter()
                            .chain(page_lints)
                            .map(|lint| PageLint::new(&page, lint)),
                    );
                    pages.push(page);
                }
                Err(e) => errors.push(e),
            }
        }
        errors.extend(check_unique_ids(&pages));
        errors.extend(check_unique_outputs(&pages));

        if !errors.is_empty() {
            return Err(SiteError::Invalid(errors));
        }

        for lint in &lints {
            lint.log();
        }

        Ok(Self {
            source_dir: source_dir.into(),
            pages,
            lints,
        })
    }

    /// Docs directory the site was loaded from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Pages sorted by source path.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Find a page by id.
    #[must_use]
    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    /// Lints found while loading.
    #[must_use]
    pub fn lints(&self) -> &[PageLint] {
        &self.lints
    }

    /// Render every page in parallel without writing anything.
    ///
    /// # Errors
    ///
    /// Returns the first assembly error.
    pub fn render(
        &self,
        layout: &dyn Layout,
        options: RenderOptions,
        store: &SelectionStore,
    ) -> Result<Vec<Document>, SiteError> {
        self.pages
            .par_iter()
            .map(|page| {
                tracing::debug!(page = %page.id, "Rendering page");
                let mut session = SelectorSession::new(store.clone());
                assemble(page, layout, &mut session, options)
            })
            .collect()
    }

    /// Render every page without writing and return all lints, load-time
    /// lints first.
    ///
    /// # Errors
    ///
    /// Returns the first assembly error.
    pub fn check(
        &self,
        layout: &dyn Layout,
        options: RenderOptions,
        store: &SelectionStore,
    ) -> Result<Vec<PageLint>, SiteError> {
        let documents = self.render(layout, options, store)?;
        Ok(self.collect_lints(&documents))
    }

    /// Load lints plus render lints of `documents` (in page order).
    fn collect_lints(&self, documents: &[Document]) -> Vec<PageLint> {
        let mut lints = self.lints.clone();
        for (page, doc) in self.pages.iter().zip(documents) {
            for lint in &doc.lints {
                let page_lint = PageLint::new(page, lint.clone());
                page_lint.log();
                lints.push(page_lint);
            }
        }
        lints
    }

    /// Render every page and write `<slug or id>.html` files under `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns the first assembly or write error.
    pub fn build(
        &self,
        output_dir: &Path,
        layout: &dyn Layout,
        options: RenderOptions,
        store: &SelectionStore,
    ) -> Result<BuildReport, SiteError> {
        let documents = self.render(layout, options, store)?;

        let written = documents
            .par_iter()
            .map(|doc| write_document(output_dir, doc))
            .collect::<Result<Vec<_>, _>>()?;

        let report = BuildReport {
            written,
            lints: self.collect_lints(&documents),
        };

        tracing::info!(
            pages = report.written.len(),
            lints = report.lints.len(),
            output = %output_dir.display(),
            "Site built"
        );
        Ok(report)
    }
}

/// Load one page source relative to a docs directory.
///
/// Used for single-page rendering; the page is not validated.
///
/// # Errors
///
/// Returns [`SiteError::Io`] if the file cannot be read and
/// [`SiteError::Metadata`] if its metadata is malformed.
pub fn load_page(source_dir: &Path, rel_path: &Path) -> Result<ParsedPage, SiteError> {
    let name = rel_path.to_string_lossy().to_lowercase();
    let kind = if name.ends_with(crate::page::PAGE_YAML_SUFFIX) {
        SourceKind::PageYaml
    } else {
        SourceKind::Markdown
    };
    parse_source(
        source_dir,
        &SourceRef {
            rel_path: rel_path.to_path_buf(),
            path: source_dir.join(rel_path),
            kind,
        },
    )
}

fn parse_source(source_dir: &Path, source: &SourceRef) -> Result<ParsedPage, SiteError> {
    let text = fs::read_to_string(&source.path).map_err(|e| SiteError::io(&source.path, e))?;

    match source.kind {
        SourceKind::Markdown => Page::from_markdown(
            &text,
            Some(&source.rel_path),
            ParserConfig::new().with_base_dir(source_dir),
        ),
        SourceKind::PageYaml => Ok(ParsedPage {
            page: Page::from_yaml(&text, Some(&source.rel_path))?,
            lints: Vec::new(),
        }),
    }
}

fn write_document(output_dir: &Path, doc: &Document) -> Result<PathBuf, SiteError> {
    let path = output_dir.join(&doc.output_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
    }
    fs::write(&path, &doc.html).map_err(|e| SiteError::io(&path, e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use folio_renderer::LintKind;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{DefaultLayout, ValidationError};

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    const AUTH_PAGE: &str = r#"---
id: auth
title: Authentication
description: Signing users in
---

::: tabs{group="language" default="js"}
::: tab[JavaScript]{#js}
JS steps.
:::
::: tab[Dart]{#dart}
Dart steps.
:::
:::

::include[_partials/footer.md]
"#;

    #[test]
    fn test_load_site() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "guides/auth.md", AUTH_PAGE);
        write(root, "_partials/footer.md", "Need help? Ask.\n");
        write(root, "install.md", "# Install\n");

        let site = Site::load(root).unwrap();

        let ids: Vec<_> = site.pages().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["auth", "install"]);
        assert_eq!(site.page("auth").unwrap().body.len(), 2);
        assert_eq!(site.source_dir(), root);

        // install.md has no description
        assert_eq!(site.lints().len(), 1);
        assert_eq!(site.lints()[0].page_id, "install");
        assert_eq!(site.lints()[0].lint.kind, LintKind::MissingDescription);
        assert_eq!(
            site.lints()[0].to_string(),
            "install.md: page 'install' has no description [missing-description]"
        );
    }

    #[test]
    fn test_load_collects_all_validation_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "a.md", "---\nid: same\ntitle: A\n---\n");
        write(root, "b.md", "---\nid: same\ntitle: B\n---\n");
        write(root, "untitled.md", "No heading here.\n");

        let err = Site::load(root).unwrap_err();

        let errors = err.validation_errors();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ValidationError::MissingTitle {
            id: "untitled".to_owned()
        }));
        assert!(matches!(&errors[1], ValidationError::DuplicateId { id, .. } if id == "same"));
    }

    #[test]
    fn test_load_rejects_unsafe_and_colliding_outputs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "a.md", "# First\n");
        write(root, "b.md", "---\nslug: a\n---\n# Second\n");
        write(root, "c.md", "---\nid: ../escaped\n---\n# Escaped\n");

        let err = Site::load(root).unwrap_err();

        assert_eq!(
            err.validation_errors(),
            [
                ValidationError::InvalidId {
                    id: "../escaped".to_owned()
                },
                ValidationError::DuplicateOutput {
                    output: PathBuf::from("a.html"),
                    first: PathBuf::from("a.md"),
                    second: PathBuf::from("b.md"),
                },
            ]
        );
        assert!(!temp_dir.path().join("escaped.html").exists());
    }

    #[test]
    fn test_load_reports_bad_front_matter() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "bad.md", "---\ntitle: [x\n---\n");

        let err = Site::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, SiteError::Metadata { .. }));
    }

    #[test]
    fn test_build_writes_documents() {
        let temp_dir = tempfile::tempdir().unwrap();
        let docs = temp_dir.path().join("docs");
        let out = temp_dir.path().join("build");
        write(&docs, "guides/auth.md", AUTH_PAGE);
        write(&docs, "_partials/footer.md", "Need help? Ask.\n");
        write(
            &docs,
            "install.page.yaml",
            "title: Install\ndescription: d\nslug: start/install\nbody:\n  - type: admonition\n    kind: callout-x\n    content:\n      - type: prose\n        markdown: Plain.\n",
        );

        let site = Site::load(&docs).unwrap();
        let store = SelectionStore::from_query("language=dart");
        let report = site
            .build(&out, &DefaultLayout::default(), RenderOptions::default(), &store)
            .unwrap();

        assert_eq!(
            report.written,
            vec![out.join("auth.html"), out.join("start/install.html")]
        );

        let auth = fs::read_to_string(out.join("auth.html")).unwrap();
        assert!(auth.contains("<title>Authentication</title>"));
        assert!(auth.contains(r#"data-panel-id="dart"><p>Dart steps.</p>"#));
        assert!(auth.contains("<p>Need help? Ask.</p>"));

        let install = fs::read_to_string(out.join("start/install.html")).unwrap();
        assert!(install.contains("<p>Plain.</p>"));
        assert!(!install.contains("admonition"));

        assert_eq!(report.lints.len(), 1);
        assert_eq!(report.lints[0].page_id, "install");
        assert_eq!(report.lints[0].lint.kind, LintKind::UnknownAdmonition);
    }

    #[test]
    fn test_check_collects_lints_without_writing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "install.md", "# Install\n");
        write(
            root,
            "auth.md",
            "---\ndescription: d\n---\n# Auth\n\n::: tabs{default=\"rust\"}\n::: tab[JS]\nx\n:::\n:::\n",
        );

        let site = Site::load(root).unwrap();
        let lints = site
            .check(&DefaultLayout::default(), RenderOptions::default(), &SelectionStore::new())
            .unwrap();

        let kinds: Vec<_> = lints.iter().map(|l| (l.page_id.as_str(), l.lint.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("install", LintKind::MissingDescription),
                ("auth", LintKind::UnknownDefaultPanel),
            ]
        );
        assert!(!root.join("auth.html").exists());
    }

    #[test]
    fn test_pages_do_not_share_selection_state() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "a.md", AUTH_PAGE);
        write(root, "b.md", &AUTH_PAGE.replace("id: auth", "id: other"));
        write(root, "_partials/footer.md", "");

        let site = Site::load(root).unwrap();
        let docs = site
            .render(&DefaultLayout::default(), RenderOptions::default(), &SelectionStore::new())
            .unwrap();

        assert_eq!(docs.len(), 2);
        for doc in &docs {
            assert!(doc.html.contains(r#"data-panel-id="js"><p>JS steps.</p>"#));
        }
    }

    #[test]
    fn test_load_page() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "guides/auth.md", "# Auth\n:::\n");

        let parsed = load_page(temp_dir.path(), Path::new("guides/auth.md")).unwrap();
        assert_eq!(parsed.page.id, "guides/auth");
        assert_eq!(parsed.lints[0].kind, LintKind::StrayClose);

        let err = load_page(temp_dir.path(), Path::new("missing.md")).unwrap_err();
        assert!(matches!(err, SiteError::Io { .. }));
    }
}
