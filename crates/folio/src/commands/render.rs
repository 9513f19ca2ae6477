//! `folio render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use folio_renderer::{SelectionStore, SelectorSession};
use folio_site::{PageLint, SiteError, assemble, load_page, validate_page};

use super::{CommonArgs, initial_store, layout, render_options};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Page source file (markdown or .page.yaml).
    file: PathBuf,

    /// Stored selection as KEY=PANEL (repeatable).
    #[arg(long = "select", value_name = "KEY=PANEL", value_parser = parse_selection)]
    selections: Vec<(String, String)>,

    /// Stored selections as a URL query string (e.g. "language=dart&os=mac").
    #[arg(long)]
    query: Option<String>,
}

impl RenderArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.common.load_config(&self.common.settings())?;

        let (base_dir, rel_path) = split_source(&config.docs_resolved.source_dir, &self.file);
        let parsed = load_page(&base_dir, &rel_path)?;
        let page_lints = validate_page(&parsed.page).map_err(SiteError::from)?;

        let store = self.store(initial_store(&config));
        let mut session = SelectorSession::new(store);
        let layout = layout(&config)?;
        let document = assemble(
            &parsed.page,
            layout.as_ref(),
            &mut session,
            render_options(&config),
        )?;

        let lints: Vec<PageLint> = parsed
            .lints
            .into_iter()
            .chain(page_lints)
            .chain(document.lints)
            .map(|lint| PageLint::new(&parsed.page, lint))
            .collect();
        output.lints(&lints);

        output.document(&document.html)?;
        Ok(())
    }

    /// Config selections, then `--query`, then `--select` (later wins).
    fn store(&self, mut store: SelectionStore) -> SelectionStore {
        if let Some(query) = &self.query {
            for (key, panel) in SelectionStore::from_query(query).iter() {
                store.set(key, panel);
            }
        }
        for (key, panel) in &self.selections {
            store.set(key.as_str(), panel.as_str());
        }
        store
    }
}

/// Parse a `KEY=PANEL` selection.
fn parse_selection(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, panel)) if !key.trim().is_empty() && !panel.trim().is_empty() => {
            Ok((key.trim().to_owned(), panel.trim().to_owned()))
        }
        _ => Err(format!("expected KEY=PANEL, got '{s}'")),
    }
}

/// Split a page path into the include base directory and the page path
/// relative to it.
///
/// Pages inside the docs directory resolve includes against it; other files
/// resolve against their own directory.
fn split_source(source_dir: &Path, file: &Path) -> (PathBuf, PathBuf) {
    let canonical = |p: &Path| p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
    let file_abs = canonical(file);
    let source_abs = canonical(source_dir);

    if let Ok(rel) = file_abs.strip_prefix(&source_abs) {
        return (source_abs, rel.to_path_buf());
    }

    let parent = file_abs
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let name = file_abs
        .file_name()
        .map_or_else(|| file.to_path_buf(), PathBuf::from);
    (parent, name)
}
