//! Page discovery by filesystem walking.

use std::fs;
use std::path::{Path, PathBuf};

use crate::page::PAGE_YAML_SUFFIX;

/// How a page source is authored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SourceKind {
    /// Markdown with optional front matter.
    Markdown,
    /// Whole YAML page document.
    PageYaml,
}

/// A page source file found by [`scan`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SourceRef {
    /// Path relative to the docs directory.
    pub rel_path: PathBuf,
    /// Full path for reading.
    pub path: PathBuf,
    pub kind: SourceKind,
}

/// Find page sources under `source_dir`, sorted by relative path.
///
/// Hidden entries (`.name`) and partials (`_name`, files or directories) are
/// skipped; partials are meant for `::include`. Returns an empty list if the
/// directory doesn't exist.
pub(crate) fn scan(source_dir: &Path) -> Vec<SourceRef> {
    let mut refs = Vec::new();
    if source_dir.is_dir() {
        scan_directory(source_dir, Path::new(""), &mut refs);
    }
    refs.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    refs
}

fn scan_directory(dir_path: &Path, rel_prefix: &Path, refs: &mut Vec<SourceRef>) {
    let Ok(entries) = fs::read_dir(dir_path) else {
        tracing::warn!(path = %dir_path.display(), "Cannot read directory");
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }

        let path = entry.path();
        let rel_path = rel_prefix.join(&name);

        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&path, &rel_path, refs);
        } else if let Some(kind) = source_kind(&name) {
            refs.push(SourceRef {
                rel_path,
                path,
                kind,
            });
        }
    }
}

fn source_kind(file_name: &str) -> Option<SourceKind> {
    let lower = file_name.to_lowercase();
    if lower.ends_with(PAGE_YAML_SUFFIX) {
        Some(SourceKind::PageYaml)
    } else if lower.ends_with(".md") {
        Some(SourceKind::Markdown)
    } else {
        None
    }
}
