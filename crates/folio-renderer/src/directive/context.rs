//! Directive processing context.

use std::io;
use std::path::{Path, PathBuf};

/// Context handed to leaf directive handlers.
///
/// Carries the source location for diagnostics and the file reading callback
/// used by `::include`.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use folio_renderer::directive::DirectiveContext;
///
/// let ctx = DirectiveContext {
///     source_path: Some(Path::new("docs/auth/overview.md")),
///     base_dir: Path::new("docs/auth"),
///     line: 12,
///     depth: 0,
///     read_file: &|path| std::fs::read_to_string(path),
/// };
///
/// assert_eq!(ctx.resolve_path("partials/setup.md"), Path::new("docs/auth/partials/setup.md"));
/// ```
pub struct DirectiveContext<'a> {
    /// Path to the source file being parsed (if known).
    pub source_path: Option<&'a Path>,
    /// Base directory for resolving relative paths.
    pub base_dir: &'a Path,
    /// Line number where the directive appears (1-indexed).
    pub line: usize,
    /// Include nesting depth of the text being parsed (0 for the page itself).
    pub depth: usize,
    /// Callback to read a file.
    pub read_file: &'a dyn Fn(&Path) -> io::Result<String>,
}

impl DirectiveContext<'_> {
    /// Resolve a relative path against the base directory.
    #[must_use]
    pub fn resolve_path(&self, relative: &str) -> PathBuf {
        self.base_dir.join(relative)
    }

    /// Resolve a relative path, refusing paths that escape the base directory.
    ///
    /// Returns `None` for traversal attempts and for files that do not exist
    /// (canonicalization requires an existing path).
    #[must_use]
    pub fn resolve_path_safe(&self, relative: &str) -> Option<PathBuf> {
        let canonical = self.base_dir.join(relative).canonicalize().ok()?;
        let canonical_base = self.base_dir.canonicalize().ok()?;
        canonical.starts_with(&canonical_base).then_some(canonical)
    }

    /// Read a file through the context's callback.
    pub fn read(&self, path: &Path) -> io::Result<String> {
        (self.read_file)(path)
    }
}
