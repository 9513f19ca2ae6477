//! Page and corpus validation.
//!
//! Missing ids, missing titles, unusable output paths and duplicate ids or
//! output files are fatal: the page is not published. Everything else is
//! reported as a [`Lint`].

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use folio_renderer::{Block, Lint, LintKind};

use crate::{Page, ValidationError};

/// Validate one page.
///
/// Returns the page's lints: a missing description, and duplicate panel ids
/// in selector groups (possible in pages authored as YAML).
///
/// # Errors
///
/// Returns a [`ValidationError`] if the id or title is empty, or the output
/// path (slug, else id) is empty or would leave the output directory.
pub fn validate_page(page: &Page) -> Result<Vec<Lint>, ValidationError> {
    if page.id.trim().is_empty() {
        return Err(ValidationError::MissingId {
            source_path: page.source_path.clone(),
        });
    }
    if page.title.trim().is_empty() {
        return Err(ValidationError::MissingTitle {
            id: page.id.clone(),
        });
    }
    if !is_safe_stem(page.output_stem()) {
        return Err(match &page.slug {
            Some(slug) => ValidationError::InvalidSlug {
                id: page.id.clone(),
                slug: slug.clone(),
            },
            None => ValidationError::InvalidId {
                id: page.id.clone(),
            },
        });
    }

    let mut lints = Vec::new();
    if page.description.trim().is_empty() {
        lints.push(Lint::new(
            LintKind::MissingDescription,
            format!("page '{}' has no description", page.id),
        ));
    }
    collect_duplicate_panels(&page.body, &mut lints);
    Ok(lints)
}

/// Check that no two pages write the same output file.
///
/// Pages that already share an id are skipped; [`check_unique_ids`] reports
/// them.
#[must_use]
pub fn check_unique_outputs(pages: &[Page]) -> Vec<ValidationError> {
    let mut seen: HashMap<PathBuf, &Page> = HashMap::with_capacity(pages.len());
    let mut errors = Vec::new();

    for page in pages {
        let output = page.output_path();
        match seen.get(&output) {
            Some(first) if first.id == page.id => {}
            Some(first) => errors.push(ValidationError::DuplicateOutput {
                output,
                first: first.display_path(),
                second: page.display_path(),
            }),
            None => {
                seen.insert(output, page);
            }
        }
    }

    errors
}

/// Check that page ids are unique across the corpus.
///
/// Returns one error per page whose id repeats an earlier page's id.
#[must_use]
pub fn check_unique_ids(pages: &[Page]) -> Vec<ValidationError> {
    let mut seen: HashMap<&str, &Page> = HashMap::with_capacity(pages.len());
    let mut errors = Vec::new();

    for page in pages {
        match seen.get(page.id.as_str()) {
            Some(first) => errors.push(ValidationError::DuplicateId {
                id: page.id.clone(),
                first: first.display_path(),
                second: page.display_path(),
            }),
            None => {
                seen.insert(&page.id, page);
            }
        }
    }

    errors
}

/// A non-empty relative path made only of plain names.
fn is_safe_stem(stem: &str) -> bool {
    !stem.is_empty()
        && !stem.contains('\\')
        && Path::new(stem)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

fn collect_duplicate_panels(blocks: &[Block], lints: &mut Vec<Lint>) {
    for block in blocks {
        match block {
            Block::Admonition(admonition) => collect_duplicate_panels(&admonition.content, lints),
            Block::Selector(group) => {
                let mut deduped = group.clone();
                for id in deduped.dedupe_panels() {
                    lints.push(Lint::new(
                        LintKind::DuplicatePanel,
                        format!("duplicate panel id '{id}' in selector group; later panel dropped"),
                    ));
                }
                for panel in &group.panels {
                    collect_duplicate_panels(&panel.content, lints);
                }
            }
            Block::Prose { .. } | Block::Code { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use folio_renderer::{Panel, SelectorGroup};
    use pretty_assertions::assert_eq;

    use super::*;

    fn page(id: &str, title: &str, description: &str) -> Page {
        Page {
            id: id.to_owned(),
            title: title.to_owned(),
            description: description.to_owned(),
            slug: None,
            keywords: Vec::new(),
            vars: HashMap::new(),
            body: Vec::new(),
            source_path: Some(PathBuf::from(format!("{id}.md"))),
        }
    }

    #[test]
    fn test_valid_page() {
        assert_eq!(validate_page(&page("auth", "Auth", "Signing in")), Ok(Vec::new()));
    }

    #[test]
    fn test_missing_id_is_fatal() {
        let err = validate_page(&page(" ", "Auth", "")).unwrap_err();
        assert!(matches!(err, ValidationError::MissingId { .. }));
    }

    #[test]
    fn test_missing_title_is_fatal() {
        assert_eq!(
            validate_page(&page("auth", "", "")),
            Err(ValidationError::MissingTitle {
                id: "auth".to_owned()
            })
        );
    }

    #[test]
    fn test_missing_description_lints() {
        let lints = validate_page(&page("auth", "Auth", "")).unwrap();
        assert_eq!(lints.len(), 1);
        assert_eq!(lints[0].kind, LintKind::MissingDescription);
    }

    #[test]
    fn test_unsafe_slug_is_fatal() {
        let mut page = page("auth", "Auth", "d");
        page.slug = Some("../outside".to_owned());
        assert!(matches!(
            validate_page(&page),
            Err(ValidationError::InvalidSlug { .. })
        ));

        page.slug = Some("/guides/sign-in/".to_owned());
        assert!(validate_page(&page).is_ok());
    }

    #[test]
    fn test_id_used_as_output_path_must_be_safe() {
        for id in ["../escaped", "a/../../b", "/", "c:\\x"] {
            assert_eq!(
                validate_page(&page(id, "T", "d")),
                Err(ValidationError::InvalidId { id: id.to_owned() }),
                "{id}"
            );
        }
        assert!(validate_page(&page("guides/auth", "T", "d")).is_ok());

        // A safe slug makes the id irrelevant for output
        let mut page = page("../escaped", "T", "d");
        page.slug = Some("escaped".to_owned());
        assert!(validate_page(&page).is_ok());
    }

    #[test]
    fn test_duplicate_panels_in_nested_groups_lint() {
        let mut page = page("auth", "Auth", "d");
        let inner = SelectorGroup {
            key: None,
            default_panel: None,
            panels: vec![Panel::new("x", "X", Vec::new()), Panel::new("x", "X2", Vec::new())],
        };
        page.body = vec![Block::Selector(SelectorGroup {
            key: None,
            default_panel: None,
            panels: vec![Panel::new("a", "A", vec![Block::Selector(inner)])],
        })];

        let lints = validate_page(&page).unwrap();
        assert_eq!(lints.len(), 1);
        assert_eq!(lints[0].kind, LintKind::DuplicatePanel);
    }

    #[test]
    fn test_duplicate_ids() {
        let mut second = page("auth", "Auth again", "");
        second.source_path = Some(PathBuf::from("v2/auth.md"));
        let pages = vec![page("auth", "Auth", ""), page("install", "Install", ""), second];

        assert_eq!(
            check_unique_ids(&pages),
            vec![ValidationError::DuplicateId {
                id: "auth".to_owned(),
                first: PathBuf::from("auth.md"),
                second: PathBuf::from("v2/auth.md"),
            }]
        );
    }

    #[test]
    fn test_duplicate_outputs() {
        let mut slugged = page("b", "B", "");
        slugged.slug = Some("a".to_owned());
        let mut same_id = page("a", "A again", "");
        same_id.source_path = Some(PathBuf::from("v2/a.md"));
        let pages = vec![page("a", "A", ""), slugged, same_id];

        assert_eq!(
            check_unique_outputs(&pages),
            vec![ValidationError::DuplicateOutput {
                output: PathBuf::from("a.html"),
                first: PathBuf::from("a.md"),
                second: PathBuf::from("b.md"),
            }]
        );
    }
}
