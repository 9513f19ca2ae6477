//! Directive line parsing.
//!
//! Recognizes whole-line `:::name[label]{attrs}`, `:::` and
//! `::name[content]{attrs}` forms.

use super::DirectiveArgs;

/// A container directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ContainerLine {
    /// Container opening: `:::name[label]{attrs}`
    Start { name: String, args: DirectiveArgs },
    /// Container closing: `:::` (any run of three or more colons)
    End,
}

/// Parse a line as a container directive.
///
/// Returns `None` if the line is not a container directive.
pub(crate) fn parse_container_line(line: &str) -> Option<ContainerLine> {
    let trimmed = line.trim();

    if !trimmed.starts_with(":::") {
        return None;
    }

    let colon_count = trimmed.chars().take_while(|&c| c == ':').count();
    let after_colons = trimmed[colon_count..].trim_start();

    if after_colons.is_empty() {
        return Some(ContainerLine::End);
    }

    let (name, args) = parse_name_and_args(after_colons)?;
    Some(ContainerLine::Start { name, args })
}

/// Parse a line as a leaf directive: exactly two colons, then a name.
///
/// Trailing text after the attributes disqualifies the line, so prose such as
/// `::note is not a directive` is left alone.
pub(crate) fn parse_leaf_line(line: &str) -> Option<(String, DirectiveArgs)> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix("::")?;
    if rest.starts_with(':') {
        return None;
    }

    let name_end = name_end(rest);
    let name = &rest[..name_end];
    if !is_valid_directive_name(name) {
        return None;
    }

    let after_name = &rest[name_end..];
    let (content, content_consumed) = parse_delimited(after_name, '[', ']');
    let after_content = &after_name[content_consumed..];
    let (attrs, attrs_consumed) = parse_delimited(after_content, '{', '}');

    if !after_content[attrs_consumed..].trim().is_empty() {
        return None;
    }

    Some((name.to_owned(), DirectiveArgs::parse(&content, &attrs)))
}

fn parse_name_and_args(s: &str) -> Option<(String, DirectiveArgs)> {
    let name_end = name_end(s);
    let name = &s[..name_end];
    if !is_valid_directive_name(name) {
        return None;
    }

    let after_name = s[name_end..].trim_start();
    let (mut content, content_consumed) = parse_delimited(after_name, '[', ']');
    let mut after_content = after_name[content_consumed..].trim_start();

    // Bare label form: `::: tab macOS {#mac}`
    if content_consumed == 0 && !after_content.starts_with('{') {
        let label_end = after_content.find('{').unwrap_or(after_content.len());
        content = after_content[..label_end].trim().to_owned();
        after_content = &after_content[label_end..];
    }

    let (attrs, _) = parse_delimited(after_content, '{', '}');

    Some((name.to_owned(), DirectiveArgs::parse(&content, &attrs)))
}

/// Byte offset where a directive name ends (at `[`, `{` or whitespace).
fn name_end(s: &str) -> usize {
    s.find(|c: char| c == '[' || c == '{' || c.is_whitespace())
        .unwrap_or(s.len())
}

/// Check if a name is a valid directive name.
///
/// Valid names contain only alphanumeric characters, hyphens, and underscores.
fn is_valid_directive_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Parse a balanced `open ... close` span at the start of `s`.
///
/// Returns (inner text, bytes consumed). Unbalanced or absent spans consume nothing.
fn parse_delimited(s: &str, open: char, close: char) -> (String, usize) {
    if !s.starts_with(open) {
        return (String::new(), 0);
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return (s[open.len_utf8()..i].to_owned(), i + close.len_utf8());
            }
        }
    }

    (String::new(), 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(line: &str) -> (String, DirectiveArgs) {
        match parse_container_line(line) {
            Some(ContainerLine::Start { name, args }) => (name, args),
            other => panic!("expected container start, got {other:?}"),
        }
    }

    #[test]
    fn test_tabs_group_line() {
        let (name, args) = start(r#"::: tabs{group="language" default="js"}"#);
        assert_eq!(name, "tabs");
        assert_eq!(args.get("group"), Some("language"));
        assert_eq!(args.get("default"), Some("js"));
    }

    #[test]
    fn test_tab_line_without_space() {
        let (name, args) = start(":::tab[JavaScript]{#js}");
        assert_eq!(name, "tab");
        assert_eq!(args.content, "JavaScript");
        assert_eq!(args.id.as_deref(), Some("js"));
    }

    #[test]
    fn test_admonition_with_spaced_label() {
        let (name, args) = start("::: warning [Heads up]");
        assert_eq!(name, "warning");
        assert_eq!(args.content, "Heads up");
    }

    #[test]
    fn test_bare_label() {
        let (name, args) = start("::: tab macOS {#mac}");
        assert_eq!(name, "tab");
        assert_eq!(args.content, "macOS");
        assert_eq!(args.id.as_deref(), Some("mac"));

        let (_, args) = start("::: tip Keep tokens short-lived");
        assert_eq!(args.content, "Keep tokens short-lived");
    }

    #[test]
    fn test_nested_brackets_in_label() {
        let (_, args) = start("::: note[See [docs] first]");
        assert_eq!(args.content, "See [docs] first");
    }

    #[test]
    fn test_container_end() {
        assert_eq!(parse_container_line("  :::  "), Some(ContainerLine::End));
        assert_eq!(parse_container_line("::::"), Some(ContainerLine::End));
    }

    #[test]
    fn test_not_container() {
        assert!(parse_container_line("regular text").is_none());
        assert!(parse_container_line(":: note").is_none());
        assert!(parse_container_line("::: foo@bar").is_none());
    }

    #[test]
    fn test_leaf_include() {
        let (name, args) = parse_leaf_line("::include[partials/footer.md]").unwrap();
        assert_eq!(name, "include");
        assert_eq!(args.content, "partials/footer.md");
    }

    #[test]
    fn test_leaf_with_attrs() {
        let (name, args) = parse_leaf_line("  ::include[a.md]{.small}  ").unwrap();
        assert_eq!(name, "include");
        assert_eq!(args.classes, vec!["small"]);
    }

    #[test]
    fn test_leaf_rejects_trailing_text() {
        assert!(parse_leaf_line("::include[a.md] and more").is_none());
        assert!(parse_leaf_line(":::include[a.md]").is_none());
        assert!(parse_leaf_line("::").is_none());
        assert!(parse_leaf_line("Key::Value").is_none());
    }

    #[test]
    fn test_parse_delimited() {
        assert_eq!(parse_delimited("[hello] rest", '[', ']'), ("hello".to_owned(), 7));
        assert_eq!(
            parse_delimited("[nested [brackets]]", '[', ']'),
            ("nested [brackets]".to_owned(), 19)
        );
        assert_eq!(parse_delimited("{#id}", '{', '}'), ("#id".to_owned(), 5));
        assert_eq!(parse_delimited("[unclosed", '[', ']'), (String::new(), 0));
        assert_eq!(parse_delimited("none", '[', ']'), (String::new(), 0));
    }

    #[test]
    fn test_is_valid_directive_name() {
        assert!(is_valid_directive_name("callout-x"));
        assert!(is_valid_directive_name("auth_store"));
        assert!(!is_valid_directive_name(""));
        assert!(!is_valid_directive_name("foo bar"));
    }
}
