//! Directive argument parsing.
//!
//! Parses the `[content]{#id .class key="value"}` tail of a directive line.

use std::collections::HashMap;

/// Parsed arguments from directive syntax.
///
/// For containers the bracketed content is a label (`::: tab[Dart]`); for
/// `::include` it is a path.
///
/// # Example
///
/// ```
/// use folio_renderer::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::parse("Dart", r#"#dart .mobile group="language""#);
/// assert_eq!(args.content, "Dart");
/// assert_eq!(args.id.as_deref(), Some("dart"));
/// assert_eq!(args.classes, vec!["mobile"]);
/// assert_eq!(args.get("group"), Some("language"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Content from brackets: `[content]` (empty string if not provided).
    pub content: String,
    /// ID from attributes: `{#id}`.
    pub id: Option<String>,
    /// Classes from attributes: `{.class1 .class2}`.
    pub classes: Vec<String>,
    /// Key-value attributes: `{key="value"}`.
    pub attrs: HashMap<String, String>,
}

impl DirectiveArgs {
    /// Parse content and attributes string into structured arguments.
    ///
    /// `attrs_str` is the text between the braces, without the braces.
    #[must_use]
    pub fn parse(content: &str, attrs_str: &str) -> Self {
        let mut args = Self {
            content: content.trim().to_owned(),
            ..Default::default()
        };

        let mut remaining = attrs_str.trim();

        while !remaining.is_empty() {
            if let Some(rest) = remaining.strip_prefix('#') {
                let (value, tail) = split_shorthand(rest);
                args.id = Some(value.to_owned());
                remaining = tail;
            } else if let Some(rest) = remaining.strip_prefix('.') {
                let (value, tail) = split_shorthand(rest);
                args.classes.push(value.to_owned());
                remaining = tail;
            } else if let Some((key, value, rest)) = parse_key_value(remaining) {
                args.attrs.insert(key.to_owned(), value.to_owned());
                remaining = rest;
            } else {
                // Skip one unrecognized character
                let skip = remaining.chars().next().map_or(0, char::len_utf8);
                remaining = &remaining[skip..];
            }
            remaining = remaining.trim_start();
        }

        args
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Get the first non-empty value among several attribute keys.
    ///
    /// Lets authors write either `{value=js}` or `{id=js}`.
    #[must_use]
    pub fn get_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|key| self.get(key))
            .find(|value| !value.is_empty())
    }
}

/// Split an `#id` or `.class` shorthand body from the rest of the string.
fn split_shorthand(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| c.is_whitespace() || c == '.' || c == '#')
        .unwrap_or(s.len());
    (&s[..end], &s[end..])
}

/// Parse a key-value pair from the attributes string.
///
/// Supports: `key="value"`, `key='value'`, `key=value`
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let eq_pos = s.find('=')?;
    let key = s[..eq_pos].trim();

    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }

    let after_eq = &s[eq_pos + 1..];

    for quote in ['"', '\''] {
        if let Some(stripped) = after_eq.strip_prefix(quote) {
            let end_quote = stripped.find(quote)?;
            return Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]));
        }
    }

    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
    Some((key, &after_eq[..end], &after_eq[end..]))
}
