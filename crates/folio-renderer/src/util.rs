//! Shared helpers.

/// Escape text for HTML element content and attribute values.
///
/// ```
/// use folio_renderer::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Strip surrounding quotes (single or double) from a string.
pub(crate) fn strip_quotes(s: &str) -> &str {
    let is_quoted =
        (s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\''));
    if is_quoted && s.len() >= 2 {
        return &s[1..s.len() - 1];
    }
    s
}

/// Derive a panel id from a label: lowercase alphanumerics joined by `-`.
pub(crate) fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    for c in label.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain() {
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape_html("it's \"ok\""), "it&#39;s &quot;ok&quot;");
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes(r#""macOS и Linux""#), "macOS и Linux");
        assert_eq!(strip_quotes("'single'"), "single");
        assert_eq!(strip_quotes("bare"), "bare");
        assert_eq!(strip_quotes("\""), "\"");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("JavaScript"), "javascript");
        assert_eq!(slugify("Kotlin (Android)"), "kotlin-android");
        assert_eq!(slugify("  C++ / Qt  "), "c-qt");
        assert_eq!(slugify("***"), "");
    }
}
