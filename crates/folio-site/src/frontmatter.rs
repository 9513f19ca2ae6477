//! YAML front matter.
//!
//! A page starts with an optional block delimited by `---` lines:
//!
//! ```markdown
//! ---
//! id: auth-overview
//! title: Authentication
//! description: Signing users in
//! slug: guides/auth
//! keywords: [auth, login]
//! vars:
//!   sdk_version: 2.1
//! ---
//!
//! Body markdown.
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Page metadata declared in front matter.
///
/// All fields are optional here; missing ids and titles are filled in or
/// rejected when the [`Page`](crate::Page) is built.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    /// Stable page id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Short description for the document head.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Output path (without extension) overriding the id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Search keywords.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Custom variables for layout templates.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub vars: HashMap<String, serde_json::Value>,
}

impl FrontMatter {
    /// Parse front matter from YAML content.
    ///
    /// Empty content returns a default instance.
    ///
    /// # Errors
    ///
    /// Returns the parser message if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(trimmed).map_err(|e| format!("invalid YAML: {e}"))
    }
}

/// Source text split into front matter and body.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Split<'a> {
    /// YAML between the `---` delimiters, if present.
    pub yaml: Option<&'a str>,
    /// Markdown after the closing delimiter.
    pub body: &'a str,
    /// Number of source lines before the body.
    pub body_offset: usize,
}

/// Split a page source into front matter and body.
///
/// Front matter must open on the very first line. An opening `---` with no
/// closing delimiter is treated as body text.
pub(crate) fn split(source: &str) -> Split<'_> {
    let no_front_matter = Split {
        yaml: None,
        body: source,
        body_offset: 0,
    };

    let Some(first_line_end) = source.find('\n') else {
        return no_front_matter;
    };
    if source[..first_line_end].trim_end() != "---" {
        return no_front_matter;
    }

    let rest = &source[first_line_end + 1..];
    let mut offset = 0;
    for (idx, line) in rest.split_inclusive('\n').enumerate() {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Split {
                yaml: Some(yaml),
                body,
                body_offset: idx + 2,
            };
        }
        offset += line.len();
    }

    no_front_matter
}
