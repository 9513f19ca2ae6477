//! Page records, validation, layouts and site builds for Folio.
//!
//! This crate provides:
//! - [`Page`]: a documentation page parsed from markdown with front matter
//!   (or from a `*.page.yaml` document)
//! - [`validate_page`] / [`check_unique_ids`] / [`check_unique_outputs`]: fatal
//!   validation rules
//! - [`Layout`]: wrapping a rendered body into a complete HTML document
//! - [`assemble`]: rendering one page through a layout
//! - [`Site`]: loading a docs directory and building it in parallel
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use folio_renderer::SelectionStore;
//! use folio_site::{DefaultLayout, RenderOptions, Site, SiteInfo};
//!
//! let site = Site::load("docs")?;
//! let layout = DefaultLayout::new(SiteInfo {
//!     title: "My Docs".to_owned(),
//!     base_url: "/".to_owned(),
//! });
//! let store = SelectionStore::from_query("language=dart");
//!
//! let report = site.build(Path::new("build"), &layout, RenderOptions::default(), &store)?;
//! println!("{} pages written", report.written.len());
//! # Ok(())
//! # }
//! ```

mod assemble;
mod error;
mod frontmatter;
mod layout;
mod page;
mod scanner;
mod site;
mod validate;

pub use assemble::{Document, RenderOptions, assemble};
pub use error::{SiteError, ValidationError};
pub use frontmatter::FrontMatter;
pub use layout::{DefaultLayout, Layout, LayoutContext, SiteInfo, TemplateLayout};
pub use page::{PAGE_YAML_SUFFIX, Page, PageMeta, ParsedPage};
pub use site::{BuildReport, PageLint, Site, load_page};
pub use validate::{check_unique_ids, check_unique_outputs, validate_page};
