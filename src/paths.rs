//! Asset path resolution and the well-known content layout.
//!
//! Content documents reference images relative to the folder the document
//! lives in. A gallery entry `"a.jpg"` inside `/catalogs/qx-1/gallery/content.json`
//! means `/catalogs/qx-1/gallery/a.jpg`. Every section goes through the same
//! [`resolve`] function so the rule cannot drift between sections.
//!
//! ```text
//! /catalogs/
//! ├── index.json                 # static manifest { "catalogs": [...] }
//! └── qx-1/
//!     ├── config.json            # { meta, sections? }
//!     ├── hero/
//!     │   ├── content.json
//!     │   ├── slider.json        # optional slide list + settings
//!     │   ├── hero_00.jpg        # discovered slides
//!     │   └── hero_01.jpg
//!     ├── overview/content.json
//!     └── ...                    # one folder per section
//! ```

use crate::types::{CatalogId, SectionKind};

/// Resolve a content-relative asset path against a section base path.
///
/// - `""` stays `""` (explicitly "no image").
/// - Anything starting with `http` or `/` is already absolute and is returned as-is.
/// - Otherwise `base` and `raw` are joined with exactly one `/`.
pub fn resolve(base: &str, raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    if raw.starts_with("http") || raw.starts_with('/') {
        return raw.to_string();
    }
    let base = base.trim_end_matches('/');
    let raw = raw.strip_prefix("./").unwrap_or(raw);
    format!("{base}/{raw}")
}

/// Join a base path and a child segment with a single slash.
pub fn join(base: &str, child: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        child.trim_start_matches('/')
    )
}

/// Well-known locations inside a content store.
///
/// Built from [`ContentConfig`](crate::config::ContentConfig); all paths are
/// root-relative (`/catalogs`, not `catalogs`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLayout {
    pub catalog_root: String,
    pub catalog_config_file: String,
    pub section_document_file: String,
    pub slider_document_file: String,
}

impl ContentLayout {
    pub fn from_config(content: &crate::config::ContentConfig) -> Self {
        Self {
            catalog_root: content.catalog_root.clone(),
            catalog_config_file: content.catalog_config_file.clone(),
            section_document_file: content.section_document_file.clone(),
            slider_document_file: content.slider_document_file.clone(),
        }
    }

    /// `/catalogs/<id>`
    pub fn catalog_base(&self, id: &CatalogId) -> String {
        join(&self.catalog_root, id.as_str())
    }

    /// `/catalogs/<id>/config.json`
    pub fn catalog_config(&self, id: &CatalogId) -> String {
        join(&self.catalog_base(id), &self.catalog_config_file)
    }

    /// `/catalogs/<id>/<section>`, the base every asset of that section resolves against.
    pub fn section_base(&self, id: &CatalogId, section: SectionKind) -> String {
        join(&self.catalog_base(id), section.folder())
    }

    /// `/catalogs/<id>/<section>/content.json`
    pub fn section_document(&self, id: &CatalogId, section: SectionKind) -> String {
        join(
            &self.section_base(id, section),
            &self.section_document_file,
        )
    }

    /// `/catalogs/<id>/hero/slider.json`
    pub fn slider_document(&self, id: &CatalogId) -> String {
        join(
            &self.section_base(id, SectionKind::Hero),
            &self.slider_document_file,
        )
    }
}

impl Default for ContentLayout {
    fn default() -> Self {
        Self::from_config(&crate::config::ContentConfig::default())
    }
}
