//! Catalogue discovery.
//!
//! The set of catalogues is whatever folders exist under the catalogue root.
//! Two sources are consulted, in order:
//!
//! 1. **Listing**: [`ContentSource::list_dir`] on the catalogue root.
//!    Hidden entries (leading `.`) and plain files are dropped; the rest is
//!    sorted with [`natural_cmp`] so `catalog-2` precedes `catalog-10`.
//! 2. **Manifest**: `/catalogs/index.json`, used when the listing fails or
//!    comes back empty. Its order is taken as given.
//!
//! Names from either source that [`CatalogId::parse`] rejects are logged and
//! skipped.
//!
//! If both fail the result is empty. Discovery never reports an error.

use crate::assemble::CatalogLoader;
use crate::config::ContentConfig;
use crate::fetch::fetch_document;
use crate::naming::natural_cmp;
use crate::source::{ContentSource, DirEntry};
use crate::types::{CatalogId, CatalogIndex, CatalogSummary};

/// Turn external names into ids, dropping the ones that are not a plain
/// folder name.
fn accepted_ids(names: impl IntoIterator<Item = String>) -> Vec<CatalogId> {
    names
        .into_iter()
        .filter_map(|name| match CatalogId::parse(&name) {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::warn!(error = %err, "skipping catalogue");
                None
            }
        })
        .collect()
}

/// Keep visible directories and sort them naturally.
fn visible_catalogs(entries: Vec<DirEntry>) -> Vec<CatalogId> {
    let mut names: Vec<String> = entries
        .into_iter()
        .filter(|entry| entry.is_dir && !entry.name.starts_with('.'))
        .map(|entry| entry.name)
        .collect();
    names.sort_by(|a, b| natural_cmp(a, b));
    accepted_ids(names)
}

/// Ordered ids of every available catalogue.
pub fn list_catalog_ids(source: &dyn ContentSource, content: &ContentConfig) -> Vec<CatalogId> {
    match source.list_dir(&content.catalog_root) {
        Ok(entries) => {
            let ids = visible_catalogs(entries);
            if !ids.is_empty() {
                tracing::debug!(count = ids.len(), "catalogues from listing");
                return ids;
            }
            tracing::debug!("listing is empty, trying manifest");
        }
        Err(err) => {
            tracing::debug!(error = %err, "listing unavailable, trying manifest");
        }
    }

    match fetch_document::<CatalogIndex>(source, &content.manifest) {
        Some(index) => {
            tracing::debug!(count = index.catalogs.len(), "catalogues from manifest");
            accepted_ids(index.catalogs)
        }
        None => {
            tracing::warn!(source = %source.describe(), "no catalogue listing or manifest available");
            Vec::new()
        }
    }
}

/// `{id, meta}` for every listed catalogue that loads, in listing order.
///
/// Catalogues that fail to load are left out.
pub fn list_catalog_summaries(loader: &CatalogLoader<'_>, content: &ContentConfig) -> Vec<CatalogSummary> {
    let ids = list_catalog_ids(loader.source(), content);
    loader
        .load_many(&ids)
        .into_iter()
        .filter_map(|(id, catalog)| {
            catalog.map(|catalog| CatalogSummary {
                id,
                meta: catalog.meta,
            })
        })
        .collect()
}
