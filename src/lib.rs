//! # Catalog Press
//!
//! Resolves furniture product catalogues, stored as JSON documents and
//! images in a content tree, into fully typed render-ready aggregates, and
//! renders them as a static site.
//!
//! # Architecture: Resolve, Then Render
//!
//! ```text
//! 1. Discover   /catalogs listing or index.json  →  ordered catalogue ids
//! 2. Load       config.json + 8 section docs     →  CatalogData (or nothing)
//! 3. Render     CatalogData + global config      →  dist/ (static HTML)
//! ```
//!
//! Loading is all-or-nothing per catalogue: every required document must be
//! present and well formed, otherwise the catalogue is absent and nothing
//! partial escapes. Hero slides are optional: an explicit `slider.json`
//! list wins, otherwise numbered `hero_NN` images are probed in order.
//!
//! Content comes through the [`source::ContentSource`] trait, so the same
//! pipeline reads a local directory or an HTTP origin, and tests run
//! against an in-memory store.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`source`] | Content access: HTTP origin, local directory |
//! | [`fetch`] | Tolerant JSON fetch: any failure becomes "absent" |
//! | [`paths`] | Image path resolution and the content layout |
//! | [`merge`] | Shallow override of defaults by partial JSON layers |
//! | [`hero`] | Hero slide discovery, slider and caption settings |
//! | [`assemble`] | Per-catalogue loading into [`types::CatalogData`] |
//! | [`index`] | Catalogue discovery and summaries |
//! | [`global`] | Site-wide branding with defaults |
//! | [`types`] | Document and aggregate types |
//! | [`naming`] | Natural ordering and display headings for catalogue ids |
//! | [`config`] | `catalog-press.toml` loading, validation and merging |
//! | [`generate`] | Static HTML rendering with Maud |
//! | [`output`] | CLI output formatting |

pub mod assemble;
pub mod config;
pub mod fetch;
pub mod generate;
pub mod global;
pub mod hero;
pub mod index;
pub mod merge;
pub mod naming;
pub mod output;
pub mod paths;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
