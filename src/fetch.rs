//! Tolerant document fetching.
//!
//! Every content document is optional from the pipeline's point of view.
//! [`fetch_document`] collapses all failure modes into `None`:
//!
//! - the source errors (network, IO, refused path),
//! - the response status is not 2xx,
//! - the body is not JSON, or does not match the expected schema,
//! - the document deserializes but fails [`Validate`].
//!
//! The cause is logged, never returned. Callers decide what absence means:
//! the assembler treats a missing section as fatal for the whole catalogue,
//! the global config loader falls back to defaults.

use crate::source::ContentSource;
use serde::de::DeserializeOwned;

/// Semantic checks run after a document matched its schema.
///
/// The default accepts everything; documents with cross-field invariants
/// override it.
pub trait Validate {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

impl Validate for serde_json::Value {}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), String> {
        self.as_ref().map_or(Ok(()), Validate::validate)
    }
}

/// Fetch and parse a JSON document, or `None` on any failure.
pub fn fetch_document<T>(source: &dyn ContentSource, path: &str) -> Option<T>
where
    T: DeserializeOwned + Validate,
{
    let response = match source.get(path) {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(path, error = %err, "fetch failed");
            return None;
        }
    };
    if !response.is_success() {
        tracing::debug!(path, status = response.status, "document not available");
        return None;
    }
    let document: T = match serde_json::from_slice(&response.body) {
        Ok(document) => document,
        Err(err) => {
            tracing::warn!(path, error = %err, "document does not match its schema");
            return None;
        }
    };
    if let Err(reason) = document.validate() {
        tracing::warn!(path, %reason, "document failed validation");
        return None;
    }
    Some(document)
}
