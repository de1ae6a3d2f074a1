//! Shallow default merging for JSON-backed settings.
//!
//! Slider behaviour, caption styling and the site-wide branding strings all
//! follow one rule: start from hard-coded defaults and let an override
//! document replace individual top-level keys.
//!
//! - Keys present in the override replace the default value entirely.
//! - Keys absent from the override keep the default.
//! - Nested objects are **not** merged recursively; an override of a nested
//!   key replaces the whole nested value.
//! - `null` in an override counts as absent.
//!
//! This is deliberately shallower than [`crate::config::merge_toml`], which
//! merges the tool's own TOML config recursively.
//!
//! The merged value is deserialized back into the typed config. If that
//! fails (an override with the wrong type, say `"interval": "fast"`), the
//! override is rejected as a whole and the base value is kept.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("override must be a JSON object")]
    NotAnObject,
}

/// Overlay the top-level keys of `overlay` onto `base`.
pub fn shallow_merge(mut base: Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    for (key, value) in overlay {
        if value.is_null() {
            continue;
        }
        base.insert(key.clone(), value.clone());
    }
    base
}

/// Apply an override object to a typed base value.
pub fn merge_over<T>(base: &T, overlay: &Map<String, Value>) -> Result<T, MergeError>
where
    T: Serialize + DeserializeOwned,
{
    let Value::Object(base_map) = serde_json::to_value(base)? else {
        return Err(MergeError::NotAnObject);
    };
    let merged = shallow_merge(base_map, overlay);
    Ok(serde_json::from_value(Value::Object(merged))?)
}

/// Apply override layers in order, skipping (and logging) any that do not fit.
///
/// `what` names the setting group in log output.
pub fn merge_layers<T>(defaults: T, layers: &[Option<&Map<String, Value>>], what: &str) -> T
where
    T: Serialize + DeserializeOwned,
{
    layers.iter().flatten().fold(defaults, |current, overlay| {
        match merge_over(&current, overlay) {
            Ok(merged) => merged,
            Err(err) => {
                tracing::warn!(settings = what, error = %err, "ignoring malformed override");
                current
            }
        }
    })
}
