//! Site-wide branding strings.
//!
//! Loaded from `/config.json` independently of any catalogue. The document
//! is optional and may be partial; every key it omits keeps its default,
//! and any failure (missing file, bad status, malformed JSON, a key of the
//! wrong type) yields the defaults.

use crate::fetch::fetch_document;
use crate::merge::merge_layers;
use crate::source::ContentSource;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalConfig {
    pub brand_name: String,
    pub site_title: String,
    pub site_subtitle: String,
    pub footer_text: String,
    /// Heading above the catalogue list on the index page.
    pub catalog_list_title: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            brand_name: "Metro".to_string(),
            site_title: "METRO".to_string(),
            site_subtitle: "Product catalogues — browse by collection".to_string(),
            footer_text: "CONCEPT / CREATION / EXECUTION BY CONCEPTFAB".to_string(),
            catalog_list_title: "Available catalogues".to_string(),
        }
    }
}

/// Fetch the global config at `path`, falling back to defaults.
pub fn get_global_config(source: &dyn ContentSource, path: &str) -> GlobalConfig {
    match fetch_document::<Value>(source, path) {
        Some(Value::Object(overrides)) => {
            merge_layers(GlobalConfig::default(), &[Some(&overrides)], "global config")
        }
        Some(_) => {
            tracing::warn!(path, "global config is not a JSON object, using defaults");
            GlobalConfig::default()
        }
        None => GlobalConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoaderConfig;
    use crate::source::HttpSource;
    use crate::test_helpers::{MockSource, TestOrigin};

    const PATH: &str = "/config.json";

    #[test]
    fn server_error_yields_defaults() {
        let source = MockSource::new().with_status(PATH, 500);
        let config = get_global_config(&source, PATH);
        assert_eq!(config, GlobalConfig::default());
        assert_eq!(config.brand_name, "Metro");
        assert_eq!(config.site_title, "METRO");
        assert_eq!(
            config.footer_text,
            "CONCEPT / CREATION / EXECUTION BY CONCEPTFAB"
        );
    }

    #[test]
    fn http_server_error_yields_defaults() {
        let origin = TestOrigin::new().with_status(PATH, 500).serve();
        let source = HttpSource::new(&origin.base_url, &LoaderConfig::default());
        assert_eq!(get_global_config(&source, PATH), GlobalConfig::default());
        assert_eq!(origin.paths("GET"), vec![PATH.to_string()]);
    }

    #[test]
    fn http_partial_document_overlays_defaults() {
        let origin = TestOrigin::new()
            .with_json(PATH, r#"{"siteTitle": "METRO OFFICE"}"#)
            .serve();
        let source = HttpSource::new(&origin.base_url, &LoaderConfig::default());
        let config = get_global_config(&source, PATH);
        assert_eq!(config.site_title, "METRO OFFICE");
        assert_eq!(config.brand_name, "Metro");
    }

    #[test]
    fn missing_document_yields_defaults() {
        let source = MockSource::new();
        assert_eq!(get_global_config(&source, PATH), GlobalConfig::default());
    }

    #[test]
    fn network_error_yields_defaults() {
        let source = MockSource::new().with_network_error(PATH);
        assert_eq!(get_global_config(&source, PATH), GlobalConfig::default());
    }

    #[test]
    fn partial_document_overlays_defaults() {
        let source = MockSource::new().with_json(PATH, r#"{"siteTitle": "OAKWORKS"}"#);
        let config = get_global_config(&source, PATH);
        assert_eq!(config.site_title, "OAKWORKS");
        assert_eq!(config.brand_name, "Metro");
        assert_eq!(config.catalog_list_title, "Available catalogues");
    }

    #[test]
    fn malformed_json_yields_defaults() {
        let source = MockSource::new().with_json(PATH, "{ siteTitle: ");
        assert_eq!(get_global_config(&source, PATH), GlobalConfig::default());
    }

    #[test]
    fn non_object_yields_defaults() {
        let source = MockSource::new().with_json(PATH, r#"["METRO"]"#);
        assert_eq!(get_global_config(&source, PATH), GlobalConfig::default());
    }

    #[test]
    fn wrong_typed_key_yields_defaults() {
        let source = MockSource::new().with_json(PATH, r#"{"siteTitle": 7, "brandName": "X"}"#);
        assert_eq!(get_global_config(&source, PATH), GlobalConfig::default());
    }
}
