//! CLI output formatting for every subcommand.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every catalogue is its identity (positional index, id and title),
//! with section, slide and path details shown as indented context lines.
//!
//! # Output Format
//!
//! ## List
//!
//! ```text
//! Catalogues
//! 001 qx-1 Collection QX-1
//!     Theme: qx2
//! 002 qx-2 Collection QX-2
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 qx-1 ok (8 sections, 3 hero slides)
//! 002 qx-7 FAILED
//!
//! Checked 2 catalogues: 1 ok, 1 failed
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! 001 qx-1 → catalog/qx-1/index.html
//!
//! Generated 1 catalogue page, copied 14 assets
//! ```
//!
//! # Architecture
//!
//! Each subcommand has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::GenerateReport;
use crate::types::{CatalogData, CatalogId, CatalogSummary};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Catalogue header: positional index, id and title.
///
/// ```text
/// 001 qx-1 Collection QX-1
/// ```
fn entity_header(index: usize, id: &CatalogId, title: &str) -> String {
    format!("{} {} {}", format_index(index), id, title)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// list
// ============================================================================

pub fn format_list(summaries: &[CatalogSummary]) -> Vec<String> {
    let mut lines = vec!["Catalogues".to_string()];
    if summaries.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
        return lines;
    }
    for (i, summary) in summaries.iter().enumerate() {
        lines.push(entity_header(i + 1, &summary.id, &summary.meta.title));
        if !summary.meta.description.is_empty() {
            lines.push(format!(
                "{}Description: {}",
                indent(1),
                truncate_desc(&summary.meta.description, 60)
            ));
        }
        if let Some(theme) = &summary.meta.theme {
            lines.push(format!("{}Theme: {}", indent(1), theme));
        }
    }
    lines
}

pub fn print_list(summaries: &[CatalogSummary]) {
    for line in format_list(summaries) {
        println!("{line}");
    }
}

// ============================================================================
// show
// ============================================================================

/// The full aggregate as pretty-printed JSON.
pub fn format_catalog(catalog: &CatalogData) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(catalog)
}

pub fn print_catalog(catalog: &CatalogData) -> Result<(), serde_json::Error> {
    println!("{}", format_catalog(catalog)?);
    Ok(())
}

// ============================================================================
// check
// ============================================================================

pub fn format_check(results: &[(CatalogId, Option<CatalogData>)]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut failed = 0;
    for (i, (id, catalog)) in results.iter().enumerate() {
        match catalog {
            Some(catalog) => {
                let enabled = catalog.visible_sections().count();
                lines.push(format!(
                    "{} {} ok ({}, {})",
                    format_index(i + 1),
                    id,
                    plural(enabled, "section", "sections"),
                    plural(catalog.hero.slides.len(), "hero slide", "hero slides"),
                ));
            }
            None => {
                failed += 1;
                lines.push(format!("{} {} FAILED", format_index(i + 1), id));
            }
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "Checked {}: {} ok, {} failed",
        plural(results.len(), "catalogue", "catalogues"),
        results.len() - failed,
        failed
    ));
    lines
}

pub fn print_check(results: &[(CatalogId, Option<CatalogData>)]) {
    for line in format_check(results) {
        println!("{line}");
    }
}

// ============================================================================
// build
// ============================================================================

pub fn format_build(report: &GenerateReport, output_dir: &Path) -> Vec<String> {
    let relative = |p: &Path| {
        p.strip_prefix(output_dir)
            .unwrap_or(p)
            .display()
            .to_string()
    };
    let mut lines = Vec::new();
    let mut pages = report.pages.iter();
    if let Some(index) = pages.next() {
        lines.push(format!("Home → {}", relative(index)));
    }
    let mut count = 0;
    for page in pages {
        count += 1;
        let id = page
            .parent()
            .and_then(|dir| dir.file_name())
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        lines.push(format!("{} {} → {}", format_index(count), id, relative(page)));
    }
    lines.push(String::new());
    let mut summary = format!(
        "Generated {}",
        plural(count, "catalogue page", "catalogue pages")
    );
    if report.assets_copied > 0 {
        summary.push_str(&format!(
            ", copied {}",
            plural(report.assets_copied, "asset", "assets")
        ));
    }
    lines.push(summary);
    lines
}

pub fn print_build(report: &GenerateReport, output_dir: &Path) {
    for line in format_build(report, output_dir) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::CatalogLoader;
    use crate::config::LoaderConfig;
    use crate::test_helpers::MockSource;
    use crate::types::CatalogMeta;
    use std::path::PathBuf;

    fn meta(title: &str, theme: Option<&str>) -> CatalogMeta {
        CatalogMeta {
            title: title.into(),
            description: String::new(),
            brand_name: "Metro".into(),
            collection_name: "QX".into(),
            theme: theme.map(Into::into),
        }
    }

    #[test]
    fn format_index_pads_to_three_digits() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate_desc("short", 10), "short");
        assert_eq!(truncate_desc("Möbel für alle", 5), "Möbel...");
    }

    #[test]
    fn list_shows_index_id_title_and_theme() {
        let summaries = vec![
            CatalogSummary {
                id: CatalogId::new("qx-1"),
                meta: meta("Collection QX-1", Some("qx2")),
            },
            CatalogSummary {
                id: CatalogId::new("qx-2"),
                meta: meta("Collection QX-2", None),
            },
        ];
        assert_eq!(
            format_list(&summaries),
            vec![
                "Catalogues",
                "001 qx-1 Collection QX-1",
                "    Theme: qx2",
                "002 qx-2 Collection QX-2",
            ]
        );
    }

    #[test]
    fn empty_list_says_none() {
        assert_eq!(format_list(&[]), vec!["Catalogues", "    (none)"]);
    }

    #[test]
    fn check_counts_failures() {
        let source = MockSource::new().with_catalog("qx-1");
        let config = LoaderConfig::default();
        let loader = CatalogLoader::new(&source, &config);
        let results = loader.load_many(&[CatalogId::new("qx-1"), CatalogId::new("qx-7")]);
        let lines = format_check(&results);
        assert_eq!(lines[0], "001 qx-1 ok (8 sections, 0 hero slides)");
        assert_eq!(lines[1], "002 qx-7 FAILED");
        assert_eq!(lines.last().unwrap(), "Checked 2 catalogues: 1 ok, 1 failed");
    }

    #[test]
    fn show_is_camel_case_json() {
        let source = MockSource::new().with_catalog("qx-1");
        let config = LoaderConfig::default();
        let catalog = CatalogLoader::new(&source, &config)
            .load_catalog(&CatalogId::new("qx-1"))
            .unwrap();
        let json = format_catalog(&catalog).unwrap();
        assert!(json.contains("\"heroImageAlt\""));
        assert!(json.contains("\"descriptionStyle\""));
        assert!(json.contains("\"id\": \"qx-1\""));
    }

    #[test]
    fn build_lists_pages_relative_to_output() {
        let out = PathBuf::from("/tmp/dist");
        let report = GenerateReport {
            pages: vec![
                out.join("index.html"),
                out.join("catalog/qx-1/index.html"),
            ],
            assets_copied: 3,
        };
        assert_eq!(
            format_build(&report, &out),
            vec![
                "Home → index.html",
                "001 qx-1 → catalog/qx-1/index.html",
                "",
                "Generated 1 catalogue page, copied 3 assets",
            ]
        );
    }
}
