//! Catalogue data model.
//!
//! Two families of types live here:
//!
//! - **Documents** as they are stored in the content tree (`config.json`,
//!   `<section>/content.json`). Field names are camelCase on the wire.
//! - The resolved **aggregate** ([`CatalogData`]) handed to renderers. It is
//!   built once per successful load and never patched afterwards.
//!
//! Most section documents are already render-ready once their image paths
//! are resolved, so the same type serves both roles. Gallery and hero differ:
//! raw gallery entries name their file `image` while resolved entries carry
//! `src`, and the resolved hero gains its slide list and merged settings.

use crate::fetch::Validate;
use crate::hero::{HeroDescriptionStyleConfig, HeroSlide, HeroSliderConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// A catalogue name that cannot be used as a single path segment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid catalogue id {0:?}")]
pub struct InvalidCatalogId(pub String);

/// Opaque name of a catalogue content folder.
///
/// Ids read from listings, manifests or the command line go through
/// [`CatalogId::parse`]; they end up as a folder name under the output
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(String);

impl CatalogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Accept an externally supplied id. Rejects empty names, names with a
    /// leading `.`, and names containing a path separator.
    pub fn parse(id: &str) -> Result<Self, InvalidCatalogId> {
        if id.is_empty() || id.starts_with('.') || id.contains(['/', '\\']) {
            return Err(InvalidCatalogId(id.to_string()));
        }
        Ok(Self::new(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CatalogId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The eight fixed content sections, in canonical page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Hero,
    Overview,
    Gallery,
    Variants,
    Dimensions,
    Materials,
    Features,
    Assembly,
}

impl SectionKind {
    pub const ALL: [SectionKind; 8] = [
        SectionKind::Hero,
        SectionKind::Overview,
        SectionKind::Gallery,
        SectionKind::Variants,
        SectionKind::Dimensions,
        SectionKind::Materials,
        SectionKind::Features,
        SectionKind::Assembly,
    ];

    /// Canonical section id, also the default navigation anchor.
    pub fn id(self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::Overview => "overview",
            SectionKind::Gallery => "gallery",
            SectionKind::Variants => "variants",
            SectionKind::Dimensions => "dimensions",
            SectionKind::Materials => "materials",
            SectionKind::Features => "features",
            SectionKind::Assembly => "assembly",
        }
    }

    /// Content subfolder holding this section's document and assets.
    pub fn folder(self) -> &'static str {
        self.id()
    }

    /// Map a navigation id back to its section. `cover` is accepted for the hero.
    pub fn from_id(id: &str) -> Option<Self> {
        if id == "cover" {
            return Some(SectionKind::Hero);
        }
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ============================================================================
// Catalogue configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMeta {
    pub title: String,
    pub description: String,
    pub brand_name: String,
    pub collection_name: String,
    /// Presentation variant tag. Only the renderer looks at it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// One navigable section of a catalogue page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl SectionConfig {
    /// Sections are shown unless explicitly disabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }
}

/// Navigation used when a catalogue config has no `sections` list.
pub fn default_sections() -> Vec<SectionConfig> {
    SectionKind::ALL
        .iter()
        .map(|kind| SectionConfig {
            id: kind.id().to_string(),
            label: kind.id().to_string(),
            enabled: None,
        })
        .collect()
}

/// `/catalogs/<id>/config.json`
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub meta: CatalogMeta,
    #[serde(default)]
    pub sections: Option<Vec<SectionConfig>>,
}

impl CatalogConfig {
    /// The navigation list, falling back to the canonical eight sections.
    pub fn sections_or_default(&self) -> Vec<SectionConfig> {
        self.sections.clone().unwrap_or_else(default_sections)
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<(), String> {
        let Some(sections) = &self.sections else {
            return Ok(());
        };
        let mut seen = HashSet::new();
        for section in sections {
            if section.id.trim().is_empty() {
                return Err("section id must not be empty".into());
            }
            if !seen.insert(section.id.as_str()) {
                return Err(format!("duplicate section id '{}'", section.id));
            }
        }
        Ok(())
    }
}

/// `/catalogs/index.json` and the listing endpoint body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogIndex {
    #[serde(default)]
    pub catalogs: Vec<String>,
}

impl Validate for CatalogIndex {}

// ============================================================================
// Section documents
// ============================================================================

/// `hero/content.json` as stored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroDocument {
    pub brand_label: String,
    pub collection_name: String,
    pub tagline: String,
    #[serde(default)]
    pub tagline_line2: Option<String>,
    pub cta_label: String,
    pub hero_image: String,
    pub hero_image_alt: String,
    /// Partial slider settings; merged over the defaults.
    #[serde(default)]
    pub slider: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Validate for HeroDocument {}

/// Resolved hero: static image plus the slide sequence and merged settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroData {
    pub brand_label: String,
    pub collection_name: String,
    pub tagline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline_line2: Option<String>,
    pub cta_label: String,
    pub hero_image: String,
    pub hero_image_alt: String,
    /// Empty when the hero renders as a single static image.
    pub slides: Vec<HeroSlide>,
    pub slider: HeroSliderConfig,
    pub description_style: HeroDescriptionStyleConfig,
}

impl HeroData {
    pub fn has_slider(&self) -> bool {
        !self.slides.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewFeature {
    pub icon: String,
    pub title: String,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewData {
    pub section_label: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_line2: Option<String>,
    pub paragraphs: Vec<String>,
    pub packshot_image: String,
    pub packshot_image_alt: String,
    pub packshot_caption: String,
    pub features: Vec<OverviewFeature>,
    pub quick_link_labels: Vec<String>,
}

impl Validate for OverviewData {}

/// Gallery entry as stored: the file is named by `image`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGalleryImage {
    pub image: String,
    pub alt: String,
    pub category: String,
}

/// `gallery/content.json` as stored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGalleryData {
    pub section_label: String,
    pub title: String,
    #[serde(default)]
    pub images: Vec<RawGalleryImage>,
}

impl Validate for RawGalleryData {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryData {
    pub section_label: String,
    pub title: String,
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorOption {
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ral: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeOption {
    pub label: String,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub feature: String,
    pub basic: String,
    pub premium: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantsData {
    pub section_label: String,
    pub title: String,
    pub desktop_colors: Vec<ColorOption>,
    pub frame_colors: Vec<ColorOption>,
    pub sizes: Vec<SizeOption>,
    pub preview_image: String,
    pub comparison_table: Vec<ComparisonRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_basic_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_premium_label: Option<String>,
}

impl VariantsData {
    pub fn basic_label(&self) -> &str {
        self.comparison_basic_label.as_deref().unwrap_or("Basic")
    }

    pub fn premium_label(&self) -> &str {
        self.comparison_premium_label.as_deref().unwrap_or("Premium")
    }
}

impl Validate for VariantsData {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionDiagram {
    pub width: String,
    pub depth: String,
    pub height_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionsData {
    pub section_label: String,
    pub title: String,
    pub specs: Vec<SpecItem>,
    pub certifications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_diagram: Option<DimensionDiagram>,
}

impl Validate for DimensionsData {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialItem {
    pub name: String,
    pub desc: String,
    pub specs: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSwatch {
    pub name: String,
    pub hex: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsData {
    pub section_label: String,
    pub title: String,
    pub materials: Vec<MaterialItem>,
    pub swatches: Vec<ColorSwatch>,
    pub detail_image: String,
    pub detail_image_alt: String,
    pub detail_image_caption: String,
}

impl Validate for MaterialsData {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureItem {
    pub icon: String,
    pub title: String,
    pub desc: String,
    pub badge: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesData {
    pub section_label: String,
    pub title: String,
    pub items: Vec<FeatureItem>,
}

impl Validate for FeaturesData {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyStep {
    pub step: u32,
    pub title: String,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCode {
    pub code: String,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtaLabels {
    pub quote: String,
    pub pdf: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyData {
    pub section_label: String,
    pub title: String,
    pub steps: Vec<AssemblyStep>,
    pub order_codes: Vec<OrderCode>,
    pub cta_labels: CtaLabels,
    pub footer_text: String,
    pub version_info: String,
}

impl Validate for AssemblyData {}

// ============================================================================
// Aggregate
// ============================================================================

/// A fully resolved, render-ready catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogData {
    pub id: CatalogId,
    pub meta: CatalogMeta,
    pub sections: Vec<SectionConfig>,
    pub hero: HeroData,
    pub overview: OverviewData,
    pub gallery: GalleryData,
    pub variants: VariantsData,
    pub dimensions: DimensionsData,
    pub materials: MaterialsData,
    pub features: FeaturesData,
    pub assembly: AssemblyData,
}

impl CatalogData {
    /// Sections that appear in navigation, in configured order.
    pub fn visible_sections(&self) -> impl Iterator<Item = &SectionConfig> {
        self.sections.iter().filter(|s| s.is_enabled())
    }
}

/// Entry on the catalogue index page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub id: CatalogId,
    pub meta: CatalogMeta,
}
