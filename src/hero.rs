//! Hero slides: discovery, explicit slide lists and slider settings.
//!
//! A catalogue's hero can show a rotating sequence of images. The sequence
//! comes from one of two places:
//!
//! 1. **Explicit**: `hero/slider.json` lists slides with per-slide alt text
//!    and captions. Its order is authoritative.
//! 2. **Discovered**: numbered files `hero_00.jpg`, `hero_01.jpg`, … in the
//!    hero folder. Content folders are plain static files with no listing,
//!    so existence is inferred by probing.
//!
//! ## Discovery
//!
//! Probes run one at a time in ascending order and stop at the first gap:
//!
//! ```text
//! hero_00.jpg  200 image/jpeg   → slide 1
//! hero_01.jpg  200 image/jpeg   → slide 2
//! hero_02.jpg  404              → stop (hero_03 is never probed)
//! ```
//!
//! A probe counts only when it succeeds *and* declares an `image/*` type;
//! servers that answer unknown paths with an HTML fallback page therefore
//! end the sequence too. The number of probes is capped by
//! `discovery.max_hero_slides` (default 20).
//!
//! ## Settings
//!
//! Slider behaviour and caption styling are merged over defaults with
//! [`merge_layers`](crate::merge::merge_layers): hero `content.json`
//! `slider` first, then `slider.json` `settings`.

use crate::config::DiscoveryConfig;
use crate::fetch::Validate;
use crate::merge::merge_layers;
use crate::paths;
use crate::source::ContentSource;
use crate::types::{HeroData, HeroDocument};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One image of the hero sequence, with its URL already resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroSlide {
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Slide rotation behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSliderConfig {
    /// Advance to the next slide automatically.
    pub auto_advance: bool,
    /// Milliseconds between slides.
    pub interval: u64,
    /// Pause auto-advance while the pointer is over the hero.
    pub pause_on_hover: bool,
    /// Cross-fade duration in milliseconds.
    pub transition_ms: u64,
    pub show_arrows: bool,
    pub show_dots: bool,
    /// 0-based; clamped to the slide range by [`Self::initial_index`].
    pub initial_slide: i64,
}

impl Default for HeroSliderConfig {
    fn default() -> Self {
        Self {
            auto_advance: true,
            interval: 5000,
            pause_on_hover: true,
            transition_ms: 500,
            show_arrows: true,
            show_dots: true,
            initial_slide: 0,
        }
    }
}

impl HeroSliderConfig {
    /// Starting slide for a sequence of `slide_count` images.
    pub fn initial_index(&self, slide_count: usize) -> usize {
        if slide_count == 0 {
            return 0;
        }
        self.initial_slide.clamp(0, slide_count as i64 - 1) as usize
    }
}

/// Placement and look of the per-slide caption overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroDescriptionStyleConfig {
    /// Corner or edge the caption is anchored to, e.g. `bottom-left`.
    pub position: String,
    pub align: String,
    pub max_width: String,
    pub offset_x: String,
    pub offset_y: String,
    pub background: String,
    pub text_color: String,
}

impl Default for HeroDescriptionStyleConfig {
    fn default() -> Self {
        Self {
            position: "bottom-left".to_string(),
            align: "left".to_string(),
            max_width: "32rem".to_string(),
            offset_x: "2rem".to_string(),
            offset_y: "6rem".to_string(),
            background: "rgba(0, 0, 0, 0.45)".to_string(),
            text_color: "#ffffff".to_string(),
        }
    }
}

impl HeroDescriptionStyleConfig {
    /// Inline CSS custom properties for the caption element.
    pub fn to_css(&self) -> String {
        format!(
            "--caption-max-width: {}; --caption-offset-x: {}; --caption-offset-y: {}; \
             --caption-bg: {}; --caption-color: {}; text-align: {};",
            self.max_width, self.offset_x, self.offset_y, self.background, self.text_color, self.align
        )
    }
}

/// Entry of an explicit slide list. `image` is relative to the hero folder.
#[derive(Debug, Clone, Deserialize)]
pub struct SlideEntry {
    pub image: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// `hero/slider.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSliderDocument {
    #[serde(default)]
    pub settings: Option<Map<String, Value>>,
    #[serde(default)]
    pub description_style: Option<Map<String, Value>>,
    #[serde(default)]
    pub slides: Option<Vec<SlideEntry>>,
}

impl Validate for HeroSliderDocument {
    fn validate(&self) -> Result<(), String> {
        let blank = self
            .slides
            .iter()
            .flatten()
            .position(|slide| slide.image.trim().is_empty());
        match blank {
            Some(index) => Err(format!("slide {index} has no image")),
            None => Ok(()),
        }
    }
}

/// Outcome of probing one candidate file.
#[derive(Debug, Clone, PartialEq)]
enum Probe {
    Image,
    Gap { status: u16, content_type: Option<String> },
    Unreachable(String),
}

fn probe(source: &dyn ContentSource, url: &str) -> Probe {
    match source.head(url) {
        Ok(head) if head.is_image() => Probe::Image,
        Ok(head) => Probe::Gap {
            status: head.status,
            content_type: head.content_type,
        },
        Err(err) => Probe::Unreachable(err.to_string()),
    }
}

/// Candidate filename for slide `index`: `hero_00.jpg`, `hero_01.jpg`, …
pub fn candidate_name(config: &DiscoveryConfig, index: usize) -> String {
    format!("{}{:02}.{}", config.hero_prefix, index, config.hero_extension)
}

/// Probe numbered hero images under `hero_base` until the first gap.
///
/// Returns the confirmed URLs in ascending order; may be empty.
#[tracing::instrument(skip(source, config))]
pub fn discover_hero_slides(
    source: &dyn ContentSource,
    hero_base: &str,
    config: &DiscoveryConfig,
) -> Vec<String> {
    let mut found = Vec::new();
    while found.len() < config.max_hero_slides {
        let url = paths::join(hero_base, &candidate_name(config, found.len()));
        match probe(source, &url) {
            Probe::Image => found.push(url),
            Probe::Gap {
                status,
                content_type,
            } => {
                tracing::debug!(%url, status, ?content_type, "hero sequence ends");
                break;
            }
            Probe::Unreachable(error) => {
                tracing::debug!(%url, %error, "hero probe failed; sequence ends");
                break;
            }
        }
    }
    tracing::debug!(count = found.len(), "hero slides discovered");
    found
}

/// Slides for discovered URLs: the first carries the hero alt text, the
/// rest are numbered.
fn discovered_slides(urls: Vec<String>, alt: &str) -> Vec<HeroSlide> {
    let total = urls.len();
    urls.into_iter()
        .enumerate()
        .map(|(i, src)| HeroSlide {
            src,
            alt: if i == 0 {
                alt.to_string()
            } else {
                format!("{alt} — slide {} of {total}", i + 1)
            },
            description: None,
        })
        .collect()
}

/// Build the resolved hero section.
///
/// An explicit, non-empty slide list wins and `discover` is never called.
/// Otherwise `discover` runs once and its URLs become the slide sequence.
pub fn resolve_hero(
    document: HeroDocument,
    hero_base: &str,
    slider_document: Option<&HeroSliderDocument>,
    discover: impl FnOnce() -> Vec<String>,
) -> HeroData {
    let explicit = slider_document
        .and_then(|doc| doc.slides.as_ref())
        .filter(|slides| !slides.is_empty());

    let slides = match explicit {
        Some(entries) => entries
            .iter()
            .map(|entry| HeroSlide {
                src: paths::resolve(hero_base, &entry.image),
                alt: entry
                    .alt
                    .clone()
                    .unwrap_or_else(|| document.hero_image_alt.clone()),
                description: entry.description.clone(),
            })
            .collect(),
        None => discovered_slides(discover(), &document.hero_image_alt),
    };

    let slider = merge_layers(
        HeroSliderConfig::default(),
        &[
            document.slider.as_ref(),
            slider_document.and_then(|doc| doc.settings.as_ref()),
        ],
        "hero slider",
    );
    let description_style = merge_layers(
        HeroDescriptionStyleConfig::default(),
        &[slider_document.and_then(|doc| doc.description_style.as_ref())],
        "hero description style",
    );

    HeroData {
        hero_image: paths::resolve(hero_base, &document.hero_image),
        brand_label: document.brand_label,
        collection_name: document.collection_name,
        tagline: document.tagline,
        tagline_line2: document.tagline_line2,
        cta_label: document.cta_label,
        hero_image_alt: document.hero_image_alt,
        slides,
        slider,
        description_style,
    }
}
