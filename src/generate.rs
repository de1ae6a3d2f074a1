//! HTML site generation.
//!
//! Consumes resolved [`CatalogData`] and writes a static site. Nothing here
//! feeds back into loading; a catalogue that failed to load simply has no
//! page.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): catalogue cards with formatted headings
//! - **Catalogue pages** (`/catalog/{id}/index.html`): navigation plus the
//!   eight sections in fixed order
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── catalog/
//! │   ├── qx-1/index.html
//! │   └── qx-2/index.html
//! └── catalogs/                # images, copied from a local content directory
//!     └── qx-1/hero/hero_00.jpg
//! ```
//!
//! Asset URLs in the aggregate are root-relative (`/catalogs/...`), so the
//! site is meant to be served from its root.
//!
//! ## Themes
//!
//! `meta.theme` selects a [`Theme`]. The raw tag always becomes a
//! `catalog-<tag>` class on the page wrapper; the enum only picks structural
//! variants (navigation style, mosaic hero). Unknown tags render as
//! [`Theme::Default`].
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: base and per-theme styles
//! - `static/slider.js`: hero slider, configured through `data-*` attributes
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::global::GlobalConfig;
use crate::hero::HeroSlide;
use crate::naming::catalog_heading;
use crate::types::{
    AssemblyData, CatalogData, CatalogSummary, DimensionsData, FeaturesData, GalleryData,
    HeroData, MaterialsData, OverviewData, SectionConfig, SectionKind, VariantsData,
};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Path error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),
    #[error("Pattern error: {0}")]
    Regex(#[from] regex::Error),
}

const CSS: &str = include_str!("../static/style.css");
const SLIDER_JS: &str = include_str!("../static/slider.js");

/// Icons the stylesheet ships. Anything else renders as `puzzle`.
const KNOWN_ICONS: [&str; 10] = [
    "puzzle",
    "zap",
    "ruler",
    "shield",
    "arrow-up-down",
    "cable",
    "wrench",
    "layout-grid",
    "monitor-smartphone",
    "armchair",
];

/// Presentation variant selected by `meta.theme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Default,
    Qx1,
    Qx2,
    Qx3,
    Qx4,
}

impl Theme {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("qx1") => Theme::Qx1,
            Some("qx2") => Theme::Qx2,
            Some("qx3") => Theme::Qx3,
            Some("qx4") => Theme::Qx4,
            _ => Theme::Default,
        }
    }

    fn nav_variant(self) -> &'static str {
        match self {
            Theme::Qx1 => "qx1",
            Theme::Qx2 => "qx2",
            _ => "default",
        }
    }

    fn mosaic_hero(self) -> bool {
        matches!(self, Theme::Qx3 | Theme::Qx4)
    }
}

/// Where on disk to find images for a local content directory.
#[derive(Debug, Clone, Copy)]
pub struct AssetSource<'a> {
    pub content_root: &'a Path,
    /// Root-relative catalogue folder, e.g. `/catalogs`.
    pub catalog_root: &'a str,
}

/// What [`generate`] wrote.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub pages: Vec<PathBuf>,
    pub assets_copied: usize,
}

/// Render the site into `output_dir`.
pub fn generate(
    catalogs: &[CatalogData],
    global: &GlobalConfig,
    assets: Option<AssetSource<'_>>,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let renderer = Renderer::new()?;
    let mut report = GenerateReport::default();
    fs::create_dir_all(output_dir)?;

    if let Some(assets) = assets {
        report.assets_copied = copy_assets(assets, output_dir)?;
        tracing::info!(files = report.assets_copied, "copied catalogue assets");
    }

    let summaries: Vec<CatalogSummary> = catalogs
        .iter()
        .map(|c| CatalogSummary {
            id: c.id.clone(),
            meta: c.meta.clone(),
        })
        .collect();
    let index_path = output_dir.join("index.html");
    fs::write(
        &index_path,
        renderer.render_index(&summaries, global).into_string(),
    )?;
    report.pages.push(index_path);

    for catalog in catalogs {
        let page_dir = output_dir.join("catalog").join(catalog.id.as_str());
        fs::create_dir_all(&page_dir)?;
        let page_path = page_dir.join("index.html");
        fs::write(
            &page_path,
            renderer.render_catalog_page(catalog, global).into_string(),
        )?;
        tracing::debug!(catalog = %catalog.id, "page written");
        report.pages.push(page_path);
    }

    Ok(report)
}

/// Copy the catalogue image tree next to the pages. JSON documents stay behind.
fn copy_assets(assets: AssetSource<'_>, output_dir: &Path) -> Result<usize, GenerateError> {
    let src = assets
        .content_root
        .join(assets.catalog_root.trim_start_matches('/'));
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(&src) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(assets.content_root)?;
        let dst = output_dir.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst)?;
        } else if entry.path().extension().is_none_or(|e| e != "json") {
            fs::copy(entry.path(), &dst)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Map an icon name onto a known icon, case-insensitively.
pub fn icon_name(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    KNOWN_ICONS
        .iter()
        .find(|known| **known == lower)
        .copied()
        .unwrap_or("puzzle")
}

/// In-page anchor of a navigation entry. The hero renders as `#cover`.
fn section_anchor(id: &str) -> &str {
    match SectionKind::from_id(id) {
        Some(SectionKind::Hero) => "cover",
        Some(kind) => kind.id(),
        None => id,
    }
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// A piece of display text, split around "QX" tokens.
#[derive(Debug, PartialEq)]
enum Run<'a> {
    Plain(&'a str),
    Qx(String),
}

/// Renders pages. Holds compiled patterns shared by all of them.
pub struct Renderer {
    qx_token: Regex,
}

impl Renderer {
    pub fn new() -> Result<Self, GenerateError> {
        Ok(Self {
            qx_token: Regex::new(r"(?i)\bQX\b")?,
        })
    }

    fn qx_runs<'a>(&self, text: &'a str) -> Vec<Run<'a>> {
        let mut runs = Vec::new();
        let mut last = 0;
        for found in self.qx_token.find_iter(text) {
            if found.start() > last {
                runs.push(Run::Plain(&text[last..found.start()]));
            }
            runs.push(Run::Qx(found.as_str().to_uppercase()));
            last = found.end();
        }
        if last < text.len() {
            runs.push(Run::Plain(&text[last..]));
        }
        runs
    }

    /// Text with every standalone "QX" wrapped in `span.qx-word`.
    fn qx_text(&self, text: &str) -> Markup {
        html! {
            @for run in self.qx_runs(text) {
                @match run {
                    Run::Plain(s) => { (s) },
                    Run::Qx(s) => { span.qx-word { (s) } },
                }
            }
        }
    }

    // ========================================================================
    // Pages
    // ========================================================================

    /// Renders the catalogue list page
    pub fn render_index(&self, catalogs: &[CatalogSummary], global: &GlobalConfig) -> Markup {
        let content = html! {
            header.site-header {
                h1 { (global.site_title) }
                p.site-subtitle { (global.site_subtitle) }
            }
            main #main-content .catalog-list lang="en" {
                section aria-labelledby="catalog-list-title" {
                    h2 #catalog-list-title {
                        (icon("layout-grid"))
                        " "
                        (global.catalog_list_title)
                    }
                    @if catalogs.is_empty() {
                        p.empty { "No catalogues available." }
                    } @else {
                        div.catalog-grid {
                            @for summary in catalogs {
                                a.catalog-card href={ "/catalog/" (summary.id.as_str()) "/" } title=(summary.meta.title) {
                                    h3 { (catalog_heading(summary.id.as_str())) }
                                    span.view { "View →" }
                                }
                            }
                        }
                    }
                }
            }
            footer.site-footer {
                p { (global.footer_text) }
            }
        };
        base_document(&global.site_title, None, content)
    }

    /// Renders one catalogue page
    pub fn render_catalog_page(&self, catalog: &CatalogData, global: &GlobalConfig) -> Markup {
        let theme = Theme::from_tag(catalog.meta.theme.as_deref());
        let theme_class = catalog
            .meta
            .theme
            .as_deref()
            .map(|tag| format!("catalog-{tag}"));
        let title = format!(
            "{} - {}",
            catalog.id.as_str().to_uppercase(),
            catalog.meta.title
        );

        let content = html! {
            div class=[theme_class] {
                a.skip-link href="#overview" { "Skip to main content" }
                (render_nav(&catalog.sections, &global.brand_name.to_uppercase(), theme))
                main #main-content lang="en" {
                    @if theme.mosaic_hero() {
                        (self.render_mosaic_hero(&catalog.hero, theme))
                    } @else {
                        (self.render_hero(&catalog.hero))
                    }
                    (self.render_overview(&catalog.overview))
                    (self.render_gallery(&catalog.gallery))
                    (self.render_variants(&catalog.variants))
                    (self.render_dimensions(&catalog.dimensions))
                    (self.render_materials(&catalog.materials))
                    (self.render_features(&catalog.features))
                    (self.render_assembly(&catalog.assembly))
                }
            }
            @if catalog.hero.slides.len() > 1 && !theme.mosaic_hero() {
                script { (PreEscaped(SLIDER_JS)) }
            }
        };
        base_document(&title, Some(&catalog.meta.description), content)
    }

    // ========================================================================
    // Sections
    // ========================================================================

    fn render_hero(&self, hero: &HeroData) -> Markup {
        let has_slider = hero.has_slider();
        let display = display_slides(hero);
        let slider = &hero.slider;
        let current = slider.initial_index(display.len());
        let controls = has_slider && display.len() > 1;
        let fade = format!("transition-duration: {}ms;", slider.transition_ms);
        let caption_style = hero.description_style.to_css();

        html! {
            section #cover .hero
                aria-label={ (hero.collection_name) " Collection cover" }
                data-slider[has_slider]
                data-auto-advance=(flag(slider.auto_advance))
                data-interval=(slider.interval)
                data-pause-on-hover=(flag(slider.pause_on_hover))
                data-transition-ms=(slider.transition_ms)
                data-initial-slide=(current)
            {
                div.hero-slides
                    role=[has_slider.then_some("region")]
                    aria-roledescription=[has_slider.then_some("Image carousel")]
                    aria-live=[has_slider.then_some("polite")]
                {
                    @for (i, slide) in display.iter().enumerate() {
                        img.hero-slide.active[i == current]
                            src=(slide.src)
                            alt=(slide.alt)
                            style=(fade)
                            loading=(if i == 0 { "eager" } else { "lazy" });
                    }
                    div.hero-overlay-layer {}
                }
                @if controls {
                    @if slider.show_arrows {
                        button.hero-arrow.prev type="button" aria-label="Previous slide" { "←" }
                        button.hero-arrow.next type="button" aria-label="Next slide" { "→" }
                    }
                    @if slider.show_dots {
                        div.hero-dots role="tablist" aria-label="Slide indicators" {
                            @for i in 0..display.len() {
                                button type="button" role="tab"
                                    aria-selected=(flag(i == current))
                                    aria-label={ "Go to slide " (i + 1) }
                                { span {} }
                            }
                        }
                    }
                }
                @for (i, slide) in display.iter().enumerate() {
                    @if let Some(description) = &slide.description {
                        p.hero-caption.active[i == current]
                            data-slide=(i)
                            data-position=(hero.description_style.position)
                            style=(caption_style)
                        { (self.qx_text(description)) }
                    }
                }
                div.hero-content {
                    p.hero-brand { (hero.brand_label) }
                    h1 { (self.qx_text(&hero.collection_name)) }
                    p.hero-tagline {
                        (self.qx_text(&hero.tagline))
                        @if let Some(line2) = &hero.tagline_line2 {
                            br;
                            (self.qx_text(line2))
                        }
                    }
                    a.hero-cta href="#overview" { (hero.cta_label) }
                }
            }
        }
    }

    fn render_mosaic_hero(&self, hero: &HeroData, theme: Theme) -> Markup {
        let slides = mosaic_slides(hero);
        let main = hero.slider.initial_index(slides.len());
        let thumbs: Vec<&HeroSlide> = (0..3)
            .map(|slot| &slides[(main + slot + 1) % slides.len()])
            .collect();
        let title = mosaic_title(&hero.collection_name, theme);

        html! {
            section #cover .hero-mosaic aria-label={ (title) " Collection cover" } {
                div.mosaic-main {
                    img src=(slides[main].src) alt=(slides[main].alt) loading="eager";
                    h1.mosaic-title { (self.qx_text(&title)) }
                }
                div.mosaic-thumbs {
                    @for slide in thumbs {
                        img src=(slide.src) alt=(slide.alt) loading="lazy";
                    }
                }
                p.mosaic-counter {
                    (format!("{:02}", main + 1)) " / " (format!("{:02}", slides.len()))
                }
                p.hero-tagline { (self.qx_text(&hero.tagline)) }
                a.hero-cta href="#overview" { (hero.cta_label) }
            }
        }
    }

    fn render_overview(&self, overview: &OverviewData) -> Markup {
        html! {
            section #overview .catalog-section {
                span.section-label { (overview.section_label) }
                h2 {
                    (self.qx_text(&overview.title))
                    @if let Some(line2) = &overview.title_line2 {
                        br;
                        (self.qx_text(line2))
                    }
                }
                @for paragraph in &overview.paragraphs {
                    p { (self.qx_text(paragraph)) }
                }
                @if !overview.packshot_image.is_empty() {
                    figure.packshot {
                        img src=(overview.packshot_image) alt=(overview.packshot_image_alt) loading="lazy";
                        figcaption { (self.qx_text(&overview.packshot_caption)) }
                    }
                }
                ul.feature-list {
                    @for feature in &overview.features {
                        li {
                            (icon(&feature.icon))
                            h3 { (self.qx_text(&feature.title)) }
                            p { (feature.desc) }
                        }
                    }
                }
                @if !overview.quick_link_labels.is_empty() {
                    nav.quick-links {
                        @for label in &overview.quick_link_labels {
                            a href={ "#" (label.to_lowercase()) } { (self.qx_text(label)) }
                        }
                    }
                }
            }
        }
    }

    fn render_gallery(&self, gallery: &GalleryData) -> Markup {
        html! {
            section #gallery .catalog-section {
                span.section-label { (gallery.section_label) }
                h2 { (self.qx_text(&gallery.title)) }
                div.gallery-grid {
                    @for image in &gallery.images {
                        figure data-category=(image.category) {
                            img src=(image.src) alt=(image.alt) loading="lazy";
                            figcaption { (image.category) }
                        }
                    }
                }
            }
        }
    }

    fn render_variants(&self, variants: &VariantsData) -> Markup {
        html! {
            section #variants .catalog-section {
                span.section-label { (variants.section_label) }
                h2 { (self.qx_text(&variants.title)) }
                @if !variants.preview_image.is_empty() {
                    img.variant-preview src=(variants.preview_image) alt=(variants.title) loading="lazy";
                }
                h3 { "Desktop" }
                ul.swatches {
                    @for color in &variants.desktop_colors {
                        li title=(color.name) {
                            span.swatch style={ "background: " (color.code) ";" } {}
                            (color.name)
                            @if let Some(ral) = &color.ral { " (" (ral) ")" }
                        }
                    }
                }
                h3 { "Frame" }
                ul.swatches {
                    @for color in &variants.frame_colors {
                        li title=(color.name) {
                            span.swatch style={ "background: " (color.code) ";" } {}
                            (color.name)
                            @if let Some(ral) = &color.ral { " (" (ral) ")" }
                        }
                    }
                }
                ul.sizes {
                    @for size in &variants.sizes {
                        li { strong { (size.label) } " " (size.desc) }
                    }
                }
                @if !variants.comparison_table.is_empty() {
                    table.comparison {
                        thead {
                            tr {
                                th {}
                                th { (self.qx_text(variants.basic_label())) }
                                th { (self.qx_text(variants.premium_label())) }
                            }
                        }
                        tbody {
                            @for row in &variants.comparison_table {
                                tr {
                                    td { (row.feature) }
                                    td { (self.qx_text(&row.basic)) }
                                    td { (self.qx_text(&row.premium)) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    fn render_dimensions(&self, dimensions: &DimensionsData) -> Markup {
        html! {
            section #dimensions .catalog-section {
                span.section-label { (dimensions.section_label) }
                h2 { (self.qx_text(&dimensions.title)) }
                @if let Some(diagram) = &dimensions.dimension_diagram {
                    div.dimension-diagram {
                        span.width { (diagram.width) }
                        span.depth { (diagram.depth) }
                        span.height { (diagram.height_range) }
                    }
                }
                dl.spec-list {
                    @for spec in &dimensions.specs {
                        dt { (spec.label) }
                        dd { (self.qx_text(&spec.value)) }
                    }
                }
                @if !dimensions.certifications.is_empty() {
                    ul.certifications {
                        @for cert in &dimensions.certifications {
                            li { (cert) }
                        }
                    }
                }
            }
        }
    }

    fn render_materials(&self, materials: &MaterialsData) -> Markup {
        html! {
            section #materials .catalog-section {
                span.section-label { (materials.section_label) }
                h2 { (self.qx_text(&materials.title)) }
                ul.material-list {
                    @for item in &materials.materials {
                        li {
                            h3 { (item.name) }
                            p { (item.desc) }
                            p.specs { (item.specs) }
                        }
                    }
                }
                ul.swatches {
                    @for swatch in &materials.swatches {
                        li title=(swatch.name) {
                            span.swatch style={ "background: " (swatch.hex) ";" } {}
                            (swatch.name)
                        }
                    }
                }
                @if !materials.detail_image.is_empty() {
                    figure.detail {
                        img src=(materials.detail_image) alt=(materials.detail_image_alt) loading="lazy";
                        figcaption { (materials.detail_image_caption) }
                    }
                }
            }
        }
    }

    fn render_features(&self, features: &FeaturesData) -> Markup {
        html! {
            section #features .catalog-section {
                span.section-label { (features.section_label) }
                h2 { (self.qx_text(&features.title)) }
                ul.feature-list {
                    @for item in &features.items {
                        li {
                            (icon(&item.icon))
                            @if !item.badge.is_empty() {
                                span.badge { (item.badge) }
                            }
                            h3 { (self.qx_text(&item.title)) }
                            p { (self.qx_text(&item.desc)) }
                        }
                    }
                }
            }
        }
    }

    fn render_assembly(&self, assembly: &AssemblyData) -> Markup {
        html! {
            section #assembly .catalog-section {
                span.section-label { (assembly.section_label) }
                h2 { (self.qx_text(&assembly.title)) }
                ol.step-list {
                    @for step in &assembly.steps {
                        li data-step=(step.step) {
                            span.step-number { (format!("{:02}", step.step)) }
                            h3 { (step.title) }
                            p { (step.desc) }
                        }
                    }
                }
                @if !assembly.order_codes.is_empty() {
                    table.order-codes {
                        tbody {
                            @for order in &assembly.order_codes {
                                tr {
                                    td { code { (order.code) } }
                                    td { (self.qx_text(&order.desc)) }
                                }
                            }
                        }
                    }
                }
                div.cta-row {
                    a href="#assembly" data-action="quote" { (assembly.cta_labels.quote) }
                    a href="#assembly" data-action="pdf" { (assembly.cta_labels.pdf) }
                    a href="#assembly" data-action="contact" { (assembly.cta_labels.contact) }
                }
            }
            footer.catalog-footer {
                p { (self.qx_text(&assembly.footer_text)) }
                p.version { (assembly.version_info) }
            }
        }
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, description: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(description) = description {
                    meta name="description" content=(description);
                }
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

fn icon(name: &str) -> Markup {
    let name = icon_name(name);
    html! {
        span class={ "icon icon-" (name) } data-icon=(name) aria-hidden="true" {}
    }
}

/// Renders the catalogue navigation: back link, brand and enabled sections
fn render_nav(sections: &[SectionConfig], brand_label: &str, theme: Theme) -> Markup {
    html! {
        nav class={ "catalog-nav nav-" (theme.nav_variant()) } aria-label="Catalogue sections" {
            a.back href="/" { "←" }
            a.brand href="#cover" { (brand_label) }
            ul {
                @for section in sections.iter().filter(|s| s.is_enabled()) {
                    li {
                        a href={ "#" (section_anchor(&section.id)) } { (section.label) }
                    }
                }
            }
        }
    }
}

/// Slides to show: the resolved sequence, or the static hero image.
fn display_slides(hero: &HeroData) -> Vec<HeroSlide> {
    if hero.has_slider() {
        hero.slides.clone()
    } else {
        vec![HeroSlide {
            src: hero.hero_image.clone(),
            alt: hero.hero_image_alt.clone(),
            description: None,
        }]
    }
}

/// Mosaic heroes need one main image and three thumbnails; short sequences
/// repeat from the start.
fn mosaic_slides(hero: &HeroData) -> Vec<HeroSlide> {
    let base = display_slides(hero);
    let mut padded = base.clone();
    while padded.len() < 4 {
        padded.push(base[padded.len() % base.len()].clone());
    }
    padded
}

fn mosaic_title(collection_name: &str, theme: Theme) -> String {
    let cleaned = collection_name.trim();
    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("qx series") {
        return match theme {
            Theme::Qx3 => "QX-3 Dark Precision".to_string(),
            _ => "QX".to_string(),
        };
    }
    cleaned.to_string()
}

// ============================================================================
// Tests
// ============================================================================
