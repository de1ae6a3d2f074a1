//! Catalogue assembly.
//!
//! Turns a catalogue id into one render-ready [`CatalogData`]:
//!
//! ```text
//! config.json ──absent──▶ None
//!      │
//!      ▼
//! 8 × <section>/content.json   (one scoped thread each, joined)
//!      │ any absent ──▶ None
//!      ▼
//! resolve asset paths per section
//!      │
//!      ▼
//! hero: slider.json slides, or sequential probing of hero_NN.jpg
//!      │
//!      ▼
//! CatalogData
//! ```
//!
//! A catalogue is all-or-nothing: a partially available catalogue is not
//! rendered. Which sections were missing is logged at `warn`.
//!
//! Nothing is cached; every call re-reads the content store.

use crate::config::{DiscoveryConfig, LoaderConfig};
use crate::fetch::{Validate, fetch_document};
use crate::hero::{HeroSliderDocument, discover_hero_slides, resolve_hero};
use crate::paths::{ContentLayout, resolve};
use crate::source::ContentSource;
use crate::types::{
    AssemblyData, CatalogConfig, CatalogData, CatalogId, DimensionsData, FeaturesData,
    GalleryData, GalleryImage, HeroDocument, MaterialsData, OverviewData, RawGalleryData,
    SectionKind, VariantsData,
};
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use std::thread::{self, ScopedJoinHandle};

/// Result of a section thread. A panic in the fetch is re-raised here.
fn joined<T>(handle: ScopedJoinHandle<'_, Option<T>>) -> Option<T> {
    handle
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
}

/// Loads catalogues from one content source.
pub struct CatalogLoader<'a> {
    source: &'a dyn ContentSource,
    layout: ContentLayout,
    discovery: DiscoveryConfig,
}

impl<'a> CatalogLoader<'a> {
    pub fn new(source: &'a dyn ContentSource, config: &LoaderConfig) -> Self {
        Self {
            source,
            layout: ContentLayout::from_config(&config.content),
            discovery: config.discovery.clone(),
        }
    }

    pub fn source(&self) -> &'a dyn ContentSource {
        self.source
    }

    pub fn layout(&self) -> &ContentLayout {
        &self.layout
    }

    fn section<T>(&self, id: &CatalogId, kind: SectionKind) -> Option<T>
    where
        T: DeserializeOwned + Validate,
    {
        fetch_document(self.source, &self.layout.section_document(id, kind))
    }

    /// Fetch one section on its own scoped thread, inside the caller's span.
    fn spawn_section<'scope, 'env, T>(
        &'env self,
        scope: &'scope thread::Scope<'scope, 'env>,
        id: &'env CatalogId,
        kind: SectionKind,
    ) -> ScopedJoinHandle<'scope, Option<T>>
    where
        T: DeserializeOwned + Validate + Send + 'scope,
    {
        let span = tracing::Span::current();
        scope.spawn(move || {
            let _entered = span.enter();
            self.section(id, kind)
        })
    }

    /// Load and resolve one catalogue, or `None` if anything required is absent.
    #[tracing::instrument(skip_all, fields(catalog = %id))]
    pub fn load_catalog(&self, id: &CatalogId) -> Option<CatalogData> {
        let Some(config) = fetch_document::<CatalogConfig>(self.source, &self.layout.catalog_config(id))
        else {
            tracing::warn!("catalogue config missing or invalid");
            return None;
        };

        let (hero, overview, gallery, variants, dimensions, materials, features, assembly) =
            thread::scope(|s| {
                let hero = self.spawn_section::<HeroDocument>(s, id, SectionKind::Hero);
                let overview = self.spawn_section::<OverviewData>(s, id, SectionKind::Overview);
                let gallery = self.spawn_section::<RawGalleryData>(s, id, SectionKind::Gallery);
                let variants = self.spawn_section::<VariantsData>(s, id, SectionKind::Variants);
                let dimensions =
                    self.spawn_section::<DimensionsData>(s, id, SectionKind::Dimensions);
                let materials = self.spawn_section::<MaterialsData>(s, id, SectionKind::Materials);
                let features = self.spawn_section::<FeaturesData>(s, id, SectionKind::Features);
                let assembly = self.spawn_section::<AssemblyData>(s, id, SectionKind::Assembly);
                (
                    joined(hero),
                    joined(overview),
                    joined(gallery),
                    joined(variants),
                    joined(dimensions),
                    joined(materials),
                    joined(features),
                    joined(assembly),
                )
            });

        let present = [
            hero.is_some(),
            overview.is_some(),
            gallery.is_some(),
            variants.is_some(),
            dimensions.is_some(),
            materials.is_some(),
            features.is_some(),
            assembly.is_some(),
        ];
        let (
            Some(hero),
            Some(mut overview),
            Some(gallery),
            Some(mut variants),
            Some(dimensions),
            Some(mut materials),
            Some(features),
            Some(assembly),
        ) = (
            hero, overview, gallery, variants, dimensions, materials, features, assembly,
        )
        else {
            let missing: Vec<&str> = SectionKind::ALL
                .iter()
                .zip(present)
                .filter(|(_, ok)| !ok)
                .map(|(kind, _)| kind.id())
                .collect();
            tracing::warn!(?missing, "catalogue incomplete, skipping");
            return None;
        };

        let base = |kind| self.layout.section_base(id, kind);

        overview.packshot_image = resolve(&base(SectionKind::Overview), &overview.packshot_image);
        variants.preview_image = resolve(&base(SectionKind::Variants), &variants.preview_image);
        materials.detail_image = resolve(&base(SectionKind::Materials), &materials.detail_image);

        let gallery_base = base(SectionKind::Gallery);
        let gallery = GalleryData {
            section_label: gallery.section_label,
            title: gallery.title,
            images: gallery
                .images
                .into_iter()
                .map(|image| GalleryImage {
                    src: resolve(&gallery_base, &image.image),
                    alt: image.alt,
                    category: image.category,
                })
                .collect(),
        };

        let hero_base = base(SectionKind::Hero);
        let slider_document: Option<HeroSliderDocument> =
            fetch_document(self.source, &self.layout.slider_document(id));
        let hero = resolve_hero(hero, &hero_base, slider_document.as_ref(), || {
            discover_hero_slides(self.source, &hero_base, &self.discovery)
        });

        tracing::debug!(slides = hero.slides.len(), "catalogue assembled");
        Some(CatalogData {
            id: id.clone(),
            sections: config.sections_or_default(),
            meta: config.meta,
            hero,
            overview,
            gallery,
            variants,
            dimensions,
            materials,
            features,
            assembly,
        })
    }

    /// Load several catalogues in parallel. Output order follows `ids`.
    pub fn load_many(&self, ids: &[CatalogId]) -> Vec<(CatalogId, Option<CatalogData>)> {
        ids.par_iter()
            .map(|id| (id.clone(), self.load_catalog(id)))
            .collect()
    }
}
