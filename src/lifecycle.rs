//! Build lifecycle management helpers.
//!
//! This module encapsulates the heavy lifting previously handled directly
//! in `main.rs`: opening the cache and artifact stores and wiring the
//! pipeline with its collaborators.

use crate::config::BuildConfig;
use anyhow::Result;
use herbarium_core::permalink::SitePermalinkFormatter;
use herbarium_core::search::JsonSearchIndexBuilder;
use herbarium_core::sources::FileSourceProvider;
use herbarium_core::{BuildSummary, PipelineSettings, PlantIndexPipeline};
use herbarium_store::{ArtifactStore, CacheStore};
use log::{debug, info};
use std::sync::Arc;

/// Aggregated build components shared across commands.
pub struct BuildComponents {
    pub cache: Arc<CacheStore>,
    pub artifacts: Arc<ArtifactStore>,
    pub pipeline: PlantIndexPipeline,
}

/// Open the stores and wire the pipeline with its collaborators.
pub fn bootstrap(config: &BuildConfig) -> Result<BuildComponents> {
    let phase_start = std::time::Instant::now();
    let cache = Arc::new(CacheStore::new(&config.cache.dir)?);
    let artifacts = Arc::new(ArtifactStore::new(&config.output.dir)?);
    info!(
        "Stores opened: cache at {}, output at {} ({:.2}ms)",
        cache.root().display(),
        artifacts.root().display(),
        phase_start.elapsed().as_secs_f64() * 1000.0
    );

    let settings = PipelineSettings {
        family_levels: config.taxonomy.family_levels.clone(),
        genus_levels: config.taxonomy.genus_levels.clone(),
        items_per_page: config.pagination.items_per_page,
        ttl: config.cache_ttl()?,
        ttl_overrides: config.cache_ttl_overrides()?,
    };
    debug!(
        "Pipeline settings: family levels {:?}, genus levels {:?}, {} items per page",
        settings.family_levels, settings.genus_levels, settings.items_per_page
    );

    let sources = FileSourceProvider::new(
        config.sources.taxonomy_path.clone(),
        config.sources.directory_path.clone(),
    );

    let pipeline = PlantIndexPipeline::new(
        Box::new(sources),
        Arc::new(SitePermalinkFormatter),
        Box::new(JsonSearchIndexBuilder),
        cache.clone(),
        artifacts.clone(),
        settings,
    );

    Ok(BuildComponents {
        cache,
        artifacts,
        pipeline,
    })
}

/// Run the full pipeline build and log the summary.
pub fn run(components: &BuildComponents) -> Result<BuildSummary> {
    let summary = components.pipeline.build()?;
    info!(
        "Build summary: {} families, {} genera, {} common names, {} nurseries, {} categories, {} pages, {} search records, {} indexes",
        summary.families,
        summary.genera,
        summary.common_names,
        summary.nurseries,
        summary.nursery_categories,
        summary.pages,
        summary.search_records,
        summary.indexes.len()
    );
    Ok(summary)
}
