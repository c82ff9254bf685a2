//! Build orchestration
//!
//! `PlantIndexPipeline` wires the stages together: load the two source
//! documents, flatten the taxonomy and the nursery directory, join
//! nurseries into their categories, paginate the joined views, compose
//! the search records, and persist everything.
//!
//! Every stage output is memoized through the cache store under its
//! asset key, so a rerun with fresh cache entries never recomputes a
//! stage, and a single stale entry only recomputes that stage.

use crate::compose::IndexComposer;
use crate::crossref::join_by_category;
use crate::error::PipelineError;
use crate::flatten::{extract_child_items, flatten_at_levels, flatten_root_path, RootPathMode};
use crate::paginate::paginate;
use crate::permalink::PermalinkFormatter;
use crate::search::SearchIndexBuilder;
use crate::sources::SourceProvider;
use herbarium_commons::constants;
use herbarium_commons::{PresenceFlag, Record};
use herbarium_store::{ArtifactStore, CacheStore, CacheTtl};
use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Slug of the plant search index
pub const PLANT_INDEX_SLUG: &str = "plants";
/// Slug of the nursery search index
pub const NURSERY_INDEX_SLUG: &str = "nurseries";

// Searchable fields, matching the serialized shape of the records each
// index is built over
const PLANT_INDEX_FIELDS: &[&str] = &["name", "common_name", "taxonomy_level_name"];
const NURSERY_INDEX_FIELDS: &[&str] = &["name"];

/// Tunables for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Tree depths where family nodes sit under the taxonomy root
    pub family_levels: Vec<usize>,
    /// Tree depths where genus nodes sit under the taxonomy root
    pub genus_levels: Vec<usize>,
    /// Page size for the category views
    pub items_per_page: usize,
    /// Default freshness window for memoized stage outputs
    pub ttl: CacheTtl,
    /// Per-asset freshness overrides, keyed by asset name
    pub ttl_overrides: HashMap<String, CacheTtl>,
}

impl PipelineSettings {
    /// Freshness window for one asset: its override when present,
    /// the default otherwise
    pub fn ttl_for(&self, asset: &str) -> CacheTtl {
        self.ttl_overrides.get(asset).copied().unwrap_or(self.ttl)
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        PipelineSettings {
            family_levels: vec![3],
            genus_levels: vec![3, 6],
            items_per_page: 10,
            ttl: CacheTtl::Seconds(86400),
            ttl_overrides: HashMap::new(),
        }
    }
}

/// Counts reported after a successful build
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildSummary {
    pub families: usize,
    pub genera: usize,
    pub common_names: usize,
    pub nurseries: usize,
    pub nursery_categories: usize,
    pub pages: usize,
    pub search_records: usize,
    pub indexes: Vec<String>,
}

/// The full build pipeline over one pair of source documents
pub struct PlantIndexPipeline {
    sources: Box<dyn SourceProvider>,
    search: Box<dyn SearchIndexBuilder>,
    composer: IndexComposer,
    cache: Arc<CacheStore>,
    artifacts: Arc<ArtifactStore>,
    settings: PipelineSettings,
}

impl PlantIndexPipeline {
    pub fn new(
        sources: Box<dyn SourceProvider>,
        permalink: Arc<dyn PermalinkFormatter>,
        search: Box<dyn SearchIndexBuilder>,
        cache: Arc<CacheStore>,
        artifacts: Arc<ArtifactStore>,
        settings: PipelineSettings,
    ) -> Self {
        PlantIndexPipeline {
            sources,
            search,
            composer: IndexComposer::new(permalink),
            cache,
            artifacts,
            settings,
        }
    }

    /// Run the full build and persist its artifacts
    ///
    /// # Returns
    /// Counts of every produced collection, page set, and index.
    pub fn build(&self) -> Result<BuildSummary, PipelineError> {
        let build_start = Instant::now();

        let phase_start = Instant::now();
        let taxonomy = self.sources.taxonomy()?;
        let directory = self.sources.directory()?;
        info!(
            "Loaded source documents ({:.2}ms)",
            phase_start.elapsed().as_secs_f64() * 1000.0
        );

        // Taxonomy collections
        let phase_start = Instant::now();
        let families = self.cached(constants::ASSET_FAMILIES, || {
            Ok(flatten_at_levels(
                &taxonomy,
                constants::TAXONOMY_ROOT_PATH,
                constants::NODE_TYPE_FAMILY,
                &self.settings.family_levels,
            ))
        })?;
        let genera = self.cached(constants::ASSET_GENERA, || {
            Ok(flatten_at_levels(
                &taxonomy,
                constants::TAXONOMY_ROOT_PATH,
                constants::NODE_TYPE_GENUS,
                &self.settings.genus_levels,
            ))
        })?;
        let common_names = self.cached(constants::ASSET_COMMON_NAMES, || {
            Ok(flatten_root_path(
                &taxonomy,
                constants::COMMON_NAMES_PATH,
                constants::NODE_TYPE_COMMON_NAME,
                RootPathMode::NamedNodes,
            ))
        })?;
        let cited_plants = self.cached(constants::ASSET_CITED_PLANTS, || {
            Ok(flatten_root_path(
                &taxonomy,
                constants::CITED_PLANTS_PATH,
                constants::NODE_TYPE_PLANT,
                RootPathMode::NamedNodes,
            ))
        })?;
        info!(
            "Flattened taxonomy: {} families, {} genera, {} common names, {} citations ({:.2}ms)",
            families.len(),
            genera.len(),
            common_names.len(),
            cited_plants.len(),
            phase_start.elapsed().as_secs_f64() * 1000.0
        );

        // Nursery directory collections
        let phase_start = Instant::now();
        let nurseries = self.cached(constants::ASSET_NURSERIES, || {
            Ok(flatten_root_path(
                &directory,
                constants::DIRECTORY_ROOT_PATH,
                constants::NODE_TYPE_NURSERY,
                RootPathMode::Enveloped,
            ))
        })?;
        let categories = self.cached(constants::ASSET_NURSERY_CATEGORIES, || {
            Ok(extract_child_items(
                &nurseries,
                constants::NODE_TYPE_NURSERY_CATEGORY,
                true,
            ))
        })?;
        let nursery_plants = self.cached(constants::ASSET_NURSERY_PLANTS, || {
            Ok(extract_child_items(
                &nurseries,
                constants::NODE_TYPE_PLANT,
                false,
            ))
        })?;
        let nursery_directory = self.cached(constants::ASSET_NURSERY_DIRECTORY, || {
            Ok(join_by_category(
                &nurseries,
                &categories,
                &Record::items_field(constants::NODE_TYPE_NURSERY_CATEGORY),
                constants::NODE_TYPE_NURSERY_CATEGORY,
            ))
        })?;
        info!(
            "Flattened directory: {} nurseries, {} categories, {} plant listings ({:.2}ms)",
            nurseries.len(),
            categories.len(),
            nursery_plants.len(),
            phase_start.elapsed().as_secs_f64() * 1000.0
        );

        // Paginated category views
        let phase_start = Instant::now();
        let pages = self.cached(constants::ASSET_NURSERY_PAGES, || {
            Ok(paginate(
                &nursery_directory,
                constants::NODE_TYPE_NURSERY_CATEGORY,
                self.settings.items_per_page,
            ))
        })?;
        info!(
            "Paginated {} category views into {} pages ({:.2}ms)",
            nursery_directory.len(),
            pages.len(),
            phase_start.elapsed().as_secs_f64() * 1000.0
        );

        // Composite search records
        let phase_start = Instant::now();
        let search_records = self.cached(constants::ASSET_SEARCH_RECORDS, || {
            Ok(self.composer.compose(
                &[&families, &genera],
                &common_names,
                &[
                    (PresenceFlag::AvailableInNursery, &nursery_plants),
                    (PresenceFlag::HasCitations, &cited_plants),
                ],
            ))
        })?;
        info!(
            "Composed {} search records ({:.2}ms)",
            search_records.len(),
            phase_start.elapsed().as_secs_f64() * 1000.0
        );

        // Persist collections, pages, and search indexes
        let phase_start = Instant::now();
        self.artifacts
            .write_collection(constants::ASSET_FAMILIES, &families)?;
        self.artifacts
            .write_collection(constants::ASSET_GENERA, &genera)?;
        self.artifacts
            .write_collection(constants::ASSET_COMMON_NAMES, &common_names)?;
        self.artifacts
            .write_collection(constants::ASSET_NURSERIES, &nurseries)?;
        self.artifacts
            .write_collection(constants::ASSET_NURSERY_DIRECTORY, &nursery_directory)?;
        self.artifacts
            .write_pages(constants::ASSET_NURSERY_PAGES, &pages)?;

        let plant_records = to_values(&search_records)?;
        let plant_index =
            self.search
                .build(&plant_records, constants::FIELD_IDENTIFIER, PLANT_INDEX_FIELDS)?;
        self.artifacts
            .write_index(PLANT_INDEX_SLUG, &plant_index, &plant_records)?;

        let nursery_records = to_values(nurseries.records())?;
        let nursery_index = self.search.build(
            &nursery_records,
            constants::FIELD_IDENTIFIER,
            NURSERY_INDEX_FIELDS,
        )?;
        self.artifacts
            .write_index(NURSERY_INDEX_SLUG, &nursery_index, &nursery_records)?;
        info!(
            "Persisted artifacts under {} ({:.2}ms)",
            self.artifacts.root().display(),
            phase_start.elapsed().as_secs_f64() * 1000.0
        );

        let summary = BuildSummary {
            families: families.len(),
            genera: genera.len(),
            common_names: common_names.len(),
            nurseries: nurseries.len(),
            nursery_categories: categories.len(),
            pages: pages.len(),
            search_records: search_records.len(),
            indexes: vec![
                PLANT_INDEX_SLUG.to_string(),
                NURSERY_INDEX_SLUG.to_string(),
            ],
        };
        info!(
            "Build finished: {} search records, {} pages, {} indexes ({:.2}ms)",
            summary.search_records,
            summary.pages,
            summary.indexes.len(),
            build_start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(summary)
    }

    /// Run one stage through the cache store under its asset key
    fn cached<T, F>(&self, asset: &str, compute: F) -> Result<T, PipelineError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T, PipelineError>,
    {
        self.cache
            .get_or_compute(asset, self.settings.ttl_for(asset), compute)
    }
}

fn to_values<T, I>(items: I) -> Result<Vec<Value>, PipelineError>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    items
        .into_iter()
        .map(|item| serde_json::to_value(item).map_err(PipelineError::from))
        .collect()
}
