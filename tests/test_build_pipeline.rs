//! Integration tests for the full build pipeline
//!
//! Tests:
//! - Stage counts over a representative pair of source documents
//! - Artifact layout under the output directory
//! - Page linkage of the joined category views
//! - Name merges and presence flags on the composed search records
//! - Cache behavior: fresh entries serve reruns, clearing recomputes

mod common;

use common::{empty_directory_document, empty_taxonomy_document, project_config, write_sources};
use herbarium_builder::commands;
use herbarium_builder::lifecycle;
use herbarium_commons::Page;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn find_record<'a>(records: &'a [Value], identifier: &str) -> &'a Value {
    records
        .iter()
        .find(|record| record["identifier"] == identifier)
        .unwrap_or_else(|| panic!("no search record for '{}'", identifier))
}

#[test]
fn test_build_produces_expected_counts() {
    let dir = TempDir::new().unwrap();
    let config = project_config(dir.path());

    let components = lifecycle::bootstrap(&config).unwrap();
    let summary = lifecycle::run(&components).unwrap();

    assert_eq!(summary.families, 2);
    assert_eq!(summary.genera, 2);
    assert_eq!(summary.common_names, 2);
    assert_eq!(summary.nurseries, 2);
    assert_eq!(summary.nursery_categories, 2);
    assert_eq!(summary.pages, 2);
    assert_eq!(summary.search_records, 5);
    assert_eq!(summary.indexes, vec!["plants", "nurseries"]);
}

#[test]
fn test_build_writes_every_artifact() {
    let dir = TempDir::new().unwrap();
    let config = project_config(dir.path());
    let components = lifecycle::bootstrap(&config).unwrap();
    lifecycle::run(&components).unwrap();

    let dist = dir.path().join("dist");
    for name in [
        "taxonomy_families",
        "taxonomy_genera",
        "common_names",
        "nurseries",
        "nursery_directory",
    ] {
        let path = dist.join("collections").join(format!("{}.json", name));
        assert!(path.exists(), "missing collection artifact {}", path.display());
    }
    assert!(dist.join("pages").join("nursery_pages.json").exists());
    for slug in ["plants", "nurseries"] {
        assert!(dist.join("indexes").join(slug).join("index").exists());
        assert!(dist.join("indexes").join(slug).join("raw_records").exists());
    }

    // Collections land sorted by identifier, each entry enveloped
    let families = read_json(&dist.join("collections").join("taxonomy_families.json"));
    let identifiers: Vec<&str> = families
        .as_array()
        .unwrap()
        .iter()
        .map(|envelope| envelope["data"]["identifier"].as_str().unwrap())
        .collect();
    assert_eq!(identifiers, vec!["pinaceae", "rosaceae"]);

    let nursery_records = read_json(&dist.join("indexes").join("nurseries").join("raw_records"));
    assert_eq!(nursery_records.as_array().unwrap().len(), 2);
}

#[test]
fn test_category_pages_carry_membership_and_links() {
    let dir = TempDir::new().unwrap();
    let config = project_config(dir.path());
    let components = lifecycle::bootstrap(&config).unwrap();
    lifecycle::run(&components).unwrap();

    let raw = fs::read_to_string(
        dir.path().join("dist").join("pages").join("nursery_pages.json"),
    )
    .unwrap();
    let pages: Vec<Page> = serde_json::from_str(&raw).unwrap();
    assert_eq!(pages.len(), 2);

    // Categories arrive sorted, so conifers comes first
    let conifers = &pages[0];
    assert_eq!(conifers.slug, "conifers");
    assert_eq!(conifers.title, "Conifers");
    assert_eq!(conifers.archival_id, 12);
    assert_eq!(conifers.total_pages, 1);
    assert_eq!(conifers.items.len(), 1);
    assert_eq!(conifers.items[0]["identifier"], "rooted-in-nature");
    // Each member carries the slug of the category it joined
    assert_eq!(conifers.items[0]["nursery_category"], "conifers");

    let natives = &pages[1];
    assert_eq!(natives.slug, "natives");
    assert_eq!(natives.archival_id, 11);
    assert_eq!(natives.items.len(), 2);
    assert_eq!(natives.items[0]["identifier"], "green-thumb");
    assert_eq!(natives.items[1]["identifier"], "rooted-in-nature");
    assert_eq!(natives.items[0]["nursery_category"], "natives");
    assert!(natives.page_slugs.next.is_none());
    assert!(natives.page_slugs.previous.is_none());
    assert_eq!(natives.page_slugs.first, "natives");
    assert_eq!(natives.page_slugs.last, "natives");
    assert_eq!(natives.page_slugs.all, vec!["natives"]);
}

#[test]
fn test_search_records_merge_names_and_flags() {
    let dir = TempDir::new().unwrap();
    let config = project_config(dir.path());
    let components = lifecycle::bootstrap(&config).unwrap();
    lifecycle::run(&components).unwrap();

    let raw_records_path = dir
        .path()
        .join("dist")
        .join("indexes")
        .join("plants")
        .join("raw_records");
    let records: Vec<Value> =
        serde_json::from_str(&fs::read_to_string(&raw_records_path).unwrap()).unwrap();

    // First-seen order: families, then genera, then standalone labels
    let order: Vec<&str> = records
        .iter()
        .map(|record| record["identifier"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["pinaceae", "rosaceae", "acer", "pinus", "hedgewort"]);

    // Acer was seeded from the tree, then overlaid by its common name
    // and flagged through the nursery plant listings
    let acer = find_record(&records, "acer");
    assert_eq!(acer["has_plant"], true);
    assert_eq!(acer["has_common_name"], true);
    assert_eq!(acer["common_name"], "Maple");
    assert_eq!(acer["name"], "Maple");
    assert_eq!(acer["display_path"], "/common_name/maple/");
    assert_eq!(acer["available_in_nursery"], true);
    assert_eq!(acer["has_citations"], false);
    assert_eq!(acer["taxonomy_level_key"], "genus");
    assert_eq!(acer["taxonomy_level_name"], "Genus");

    let pinaceae = find_record(&records, "pinaceae");
    assert_eq!(pinaceae["has_citations"], true);
    assert_eq!(pinaceae["available_in_nursery"], false);
    assert_eq!(pinaceae["display_path"], "/family/pinaceae/");
    // Well-formed lower_level labels are copied verbatim
    assert_eq!(pinaceae["taxonomy_level_key"], "genus");
    assert_eq!(pinaceae["taxonomy_level_name"], "Genera");

    let rosaceae = find_record(&records, "rosaceae");
    assert_eq!(rosaceae["taxonomy_level_key"], "family");
    assert_eq!(rosaceae["taxonomy_level_name"], "Family");

    // A label without a plant reference stands alone
    let hedgewort = find_record(&records, "hedgewort");
    assert_eq!(hedgewort["has_plant"], false);
    assert_eq!(hedgewort["has_common_name"], true);
    assert_eq!(hedgewort["common_name"], "Hedgewort");
    assert!(hedgewort.get("taxonomy_level_key").is_none());

    // The index blob projects the same records
    let index: Value = serde_json::from_slice(
        &fs::read(
            dir.path()
                .join("dist")
                .join("indexes")
                .join("plants")
                .join("index"),
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(index["identifier_field"], "identifier");
    assert_eq!(index["documents"].as_array().unwrap().len(), 5);
}

#[test]
fn test_fresh_cache_serves_the_second_build() {
    let dir = TempDir::new().unwrap();
    let config = project_config(dir.path());

    let components = lifecycle::bootstrap(&config).unwrap();
    let first = lifecycle::run(&components).unwrap();

    // Replace the sources with empty documents. Every stage is still
    // fresh in the cache, so the second build must not notice.
    write_sources(
        dir.path(),
        &empty_taxonomy_document(),
        &empty_directory_document(),
    );
    let components = lifecycle::bootstrap(&config).unwrap();
    let second = lifecycle::run(&components).unwrap();
    assert_eq!(first, second);

    // Clearing the cache forces every stage back to the sources
    assert!(components.cache.clear().unwrap() > 0);
    let third = lifecycle::run(&components).unwrap();
    assert_eq!(third.families, 0);
    assert_eq!(third.genera, 0);
    assert_eq!(third.common_names, 0);
    assert_eq!(third.nurseries, 0);
    assert_eq!(third.nursery_categories, 0);
    assert_eq!(third.pages, 0);
    assert_eq!(third.search_records, 0);
    // Index artifacts are written on every build, even empty ones
    assert_eq!(third.indexes.len(), 2);
}

#[test]
fn test_refresh_build_recomputes_after_source_changes() {
    let dir = TempDir::new().unwrap();
    let config = project_config(dir.path());
    let components = lifecycle::bootstrap(&config).unwrap();
    lifecycle::run(&components).unwrap();
    drop(components);

    write_sources(
        dir.path(),
        &empty_taxonomy_document(),
        &empty_directory_document(),
    );
    commands::build::run(&config, true).unwrap();

    let families = read_json(
        &dir.path()
            .join("dist")
            .join("collections")
            .join("taxonomy_families.json"),
    );
    assert_eq!(families.as_array().unwrap().len(), 0);
}
