//! Shared fixtures for the pipeline integration tests

use herbarium_builder::config::BuildConfig;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// Taxonomic classification tree exercising every flattening mode:
/// families at depth 3, genera at depths 3 and 6, labeled common names,
/// and a citation list.
pub fn taxonomy_document() -> Value {
    json!({
        "names": {
            "p": {
                "pi": {
                    "pinaceae": {
                        "type": "family",
                        "identifier": "pinaceae",
                        "name": "Pine family",
                        "lower_level": {"key": "genus", "name": "Genera"},
                        "genus_groups": {
                            "p": {
                                "pinus": {
                                    "type": "genus",
                                    "identifier": "pinus",
                                    "name": "Pines"
                                }
                            }
                        }
                    }
                }
            },
            "r": {
                "ro": {
                    "rosaceae": {
                        "type": "family",
                        "identifier": "rosaceae",
                        "name": "Rose family"
                    }
                }
            },
            "a": {
                "ac": {
                    "acer": {
                        "type": "genus",
                        "identifier": "acer",
                        "name": "Maples"
                    }
                }
            }
        },
        "common_names": [
            {
                "type": "common_name",
                "identifier": "maple",
                "name": "Maple",
                "plant": {"type": "genus", "identifier": "acer"}
            },
            {"type": "common_name", "identifier": "hedgewort", "name": "Hedgewort"}
        ],
        "cited": [
            {"type": "plant", "identifier": "pinaceae", "name": "Pine family"}
        ]
    })
}

/// Nursery directory with enveloped entries, inline category references,
/// and plant listings. Both nurseries share the "natives" category.
pub fn directory_document() -> Value {
    json!({
        "directory": [
            {
                "data": {
                    "type": "nursery",
                    "identifier": "rooted-in-nature",
                    "name": "Rooted in Nature",
                    "archival_id": 101,
                    "nursery_category_items": [
                        {
                            "type": "nursery_category",
                            "identifier": "natives",
                            "name": "Natives",
                            "archival_id": 11
                        },
                        {
                            "type": "nursery_category",
                            "identifier": "conifers",
                            "name": "Conifers",
                            "archival_id": 12
                        }
                    ],
                    "plant_items": [
                        {"type": "plant", "identifier": "acer", "name": "Maples"}
                    ]
                }
            },
            {
                "data": {
                    "type": "nursery",
                    "identifier": "green-thumb",
                    "name": "Green Thumb",
                    "archival_id": 102,
                    "nursery_category_items": [
                        {
                            "type": "nursery_category",
                            "identifier": "natives",
                            "name": "Natives",
                            "archival_id": 11
                        }
                    ],
                    "plant_items": []
                }
            }
        ]
    })
}

/// Syntactically valid taxonomy with nothing in it
pub fn empty_taxonomy_document() -> Value {
    json!({"names": {}, "common_names": [], "cited": []})
}

/// Syntactically valid directory with nothing in it
pub fn empty_directory_document() -> Value {
    json!({"directory": []})
}

/// Write (or overwrite) the two source documents under `root`/data
pub fn write_sources(root: &Path, taxonomy: &Value, directory: &Value) {
    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(
        data_dir.join("taxonomy.json"),
        serde_json::to_string_pretty(taxonomy).unwrap(),
    )
    .unwrap();
    fs::write(
        data_dir.join("directory.json"),
        serde_json::to_string_pretty(directory).unwrap(),
    )
    .unwrap();
}

/// Lay out the fixture sources under `root` and return a config with
/// every path scoped inside it
pub fn project_config(root: &Path) -> BuildConfig {
    write_sources(root, &taxonomy_document(), &directory_document());

    let mut config = BuildConfig::default();
    config.sources.taxonomy_path = path_string(&root.join("data").join("taxonomy.json"));
    config.sources.directory_path = path_string(&root.join("data").join("directory.json"));
    config.cache.dir = path_string(&root.join("cache"));
    config.output.dir = path_string(&root.join("dist"));
    config.logging.file_path = path_string(&root.join("logs").join("build.log"));
    config.logging.log_to_console = false;
    config
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
