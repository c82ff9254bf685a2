//! Field names, node types, document paths, and cache asset keys
//!
//! Every stage reads and writes the same JSON vocabulary. Keeping the
//! strings here prevents silent drift between the flattener, the
//! cross-referencer, and the composer.

/// Field holding the node kind (e.g. "family", "nursery")
pub const FIELD_TYPE: &str = "type";

/// Field holding the machine-readable identifier of a node
pub const FIELD_IDENTIFIER: &str = "identifier";

/// Field holding the human-readable display name of a node
pub const FIELD_NAME: &str = "name";

/// Numeric key from the legacy archive, required for paginated views
pub const FIELD_ARCHIVAL_ID: &str = "archival_id";

/// Back-reference stamped onto extracted child nodes, holds the parent's type
pub const FIELD_PARENT_TYPE: &str = "parent_type";

/// Optional descriptive label object (`{key, name}`) on taxonomy nodes
pub const FIELD_LOWER_LEVEL: &str = "lower_level";

/// Wrapper key around a node in enveloped source lists
pub const FIELD_DATA: &str = "data";

/// Reference from a common-name label to the plant it names
pub const FIELD_PLANT: &str = "plant";

/// Suffix for inline child lists; the full field name is `"<type>_items"`
pub const ITEMS_SUFFIX: &str = "_items";

// Node types found in the source documents
pub const NODE_TYPE_FAMILY: &str = "family";
pub const NODE_TYPE_GENUS: &str = "genus";
pub const NODE_TYPE_COMMON_NAME: &str = "common_name";
pub const NODE_TYPE_PLANT: &str = "plant";
pub const NODE_TYPE_NURSERY: &str = "nursery";
pub const NODE_TYPE_NURSERY_CATEGORY: &str = "nursery_category";

// Asset keys under which stage outputs are cached and persisted
pub const ASSET_FAMILIES: &str = "taxonomy_families";
pub const ASSET_GENERA: &str = "taxonomy_genera";
pub const ASSET_COMMON_NAMES: &str = "common_names";
pub const ASSET_CITED_PLANTS: &str = "cited_plants";
pub const ASSET_NURSERIES: &str = "nurseries";
pub const ASSET_NURSERY_CATEGORIES: &str = "nursery_categories";
pub const ASSET_NURSERY_PLANTS: &str = "nursery_plants";
pub const ASSET_NURSERY_DIRECTORY: &str = "nursery_directory";
pub const ASSET_NURSERY_PAGES: &str = "nursery_pages";
pub const ASSET_SEARCH_RECORDS: &str = "search_records";

// Paths from the document root to the interesting subtrees
pub const TAXONOMY_ROOT_PATH: &[&str] = &["names"];
pub const COMMON_NAMES_PATH: &[&str] = &["common_names"];
pub const CITED_PLANTS_PATH: &[&str] = &["cited"];
pub const DIRECTORY_ROOT_PATH: &[&str] = &["directory"];
