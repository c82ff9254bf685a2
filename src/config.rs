// Configuration module
use herbarium_store::CacheTtl;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    pub sources: SourceSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub taxonomy: TaxonomySettings,
    #[serde(default)]
    pub pagination: PaginationSettings,
    pub logging: LoggingSettings,
}

/// Source document locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Path to the taxonomic classification tree (JSON)
    pub taxonomy_path: String,
    /// Path to the nursery directory listing (JSON)
    pub directory_path: String,
}

/// Cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_dir")]
    pub dir: String,
    /// Default freshness window: "90s", "30m", "4h", "1d", a bare number
    /// of seconds, or "unbounded"
    #[serde(default = "default_cache_ttl")]
    pub ttl: String,
    /// Per-asset TTL overrides, keyed by asset name
    #[serde(default)]
    pub ttl_overrides: HashMap<String, String>,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

/// Taxonomy walk settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomySettings {
    /// Tree depths where family nodes sit (default: [3])
    #[serde(default = "default_family_levels")]
    pub family_levels: Vec<usize>,

    /// Tree depths where genus nodes sit (default: [3, 6])
    #[serde(default = "default_genus_levels")]
    pub genus_levels: Vec<usize>,
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationSettings {
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    pub file_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Per-target log level overrides (e.g. herbarium_core = "debug")
    #[serde(default)]
    pub targets: HashMap<String, String>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            ttl: default_cache_ttl(),
            ttl_overrides: HashMap::new(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl Default for TaxonomySettings {
    fn default() -> Self {
        Self {
            family_levels: default_family_levels(),
            genus_levels: default_genus_levels(),
        }
    }
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
        }
    }
}

// Default value functions
fn default_cache_dir() -> String {
    "./cache".to_string()
}

fn default_cache_ttl() -> String {
    "1d".to_string()
}

fn default_output_dir() -> String {
    "./dist".to_string()
}

fn default_family_levels() -> Vec<usize> {
    vec![3]
}

fn default_genus_levels() -> Vec<usize> {
    vec![3, 6]
}

fn default_items_per_page() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl BuildConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let mut config: BuildConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        // Override with environment variables if present
        config.apply_env_overrides()?;

        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides for deployment-specific paths
    ///
    /// Supported environment variables:
    /// - HERBARIUM_TAXONOMY_PATH: Override sources.taxonomy_path
    /// - HERBARIUM_DIRECTORY_PATH: Override sources.directory_path
    /// - HERBARIUM_CACHE_DIR: Override cache.dir
    /// - HERBARIUM_CACHE_TTL: Override cache.ttl
    /// - HERBARIUM_OUTPUT_DIR: Override output.dir
    /// - HERBARIUM_LOG_LEVEL: Override logging.level
    /// - HERBARIUM_LOG_FILE: Override logging.file_path
    /// - HERBARIUM_LOG_TO_CONSOLE: Override logging.log_to_console
    ///
    /// Environment variables take precedence over config.toml values
    fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        use std::env;

        if let Ok(path) = env::var("HERBARIUM_TAXONOMY_PATH") {
            self.sources.taxonomy_path = path;
        }

        if let Ok(path) = env::var("HERBARIUM_DIRECTORY_PATH") {
            self.sources.directory_path = path;
        }

        if let Ok(dir) = env::var("HERBARIUM_CACHE_DIR") {
            self.cache.dir = dir;
        }

        if let Ok(ttl) = env::var("HERBARIUM_CACHE_TTL") {
            self.cache.ttl = ttl;
        }

        if let Ok(dir) = env::var("HERBARIUM_OUTPUT_DIR") {
            self.output.dir = dir;
        }

        if let Ok(level) = env::var("HERBARIUM_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(path) = env::var("HERBARIUM_LOG_FILE") {
            self.logging.file_path = path;
        }

        if let Ok(val) = env::var("HERBARIUM_LOG_TO_CONSOLE") {
            self.logging.log_to_console =
                val.to_lowercase() == "true" || val == "1" || val.to_lowercase() == "yes";
        }

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        // Validate source paths
        if self.sources.taxonomy_path.is_empty() {
            return Err(anyhow::anyhow!("sources.taxonomy_path cannot be empty"));
        }

        if self.sources.directory_path.is_empty() {
            return Err(anyhow::anyhow!("sources.directory_path cannot be empty"));
        }

        // Validate log level
        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        // Validate log format
        let valid_formats = ["compact", "pretty", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        // Validate pagination
        if self.pagination.items_per_page == 0 {
            return Err(anyhow::anyhow!("pagination.items_per_page cannot be 0"));
        }

        // Validate taxonomy walk depths
        if self.taxonomy.family_levels.is_empty() {
            return Err(anyhow::anyhow!("taxonomy.family_levels cannot be empty"));
        }

        if self.taxonomy.genus_levels.is_empty() {
            return Err(anyhow::anyhow!("taxonomy.genus_levels cannot be empty"));
        }

        // Validate TTL strings
        self.cache_ttl()?;
        self.cache_ttl_overrides()?;

        Ok(())
    }

    /// Parse the default cache TTL
    pub fn cache_ttl(&self) -> anyhow::Result<CacheTtl> {
        CacheTtl::parse(&self.cache.ttl)
            .map_err(|e| anyhow::anyhow!("Invalid cache.ttl '{}': {}", self.cache.ttl, e))
    }

    /// Parse the per-asset TTL overrides
    pub fn cache_ttl_overrides(&self) -> anyhow::Result<HashMap<String, CacheTtl>> {
        let mut overrides = HashMap::new();
        for (asset, ttl) in &self.cache.ttl_overrides {
            let parsed = CacheTtl::parse(ttl).map_err(|e| {
                anyhow::anyhow!("Invalid cache.ttl_overrides entry '{} = {}': {}", asset, ttl, e)
            })?;
            overrides.insert(asset.clone(), parsed);
        }
        Ok(overrides)
    }

    /// Get default configuration (useful for testing)
    pub fn default() -> Self {
        BuildConfig {
            sources: SourceSettings {
                taxonomy_path: "./data/taxonomy.json".to_string(),
                directory_path: "./data/directory.json".to_string(),
            },
            cache: CacheSettings::default(),
            output: OutputSettings::default(),
            taxonomy: TaxonomySettings::default(),
            pagination: PaginationSettings::default(),
            logging: LoggingSettings {
                level: "info".to_string(),
                file_path: "./logs/build.log".to_string(),
                log_to_console: true,
                format: "compact".to_string(),
                targets: HashMap::new(),
            },
        }
    }
}
