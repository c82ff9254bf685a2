//! Cache maintenance commands for the herbarium builder

use crate::config::BuildConfig;
use anyhow::{Context, Result};
use herbarium_store::CacheStore;
use log::info;

/// Print entry count and total size of the cache directory
pub fn stats(config: &BuildConfig) -> Result<()> {
    let cache = CacheStore::new(&config.cache.dir).context("Failed to open cache directory")?;
    let stats = cache.stats().context("Failed to read cache stats")?;

    println!("Cache directory: {}", cache.root().display());
    println!("Entries:         {}", stats.entries);
    println!("Total size:      {} bytes", stats.total_bytes);
    Ok(())
}

/// Delete every memoized stage output
pub fn clear(config: &BuildConfig) -> Result<()> {
    let cache = CacheStore::new(&config.cache.dir).context("Failed to open cache directory")?;
    let removed = cache.clear().context("Failed to clear cache")?;

    info!("Cleared {} cache entries from {}", removed, cache.root().display());
    println!("Removed {} cache entries", removed);
    Ok(())
}
