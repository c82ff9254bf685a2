//! Build command for the herbarium builder
//!
//! Runs the full pipeline, optionally clearing memoized stage outputs
//! first so every stage recomputes from the source documents.

use crate::config::BuildConfig;
use crate::lifecycle;
use anyhow::{Context, Result};
use log::info;

/// Run the full build
///
/// # Arguments
/// * `config` - Validated build configuration
/// * `refresh` - When true, clear the cache before building
pub fn run(config: &BuildConfig, refresh: bool) -> Result<()> {
    let components = lifecycle::bootstrap(config).context("Failed to initialize build")?;

    if refresh {
        let removed = components
            .cache
            .clear()
            .context("Failed to clear cache before refresh build")?;
        info!("Refresh requested: cleared {} cache entries", removed);
    }

    lifecycle::run(&components).context("Build failed")?;
    Ok(())
}
