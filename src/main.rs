// Herbarium Builder entrypoint
//!
//! The heavy lifting (store setup, pipeline wiring, command logic) lives
//! in dedicated modules so this file remains a thin orchestrator.

use anyhow::Result;
use clap::{Parser, Subcommand};
use herbarium_builder::config::BuildConfig;
use herbarium_builder::{commands, logging};
use log::info;
use std::path::PathBuf;

// Build information - Create a static version string at compile time
macro_rules! version_string {
    () => {
        concat!(
            env!("CARGO_PKG_VERSION"),
            "\nCommit: ",
            env!("GIT_COMMIT_HASH"),
            " (",
            env!("GIT_BRANCH"),
            ")\nBuilt: ",
            env!("BUILD_DATE")
        )
    };
}

/// Herbarium Builder - build-time indexer for the herbarium site
#[derive(Parser, Debug)]
#[command(name = "herbarium")]
#[command(version = version_string!())]
#[command(about = "Builds plant collections, category pages, and search indexes", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long = "config", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full build pipeline (the default)
    Build {
        /// Clear the cache first so every stage recomputes
        #[arg(long = "refresh")]
        refresh: bool,
    },
    /// Inspect or clear the build cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand, Debug)]
enum CacheAction {
    /// Show entry count and total size
    Stats,
    /// Delete every cached stage output
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration (the build cannot run without one)
    let config = match BuildConfig::from_file(&cli.config) {
        Ok(cfg) => {
            eprintln!(
                "✅ Loaded config from: {}",
                std::fs::canonicalize(&cli.config)
                    .unwrap_or_else(|_| cli.config.clone())
                    .display()
            );
            cfg
        }
        Err(e) => {
            eprintln!("❌ FATAL: Failed to load {}: {}", cli.config.display(), e);
            eprintln!("❌ Builder cannot run without valid configuration");
            std::process::exit(1);
        }
    };

    // Logging before any other side effects
    logging::init_logging(
        &config.logging.level,
        &config.logging.file_path,
        config.logging.log_to_console,
        Some(&config.logging.targets),
        &config.logging.format,
    )?;

    // Display enhanced version information
    let version = env!("CARGO_PKG_VERSION");
    let commit = env!("GIT_COMMIT_HASH");
    let build_date = env!("BUILD_DATE");
    let branch = env!("GIT_BRANCH");

    info!("╔═══════════════════════════════════════════════════════════════╗");
    info!("║           Herbarium Builder v{:<32} ║", version);
    info!("╠═══════════════════════════════════════════════════════════════╣");
    info!("║  Commit:     {:<48} ║", commit);
    info!("║  Branch:     {:<48} ║", branch);
    info!("║  Built:      {:<48} ║", build_date);
    info!("╚═══════════════════════════════════════════════════════════════╝");
    info!(
        "Sources: {} + {}",
        config.sources.taxonomy_path, config.sources.directory_path
    );

    match cli.command.unwrap_or(Command::Build { refresh: false }) {
        Command::Build { refresh } => commands::build::run(&config, refresh),
        Command::Cache { action } => match action {
            CacheAction::Stats => commands::cache::stats(&config),
            CacheAction::Clear => commands::cache::clear(&config),
        },
    }
}
