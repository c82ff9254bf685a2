//! Herbarium builder binary crate
//!
//! Configuration, logging, lifecycle wiring, and the CLI commands around
//! the pipeline crates. The pipeline itself lives in `herbarium-core`;
//! storage in `herbarium-store`; shared models in `herbarium-commons`.

pub mod commands;
pub mod config;
pub mod lifecycle;
pub mod logging;
