//! CLI commands for the herbarium builder

pub mod build;
pub mod cache;
