//! Data models shared across the pipeline stages

pub mod composite;
pub mod flat;
pub mod page;
pub mod record;
pub mod slug;
