//! Domain types for the collaboration graph.

pub mod config;
pub mod ids;

pub use config::SearchConfig;
pub use ids::{PersonId, PersonRecord, WorkId, WorkRecord};
