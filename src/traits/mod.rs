//! Core trait abstractions consumed by the search core.

pub mod extractor;
pub mod provider;

pub use extractor::Extractor;
pub use provider::{Document, PageProvider};
