//! Page provider and extractor implementations.

pub mod imdb;
pub mod mock;

pub use imdb::{filmography_synopses, normalize_reference, HttpPageProvider, ImdbExtractor};
pub use mock::MockSite;
