//! Co-appearance distance over a lazily-discovered collaboration graph.
//!
//! Computes the minimum number of "co-appearance hops" between two people
//! linked through shared works (actor → movie → actor), discovering the
//! graph on demand: every edge expansion costs a network round trip, so the
//! search is bidirectional, depth-bounded, deduplicated, and fetches behind
//! a concurrency gate.
//!
//! # Design
//!
//! - Two frontiers, one per direction, advanced one level per round
//! - Shared seen-sets so no page is ever fetched twice
//! - Work lookups chunked to the gate's capacity, with an early stop as
//!   soon as the target shows up in a chunk
//! - Any non-success response aborts the whole search as `Blocked` rather
//!   than retrying against a host that is already pushing back
//!
//! # Usage
//!
//! ```rust,ignore
//! use costar::{compute_distance, HttpPageProvider, ImdbExtractor, PersonId, SearchConfig};
//!
//! let provider = HttpPageProvider::new();
//! let extractor = ImdbExtractor::new();
//! let start = PersonId::new("https://imdb.com/name/nm0000206/");
//! let end = PersonId::new("https://imdb.com/name/nm0000401/");
//!
//! let distance = compute_distance(&provider, &extractor, start, end, SearchConfig::default()).await?;
//! println!("{distance}");
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator contracts (PageProvider, Extractor)
//! - [`types`] - Identifiers, records, search configuration
//! - [`search`] - The bidirectional BFS core
//! - [`providers`] - HTTP/IMDB implementation and an in-memory mock
//! - [`error`] - Typed error taxonomy

pub mod error;
pub mod providers;
pub mod search;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ProviderResult, SearchError, SearchResult, TransportError};
pub use providers::{
    filmography_synopses, normalize_reference, HttpPageProvider, ImdbExtractor, MockSite,
};
pub use search::{compute_distance, BidirectionalSearch, ConcurrencyGate, Distance};
pub use traits::{Document, Extractor, PageProvider};
pub use types::{PersonId, PersonRecord, SearchConfig, WorkId, WorkRecord};
