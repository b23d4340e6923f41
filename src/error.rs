//! Typed errors for the search core.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors raised by a page provider while fetching a remote document.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP request itself failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The remote host answered with a non-success status class.
    #[error("unexpected status {status} fetching {url}")]
    Status { status: u16, url: String },

    /// A page reference could not be resolved into a canonical identifier.
    #[error("invalid reference: {reference}")]
    InvalidReference { reference: String },
}

/// Errors that terminate a distance search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The remote source refused a request. The whole search stops rather
    /// than retrying: hammering an already-restrictive host only makes the
    /// restriction worse.
    #[error("search blocked by the remote source: {0}")]
    Blocked(#[from] TransportError),

    /// A frontier drained before the depth limit was reached. Frontiers are
    /// reseeded every round unless a terminal condition fired first, so this
    /// is an invariant violation, not a normal outcome.
    #[error("frontiers exhausted at distance {distance} before the depth limit")]
    Exhausted { distance: u32 },
}

/// Result type alias for provider operations.
pub type ProviderResult<T> = std::result::Result<T, TransportError>;

/// Result type alias for search operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;
