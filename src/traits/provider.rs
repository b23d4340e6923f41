//! PageProvider trait: fetch a remote page into a queryable document.

use async_trait::async_trait;

use crate::error::ProviderResult;

/// A fetched page, ready to hand to an [`Extractor`](crate::Extractor).
///
/// Carries the raw body together with the identifier it was fetched for, so
/// extractors can associate results with the requesting id.
#[derive(Debug, Clone)]
pub struct Document {
    /// Canonical identifier this document was fetched for.
    pub id: String,

    /// Raw page body.
    pub body: String,
}

impl Document {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }
}

/// Fetches remote documents by identifier.
///
/// Implementations decide transport and parsing; the search core only cares
/// that a non-success response surfaces as a
/// [`TransportError`](crate::TransportError), which aborts the whole search.
#[async_trait]
pub trait PageProvider: Send + Sync {
    /// Fetch the page behind `id` and parse it into a [`Document`].
    async fn fetch_and_parse(&self, id: &str) -> ProviderResult<Document>;

    /// Provider name, for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}
