//! Extractor trait: site-specific field extraction over fetched documents.

use crate::traits::provider::Document;
use crate::types::ids::{PersonRecord, WorkRecord};

/// Turns fetched documents into graph edges.
///
/// Extraction is synchronous CPU work and never suspends. Filtering of
/// non-qualifying entries (unreleased works, secondary-status credits)
/// happens here, before the traversal ever sees them; an entry with a
/// missing status marker counts as a normal, qualifying entry.
pub trait Extractor: Send + Sync {
    /// Ordered filmography of a person page, optionally truncated to
    /// `limit` qualifying works. A person with no qualifying works yields
    /// an empty sequence, not an error.
    fn works_from_person(&self, doc: &Document, limit: Option<usize>) -> Vec<WorkRecord>;

    /// Ordered cast of a work's cast-listing page, optionally truncated to
    /// `limit` people. A work with no eligible cast yields an empty
    /// sequence, not an error.
    fn cast_from_work(&self, doc: &Document, limit: Option<usize>) -> Vec<PersonRecord>;
}
