//! Mock site for testing: an in-memory collaboration graph.
//!
//! Implements both [`PageProvider`] and [`Extractor`] over canned credits,
//! with call tracking so tests can assert how many pages a search fetched.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{ProviderResult, TransportError};
use crate::traits::{Document, Extractor, PageProvider};
use crate::types::ids::{PersonId, PersonRecord, WorkId, WorkRecord};

/// In-memory site whose documents are just their own identifiers.
///
/// Credits are declared with [`MockSite::add_credit`]; ids are derived from
/// the person/work names via [`MockSite::person_id`] and
/// [`MockSite::work_id`].
#[derive(Default)]
pub struct MockSite {
    /// Filmography per person id, in insertion order.
    filmographies: Arc<RwLock<HashMap<String, Vec<WorkRecord>>>>,

    /// Cast per work id, in insertion order.
    casts: Arc<RwLock<HashMap<String, Vec<PersonRecord>>>>,

    /// Every id handed to `fetch_and_parse`, in order.
    fetch_calls: Arc<RwLock<Vec<String>>>,

    /// When set, every fetch fails like a blocking host would.
    refuse: Arc<RwLock<bool>>,
}

impl MockSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical person id for a short name.
    pub fn person_id(name: &str) -> PersonId {
        PersonId::new(format!("https://example.com/person/{name}/"))
    }

    /// Canonical work id for a short title.
    pub fn work_id(title: &str) -> WorkId {
        WorkId::new(format!("https://example.com/work/{title}/credits/"))
    }

    /// Record that `person` appears in `work`: the work joins the person's
    /// filmography and the person joins the work's cast.
    pub fn add_credit(&self, person: &str, work: &str) {
        let person_record = PersonRecord {
            name: person.to_string(),
            id: Self::person_id(person),
        };
        let work_record = WorkRecord {
            title: work.to_string(),
            id: Self::work_id(work),
        };
        self.filmographies
            .write()
            .unwrap()
            .entry(person_record.id.as_str().to_string())
            .or_default()
            .push(work_record.clone());
        self.casts
            .write()
            .unwrap()
            .entry(work_record.id.as_str().to_string())
            .or_default()
            .push(person_record);
    }

    /// Builder-style [`MockSite::add_credit`].
    pub fn with_credit(self, person: &str, work: &str) -> Self {
        self.add_credit(person, work);
        self
    }

    /// Make every subsequent fetch fail with a non-success status.
    pub fn refuse_requests(&self) {
        *self.refuse.write().unwrap() = true;
    }

    /// Ids fetched so far, in order.
    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls.read().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.read().unwrap().len()
    }

    /// Fetches of work pages only.
    pub fn work_fetches(&self) -> usize {
        self.fetch_calls
            .read()
            .unwrap()
            .iter()
            .filter(|id| id.contains("/work/"))
            .count()
    }

    /// Fetches of person pages only.
    pub fn person_fetches(&self) -> usize {
        self.fetch_calls
            .read()
            .unwrap()
            .iter()
            .filter(|id| id.contains("/person/"))
            .count()
    }

    /// Forget recorded calls (credits stay).
    pub fn reset_calls(&self) {
        self.fetch_calls.write().unwrap().clear();
    }
}

impl Clone for MockSite {
    fn clone(&self) -> Self {
        Self {
            filmographies: Arc::clone(&self.filmographies),
            casts: Arc::clone(&self.casts),
            fetch_calls: Arc::clone(&self.fetch_calls),
            refuse: Arc::clone(&self.refuse),
        }
    }
}

#[async_trait]
impl PageProvider for MockSite {
    async fn fetch_and_parse(&self, id: &str) -> ProviderResult<Document> {
        self.fetch_calls.write().unwrap().push(id.to_string());
        if *self.refuse.read().unwrap() {
            return Err(TransportError::Status {
                status: 503,
                url: id.to_string(),
            });
        }
        // Unknown ids resolve to empty pages, like a person with no credits.
        Ok(Document::new(id, ""))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

impl Extractor for MockSite {
    fn works_from_person(&self, doc: &Document, limit: Option<usize>) -> Vec<WorkRecord> {
        let mut works = self
            .filmographies
            .read()
            .unwrap()
            .get(&doc.id)
            .cloned()
            .unwrap_or_default();
        if let Some(limit) = limit {
            works.truncate(limit);
        }
        works
    }

    fn cast_from_work(&self, doc: &Document, limit: Option<usize>) -> Vec<PersonRecord> {
        let mut cast = self
            .casts
            .read()
            .unwrap()
            .get(&doc.id)
            .cloned()
            .unwrap_or_default();
        if let Some(limit) = limit {
            cast.truncate(limit);
        }
        cast
    }
}
