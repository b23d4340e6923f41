//! Per-level expansion: one batch of persons to the next, via shared works.

use std::collections::HashSet;

use futures::future::try_join_all;
use tracing::debug;

use crate::error::ProviderResult;
use crate::search::gate::ConcurrencyGate;
use crate::traits::{Document, Extractor, PageProvider};
use crate::types::config::SearchConfig;
use crate::types::ids::{PersonId, WorkId};

/// Dedup state shared by both search directions.
///
/// Once an id lands here it is never re-expanded or re-returned; this is
/// what bounds the search in a cyclic collaboration graph. Both directions
/// write into the same sets, in place.
#[derive(Debug, Default)]
pub(crate) struct SeenSets {
    pub persons: HashSet<PersonId>,
    pub works: HashSet<WorkId>,
}

/// Result of expanding one level.
pub(crate) struct Expansion {
    /// The target id turned up in a chunk's candidates.
    pub found: bool,

    /// Everything reachable one hop out, deduplicated within the batch.
    pub next_level: Vec<PersonId>,
}

/// Expands a batch of person ids into the next reachable batch.
pub(crate) struct LevelExpander<'a, P, E> {
    provider: &'a P,
    extractor: &'a E,
    gate: &'a ConcurrencyGate,
    work_limit: Option<usize>,
    cast_limit: Option<usize>,
    chunk_size: usize,
}

impl<'a, P: PageProvider, E: Extractor> LevelExpander<'a, P, E> {
    pub fn new(
        provider: &'a P,
        extractor: &'a E,
        gate: &'a ConcurrencyGate,
        config: &SearchConfig,
    ) -> Self {
        Self {
            provider,
            extractor,
            gate,
            work_limit: config.work_limit,
            cast_limit: config.cast_limit,
            chunk_size: config.chunk_size.max(1),
        }
    }

    async fn fetch(&self, id: &str) -> ProviderResult<Document> {
        let _permit = self.gate.admit().await;
        self.provider.fetch_and_parse(id).await
    }

    /// Turn `level` into the next BFS level, stopping early if `target`
    /// shows up.
    ///
    /// Person pages are fetched together; works are then looked up in
    /// chunks of `chunk_size`, each chunk fetched together and awaited
    /// before the next begins, which caps in-flight work fetches at the
    /// gate's capacity.
    pub async fn expand(
        &self,
        level: &[PersonId],
        seen: &mut SeenSets,
        target: &PersonId,
    ) -> ProviderResult<Expansion> {
        // Check-and-mark: `insert` is the membership test and the insertion
        // in one step, with no suspension point between them, so two levels
        // racing on the same id cannot both keep it.
        let fresh: Vec<&PersonId> = level
            .iter()
            .filter(|id| seen.persons.insert((*id).clone()))
            .collect();

        let person_docs = try_join_all(fresh.iter().map(|id| self.fetch(id.as_str()))).await?;

        let mut works: Vec<WorkId> = Vec::new();
        for doc in &person_docs {
            for record in self.extractor.works_from_person(doc, self.work_limit) {
                works.push(record.id);
            }
        }
        works.retain(|work| seen.works.insert(work.clone()));
        debug!(
            persons = fresh.len(),
            works = works.len(),
            "expanding level"
        );

        let mut next_level: Vec<PersonId> = Vec::new();
        let mut batch_seen: HashSet<PersonId> = HashSet::new();
        for chunk in works.chunks(self.chunk_size) {
            let work_docs = try_join_all(chunk.iter().map(|work| self.fetch(work.as_str()))).await?;

            let mut candidates: Vec<PersonId> = Vec::new();
            for doc in &work_docs {
                for record in self.extractor.cast_from_work(doc, self.cast_limit) {
                    candidates.push(record.id);
                }
            }

            if candidates.contains(target) {
                debug!("target found in chunk, skipping remaining works");
                next_level.extend(candidates);
                return Ok(Expansion {
                    found: true,
                    next_level,
                });
            }

            // Within-batch dedup only; the check against the shared seen set
            // happens on the next expansion's intake.
            next_level.extend(candidates.into_iter().filter(|id| batch_seen.insert(id.clone())));
        }

        Ok(Expansion {
            found: false,
            next_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockSite;

    fn expander_over<'a>(
        site: &'a MockSite,
        gate: &'a ConcurrencyGate,
        config: &SearchConfig,
    ) -> LevelExpander<'a, MockSite, MockSite> {
        LevelExpander::new(site, site, gate, config)
    }

    #[tokio::test]
    async fn shared_cast_member_appears_once_in_next_level() {
        let site = MockSite::new()
            .with_credit("A", "M1")
            .with_credit("A", "M2")
            .with_credit("X", "M1")
            .with_credit("X", "M2")
            .with_credit("B", "M1")
            .with_credit("C", "M2");
        let gate = ConcurrencyGate::new(10);
        let config = SearchConfig::default();
        let expander = expander_over(&site, &gate, &config);

        let mut seen = SeenSets::default();
        let target = MockSite::person_id("nobody");
        let expansion = expander
            .expand(&[MockSite::person_id("A")], &mut seen, &target)
            .await
            .unwrap();

        assert!(!expansion.found);
        let x_count = expansion
            .next_level
            .iter()
            .filter(|id| **id == MockSite::person_id("X"))
            .count();
        assert_eq!(x_count, 1);
    }

    #[tokio::test]
    async fn seen_persons_are_never_expanded_twice() {
        let site = MockSite::new().with_credit("A", "M1").with_credit("B", "M1");
        let gate = ConcurrencyGate::new(10);
        let config = SearchConfig::default();
        let expander = expander_over(&site, &gate, &config);

        let mut seen = SeenSets::default();
        let target = MockSite::person_id("nobody");
        let level = vec![MockSite::person_id("A")];

        let first = expander.expand(&level, &mut seen, &target).await.unwrap();
        assert!(!first.next_level.is_empty());
        let fetches_after_first = site.fetch_count();

        // Second expansion of the same level: everything is already marked
        // seen, so nothing is fetched and nothing comes back.
        let second = expander.expand(&level, &mut seen, &target).await.unwrap();
        assert!(second.next_level.is_empty());
        assert_eq!(site.fetch_count(), fetches_after_first);
    }

    #[tokio::test]
    async fn finding_the_target_skips_later_chunks() {
        // Three works in A's filmography; the target is in the first one.
        let site = MockSite::new()
            .with_credit("A", "M1")
            .with_credit("A", "M2")
            .with_credit("A", "M3")
            .with_credit("T", "M1")
            .with_credit("F1", "M2")
            .with_credit("F2", "M3");
        let gate = ConcurrencyGate::new(1);
        let config = SearchConfig::new().with_chunk_size(1);
        let expander = expander_over(&site, &gate, &config);

        let mut seen = SeenSets::default();
        let target = MockSite::person_id("T");
        let expansion = expander
            .expand(&[MockSite::person_id("A")], &mut seen, &target)
            .await
            .unwrap();

        assert!(expansion.found);
        // One person page plus the single work in the first chunk.
        assert_eq!(site.work_fetches(), 1);
    }

    #[tokio::test]
    async fn empty_filmography_contributes_an_empty_sequence() {
        let site = MockSite::new();
        let gate = ConcurrencyGate::new(10);
        let config = SearchConfig::default();
        let expander = expander_over(&site, &gate, &config);

        let mut seen = SeenSets::default();
        let target = MockSite::person_id("nobody");
        let expansion = expander
            .expand(&[MockSite::person_id("loner")], &mut seen, &target)
            .await
            .unwrap();

        assert!(!expansion.found);
        assert!(expansion.next_level.is_empty());
    }
}
