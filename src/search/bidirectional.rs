//! Two frontiers driven level by level until they meet.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info, warn};

use crate::error::{SearchError, SearchResult};
use crate::search::expander::{Expansion, LevelExpander, SeenSets};
use crate::search::gate::ConcurrencyGate;
use crate::search::Distance;
use crate::traits::{Extractor, PageProvider};
use crate::types::config::SearchConfig;
use crate::types::ids::PersonId;

/// Bidirectional BFS over a lazily-discovered collaboration graph.
///
/// One frontier grows from the start person, one from the end person; each
/// round dequeues exactly one level per direction and expands it through
/// shared works. Meeting rules are checked against already-fetched data
/// before the opposite frontier is expanded, which saves one network round
/// when the meeting is already visible.
pub struct BidirectionalSearch<'a, P, E> {
    provider: &'a P,
    extractor: &'a E,
    config: SearchConfig,
}

impl<'a, P: PageProvider, E: Extractor> BidirectionalSearch<'a, P, E> {
    pub fn new(provider: &'a P, extractor: &'a E, config: SearchConfig) -> Self {
        Self {
            provider,
            extractor,
            config,
        }
    }

    /// Run the search to a terminal outcome.
    ///
    /// Returns the hop distance, [`Distance::Unreachable`] once the depth
    /// limit passes without a meeting, or an error: `Blocked` on any
    /// transport failure, `Exhausted` if a frontier drains early.
    pub async fn run(&self, start: PersonId, end: PersonId) -> SearchResult<Distance> {
        if start == end {
            return Ok(Distance::Hops(0));
        }

        info!(
            start = %start,
            end = %end,
            depth_limit = self.config.depth_limit,
            "starting bidirectional search"
        );

        let gate = ConcurrencyGate::new(self.config.chunk_size);
        let expander = LevelExpander::new(self.provider, self.extractor, &gate, &self.config);

        let mut forward: VecDeque<Vec<PersonId>> = VecDeque::new();
        let mut backward: VecDeque<Vec<PersonId>> = VecDeque::new();
        forward.push_back(vec![start.clone()]);
        backward.push_back(vec![end.clone()]);

        let mut seen = SeenSets::default();
        let mut distance: u32 = 0;

        while distance < self.config.depth_limit {
            let (Some(forward_level), Some(backward_level)) =
                (forward.pop_front(), backward.pop_front())
            else {
                warn!(distance, "frontier drained before the depth limit");
                return Err(SearchError::Exhausted { distance });
            };

            let Expansion {
                found,
                next_level: next_forward,
            } = expander.expand(&forward_level, &mut seen, &end).await?;
            if found {
                info!(distance = distance + 1, "target reached expanding forward");
                return Ok(Distance::Hops(distance + 1));
            }

            // The frontiers meet one hop ahead of forward, zero hops ahead
            // of backward: one more forward edge than the symmetric case.
            if intersects(&next_forward, &backward_level) {
                info!("next forward level meets current backward level");
                return Ok(Distance::Hops(2 * distance + 1));
            }

            let Expansion {
                found,
                next_level: next_backward,
            } = expander.expand(&backward_level, &mut seen, &start).await?;
            if found {
                info!(distance = distance + 1, "target reached expanding backward");
                return Ok(Distance::Hops(distance + 1));
            }

            if intersects(&next_backward, &forward_level) {
                info!("next backward level meets current forward level");
                return Ok(Distance::Hops(2 * distance + 1));
            }

            if intersects(&next_forward, &next_backward) {
                info!("next levels meet each other");
                return Ok(Distance::Hops(2 * distance + 2));
            }

            debug!(
                forward = next_forward.len(),
                backward = next_backward.len(),
                "no meeting at this level"
            );
            forward.push_back(next_forward);
            backward.push_back(next_backward);
            distance += 1;
        }

        info!(
            depth_limit = self.config.depth_limit,
            "depth limit reached without a meeting"
        );
        Ok(Distance::Unreachable)
    }
}

fn intersects(a: &[PersonId], b: &[PersonId]) -> bool {
    let b: HashSet<&PersonId> = b.iter().collect();
    a.iter().any(|id| b.contains(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_is_detected_regardless_of_order() {
        let a = vec![
            PersonId::new("https://example.com/person/A/"),
            PersonId::new("https://example.com/person/B/"),
        ];
        let b = vec![
            PersonId::new("https://example.com/person/C/"),
            PersonId::new("https://example.com/person/A/"),
        ];
        assert!(intersects(&a, &b));
        assert!(intersects(&b, &a));
    }

    #[test]
    fn disjoint_levels_do_not_intersect() {
        let a = vec![PersonId::new("https://example.com/person/A/")];
        let b = vec![PersonId::new("https://example.com/person/B/")];
        assert!(!intersects(&a, &b));
        assert!(!intersects(&a, &[]));
    }
}
