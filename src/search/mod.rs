//! The search core: concurrency gate, level expansion, bidirectional BFS.

mod bidirectional;
mod expander;
mod gate;

pub use bidirectional::BidirectionalSearch;
pub use gate::ConcurrencyGate;

use std::fmt;

use crate::error::SearchResult;
use crate::traits::{Extractor, PageProvider};
use crate::types::config::SearchConfig;
use crate::types::ids::PersonId;

/// Outcome of a distance computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
    /// Minimum number of co-appearance hops between the two people.
    Hops(u32),

    /// No path exists within the configured depth limit.
    Unreachable,
}

impl Distance {
    pub fn hops(&self) -> Option<u32> {
        match self {
            Self::Hops(n) => Some(*n),
            Self::Unreachable => None,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hops(n) => write!(f, "{n}"),
            Self::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// Compute the minimum number of co-appearance hops between two people.
///
/// Convenience wrapper over [`BidirectionalSearch`]. The caller receives
/// exactly one of a finite distance, [`Distance::Unreachable`], or an error;
/// there is no partial result.
pub async fn compute_distance<P: PageProvider, E: Extractor>(
    provider: &P,
    extractor: &E,
    start: PersonId,
    end: PersonId,
    config: SearchConfig,
) -> SearchResult<Distance> {
    BidirectionalSearch::new(provider, extractor, config)
        .run(start, end)
        .await
}
