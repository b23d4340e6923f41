//! Search configuration.

/// Knobs for a distance search.
///
/// `chunk_size` deliberately serves double duty: it is both the permit count
/// on the concurrency gate and the batch size for work lookups, keeping
/// works in flight and people in flight proportionate so a single
/// over-popular work cannot blow up memory.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Truncate each work's extracted cast to this many people.
    pub cast_limit: Option<usize>,

    /// Truncate each person's extracted filmography to this many works.
    pub work_limit: Option<usize>,

    /// Maximum number of BFS rounds before reporting unreachable.
    pub depth_limit: u32,

    /// Concurrent-fetch budget and work-lookup batch size.
    pub chunk_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cast_limit: None,
            work_limit: None,
            depth_limit: 3,
            chunk_size: 10,
        }
    }
}

impl SearchConfig {
    /// Create a config with defaults (depth limit 3, chunk size 10).
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit how many cast members are taken from each work.
    pub fn with_cast_limit(mut self, limit: usize) -> Self {
        self.cast_limit = Some(limit);
        self
    }

    /// Limit how many works are taken from each person.
    pub fn with_work_limit(mut self, limit: usize) -> Self {
        self.work_limit = Some(limit);
        self
    }

    /// Set the maximum number of BFS rounds.
    pub fn with_depth_limit(mut self, depth: u32) -> Self {
        self.depth_limit = depth;
        self
    }

    /// Set the fetch budget / batch size. Clamped to at least 1.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_contract() {
        let config = SearchConfig::default();
        assert_eq!(config.depth_limit, 3);
        assert_eq!(config.chunk_size, 10);
        assert!(config.cast_limit.is_none());
        assert!(config.work_limit.is_none());
    }

    #[test]
    fn chunk_size_never_drops_to_zero() {
        let config = SearchConfig::new().with_chunk_size(0);
        assert_eq!(config.chunk_size, 1);
    }

    #[test]
    fn builder_sets_limits() {
        let config = SearchConfig::new()
            .with_cast_limit(5)
            .with_work_limit(7)
            .with_depth_limit(2);
        assert_eq!(config.cast_limit, Some(5));
        assert_eq!(config.work_limit, Some(7));
        assert_eq!(config.depth_limit, 2);
    }
}
