//! Engine configuration knobs.
//!
//! The engine consumes these values; loading them from files or the
//! environment is the embedding application's job.

/// Tunable limits and seeds for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum results returned by a prefix query.
    pub max_prefix_results: usize,
    /// Maximum results returned by an anagram query.
    pub max_anagram_results: usize,
    /// Maximum letters (including wildcards) accepted by an anagram query.
    pub max_anagram_letters: usize,
    /// Seed for the engine's random source. Games created in the same join
    /// order from the same seed get identical tile bags.
    pub random_seed: u64,
    /// Per-player turn-time budget in milliseconds.
    pub initial_time_millis: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_prefix_results: 50,
            max_anagram_results: 50,
            max_anagram_letters: 8,
            random_seed: 12345,
            initial_time_millis: 10 * 60 * 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_prefix_results, 50);
        assert_eq!(config.max_anagram_results, 50);
        assert_eq!(config.max_anagram_letters, 8);
        assert_eq!(config.initial_time_millis, 600_000);
    }
}
