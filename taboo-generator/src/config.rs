//! Configuration for a generation run
//!
//! Level 4 - Utilities and configuration

/// Tiers sampled by default, in this order
pub const DEFAULT_TIERS: [&str; 3] = ["high", "medium", "low"];

/// Generation run configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Instance quota per experiment
    pub n_instances: usize,
    /// Guesser attempts per game
    pub max_turns: u32,
    /// Related words required per instance (N)
    pub n_related_words: usize,
    /// Version tag written into the file name
    pub version: String,
    /// Seed for the run's single random stream
    pub seed: u64,
    /// Tier names, sampled in order
    pub tiers: Vec<String>,
    /// Restrict lexical-graph candidates to nouns
    pub filter_nouns: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            n_instances: 20,
            max_turns: 3,
            n_related_words: 3,
            version: "v2.0".to_string(),
            seed: 87326423,
            tiers: DEFAULT_TIERS.iter().map(|t| t.to_string()).collect(),
            filter_nouns: false,
        }
    }
}

impl GeneratorConfig {
    pub fn with_instances(mut self, n_instances: usize) -> Self {
        self.n_instances = n_instances;
        self
    }

    pub fn with_related_words(mut self, n_related_words: usize) -> Self {
        self.n_related_words = n_related_words;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_tiers<S: AsRef<str>>(mut self, tiers: &[S]) -> Self {
        self.tiers = tiers.iter().map(|t| t.as_ref().to_string()).collect();
        self
    }

    pub fn with_filter_nouns(mut self, filter_nouns: bool) -> Self {
        self.filter_nouns = filter_nouns;
        self
    }
}
