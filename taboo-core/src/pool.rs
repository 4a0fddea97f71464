//! Frequency-tier word pools and seeded sampling
//!
//! A pool is copied from the word-list resource at startup and shrinks as
//! targets are drawn. The sampler owns the only random stream of a run, so
//! the sequence of draws is fully determined by the seed, the initial pool
//! contents and the order of calls.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashSet;

use crate::error::TabooError;

/// Targets shorter than this (in characters) are discarded
pub const MIN_TARGET_LEN: usize = 3;

/// Remaining candidate target words for one frequency tier
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordPool {
    tier: String,
    words: Vec<String>,
}

impl WordPool {
    /// Build a pool, dropping entries whose normalized form was already seen.
    ///
    /// The first spelling of a word wins and the list order is preserved.
    pub fn new(tier: &str, words: &[String]) -> Self {
        let mut seen = FxHashSet::default();
        let words = words
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .filter(|w| seen.insert(normalize(w)))
            .map(str::to_string)
            .collect();

        Self {
            tier: tier.to_string(),
            words,
        }
    }

    pub fn tier(&self) -> &str {
        &self.tier
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Normalized form used for pool uniqueness
pub fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Whether a target word is long enough to be played
pub fn is_long_enough(word: &str) -> bool {
    word.chars().count() >= MIN_TARGET_LEN
}

/// Seeded, without-replacement sampler shared by all tiers of a run
#[derive(Clone, Debug)]
pub struct WordPoolSampler {
    rng: ChaCha8Rng,
}

impl WordPoolSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw one word uniformly from the pool and remove it.
    ///
    /// Returns `PoolExhausted` once the pool is empty; callers treat that as
    /// the end of the tier, not as a failure of the run.
    pub fn select(&mut self, pool: &mut WordPool) -> Result<String, TabooError> {
        if pool.words.is_empty() {
            return Err(TabooError::PoolExhausted {
                tier: pool.tier.clone(),
            });
        }

        let idx = self.rng.gen_range(0..pool.words.len());
        Ok(pool.words.remove(idx))
    }
}
