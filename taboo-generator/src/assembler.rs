//! Instance assembly - turns word pools into experiments
//!
//! Level 2/3 - Tier iteration and per-target steps

use taboo_core::pool::is_long_enough;
use taboo_core::{
    Experiment, GameInstance, InstanceFile, Stemmer, WordLists, WordPool, WordPoolSampler,
};
use taboo_retrieval::{RelatedWordStrategy, RetrievalOptions};

use crate::config::GeneratorConfig;

/// Describer and guesser initial prompts attached to every experiment
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Prompts {
    pub describer: String,
    pub guesser: String,
}

impl Prompts {
    pub fn new(describer: impl Into<String>, guesser: impl Into<String>) -> Self {
        Self {
            describer: describer.into(),
            guesser: guesser.into(),
        }
    }
}

/// Bookkeeping for one tier of a run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TierStats {
    pub tier: String,
    pub emitted: usize,
    pub too_short: usize,
    pub under_supplied: usize,
    /// Pool ran dry before the quota was met
    pub exhausted: bool,
}

/// Output of `InstanceAssembler::assemble`
#[derive(Clone, Debug)]
pub struct Generation {
    pub instances: InstanceFile,
    pub stats: Vec<TierStats>,
}

/// Drives sampling, retrieval, acceptance and stemming for one language
pub struct InstanceAssembler {
    config: GeneratorConfig,
    language: String,
    strategy: RelatedWordStrategy,
    stemmer: Box<dyn Stemmer>,
    prompts: Prompts,
}

impl InstanceAssembler {
    pub fn new(
        config: GeneratorConfig,
        language: &str,
        strategy: RelatedWordStrategy,
        stemmer: Box<dyn Stemmer>,
        prompts: Prompts,
    ) -> Self {
        Self {
            config,
            language: language.to_string(),
            strategy,
            stemmer,
            prompts,
        }
    }

    pub fn strategy(&self) -> &RelatedWordStrategy {
        &self.strategy
    }

    /// Build one experiment per configured tier.
    ///
    /// The sampler is seeded once here and shared by all tiers in order, so
    /// reproducing a file requires the same tier sequence.
    pub fn assemble(&self, word_lists: &WordLists) -> Generation {
        let mut sampler = WordPoolSampler::new(self.config.seed);
        let mut instances = InstanceFile::default();
        let mut stats = Vec::with_capacity(self.config.tiers.len());

        for tier in &self.config.tiers {
            tracing::info!("Sampling from freq: {}", tier);

            let mut pool = word_lists.pool(tier);
            let (experiment, tier_stats) = self.assemble_tier(tier, &mut pool, &mut sampler);

            tracing::info!(
                "Experiment {}: {} instances ({} too short, {} under-supplied)",
                experiment.name,
                experiment.len(),
                tier_stats.too_short,
                tier_stats.under_supplied
            );

            instances.experiments.push(experiment);
            stats.push(tier_stats);
        }

        Generation { instances, stats }
    }

    /// Fill one experiment up to the quota or until the pool is exhausted
    pub fn assemble_tier(
        &self,
        tier: &str,
        pool: &mut WordPool,
        sampler: &mut WordPoolSampler,
    ) -> (Experiment, TierStats) {
        let mut experiment = self.setup_experiment(tier);
        let mut stats = TierStats {
            tier: tier.to_string(),
            ..Default::default()
        };
        let options = RetrievalOptions::new(self.config.n_related_words)
            .with_filter_nouns(self.config.filter_nouns);

        while experiment.len() < self.config.n_instances {
            let target = match sampler.select(pool) {
                Ok(word) => word,
                Err(e) if !e.is_fatal() => {
                    tracing::warn!("No more words available to sample in tier {}", tier);
                    stats.exhausted = true;
                    break;
                }
                Err(e) => {
                    tracing::error!("Sampling failed in tier {}: {}", tier, e);
                    break;
                }
            };

            if !is_long_enough(&target) {
                tracing::debug!("Skipping '{}': shorter than minimum length", target);
                stats.too_short += 1;
                continue;
            }

            tracing::debug!("Retrieving related words for '{}'", target);
            let related = self.strategy.retrieve(&target, &options);

            if self.strategy.requires_min_yield() && related.len() < options.count {
                tracing::warn!("Skipping '{}' due to lack of related words.", target);
                stats.under_supplied += 1;
                continue;
            }

            let instance = self.build_instance(experiment.next_id(), target, related);
            experiment.game_instances.push(instance);
            stats.emitted += 1;
        }

        (experiment, stats)
    }

    fn setup_experiment(&self, tier: &str) -> Experiment {
        Experiment::new(tier, &self.language, self.config.max_turns)
            .with_prompts(self.prompts.describer.clone(), self.prompts.guesser.clone())
    }

    fn build_instance(&self, id: usize, target: String, related: Vec<String>) -> GameInstance {
        let target_word_stem = self.stemmer.stem(&target);
        let related_word_stem = related.iter().map(|w| self.stemmer.stem(w)).collect();

        GameInstance {
            id,
            target_word: target,
            related_word: related,
            target_word_stem,
            related_word_stem,
            lang: self.language.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taboo_core::{ManualTable, SnowballStemmer};

    fn manual_assembler(config: GeneratorConfig, table: &str) -> InstanceAssembler {
        let table: ManualTable = serde_json::from_str(table).unwrap();
        InstanceAssembler::new(
            config,
            "en",
            RelatedWordStrategy::Manual(table),
            Box::new(SnowballStemmer::for_language("en", "english").unwrap()),
            Prompts::new("describe", "guess"),
        )
    }

    #[test]
    fn test_experiment_carries_prompts_and_turns() {
        let assembler = manual_assembler(GeneratorConfig::default(), "{}");
        let experiment = assembler.setup_experiment("low");

        assert_eq!(experiment.name, "low_en");
        assert_eq!(experiment.max_turns, 3);
        assert_eq!(experiment.describer_initial_prompt, "describe");
        assert_eq!(experiment.guesser_initial_prompt, "guess");
    }

    #[test]
    fn test_build_instance_stems_words() {
        let assembler = manual_assembler(GeneratorConfig::default(), "{}");
        let instance = assembler.build_instance(
            4,
            "oceans".to_string(),
            vec!["waves".to_string(), "tides".to_string()],
        );

        assert_eq!(instance.id, 4);
        assert_eq!(instance.target_word, "oceans");
        assert_eq!(instance.target_word_stem, "ocean");
        assert_eq!(instance.related_word_stem, vec!["wave", "tide"]);
        assert_eq!(instance.lang, "en");
    }

    #[test]
    fn test_ids_are_sequential_and_quota_respected() {
        let config = GeneratorConfig::default().with_instances(2).with_tiers(&["high"]);
        let assembler = manual_assembler(config, "{}");
        let words: Vec<String> = ["ocean", "forest", "river", "desert"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        let mut pool = WordPool::new("high", &words);
        let mut sampler = WordPoolSampler::new(3);

        let (experiment, stats) = assembler.assemble_tier("high", &mut pool, &mut sampler);

        assert_eq!(experiment.len(), 2);
        let ids: Vec<usize> = experiment.game_instances.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![0, 1]);
        assert!(!stats.exhausted);
        assert_eq!(pool.len(), 2);
    }
}
