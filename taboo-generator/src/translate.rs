//! Translation of finished instance files into another language
//!
//! Level 4 - Post-processing utility

use std::path::{Path, PathBuf};

use taboo_core::{Experiment, GameInstance, InstanceFile, Stemmer};
use taboo_retrieval::Translator;

use crate::assembler::Prompts;

/// Source and target languages of a translation pass
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationConfig {
    pub source: String,
    pub target: String,
}

impl TranslationConfig {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// Translate every target and related word, then restem in the target language.
///
/// Words that fail to translate are kept untranslated. Each experiment gets
/// `prompts` and is renamed to the target language.
pub fn translate_instances(
    file: &InstanceFile,
    translator: &dyn Translator,
    stemmer: &dyn Stemmer,
    config: &TranslationConfig,
    prompts: &Prompts,
) -> InstanceFile {
    let experiments = file
        .experiments
        .iter()
        .map(|experiment| translate_experiment(experiment, translator, stemmer, config, prompts))
        .collect();

    InstanceFile { experiments }
}

fn translate_experiment(
    experiment: &Experiment,
    translator: &dyn Translator,
    stemmer: &dyn Stemmer,
    config: &TranslationConfig,
    prompts: &Prompts,
) -> Experiment {
    tracing::info!("Translating experiment {}", experiment.name);

    let source_suffix = format!("_{}", config.source);
    let name = match experiment.name.strip_suffix(&source_suffix) {
        Some(tier) => format!("{}_{}", tier, config.target),
        None => experiment.name.clone(),
    };

    Experiment {
        name,
        max_turns: experiment.max_turns,
        describer_initial_prompt: prompts.describer.clone(),
        guesser_initial_prompt: prompts.guesser.clone(),
        game_instances: experiment
            .game_instances
            .iter()
            .map(|instance| translate_instance(instance, translator, stemmer, config))
            .collect(),
    }
}

fn translate_instance(
    instance: &GameInstance,
    translator: &dyn Translator,
    stemmer: &dyn Stemmer,
    config: &TranslationConfig,
) -> GameInstance {
    let target_word = translate_word(&instance.target_word, translator, config);
    let related_word: Vec<String> = instance
        .related_word
        .iter()
        .map(|w| translate_word(w, translator, config))
        .collect();

    GameInstance {
        id: instance.id,
        target_word_stem: stemmer.stem(&target_word),
        related_word_stem: related_word.iter().map(|w| stemmer.stem(w)).collect(),
        target_word,
        related_word,
        lang: config.target.clone(),
    }
}

fn translate_word(word: &str, translator: &dyn Translator, config: &TranslationConfig) -> String {
    match translator.translate(word, &config.source, &config.target) {
        Ok(translated) => translated.trim().to_string(),
        Err(e) => {
            tracing::warn!("Error translating '{}': {}", word, e);
            word.to_string()
        }
    }
}

/// Default output path: `_<source>_` becomes `_<target>_` and `_translated` is appended
pub fn translated_filename(input: &Path, source: &str, target: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "instances".to_string());
    let renamed = stem.replacen(&format!("_{}_", source), &format!("_{}_", target), 1);
    input.with_file_name(format!("{}_translated.json", renamed))
}
