//! Generation entry point - resolves language resources and the strategy
//!
//! Level 1 - Orchestration
//!
//! Startup failures (unknown mode, unsupported language, missing manual table
//! or credential) are raised here, before the first word is sampled.

use std::path::{Path, PathBuf};

use taboo_core::instance::instance_filename;
use taboo_core::{
    LanguageConfig, PosTagger, ResourceLocator, SnowballStemmer, TabooError, ValidityFilter,
};
use taboo_retrieval::{
    ConceptNetClient, OpenAiClient, RelatedWordStrategy, RetrievalError, RetrievalMode,
};

use crate::assembler::{Generation, InstanceAssembler, Prompts};
use crate::config::GeneratorConfig;

/// Run a full generation for `mode` and `language`.
///
/// This function reads like a table of contents:
/// 1. Resolve the retrieval mode
/// 2. Build the assembler from language-scoped resources
/// 3. Check every configured tier has a word list
/// 4. Copy the word lists into pools and assemble every tier
pub fn generate(
    locator: &ResourceLocator,
    config: &GeneratorConfig,
    mode: &str,
    language: &str,
    api_key: Option<String>,
) -> Result<Generation, TabooError> {
    let assembler = build_assembler(locator, config, mode, language, api_key)?;
    let word_lists = locator.word_lists(language)?;
    word_lists.require_tiers(language, config.tiers.as_slice())?;

    tracing::info!(
        "Generating {} instances per tier for '{}' with {} strategy",
        config.n_instances,
        language,
        assembler.strategy().mode()
    );

    Ok(assembler.assemble(&word_lists))
}

/// Resolve every language-scoped collaborator for a run
pub fn build_assembler(
    locator: &ResourceLocator,
    config: &GeneratorConfig,
    mode: &str,
    language: &str,
    api_key: Option<String>,
) -> Result<InstanceAssembler, TabooError> {
    let mode: RetrievalMode = mode.parse()?;

    let lang_config = locator.language_config(language)?;
    let stemmer = SnowballStemmer::for_language(language, &lang_config.full_language)?;
    let (describer, guesser) = locator.prompts(language)?;
    let strategy = build_strategy(locator, &lang_config, mode, language, api_key)?;

    Ok(InstanceAssembler::new(
        config.clone(),
        language,
        strategy,
        Box::new(stemmer),
        Prompts::new(describer, guesser),
    ))
}

/// Construct the strategy for a mode, with its live service client
pub fn build_strategy(
    locator: &ResourceLocator,
    lang_config: &LanguageConfig,
    mode: RetrievalMode,
    language: &str,
    api_key: Option<String>,
) -> Result<RelatedWordStrategy, TabooError> {
    match mode {
        RetrievalMode::Manual => {
            let table = locator
                .manual_table(language)?
                .ok_or_else(|| TabooError::missing_support(language, "manual related-word table"))?;
            tracing::info!("Loaded manual table with {} entries", table.len());
            Ok(RelatedWordStrategy::Manual(table))
        }
        RetrievalMode::LexicalGraph => {
            let tagger = locator
                .tagger(lang_config)
                .map(|t| Box::new(t) as Box<dyn PosTagger>);
            let filter = ValidityFilter::new(&lang_config.function_words, tagger);
            let graph = ConceptNetClient::new().map_err(service_error)?;

            Ok(RelatedWordStrategy::LexicalGraph {
                language: language.to_string(),
                graph: Box::new(graph),
                filter,
            })
        }
        RetrievalMode::Generative => {
            let key = api_key
                .filter(|k| !k.trim().is_empty())
                .or_else(|| locator.api_key())
                .ok_or_else(|| {
                    TabooError::MissingCredential(
                        "OpenAI API key (use --api-key, OPENAI_API_KEY or key.json)".to_string(),
                    )
                })?;
            let client = OpenAiClient::new(&key).map_err(service_error)?;
            Ok(RelatedWordStrategy::Generative(Box::new(client)))
        }
    }
}

/// `<dir>/instances_<version>_<lang>_<mode>.json`
pub fn output_path(
    dir: &Path,
    config: &GeneratorConfig,
    language: &str,
    mode: RetrievalMode,
) -> PathBuf {
    dir.join(instance_filename(&config.version, language, mode.file_tag()))
}

fn service_error(e: RetrievalError) -> TabooError {
    match e {
        RetrievalError::MissingCredential(what) => TabooError::MissingCredential(what),
        other => TabooError::Service(other.to_string()),
    }
}
