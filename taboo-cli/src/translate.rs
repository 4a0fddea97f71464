//! Translate command - port an instance file to another language
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_prompts(), translate, save

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use taboo_core::{InstanceFile, ResourceLocator, SnowballStemmer};
use taboo_generator::{translate_instances, translated_filename, Prompts, TranslationConfig};
use taboo_retrieval::LibreTranslateClient;

#[derive(Args)]
pub struct TranslateArgs {
    /// Instance file to translate
    #[arg(long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output file (default: input name with the target language and a _translated suffix)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Source language
    #[arg(long, default_value = "en")]
    pub source: String,

    /// Target language
    #[arg(long)]
    pub target: String,

    /// Keep source-language prompts instead of the target-language ones
    #[arg(long)]
    pub no_align_prompts: bool,

    /// Resource directory (prompts, language config)
    #[arg(long, default_value = "resources")]
    pub resources: PathBuf,

    /// LibreTranslate server
    #[arg(long, default_value = "https://libretranslate.com")]
    pub translator_url: String,

    /// LibreTranslate API key, if the server requires one
    #[arg(long)]
    pub translator_key: Option<String>,
}

/// Run translate command
pub fn run(args: TranslateArgs) -> Result<()> {
    let locator = ResourceLocator::new(&args.resources);

    let input = InstanceFile::load(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    let target_config = locator.language_config(&args.target)?;
    let stemmer = SnowballStemmer::for_language(&args.target, &target_config.full_language)?;
    let prompts = load_prompts(&locator, &args)?;

    let translator = LibreTranslateClient::new()?
        .with_base_url(&args.translator_url)
        .with_api_key(args.translator_key.clone());

    tracing::info!(
        "Translating {} instances from {} to {}",
        input.instance_count(),
        args.source,
        args.target
    );

    let config = TranslationConfig::new(&args.source, &args.target);
    let translated = translate_instances(&input, &translator, &stemmer, &config, &prompts);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| translated_filename(&args.input, &args.source, &args.target));
    translated
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Translation completed. Translated file saved to {}", output.display());

    Ok(())
}

fn load_prompts(locator: &ResourceLocator, args: &TranslateArgs) -> Result<Prompts> {
    let language = if args.no_align_prompts {
        &args.source
    } else {
        &args.target
    };
    let (describer, guesser) = locator
        .prompts(language)
        .with_context(|| format!("Missing initial prompts for '{}'", language))?;
    Ok(Prompts::new(describer, guesser))
}
