//! Generate command - build an instance file
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), generate(), save_results()
//! - Level 3: resolve_api_key(), print_summary()

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use taboo_core::ResourceLocator;
use taboo_generator::{output_path, Generation, GeneratorConfig};
use taboo_retrieval::RetrievalMode;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct GenerateArgs {
    /// Retrieval mode: manual, lexical-graph (conceptnet) or generative (openai)
    #[arg(short, long, default_value = "conceptnet")]
    pub mode: String,

    /// Language of the game instances
    #[arg(short, long, default_value = "en")]
    pub language: String,

    /// Instances per experiment (frequency tier)
    #[arg(long, default_value = "20")]
    pub instances: usize,

    /// Related words required per instance
    #[arg(long, default_value = "3")]
    pub related: usize,

    /// Guesser turns per game
    #[arg(long, default_value = "3")]
    pub max_turns: u32,

    /// Random seed
    #[arg(long, default_value = "87326423")]
    pub seed: u64,

    /// Frequency tiers, sampled in this order
    #[arg(long, value_delimiter = ',', default_value = "high,medium,low")]
    pub tiers: Vec<String>,

    /// Only accept nouns as related words (lexical-graph mode)
    #[arg(long)]
    pub nouns_only: bool,

    /// Version tag for the output file name
    #[arg(long, default_value = "v2.0")]
    pub version: String,

    /// Resource directory (word lists, prompts, language config)
    #[arg(long, default_value = "resources")]
    pub resources: PathBuf,

    /// Output directory for the instance file
    #[arg(long, default_value = "in")]
    pub output_dir: PathBuf,

    /// API key for the generative service (falls back to OPENAI_API_KEY, then key.json)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Print the instance file to stdout as well
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run generate command
///
/// 1. Build the generator configuration
/// 2. Generate all experiments
/// 3. Save the instance file
pub fn run(args: GenerateArgs) -> Result<()> {
    let config = build_config(&args);
    let locator = ResourceLocator::new(&args.resources);

    tracing::info!(
        "Starting generation: mode={}, language={}, instances={}, seed={}",
        args.mode,
        args.language,
        config.n_instances,
        config.seed
    );

    let generation = taboo_generator::generate(
        &locator,
        &config,
        &args.mode,
        &args.language,
        resolve_api_key(&args),
    )?;

    let path = save_results(&generation, &config, &args)?;

    print_summary(&generation, &path);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &GenerateArgs) -> GeneratorConfig {
    GeneratorConfig {
        n_instances: args.instances,
        max_turns: args.max_turns,
        n_related_words: args.related,
        version: args.version.clone(),
        seed: args.seed,
        tiers: args.tiers.clone(),
        filter_nouns: args.nouns_only,
    }
}

fn save_results(generation: &Generation, config: &GeneratorConfig, args: &GenerateArgs) -> Result<PathBuf> {
    // Mode was validated by generate()
    let mode: RetrievalMode = args.mode.parse()?;

    create_output_directory(&args.output_dir)?;
    let path = output_path(&args.output_dir, config, &args.language, mode);

    generation
        .instances
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Saved instances to {}", path.display());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&generation.instances)?);
    }

    Ok(path)
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn resolve_api_key(args: &GenerateArgs) -> Option<String> {
    args.api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .filter(|k| !k.trim().is_empty())
}

fn create_output_directory(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))
}

fn print_summary(generation: &Generation, path: &Path) {
    println!("\n=== Generation Summary ===");
    for stats in &generation.stats {
        println!(
            "{:<8} {:>3} instances  ({} too short, {} under-supplied{})",
            stats.tier,
            stats.emitted,
            stats.too_short,
            stats.under_supplied,
            if stats.exhausted { ", pool exhausted" } else { "" }
        );
    }
    println!("Total:   {} instances", generation.instances.instance_count());
    println!("Written: {}", path.display());
}
