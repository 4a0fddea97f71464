//! Taboo Generator - Builds game-instance fixtures
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: generate (resolve resources, strategy and language, then assemble)
//! - Level 2: InstanceAssembler::assemble (tier iteration)
//! - Level 3: assemble_tier (sample, retrieve, accept, stem, emit)
//! - Level 4: configuration, translation of finished files

mod assembler;
mod config;
mod pipeline;
mod translate;

pub use assembler::{Generation, InstanceAssembler, Prompts, TierStats};
pub use config::GeneratorConfig;
pub use pipeline::{build_assembler, build_strategy, generate, output_path};
pub use translate::{translate_instances, translated_filename, TranslationConfig};
