//! Taboo Core - Data model and word handling for fixture generation
//!
//! This crate provides the building blocks shared by the generation pipeline:
//! - Game instances and experiments (the persisted fixture format)
//! - Frequency-tier word pools with seeded, without-replacement sampling
//! - Validity filtering of candidate related words
//! - Language support: configuration, stemming, part-of-speech tagging
//! - Resource loading (word lists, prompt templates, manual tables)

pub mod error;
pub mod filter;
pub mod instance;
pub mod language;
pub mod pool;
pub mod resources;

// Re-exports for convenient access
pub use error::TabooError;
pub use filter::ValidityFilter;
pub use instance::{Experiment, GameInstance, InstanceFile};
pub use language::{LanguageConfig, LexiconTagger, PosTag, PosTagger, SnowballStemmer, Stemmer};
pub use pool::{WordPool, WordPoolSampler, MIN_TARGET_LEN};
pub use resources::{ManualTable, ResourceLocator, WordLists};
