//! Error taxonomy for the generation pipeline

use std::path::PathBuf;

/// Errors raised by the core pipeline.
///
/// Only `MissingLanguageSupport`, `UnsupportedMode` and `MissingCredential`
/// terminate a run. `PoolExhausted` ends sampling for a single tier.
#[derive(Debug, thiserror::Error)]
pub enum TabooError {
    #[error("word pool for tier '{tier}' is exhausted")]
    PoolExhausted { tier: String },

    #[error("language '{language}' is missing required support: {what}")]
    MissingLanguageSupport { language: String, what: String },

    #[error("unsupported retrieval mode: {0} (expected manual, lexical-graph or generative)")]
    UnsupportedMode(String),

    #[error("missing credential: {0}")]
    MissingCredential(String),

    #[error("failed to load resource {path}: {message}")]
    Resource { path: PathBuf, message: String },

    #[error("failed to initialize service client: {0}")]
    Service(String),
}

impl TabooError {
    pub fn missing_support(language: &str, what: impl Into<String>) -> Self {
        TabooError::MissingLanguageSupport {
            language: language.to_string(),
            what: what.into(),
        }
    }

    /// Whether the error must abort the whole generation run
    pub fn is_fatal(&self) -> bool {
        !matches!(self, TabooError::PoolExhausted { .. })
    }
}
