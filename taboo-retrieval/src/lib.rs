//! Taboo Retrieval - Related-word strategies and the services behind them
//!
//! This crate provides:
//! - `RelatedWordStrategy`: Manual, LexicalGraph and Generative retrieval
//! - Service traits (`LexicalGraph`, `TextCompletion`, `Translator`)
//! - Blocking HTTP clients for ConceptNet, OpenAI chat completions and LibreTranslate
//!
//! Strategies never fail: service errors are logged and surface as an empty
//! candidate list, which the assembler treats as ordinary under-supply.

mod conceptnet;
mod error;
mod openai;
mod strategy;
mod translate;

pub use conceptnet::{ConceptNetClient, Edge, LexicalGraph};
pub use error::RetrievalError;
pub use openai::{parse_completion, related_words_prompt, OpenAiClient, TextCompletion};
pub use strategy::{RelatedWordStrategy, RetrievalMode, RetrievalOptions};
pub use translate::{LibreTranslateClient, Translator};
