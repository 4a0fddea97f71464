//! Language support - configuration, stemming and part-of-speech tagging

use rust_stemmers::Algorithm;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::TabooError;

/// Per-language entry of `langconfig.json`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Full language name, e.g. "english"; selects the stemmer
    pub full_language: String,
    /// Name of the POS lexicon under `pos/`, if the language ships one
    #[serde(default)]
    pub tagger_model: Option<String>,
    /// Closed set of grammatical words never accepted as related words
    #[serde(default)]
    pub function_words: Vec<String>,
}

/// Reduces a word to its morphological stem
pub trait Stemmer {
    fn stem(&self, word: &str) -> String;
}

/// Snowball stemmer for one language
pub struct SnowballStemmer {
    language: String,
    inner: rust_stemmers::Stemmer,
}

impl SnowballStemmer {
    /// Create a stemmer for a full language name.
    ///
    /// Fails with `MissingLanguageSupport` when no Snowball algorithm exists
    /// for the language.
    pub fn for_language(language: &str, full_language: &str) -> Result<Self, TabooError> {
        let algorithm = snowball_algorithm(full_language).ok_or_else(|| {
            TabooError::missing_support(language, format!("stemmer for '{}'", full_language))
        })?;

        Ok(Self {
            language: language.to_string(),
            inner: rust_stemmers::Stemmer::create(algorithm),
        })
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        self.inner.stem(&word.to_lowercase()).into_owned()
    }
}

impl std::fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("language", &self.language)
            .finish()
    }
}

fn snowball_algorithm(full_language: &str) -> Option<Algorithm> {
    let algorithm = match full_language.to_lowercase().as_str() {
        "danish" => Algorithm::Danish,
        "dutch" => Algorithm::Dutch,
        "english" => Algorithm::English,
        "french" => Algorithm::French,
        "german" => Algorithm::German,
        "hungarian" => Algorithm::Hungarian,
        "italian" => Algorithm::Italian,
        "norwegian" => Algorithm::Norwegian,
        "portuguese" => Algorithm::Portuguese,
        "romanian" => Algorithm::Romanian,
        "russian" => Algorithm::Russian,
        "spanish" => Algorithm::Spanish,
        "swedish" => Algorithm::Swedish,
        "turkish" => Algorithm::Turkish,
        _ => return None,
    };
    Some(algorithm)
}

/// Coarse grammatical category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Noun,
    Verb,
    #[serde(rename = "ADJ")]
    Adjective,
    #[serde(rename = "ADV")]
    Adverb,
    #[serde(other)]
    Other,
}

/// Classifies a single word for one language
pub trait PosTagger {
    fn tag(&self, word: &str) -> PosTag;

    fn is_noun(&self, word: &str) -> bool {
        self.tag(word) == PosTag::Noun
    }
}

/// Dictionary-backed tagger; unknown words are `Other`
#[derive(Clone, Debug, Default)]
pub struct LexiconTagger {
    entries: FxHashMap<String, PosTag>,
}

impl LexiconTagger {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, PosTag)>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(w, tag)| (w.as_ref().to_lowercase(), tag))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, word: &str) -> PosTag {
        self.entries
            .get(&word.trim().to_lowercase())
            .copied()
            .unwrap_or(PosTag::Other)
    }
}
