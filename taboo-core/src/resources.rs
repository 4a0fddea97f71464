//! Resource loading - language configs, word lists, prompts, manual tables
//!
//! Layout under the resource root:
//!
//! ```text
//! langconfig.json
//! key.json
//! target_words/<lang>/taboo_word_lists.json
//! target_words/<lang>/related_words.json
//! initial_prompts/<lang>/initial_describer.template
//! initial_prompts/<lang>/initial_guesser.template
//! pos/<tagger_model>.json
//! ```

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::TabooError;
use crate::language::{LanguageConfig, LexiconTagger, PosTag};
use crate::pool::WordPool;

/// Candidate target words per frequency tier, as shipped
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordLists {
    tiers: FxHashMap<String, Vec<String>>,
}

impl WordLists {
    pub fn new(tiers: FxHashMap<String, Vec<String>>) -> Self {
        Self { tiers }
    }

    pub fn tier(&self, tier: &str) -> Option<&[String]> {
        self.tiers.get(tier).map(Vec::as_slice)
    }

    /// Copy one tier into a fresh pool; unknown tiers yield an empty pool
    pub fn pool(&self, tier: &str) -> WordPool {
        WordPool::new(tier, self.tier(tier).unwrap_or(&[]))
    }

    /// Fail unless every requested tier has a word list
    pub fn require_tiers<S: AsRef<str>>(
        &self,
        language: &str,
        tiers: &[S],
    ) -> Result<(), TabooError> {
        match tiers.iter().map(AsRef::as_ref).find(|t| !self.tiers.contains_key(*t)) {
            Some(tier) => Err(TabooError::missing_support(
                language,
                format!("word list for tier '{}'", tier),
            )),
            None => Ok(()),
        }
    }
}

/// Curated word -> related words table
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManualTable {
    entries: FxHashMap<String, Vec<String>>,
}

impl ManualTable {
    pub fn new(entries: FxHashMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    /// Stored related words, or an empty list for unknown words
    pub fn related(&self, word: &str) -> Vec<String> {
        self.entries.get(word).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Deserialize)]
struct KeyFile {
    #[serde(default)]
    openai_api_key: String,
}

/// Locates and loads resources below a root directory
#[derive(Clone, Debug)]
pub struct ResourceLocator {
    root: PathBuf,
}

impl ResourceLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Read and parse a JSON resource
    pub fn load_json<T: DeserializeOwned>(&self, relative: &str) -> Result<T, TabooError> {
        let path = self.path(relative);
        let content = std::fs::read_to_string(&path).map_err(|e| TabooError::Resource {
            path: path.clone(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| TabooError::Resource {
            path,
            message: e.to_string(),
        })
    }

    /// Read a `.template` text resource
    pub fn load_template(&self, relative: &str) -> Result<String, TabooError> {
        let path = self.path(&format!("{}.template", relative));
        std::fs::read_to_string(&path).map_err(|e| TabooError::Resource {
            path,
            message: e.to_string(),
        })
    }

    /// Configuration entry for a language
    pub fn language_config(&self, language: &str) -> Result<LanguageConfig, TabooError> {
        let mut configs: FxHashMap<String, LanguageConfig> = self.load_json("langconfig.json")?;
        configs
            .remove(language)
            .ok_or_else(|| TabooError::missing_support(language, "entry in langconfig.json"))
    }

    /// Target word lists for a language
    pub fn word_lists(&self, language: &str) -> Result<WordLists, TabooError> {
        let relative = format!("target_words/{}/taboo_word_lists.json", language);
        if !self.path(&relative).exists() {
            return Err(TabooError::missing_support(language, "target word lists"));
        }
        self.load_json(&relative)
    }

    /// Curated related-word table, if the language ships one
    pub fn manual_table(&self, language: &str) -> Result<Option<ManualTable>, TabooError> {
        let relative = format!("target_words/{}/related_words.json", language);
        if !self.path(&relative).exists() {
            tracing::debug!("No manual related words found for language {}", language);
            return Ok(None);
        }
        self.load_json(&relative).map(Some)
    }

    /// Describer and guesser initial prompts for a language
    pub fn prompts(&self, language: &str) -> Result<(String, String), TabooError> {
        let describer = self.load_template(&format!("initial_prompts/{}/initial_describer", language))?;
        let guesser = self.load_template(&format!("initial_prompts/{}/initial_guesser", language))?;
        Ok((describer, guesser))
    }

    /// Dictionary tagger named by the language config.
    ///
    /// A missing lexicon is not an error: the noun rule then rejects everything.
    pub fn tagger(&self, config: &LanguageConfig) -> Option<LexiconTagger> {
        let model = config.tagger_model.as_ref()?;
        let relative = format!("pos/{}.json", model);

        match self.load_json::<FxHashMap<String, PosTag>>(&relative) {
            Ok(entries) => {
                tracing::debug!("Loaded POS lexicon '{}' ({} entries)", model, entries.len());
                Some(LexiconTagger::new(entries))
            }
            Err(e) => {
                tracing::warn!("POS tagger '{}' unavailable: {}", model, e);
                None
            }
        }
    }

    /// Generative service key from `key.json`, if set
    pub fn api_key(&self) -> Option<String> {
        if !self.path("key.json").exists() {
            return None;
        }
        match self.load_json::<KeyFile>("key.json") {
            Ok(keys) if !keys.openai_api_key.is_empty() => Some(keys.openai_api_key),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Ignoring unreadable key file: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::PosTagger;
    use std::fs;
    use std::path::Path;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(
            root,
            "langconfig.json",
            r#"{"en": {"full_language": "english", "tagger_model": "en_lexicon", "function_words": ["the"]},
                "xx": {"full_language": "klingon"}}"#,
        );
        write(
            root,
            "target_words/en/taboo_word_lists.json",
            r#"{"high": ["ocean", "sky", "Ocean"], "low": ["desk"]}"#,
        );
        write(root, "target_words/ru/related_words.json", r#"{"дом": ["здание", "жилище"]}"#);
        write(root, "initial_prompts/en/initial_describer.template", "Describe $TARGET_WORD$");
        write(root, "initial_prompts/en/initial_guesser.template", "Guess the word");
        write(root, "pos/en_lexicon.json", r#"{"boat": "NOUN"}"#);
        write(root, "key.json", r#"{"openai_api_key": "sk-test"}"#);
        dir
    }

    #[test]
    fn test_language_config() {
        let dir = fixture();
        let locator = ResourceLocator::new(dir.path());

        let config = locator.language_config("en").unwrap();
        assert_eq!(config.full_language, "english");
        assert_eq!(config.function_words, vec!["the".to_string()]);

        let err = locator.language_config("de").unwrap_err();
        assert!(matches!(err, TabooError::MissingLanguageSupport { .. }));
    }

    #[test]
    fn test_word_lists_and_pools() {
        let dir = fixture();
        let locator = ResourceLocator::new(dir.path());

        let lists = locator.word_lists("en").unwrap();
        assert_eq!(lists.tier("high").unwrap().len(), 3);
        assert_eq!(lists.pool("high").len(), 2);
        assert!(lists.pool("medium").is_empty());

        assert!(lists.require_tiers("en", &["high", "low"]).is_ok());
        let err = lists.require_tiers("en", &["high", "medium"]).unwrap_err();
        assert!(matches!(err, TabooError::MissingLanguageSupport { .. }));
        assert!(err.to_string().contains("medium"));

        assert!(matches!(
            locator.word_lists("ru"),
            Err(TabooError::MissingLanguageSupport { .. })
        ));
    }

    #[test]
    fn test_manual_table_optional() {
        let dir = fixture();
        let locator = ResourceLocator::new(dir.path());

        assert!(locator.manual_table("en").unwrap().is_none());
        let table = locator.manual_table("ru").unwrap().unwrap();
        assert_eq!(table.related("дом").len(), 2);
        assert!(table.related("кот").is_empty());
    }

    #[test]
    fn test_prompts_and_tagger() {
        let dir = fixture();
        let locator = ResourceLocator::new(dir.path());

        let (describer, guesser) = locator.prompts("en").unwrap();
        assert!(describer.contains("$TARGET_WORD$"));
        assert_eq!(guesser, "Guess the word");
        assert!(locator.prompts("ru").is_err());

        let config = locator.language_config("en").unwrap();
        let tagger = locator.tagger(&config).unwrap();
        assert!(tagger.is_noun("boat"));

        let no_model = locator.language_config("xx").unwrap();
        assert!(locator.tagger(&no_model).is_none());
    }

    #[test]
    fn test_api_key() {
        let dir = fixture();
        assert_eq!(ResourceLocator::new(dir.path()).api_key().as_deref(), Some("sk-test"));

        let empty = tempfile::tempdir().unwrap();
        assert!(ResourceLocator::new(empty.path()).api_key().is_none());
    }
}
