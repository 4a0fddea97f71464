//! Validity filter for candidate related words

use rustc_hash::FxHashSet;

use crate::language::PosTagger;

/// Reason a candidate was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Same as the target, ignoring case
    SelfMatch,
    /// Contains whitespace
    MultiWord,
    /// Member of the language's function-word list
    FunctionWord,
    /// Not tagged as a noun (or no tagger available)
    NotNoun,
}

/// Decides whether a candidate related word may be kept
pub struct ValidityFilter {
    function_words: FxHashSet<String>,
    tagger: Option<Box<dyn PosTagger>>,
}

impl ValidityFilter {
    pub fn new<I, S>(function_words: I, tagger: Option<Box<dyn PosTagger>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            function_words: function_words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .collect(),
            tagger,
        }
    }

    pub fn has_tagger(&self) -> bool {
        self.tagger.is_some()
    }

    pub fn is_function_word(&self, word: &str) -> bool {
        self.function_words.contains(&word.trim().to_lowercase())
    }

    /// Check a candidate against every rule, reporting the first failure
    pub fn check(&self, candidate: &str, target: &str, filter_nouns: bool) -> Result<(), Rejection> {
        if candidate.to_lowercase() == target.to_lowercase() {
            return Err(Rejection::SelfMatch);
        }
        if candidate.chars().any(char::is_whitespace) {
            return Err(Rejection::MultiWord);
        }
        if self.is_function_word(candidate) {
            return Err(Rejection::FunctionWord);
        }
        if filter_nouns {
            // Fail closed without a tagger
            let is_noun = self.tagger.as_ref().map_or(false, |t| t.is_noun(candidate));
            if !is_noun {
                return Err(Rejection::NotNoun);
            }
        }
        Ok(())
    }

    pub fn is_valid(&self, candidate: &str, target: &str, filter_nouns: bool) -> bool {
        self.check(candidate, target, filter_nouns).is_ok()
    }
}

impl std::fmt::Debug for ValidityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidityFilter")
            .field("function_words", &self.function_words.len())
            .field("tagger", &self.tagger.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{LexiconTagger, PosTag};

    fn english_filter() -> ValidityFilter {
        let tagger = LexiconTagger::new([("boat", PosTag::Noun), ("swim", PosTag::Verb)]);
        ValidityFilter::new(["the", "and", "of", "it"], Some(Box::new(tagger)))
    }

    #[test]
    fn test_rejects_self_match_case_insensitive() {
        let filter = english_filter();
        assert_eq!(filter.check("Ocean", "ocean", false), Err(Rejection::SelfMatch));
        assert_eq!(filter.check("ocean", "OCEAN", false), Err(Rejection::SelfMatch));
    }

    #[test]
    fn test_rejects_multi_word() {
        let filter = english_filter();
        assert_eq!(filter.check("the boat", "ocean", false), Err(Rejection::MultiWord));
        assert_eq!(filter.check("sea\tfloor", "ocean", false), Err(Rejection::MultiWord));
    }

    #[test]
    fn test_rejects_function_words() {
        let filter = english_filter();
        assert_eq!(filter.check("The", "ocean", false), Err(Rejection::FunctionWord));
        assert!(filter.is_valid("boat", "ocean", false));
    }

    #[test]
    fn test_noun_rule_only_when_requested() {
        let filter = english_filter();
        assert!(filter.is_valid("swim", "ocean", false));
        assert_eq!(filter.check("swim", "ocean", true), Err(Rejection::NotNoun));
        assert!(filter.is_valid("boat", "ocean", true));
    }

    #[test]
    fn test_noun_rule_fails_closed_without_tagger() {
        let filter = ValidityFilter::new(Vec::<String>::new(), None);
        assert!(!filter.has_tagger());
        assert!(filter.is_valid("boat", "ocean", false));
        assert!(!filter.is_valid("boat", "ocean", true));
    }
}
