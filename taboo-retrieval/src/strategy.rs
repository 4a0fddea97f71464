//! Related-word retrieval strategies

use std::fmt;
use std::str::FromStr;

use taboo_core::{ManualTable, TabooError, ValidityFilter};

use crate::conceptnet::LexicalGraph;
use crate::openai::{parse_completion, related_words_prompt, TextCompletion};

/// Which retrieval strategy a run uses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RetrievalMode {
    /// Curated per-language table
    Manual,
    /// Lexical knowledge graph (ConceptNet)
    LexicalGraph,
    /// Generative text service (OpenAI)
    Generative,
}

impl RetrievalMode {
    /// Tag used in instance file names
    pub fn file_tag(&self) -> &'static str {
        match self {
            RetrievalMode::Manual => "manual",
            RetrievalMode::LexicalGraph => "conceptnet",
            RetrievalMode::Generative => "openai",
        }
    }
}

impl fmt::Display for RetrievalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RetrievalMode::Manual => "manual",
            RetrievalMode::LexicalGraph => "lexical-graph",
            RetrievalMode::Generative => "generative",
        };
        f.write_str(name)
    }
}

impl FromStr for RetrievalMode {
    type Err = TabooError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(RetrievalMode::Manual),
            "lexical-graph" | "conceptnet" => Ok(RetrievalMode::LexicalGraph),
            "generative" | "openai" => Ok(RetrievalMode::Generative),
            _ => Err(TabooError::UnsupportedMode(s.to_string())),
        }
    }
}

/// Per-call retrieval options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetrievalOptions {
    /// Desired number of related words
    pub count: usize,
    /// Only accept nouns (LexicalGraph only)
    pub filter_nouns: bool,
}

impl Default for RetrievalOptions {
    fn default() -> Self {
        Self {
            count: 3,
            filter_nouns: false,
        }
    }
}

impl RetrievalOptions {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    pub fn with_filter_nouns(mut self, filter_nouns: bool) -> Self {
        self.filter_nouns = filter_nouns;
        self
    }
}

/// Produces candidate related words for a target word.
///
/// Only `LexicalGraph` applies the validity filter; manual and generative
/// output is taken as-is.
pub enum RelatedWordStrategy {
    Manual(ManualTable),
    LexicalGraph {
        language: String,
        graph: Box<dyn LexicalGraph>,
        filter: ValidityFilter,
    },
    Generative(Box<dyn TextCompletion>),
}

impl RelatedWordStrategy {
    pub fn mode(&self) -> RetrievalMode {
        match self {
            RelatedWordStrategy::Manual(_) => RetrievalMode::Manual,
            RelatedWordStrategy::LexicalGraph { .. } => RetrievalMode::LexicalGraph,
            RelatedWordStrategy::Generative(_) => RetrievalMode::Generative,
        }
    }

    /// Manual output is accepted even when undersized
    pub fn requires_min_yield(&self) -> bool {
        !matches!(self, RelatedWordStrategy::Manual(_))
    }

    /// Candidate related words for `target`, possibly empty
    pub fn retrieve(&self, target: &str, options: &RetrievalOptions) -> Vec<String> {
        match self {
            RelatedWordStrategy::Manual(table) => manual(table, target, options),
            RelatedWordStrategy::LexicalGraph {
                language,
                graph,
                filter,
            } => from_graph(graph.as_ref(), filter, language, target, options),
            RelatedWordStrategy::Generative(service) => generate(service.as_ref(), target, options),
        }
    }
}

impl fmt::Debug for RelatedWordStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelatedWordStrategy::Manual(table) => {
                f.debug_tuple("Manual").field(&table.len()).finish()
            }
            RelatedWordStrategy::LexicalGraph {
                language, filter, ..
            } => f
                .debug_struct("LexicalGraph")
                .field("language", language)
                .field("filter", filter)
                .finish(),
            RelatedWordStrategy::Generative(_) => f.write_str("Generative"),
        }
    }
}

fn manual(table: &ManualTable, target: &str, options: &RetrievalOptions) -> Vec<String> {
    let words = table.related(target);
    if words.len() < options.count {
        tracing::warn!(
            "{} related words found for word {}! {} words are expected.",
            words.len(),
            target,
            options.count
        );
    }
    words
}

fn from_graph(
    graph: &dyn LexicalGraph,
    filter: &ValidityFilter,
    language: &str,
    target: &str,
    options: &RetrievalOptions,
) -> Vec<String> {
    let edges = match graph.edges(language, target) {
        Ok(edges) => edges,
        Err(e) => {
            tracing::error!("Error fetching related words for '{}': {}", target, e);
            return Vec::new();
        }
    };

    let mut related: Vec<String> = Vec::with_capacity(options.count);
    for edge in edges.iter().filter(|e| e.language == language) {
        if related.len() >= options.count {
            break;
        }
        if related.contains(&edge.label) {
            continue;
        }
        match filter.check(&edge.label, target, options.filter_nouns) {
            Ok(()) => related.push(edge.label.clone()),
            Err(reason) => {
                tracing::trace!("Rejected '{}' for '{}': {:?}", edge.label, target, reason)
            }
        }
    }
    related
}

fn generate(service: &dyn TextCompletion, target: &str, options: &RetrievalOptions) -> Vec<String> {
    let prompt = related_words_prompt(options.count, target);
    match service.complete(&prompt) {
        Ok(text) => parse_completion(&text, options.count),
        Err(e) => {
            tracing::error!("Error generating related words for '{}': {}", target, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conceptnet::Edge;
    use crate::error::RetrievalError;
    use std::cell::RefCell;
    use taboo_core::{LexiconTagger, PosTag};

    struct FakeGraph(Vec<Edge>);

    impl LexicalGraph for FakeGraph {
        fn edges(&self, _language: &str, _word: &str) -> Result<Vec<Edge>, RetrievalError> {
            Ok(self.0.clone())
        }
    }

    struct DownGraph;

    impl LexicalGraph for DownGraph {
        fn edges(&self, _language: &str, _word: &str) -> Result<Vec<Edge>, RetrievalError> {
            Err(RetrievalError::Network("connection refused".to_string()))
        }
    }

    struct FakeCompletion {
        reply: Result<String, ()>,
        prompts: RefCell<Vec<String>>,
    }

    impl TextCompletion for FakeCompletion {
        fn complete(&self, prompt: &str) -> Result<String, RetrievalError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.reply
                .clone()
                .map_err(|_| RetrievalError::Api(401, "invalid key".to_string()))
        }
    }

    fn graph_strategy(edges: Vec<Edge>, tagger: Option<LexiconTagger>) -> RelatedWordStrategy {
        let tagger = tagger.map(|t| Box::new(t) as Box<dyn taboo_core::PosTagger>);
        RelatedWordStrategy::LexicalGraph {
            language: "en".to_string(),
            graph: Box::new(FakeGraph(edges)),
            filter: ValidityFilter::new(["the", "a"], tagger),
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("manual".parse::<RetrievalMode>().unwrap(), RetrievalMode::Manual);
        assert_eq!("conceptnet".parse::<RetrievalMode>().unwrap(), RetrievalMode::LexicalGraph);
        assert_eq!("lexical-graph".parse::<RetrievalMode>().unwrap(), RetrievalMode::LexicalGraph);
        assert_eq!("OpenAI".parse::<RetrievalMode>().unwrap(), RetrievalMode::Generative);
        assert!(matches!(
            "wordnet".parse::<RetrievalMode>(),
            Err(TabooError::UnsupportedMode(m)) if m == "wordnet"
        ));
    }

    #[test]
    fn test_file_tags() {
        assert_eq!(RetrievalMode::Manual.file_tag(), "manual");
        assert_eq!(RetrievalMode::LexicalGraph.file_tag(), "conceptnet");
        assert_eq!(RetrievalMode::Generative.file_tag(), "openai");
    }

    #[test]
    fn test_manual_returns_stored_list_verbatim() {
        let table: ManualTable =
            serde_json::from_str(r#"{"ocean": ["sea", "Ocean", "salt water"]}"#).unwrap();
        let strategy = RelatedWordStrategy::Manual(table);

        let words = strategy.retrieve("ocean", &RetrievalOptions::new(5));
        assert_eq!(words, vec!["sea", "Ocean", "salt water"]);
        assert!(strategy.retrieve("desk", &RetrievalOptions::new(3)).is_empty());
        assert!(!strategy.requires_min_yield());
    }

    #[test]
    fn test_graph_filters_and_stops_at_count() {
        let strategy = graph_strategy(
            vec![
                Edge::new("boat", "en"),
                Edge::new("the boat", "en"),
                Edge::new("ocean", "en"),
            ],
            None,
        );

        let words = strategy.retrieve("ocean", &RetrievalOptions::new(1));
        assert_eq!(words, vec!["boat"]);
        assert!(strategy.requires_min_yield());
    }

    #[test]
    fn test_graph_skips_other_languages_and_duplicates() {
        let strategy = graph_strategy(
            vec![
                Edge::new("Meer", "de"),
                Edge::new("sea", "en"),
                Edge::new("sea", "en"),
                Edge::new("the", "en"),
                Edge::new("wave", "en"),
                Edge::new("tide", "en"),
                Edge::new("salt", "en"),
            ],
            None,
        );

        let words = strategy.retrieve("ocean", &RetrievalOptions::new(3));
        assert_eq!(words, vec!["sea", "wave", "tide"]);
    }

    #[test]
    fn test_graph_noun_filter() {
        let tagger = LexiconTagger::new([("boat", PosTag::Noun), ("swim", PosTag::Verb)]);
        let strategy = graph_strategy(
            vec![Edge::new("swim", "en"), Edge::new("boat", "en")],
            Some(tagger),
        );

        let options = RetrievalOptions::new(3).with_filter_nouns(true);
        assert_eq!(strategy.retrieve("ocean", &options), vec!["boat"]);
    }

    #[test]
    fn test_graph_failure_is_empty() {
        let strategy = RelatedWordStrategy::LexicalGraph {
            language: "en".to_string(),
            graph: Box::new(DownGraph),
            filter: ValidityFilter::new(Vec::<String>::new(), None),
        };
        assert!(strategy.retrieve("ocean", &RetrievalOptions::default()).is_empty());
    }

    #[test]
    fn test_generative_keeps_unfiltered_output() {
        let strategy = RelatedWordStrategy::Generative(Box::new(FakeCompletion {
            reply: Ok("ocean, sea, wave, extra".to_string()),
            prompts: RefCell::new(Vec::new()),
        }));

        let words = strategy.retrieve("ocean", &RetrievalOptions::new(3));
        assert_eq!(words, vec!["ocean", "sea", "wave"]);
    }

    #[test]
    fn test_generative_sends_prompt_and_absorbs_errors() {
        let service = FakeCompletion {
            reply: Err(()),
            prompts: RefCell::new(Vec::new()),
        };
        let words = generate(&service, "ocean", &RetrievalOptions::new(3));

        assert!(words.is_empty());
        assert_eq!(
            *service.prompts.borrow(),
            vec!["Give me 3 words that are related to 'ocean'.".to_string()]
        );
    }
}
