//! ConceptNet lexical knowledge-graph client

use serde::Deserialize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::error::{check_status, RetrievalError};

const CONCEPTNET_BASE_URL: &str = "http://api.conceptnet.io";
const USER_AGENT: &str = "taboo-fixtures/0.2";
const RATE_LIMIT_MS: u64 = 1000;

/// One edge of a concept's neighbourhood
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Endpoint label, e.g. "boat"
    pub label: String,
    /// Endpoint language tag, e.g. "en"
    pub language: String,
}

impl Edge {
    pub fn new(label: &str, language: &str) -> Self {
        Self {
            label: label.to_string(),
            language: language.to_string(),
        }
    }
}

/// Source of labeled edges for a word in a language
pub trait LexicalGraph {
    /// Edges in the order the service returns them
    fn edges(&self, language: &str, word: &str) -> Result<Vec<Edge>, RetrievalError>;
}

#[derive(Debug, Deserialize)]
struct ConceptNetResponse {
    #[serde(default)]
    edges: Vec<ConceptNetEdge>,
}

#[derive(Debug, Deserialize)]
struct ConceptNetEdge {
    #[serde(default)]
    end: Option<ConceptNetNode>,
}

#[derive(Debug, Deserialize)]
struct ConceptNetNode {
    #[serde(default)]
    label: String,
    #[serde(default)]
    language: Option<String>,
}

impl ConceptNetResponse {
    /// Keep edges whose endpoint carries a language tag
    fn into_edges(self) -> Vec<Edge> {
        self.edges
            .into_iter()
            .filter_map(|e| e.end)
            .filter_map(|node| {
                node.language.map(|language| Edge {
                    label: node.label,
                    language,
                })
            })
            .collect()
    }
}

/// Enforces a minimum interval between requests
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    fn wait(&self) {
        let mut last = match self.last_request.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Rate limiting: waiting {:?}", wait_time);
                std::thread::sleep(wait_time);
            }
        }

        *last = Some(Instant::now());
    }
}

/// Blocking ConceptNet API client
pub struct ConceptNetClient {
    http_client: reqwest::blocking::Client,
    base_url: String,
    rate_limiter: RateLimiter,
}

impl ConceptNetClient {
    pub fn new() -> Result<Self, RetrievalError> {
        let http_client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RetrievalError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: CONCEPTNET_BASE_URL.to_string(),
            rate_limiter: RateLimiter::new(Duration::from_millis(RATE_LIMIT_MS)),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn concept_url(&self, language: &str, word: &str) -> String {
        format!("{}/c/{}/{}/", self.base_url, language, concept_term(word))
    }
}

/// ConceptNet term form: lowercase, words joined by underscores
fn concept_term(word: &str) -> String {
    word.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

impl LexicalGraph for ConceptNetClient {
    fn edges(&self, language: &str, word: &str) -> Result<Vec<Edge>, RetrievalError> {
        self.rate_limiter.wait();

        let url = self.concept_url(language, word);
        tracing::debug!(word = %word, url = %url, "Querying ConceptNet");

        let response = self.http_client.get(&url).send()?;
        let body: ConceptNetResponse = check_status(response)?
            .json()
            .map_err(|e| RetrievalError::Parse(e.to_string()))?;

        Ok(body.into_edges())
    }
}
