//! OpenAI chat-completion client and completion parsing

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{check_status, RetrievalError};

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const MAX_TOKENS: u32 = 50;
const TEMPERATURE: f32 = 0.7;

/// Generative text service: one prompt in, one free-text completion out
pub trait TextCompletion {
    fn complete(&self, prompt: &str) -> Result<String, RetrievalError>;
}

/// Instruction sent to the generative service for a target word
pub fn related_words_prompt(n: usize, target: &str) -> String {
    format!("Give me {} words that are related to '{}'.", n, target)
}

/// Split a completion on commas, trim each token and keep the first `n`
/// non-empty ones.
///
/// The output is not filtered any further.
pub fn parse_completion(text: &str, n: usize) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .take(n)
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn content(self) -> Result<String, RetrievalError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| RetrievalError::Parse("completion has no message content".to_string()))
    }
}

/// Blocking OpenAI chat-completions client
pub struct OpenAiClient {
    http_client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: &str) -> Result<Self, RetrievalError> {
        if api_key.trim().is_empty() {
            return Err(RetrievalError::MissingCredential("OpenAI".to_string()));
        }

        let http_client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RetrievalError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: OPENAI_BASE_URL.to_string(),
            api_key: api_key.trim().to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn request<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

impl TextCompletion for OpenAiClient {
    fn complete(&self, prompt: &str) -> Result<String, RetrievalError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        tracing::debug!(model = %self.model, "Requesting completion");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request(prompt))
            .send()?;

        let body: ChatResponse = check_status(response)?
            .json()
            .map_err(|e| RetrievalError::Parse(e.to_string()))?;

        body.content()
    }
}
