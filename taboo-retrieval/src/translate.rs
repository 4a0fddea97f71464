//! LibreTranslate client used to port instance files between languages

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{check_status, RetrievalError};

const LIBRETRANSLATE_BASE_URL: &str = "https://libretranslate.com";

/// Machine translation of short texts
pub trait Translator {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, RetrievalError>;
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Blocking LibreTranslate API client
pub struct LibreTranslateClient {
    http_client: reqwest::blocking::Client,
    base_url: String,
    api_key: Option<String>,
}

impl LibreTranslateClient {
    pub fn new() -> Result<Self, RetrievalError> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RetrievalError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: LIBRETRANSLATE_BASE_URL.to_string(),
            api_key: None,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }
}

impl Translator for LibreTranslateClient {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, RetrievalError> {
        let request = TranslateRequest {
            q: text,
            source,
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .http_client
            .post(format!("{}/translate", self.base_url))
            .json(&request)
            .send()?;

        let body: TranslateResponse = check_status(response)?
            .json()
            .map_err(|e| RetrievalError::Parse(e.to_string()))?;

        Ok(body.translated_text)
    }
}
