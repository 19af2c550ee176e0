use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::engine::traits::{EngineError, TextEngine};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key =
            std::env::var("GEMINI_API_KEY").map_err(|_| ConfigError::MissingVar("GEMINI_API_KEY"))?;
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }
}

/// Text engine backed by the Gemini `generateContent` REST endpoint.
#[derive(Debug)]
pub struct GeminiEngine {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiEngine {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(GeminiConfig::from_env()?))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    async fn generate(&self, body: Value) -> Result<String, EngineError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EngineError::Transport { msg: e.to_string() })?
            .error_for_status()
            .map_err(|e| EngineError::Transport { msg: e.to_string() })?;

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Malformed { msg: e.to_string() })?;

        Ok(payload.candidate_text())
    }
}

#[async_trait]
impl TextEngine for GeminiEngine {
    #[tracing::instrument(skip(self, prompt, schema))]
    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> Result<Value, EngineError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            },
        });

        let text = self.generate(body).await?;
        if text.trim().is_empty() {
            return Err(EngineError::Malformed {
                msg: "response contained no candidate text".to_string(),
            });
        }

        serde_json::from_str(&text).map_err(|e| EngineError::Malformed {
            msg: format!("candidate text is not valid JSON: {e}"),
        })
    }

    #[tracing::instrument(skip(self, prompt))]
    async fn generate_text(&self, prompt: &str) -> Result<String, EngineError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        self.generate(body).await
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, empty when the response carries none.
    fn candidate_text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}
