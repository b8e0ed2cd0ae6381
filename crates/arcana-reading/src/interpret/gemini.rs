//! Gemini-backed interpreter.
//!
//! Sends the question and cards to the `generateContent` endpoint, asking for
//! a JSON body matching [`Interpretation`] via a response schema.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{InterpretError, InterpretResult};

use super::{Interpretation, InterpretationProvider, InterpretationRequest};

const MAX_ERROR_BODY_CHARS: usize = 500;
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Base endpoint URL.
    pub endpoint: String,
    /// Sampling temperature (0.0 - 2.0).
    pub temperature: f32,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-3-pro-preview".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            temperature: 0.9,
            timeout_secs: 30,
        }
    }
}

impl GeminiConfig {
    /// Read configuration from the process environment.
    ///
    /// Returns `None` when no API key is set.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through a key lookup.
    ///
    /// The key comes from `GEMINI_API_KEY`, falling back to `API_KEY`;
    /// `GEMINI_MODEL` and `GEMINI_ENDPOINT` override the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_blank("GEMINI_API_KEY").or_else(|| non_blank("API_KEY"))?;
        let defaults = Self::default();
        Some(Self {
            api_key: api_key.trim().to_string(),
            model: non_blank("GEMINI_MODEL").unwrap_or(defaults.model),
            endpoint: non_blank("GEMINI_ENDPOINT").unwrap_or(defaults.endpoint),
            temperature: defaults.temperature,
            timeout_secs: defaults.timeout_secs,
        })
    }
}

/// Interpreter that asks the Gemini API.
pub struct GeminiInterpreter {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiInterpreter {
    /// Create a new Gemini interpreter. Fails without an API key.
    pub fn new(config: GeminiConfig) -> InterpretResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(InterpretError::NotConfigured(
                "set GEMINI_API_KEY to use the gemini provider".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InterpretError::Http(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model,
        )
    }

    /// Request headers. The key goes in `x-goog-api-key`, never in the URL.
    fn build_headers(&self) -> InterpretResult<HeaderMap> {
        let mut key = HeaderValue::from_str(self.config.api_key.trim()).map_err(|_| {
            InterpretError::NotConfigured("the API key contains invalid characters".to_string())
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, key);
        Ok(headers)
    }

    fn build_body(&self, request: &InterpretationRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: build_prompt(request),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: self.config.temperature,
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        }
    }
}

/// The prompt sent to the model.
pub fn build_prompt(request: &InterpretationRequest) -> String {
    let card_lines: Vec<String> = request
        .cards
        .iter()
        .map(|c| format!("{}: {} ({})", c.position, c.name, c.orientation))
        .collect();

    format!(
        "As a wise and intuitive tarot reader, offer a mysterious yet insightful reading \
         for the following question.\n\
         The querent's question: \"{}\"\n\n\
         Cards drawn ({} spread):\n{}\n\n\
         Respond with:\n\
         1. summary: a poetic overview of the whole reading.\n\
         2. cardInterpretations: for each card, its meaning in its specific position.\n\
         3. guidance: closing spiritual or practical advice for the querent.\n\n\
         The tone should be compassionate, mystical, and inspiring.",
        request.question,
        request.spread,
        card_lines.join("\n"),
    )
}

/// JSON schema the model's answer must satisfy.
fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "cardInterpretations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "cardName": { "type": "STRING" },
                        "interpretation": { "type": "STRING" }
                    },
                    "required": ["cardName", "interpretation"]
                }
            },
            "guidance": { "type": "STRING" }
        },
        "required": ["summary", "cardInterpretations", "guidance"]
    })
}

/// Parse the model's JSON text into an interpretation.
pub fn parse_interpretation(text: &str) -> InterpretResult<Interpretation> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InterpretError::EmptyResponse);
    }
    let parsed: Interpretation =
        serde_json::from_str(trimmed).map_err(|e| InterpretError::Malformed(e.to_string()))?;
    parsed.validate()
}

// Gemini API request/response structures

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

fn transport_error(e: reqwest::Error) -> InterpretError {
    InterpretError::Http(e.without_url().to_string())
}

/// Pull the first candidate's text out of a raw API response body.
fn extract_text(body: &str) -> InterpretResult<String> {
    let parsed: GeminiResponse =
        serde_json::from_str(body).map_err(|e| InterpretError::Malformed(e.to_string()))?;

    if let Some(error) = parsed.error {
        return Err(InterpretError::Malformed(format!(
            "Gemini API error: {}",
            error.message
        )));
    }

    let text: String = parsed
        .candidates
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(InterpretError::EmptyResponse);
    }
    Ok(text)
}

#[async_trait]
impl InterpretationProvider for GeminiInterpreter {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn interpret(&self, request: &InterpretationRequest) -> InterpretResult<Interpretation> {
        let headers = self.build_headers()?;

        debug!(model = %self.config.model, cards = request.cards.len(), "requesting interpretation");

        let response = self
            .client
            .post(self.build_url())
            .headers(headers)
            .json(&self.build_body(request))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(transport_error)?;

        if !status.is_success() {
            return Err(InterpretError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        parse_interpretation(&extract_text(&body)?)
    }
}
