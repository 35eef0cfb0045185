//! Google Gemini reasoning-service client.
//!
//! This module provides [`GeminiClient`], which implements the
//! [`ReasoningService`] trait against Google's Gemini API
//! (<https://ai.google.dev/>).
//!
//! Free-text questions go to a fast, cheap model; the structured
//! best-frame selection uses a stronger model with a JSON response schema
//! so the reply can be validated by shape alone.

use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use super::prompts::{build_best_frame_prompt, build_question_prompt};
use super::ReasoningService;
use crate::types::BestFrameSelection;

/// Default Gemini API endpoint.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models/";

/// Default model for free-text chat answers.
const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-flash-lite";

/// Default model for the structured best-frame selection.
const DEFAULT_SELECTION_MODEL: &str = "gemini-2.5-pro";

/// Default timeout for API requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default temperature (low for consistent analytical answers).
const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Default max tokens for responses.
const DEFAULT_MAX_TOKENS: u32 = 2048;

// Gemini API request structures
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    /// Set to "application/json" for structured selection requests.
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

// Gemini API response structures
#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<Part>>,
}

/// JSON schema the structured selection response must satisfy.
/// Both fields are required; a reply missing either is a failed call.
fn best_frame_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "frameNumber": {
                "type": "NUMBER",
                "description": "The single best frame number for the brand's exposure."
            },
            "reasoning": {
                "type": "STRING",
                "description": "A detailed explanation of why this frame was chosen, referencing the specific criteria."
            }
        },
        "required": ["frameNumber", "reasoning"]
    })
}

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Model used for free-text chat answers.
    pub chat_model: String,
    /// Model used for the structured best-frame selection.
    pub selection_model: String,
    /// Temperature for response generation (0.0 - 2.0).
    pub temperature: f32,
    /// Maximum tokens in the response.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Base URL for the API (useful for proxies or custom endpoints).
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            chat_model: DEFAULT_CHAT_MODEL.to_owned(),
            selection_model: DEFAULT_SELECTION_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl GeminiConfig {
    /// Create a new configuration builder.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }
}

/// Builder for [`GeminiConfig`].
#[derive(Default)]
pub struct GeminiConfigBuilder {
    chat_model: Option<String>,
    selection_model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
    base_url: Option<String>,
}

impl GeminiConfigBuilder {
    /// Set the free-text chat model.
    pub fn chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = Some(model.into());
        self
    }

    /// Set the structured selection model.
    pub fn selection_model(mut self, model: impl Into<String>) -> Self {
        self.selection_model = Some(model.into());
        self
    }

    /// Set the temperature (0.0 - 2.0).
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Set a custom base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GeminiConfig {
        GeminiConfig {
            chat_model: self
                .chat_model
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_owned()),
            selection_model: self
                .selection_model
                .unwrap_or_else(|| DEFAULT_SELECTION_MODEL.to_owned()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        }
    }
}

/// Google Gemini reasoning-service client.
///
/// # Example
///
/// ```rust,ignore
/// use exposure_analytics::ai::{GeminiClient, GeminiConfig, ReasoningService};
///
/// // Simple usage with defaults
/// let client = GeminiClient::new("your-api-key")?;
///
/// // With custom configuration
/// let config = GeminiConfig::builder()
///     .chat_model("gemini-2.0-flash")
///     .temperature(0.1)
///     .build();
/// let client = GeminiClient::with_config("your-api-key", config)?;
///
/// let answer = client.answer_question(&csv_text, "Which brand leads by coverage?")?;
/// ```
pub struct GeminiClient {
    api_key: String,
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    /// Create a new Gemini client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, GeminiConfig::default())
    }

    /// Create a new Gemini client with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(api_key: impl Into<String>, config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            api_key: api_key.into(),
            config,
            client,
        })
    }

    fn call_api(&self, model: &str, prompt: &str, response_schema: Option<Value>) -> Result<String> {
        let structured = response_schema.is_some();
        let request = GeminiRequest {
            contents: vec![Content {
                role: "user".to_owned(),
                parts: vec![Part {
                    text: prompt.to_owned(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
                response_mime_type: structured.then(|| "application/json".to_owned()),
                response_schema,
            },
        };

        // Build URL: {base_url}{model}:generateContent?key={api_key}
        let url = format!(
            "{}{}:generateContent?key={}",
            self.config.base_url, model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Gemini API error {}: {}",
                response.status(),
                response.text()?
            ));
        }

        let result: GeminiResponse = response.json()?;

        // Extract text from the first candidate's content parts.
        // Gemini may return empty responses or responses blocked by
        // safety filters; all optional fields are handled gracefully.
        let text = result
            .candidates
            .as_ref()
            .and_then(|candidates| candidates.first())
            .and_then(|c| {
                if let Some(reason) = &c.finish_reason {
                    if reason == "SAFETY" || reason == "BLOCKED" {
                        return None;
                    }
                }
                c.content.as_ref()
            })
            .and_then(|content| content.parts.as_ref())
            .and_then(|parts| parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| anyhow!("No response content from Gemini API"))?;

        Ok(text)
    }
}

/// Parses and validates the structured selection reply.
///
/// Validation is by JSON shape only: `frameNumber` must be a number and
/// `reasoning` a non-empty string. Anything else is `None`.
fn parse_selection(text: &str) -> Option<BestFrameSelection> {
    // Models occasionally wrap JSON in a markdown fence despite the
    // response MIME type; strip it before parsing.
    let trimmed = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let value: Value = serde_json::from_str(trimmed).ok()?;
    let frame_number = value.get("frameNumber")?.as_f64()?;
    let reasoning = value.get("reasoning")?.as_str()?;
    if reasoning.trim().is_empty() {
        return None;
    }

    Some(BestFrameSelection {
        frame_number: frame_number as i64,
        reasoning: reasoning.to_string(),
    })
}

impl ReasoningService for GeminiClient {
    fn answer_question(&self, csv_text: &str, question: &str) -> Result<String> {
        let prompt = build_question_prompt(csv_text, question);
        self.call_api(&self.config.chat_model, &prompt, None)
    }

    fn select_best_frame(&self, csv_text: &str, brand: &str) -> Result<Option<BestFrameSelection>> {
        let prompt = build_best_frame_prompt(csv_text, brand);

        let text = match self.call_api(
            &self.config.selection_model,
            &prompt,
            Some(best_frame_schema()),
        ) {
            Ok(text) => text,
            Err(e) => {
                warn!("best-frame selection call failed: {}", e);
                return Ok(None);
            }
        };

        let selection = parse_selection(&text);
        if selection.is_none() {
            warn!("best-frame selection returned an invalid payload: {}", text);
        }
        Ok(selection)
    }

    fn name(&self) -> &str {
        "Gemini"
    }

    fn model(&self) -> Option<&str> {
        Some(&self.config.chat_model)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // GeminiResponse parsing tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_parse_valid_response_structure() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "Pepsi"}]
                },
                "finishReason": "STOP"
            }]
        }"#;

        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        let candidates = response.candidates.unwrap();
        assert_eq!(candidates.len(), 1);
        let parts = candidates[0]
            .content
            .as_ref()
            .unwrap()
            .parts
            .as_ref()
            .unwrap();
        assert_eq!(parts[0].text, "Pepsi");
    }

    #[test]
    fn test_parse_response_with_empty_candidates() {
        let json = r#"{"candidates": []}"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert!(response.candidates.unwrap().is_empty());
    }

    #[test]
    fn test_parse_response_with_null_candidates() {
        let json = r#"{"candidates": null}"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert!(response.candidates.is_none());
    }

    #[test]
    fn test_parse_response_safety_blocked() {
        let json = r#"{"candidates": [{"content": null, "finishReason": "SAFETY"}]}"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        let candidates = response.candidates.unwrap();
        assert_eq!(candidates[0].finish_reason.as_deref(), Some("SAFETY"));
    }

    // -------------------------------------------------------------------------
    // parse_selection tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_parse_selection_valid() {
        let selection =
            parse_selection(r#"{"frameNumber": 1543, "reasoning": "jersey shot at a wicket"}"#)
                .unwrap();
        assert_eq!(selection.frame_number, 1543);
        assert_eq!(selection.reasoning, "jersey shot at a wicket");
    }

    #[test]
    fn test_parse_selection_float_frame_number() {
        let selection =
            parse_selection(r#"{"frameNumber": 120.0, "reasoning": "high coverage"}"#).unwrap();
        assert_eq!(selection.frame_number, 120);
    }

    #[test]
    fn test_parse_selection_markdown_fence() {
        let text = "```json\n{\"frameNumber\": 7, \"reasoning\": \"celebration\"}\n```";
        let selection = parse_selection(text).unwrap();
        assert_eq!(selection.frame_number, 7);
    }

    #[test]
    fn test_parse_selection_missing_reasoning_fails() {
        assert!(parse_selection(r#"{"frameNumber": 7}"#).is_none());
    }

    #[test]
    fn test_parse_selection_empty_reasoning_fails() {
        assert!(parse_selection(r#"{"frameNumber": 7, "reasoning": "  "}"#).is_none());
    }

    #[test]
    fn test_parse_selection_missing_frame_number_fails() {
        assert!(parse_selection(r#"{"reasoning": "good frame"}"#).is_none());
    }

    #[test]
    fn test_parse_selection_non_numeric_frame_fails() {
        assert!(parse_selection(r#"{"frameNumber": "seven", "reasoning": "x"}"#).is_none());
    }

    #[test]
    fn test_parse_selection_garbage_fails() {
        assert!(parse_selection("the best frame is 12").is_none());
    }

    // -------------------------------------------------------------------------
    // Schema tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_best_frame_schema_requires_both_fields() {
        let schema = best_frame_schema();
        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "frameNumber"));
        assert!(required.iter().any(|v| v == "reasoning"));
    }

    // -------------------------------------------------------------------------
    // Config builder tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_config_builder_defaults() {
        let config = GeminiConfig::builder().build();

        assert_eq!(config.chat_model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.selection_model, DEFAULT_SELECTION_MODEL);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_config_builder_custom_values() {
        let config = GeminiConfig::builder()
            .chat_model("gemini-2.0-flash")
            .selection_model("gemini-2.0-pro")
            .temperature(0.5)
            .max_tokens(4096)
            .timeout_secs(90)
            .base_url("https://custom.api.com/")
            .build();

        assert_eq!(config.chat_model, "gemini-2.0-flash");
        assert_eq!(config.selection_model, "gemini-2.0-pro");
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.timeout_secs, 90);
        assert_eq!(config.base_url, "https://custom.api.com/");
    }

    // -------------------------------------------------------------------------
    // Trait implementation tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_client_name_and_model() {
        let client = GeminiClient::new("test-key").unwrap();
        assert_eq!(client.name(), "Gemini");
        assert_eq!(client.model(), Some(DEFAULT_CHAT_MODEL));
    }
}
