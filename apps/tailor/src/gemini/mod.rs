/// Gemini client — the single point of entry for all generateContent calls.
///
/// No other module talks to the API directly. The tailoring pipeline depends
/// on the `TextGenerator` trait rather than this client, so tests substitute
/// in-process stubs instead of a live endpoint.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Sampling parameters sent with every generateContent request.
/// Serialized camelCase to match the wire format exactly.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

/// Sampling profile for tailoring calls.
pub const TAILOR_CONFIG: GenerationConfig = GenerationConfig {
    temperature: 0.7,
    top_k: 40,
    top_p: 0.95,
    max_output_tokens: 8192,
};

/// Sampling profile for ATS optimization. Lower temperature for
/// consistency; ATS rewrites must stay close to the source text.
pub const ATS_CONFIG: GenerationConfig = GenerationConfig {
    temperature: 0.3,
    top_k: 20,
    top_p: 0.8,
    max_output_tokens: 8192,
};

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Extracts the text of the first candidate's first part.
    /// Every other field of the response is discarded.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

/// The generation seam between the tailoring pipeline and the transport.
///
/// Carried as `Arc<dyn TextGenerator>`. Implementations must return
/// `Err(GeminiError::EmptyContent)` rather than `Ok` with an empty string.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<String, GeminiError>;
}

/// Production `TextGenerator` backed by the Gemini generateContent API.
/// Authenticates with the API key as a query parameter.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    /// Makes exactly one call to the generateContent endpoint. No retry and
    /// no client-side deadline; callers wanting bounded latency wrap the
    /// future in their own timeout.
    async fn generate(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<String, GeminiError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: config,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        let text = parsed.text().unwrap_or_default();
        if text.is_empty() {
            return Err(GeminiError::EmptyContent);
        }

        debug!(chars = text.chars().count(), "generateContent call succeeded");
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case_wire_format() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
            generation_config: TAILOR_CONFIG,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        let config = &json["generationConfig"];
        assert_eq!(config["topK"], 40);
        assert_eq!(config["maxOutputTokens"], 8192);
        assert!((config["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!((config["topP"].as_f64().unwrap() - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_ats_profile_is_less_random_than_tailor_profile() {
        assert!(ATS_CONFIG.temperature < TAILOR_CONFIG.temperature);
        assert!(ATS_CONFIG.top_k < TAILOR_CONFIG.top_k);
        assert!(ATS_CONFIG.top_p < TAILOR_CONFIG.top_p);
        assert_eq!(ATS_CONFIG.max_output_tokens, TAILOR_CONFIG.max_output_tokens);
    }

    #[test]
    fn test_response_text_takes_first_candidate_first_part() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "X"}, {"text": "second part"}]}},
                {"content": {"parts": [{"text": "second candidate"}]}}
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("X"));
    }

    #[test]
    fn test_response_text_none_when_no_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_response_text_none_when_part_has_no_text() {
        let json = r#"{"candidates": [{"content": {"parts": [{}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_response_tolerates_extra_fields() {
        let json = r#"{
            "candidates": [
                {
                    "content": {"parts": [{"text": "X"}], "role": "model"},
                    "finishReason": "STOP",
                    "safetyRatings": []
                }
            ],
            "usageMetadata": {"promptTokenCount": 10}
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("X"));
    }
}
