//! Gemini `generateContent` REST client for the coaching report

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::traits::{GenerationParams, ModelError, ReportModel};
use crate::config::Config;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_MS: u64 = 60_000;
const ERROR_BODY_CAP: usize = 2 * 1024;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
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
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Clone)]
pub struct GeminiClient {
    endpoint: String,
    api_key: Option<String>,
    timeout_ms: u64,
    client: Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, endpoint: impl Into<String>, timeout_ms: u64) -> Self {
        let client = match Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(
                    "failed to build HTTP client ({}); using defaults with per-request timeout",
                    e
                );
                Client::default()
            }
        };

        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            timeout_ms,
            client,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.runtime.api_key.clone(),
            config.report.endpoint.clone(),
            config.report.timeout_ms,
        )
    }

    /// Client that reads only the process environment.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok();
        let endpoint =
            std::env::var("GEMINI_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let timeout_ms = std::env::var("GEMINI_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        Self::new(api_key, endpoint, timeout_ms)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn url_for(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, model)
    }
}

/// JSON body for a single-turn `generateContent` call.
pub fn request_body(prompt: &str, params: &GenerationParams) -> Value {
    let request = GenerateRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: vec![RequestPart { text: prompt }],
        }],
        generation_config: GenerationConfig {
            max_output_tokens: params.max_output_tokens,
            temperature: params.temperature,
            thinking_config: params.thinking_budget.map(|thinking_budget| ThinkingConfig {
                thinking_budget,
            }),
        },
    };
    serde_json::to_value(&request).unwrap_or(Value::Null)
}

/// Concatenate the non-thought text parts of the first candidate.
///
/// A response without candidates (e.g. a blocked prompt) yields an empty string.
pub fn extract_text(body: &str) -> Result<String, ModelError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| ModelError::Parse(e.to_string()))?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|p| !p.thought)
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    Ok(text)
}

#[async_trait]
impl ReportModel for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ModelError> {
        let api_key = self.api_key.as_deref().ok_or(ModelError::MissingApiKey)?;
        let body = request_body(prompt, params);

        tracing::debug!(
            model = %params.model,
            max_output_tokens = params.max_output_tokens,
            prompt_chars = prompt.chars().count(),
            "sending generateContent request"
        );

        let res = self
            .client
            .post(self.url_for(&params.model))
            .header("x-goog-api-key", api_key)
            .timeout(Duration::from_millis(self.timeout_ms))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    ModelError::Http(e.to_string())
                }
            })?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| ModelError::Http(e.to_string()))?;

        if !status.is_success() {
            let mut body = text;
            if body.len() > ERROR_BODY_CAP {
                let mut cut = ERROR_BODY_CAP;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        extract_text(&text)
    }
}
