use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sampling and size settings sent with every report request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    /// `None` omits the thinking config entirely.
    pub thinking_budget: Option<u32>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            max_output_tokens: 1200,
            temperature: 0.7,
            thinking_budget: Some(100),
        }
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,
    #[error("http error: {0}")]
    Http(String),
    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

/// Text-generation backend used for the coaching report
#[async_trait]
pub trait ReportModel: Send + Sync {
    async fn generate(&self, prompt: &str, params: &GenerationParams)
    -> Result<String, ModelError>;
}
