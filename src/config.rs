use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clients::gemini::DEFAULT_ENDPOINT;
use crate::clients::traits::GenerationParams;

/// Shortest request timeout accepted from config or env
pub const MIN_TIMEOUT_MS: u64 = 1_000;

/// Main configuration structure loaded from leader_power.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportConfig,
    pub export: ExportConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Settings for the coaching report request
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Request the report automatically when results are shown
    pub enabled: bool,
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    /// 0 disables the thinking config
    pub thinking_budget: u32,
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            enabled: true,
            model: params.model,
            max_output_tokens: params.max_output_tokens,
            temperature: params.temperature,
            thinking_budget: params.thinking_budget.unwrap_or(0),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: 60_000,
        }
    }
}

impl ReportConfig {
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            model: self.model.clone(),
            max_output_tokens: self.max_output_tokens,
            temperature: self.temperature,
            thinking_budget: (self.thinking_budget > 0).then_some(self.thinking_budget),
        }
    }

    /// Clamp out-of-range values, warning about each adjustment.
    fn normalize(&mut self) {
        if !(0.0..=2.0).contains(&self.temperature) || self.temperature.is_nan() {
            let clamped = if self.temperature.is_nan() {
                GenerationParams::default().temperature
            } else {
                self.temperature.clamp(0.0, 2.0)
            };
            tracing::warn!(
                "temperature {} out of range 0.0..=2.0, using {}",
                self.temperature,
                clamped
            );
            self.temperature = clamped;
        }
        if !(1..=8192).contains(&self.max_output_tokens) {
            let clamped = self.max_output_tokens.clamp(1, 8192);
            tracing::warn!(
                "max_output_tokens {} out of range 1..=8192, using {}",
                self.max_output_tokens,
                clamped
            );
            self.max_output_tokens = clamped;
        }
        if self.timeout_ms < MIN_TIMEOUT_MS {
            tracing::warn!(
                "timeout_ms {} below {}, using {}",
                self.timeout_ms,
                MIN_TIMEOUT_MS,
                MIN_TIMEOUT_MS
            );
            self.timeout_ms = MIN_TIMEOUT_MS;
        }
        if self.model.trim().is_empty() {
            tracing::warn!("empty report model, using default");
            self.model = GenerationParams::default().model;
        }
    }
}

/// Where exported result documents are written
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Clone)]
pub struct RuntimeConfig {
    pub api_key: Option<String>,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl std::fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("log_level", &self.log_level)
            .field("log_file", &self.log_file)
            .finish()
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            log_level: "leader_power=info".to_string(),
            log_file: None,
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY")
                .or_else(|_| std::env::var("API_KEY"))
                .ok()
                .filter(|k| !k.trim().is_empty()),
            log_level: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "leader_power=info".to_string()),
            log_file: std::env::var("LEADER_POWER_LOG_FILE").ok().map(PathBuf::from),
        }
    }
}

/// Load `.env` files with fallbacks:
/// 1) LEADER_POWER_ENV_FILE if set
/// 2) ./.env
/// 3) ../.env when no API key was found yet
///
/// Variables already present in the process environment are never overridden.
pub fn load_env_files() {
    if let Ok(env_path) = std::env::var("LEADER_POWER_ENV_FILE") {
        let _ = dotenvy::from_path(env_path);
    } else {
        let _ = dotenvy::from_path(".env");
        let key_present =
            std::env::var("GEMINI_API_KEY").is_ok() || std::env::var("API_KEY").is_ok();
        if !key_present {
            let _ = dotenvy::from_path("../.env");
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables.
    /// `path` wins over LEADER_POWER_CONFIG, which wins over "leader_power.toml".
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        load_env_files();

        let config_path = path.map(Path::to_path_buf).unwrap_or_else(|| {
            PathBuf::from(
                std::env::var("LEADER_POWER_CONFIG")
                    .unwrap_or_else(|_| "leader_power.toml".to_string()),
            )
        });

        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(content) => toml::from_str(&content)?,
            Err(_) => {
                tracing::warn!(
                    "Config file {} not found, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        };

        config.apply_env_overrides();
        config.runtime = RuntimeConfig::load_from_env();
        config.report.normalize();

        if config.runtime.api_key.is_none() && config.report.enabled {
            tracing::warn!("GEMINI_API_KEY not set; reports will fall back to the static message");
        }

        Ok(config)
    }

    /// Parse a TOML document without touching files or the environment.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.report.normalize();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            self.report.model = model;
        }
        if let Some(v) = std::env::var("GEMINI_MAX_OUTPUT_TOKENS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            self.report.max_output_tokens = v;
        }
        if let Some(v) = std::env::var("GEMINI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse::<f32>().ok())
        {
            self.report.temperature = v;
        }
        if let Some(v) = std::env::var("GEMINI_THINKING_BUDGET")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            self.report.thinking_budget = v;
        }
        if let Ok(endpoint) = std::env::var("GEMINI_ENDPOINT") {
            self.report.endpoint = endpoint;
        }
        if let Some(v) = std::env::var("GEMINI_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.report.timeout_ms = v;
        }
        if let Ok(dir) = std::env::var("LEADER_POWER_EXPORT_DIR") {
            self.export.dir = PathBuf::from(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_request() {
        let params = Config::default().report.generation_params();
        assert_eq!(params, GenerationParams::default());
        assert_eq!(params.thinking_budget, Some(100));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [report]
            model = "gemini-2.5-flash"
            thinking_budget = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.report.model, "gemini-2.5-flash");
        assert_eq!(config.report.max_output_tokens, 1200);
        assert_eq!(config.report.generation_params().thinking_budget, None);
        assert_eq!(config.export.dir, PathBuf::from("."));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let config = Config::from_toml_str(
            r#"
            [report]
            temperature = 5.0
            max_output_tokens = 0
            model = "  "
            "#,
        )
        .unwrap();
        assert_eq!(config.report.temperature, 2.0);
        assert_eq!(config.report.max_output_tokens, 1);
        assert_eq!(config.report.model, GenerationParams::default().model);
    }

    #[test]
    fn test_zero_timeout_is_raised_to_minimum() {
        let config = Config::from_toml_str("[report]\ntimeout_ms = 0\n").unwrap();
        assert_eq!(config.report.timeout_ms, MIN_TIMEOUT_MS);
        let config = Config::from_toml_str("[report]\ntimeout_ms = 45000\n").unwrap();
        assert_eq!(config.report.timeout_ms, 45_000);
    }

    #[test]
    fn test_runtime_debug_redacts_key() {
        let runtime = RuntimeConfig {
            api_key: Some("AIza-secret".into()),
            ..RuntimeConfig::default()
        };
        assert!(!format!("{:?}", runtime).contains("AIza-secret"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Config::from_toml_str("[report\nmodel=").is_err());
    }
}
