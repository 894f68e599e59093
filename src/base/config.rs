//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use crate::base::{locale::LanguageCode, prompts};

use super::types::Res;

/// Default OpenAI chat model to use
fn default_openai_chat_model() -> String {
    "gpt-4".to_string()
}

/// Default sampling temperature for doctor chat completions
fn default_openai_chat_temperature() -> f32 {
    0.7
}

/// Default max output tokens for doctor chat completions
fn default_openai_chat_max_tokens() -> u32 {
    500
}

/// Default sampling temperature for recommendation completions
fn default_openai_recommendation_temperature() -> f32 {
    0.3
}

/// Default max output tokens for recommendation completions
fn default_openai_recommendation_max_tokens() -> u32 {
    1000
}

/// Default per-request timeout for OpenAI calls, in seconds
fn default_openai_request_timeout_secs() -> u64 {
    30
}

/// Default OpenAI text-to-speech model to use
fn default_openai_tts_model() -> String {
    "tts-1".to_string()
}

/// Default OpenAI text-to-speech voice to use
fn default_openai_tts_voice() -> String {
    "alloy".to_string()
}

/// Default system directive for the doctor chat agent.
fn default_doctor_system_directive() -> String {
    prompts::DOCTOR_SYSTEM_DIRECTIVE.to_string()
}

/// Default system directive for the recommendation agent.
fn default_recommendation_system_directive() -> String {
    prompts::RECOMMENDATION_SYSTEM_DIRECTIVE.to_string()
}

/// Default language for replies when the request does not name one.
fn default_language() -> LanguageCode {
    LanguageCode::En
}

/// Default HTTP bind address.
fn default_http_addr() -> String {
    "0.0.0.0:5000".to_string()
}

/// Default cost of a basic consultation, in rupees.
fn default_price_basic() -> u32 {
    50
}

/// Default cost of a premium or audio consultation, in rupees.
fn default_price_premium() -> u32 {
    80
}

/// Default cost of an emergency consultation, in rupees.
fn default_price_emergency() -> u32 {
    200
}

/// Default add-on cost for video conferencing, in rupees.
fn default_price_video_addon() -> u32 {
    50
}

/// Configuration for the sehat-bot application.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// OpenAI API key (`OPENAI_API_KEY`).
    pub openai_api_key: String,
    /// OpenAI chat model to use (`OPENAI_CHAT_MODEL`).
    #[serde(default = "default_openai_chat_model")]
    pub openai_chat_model: String,
    /// Sampling temperature for doctor chat completions (`OPENAI_CHAT_TEMPERATURE`).
    /// Value between 0 and 2. Higher values like 0.8 make output more random,
    /// while lower values like 0.2 make it more focused and deterministic.
    #[serde(default = "default_openai_chat_temperature")]
    pub openai_chat_temperature: f32,
    /// Max output tokens for doctor chat completions (`OPENAI_CHAT_MAX_TOKENS`).
    #[serde(default = "default_openai_chat_max_tokens")]
    pub openai_chat_max_tokens: u32,
    /// Sampling temperature for recommendation completions (`OPENAI_RECOMMENDATION_TEMPERATURE`).
    /// Kept low so care guidance stays focused and repeatable.
    #[serde(default = "default_openai_recommendation_temperature")]
    pub openai_recommendation_temperature: f32,
    /// Max output tokens for recommendation completions (`OPENAI_RECOMMENDATION_MAX_TOKENS`).
    #[serde(default = "default_openai_recommendation_max_tokens")]
    pub openai_recommendation_max_tokens: u32,
    /// Per-request timeout for OpenAI calls, in seconds (`OPENAI_REQUEST_TIMEOUT_SECS`).
    #[serde(default = "default_openai_request_timeout_secs")]
    pub openai_request_timeout_secs: u64,
    /// OpenAI text-to-speech model to use (`OPENAI_TTS_MODEL`).
    #[serde(default = "default_openai_tts_model")]
    pub openai_tts_model: String,
    /// OpenAI text-to-speech voice to use (`OPENAI_TTS_VOICE`).
    #[serde(default = "default_openai_tts_voice")]
    pub openai_tts_voice: String,
    /// Optional custom system directive for the doctor chat agent (`DOCTOR_SYSTEM_DIRECTIVE`).
    #[serde(default = "default_doctor_system_directive")]
    pub doctor_system_directive: String,
    /// Optional custom system directive for the recommendation agent (`RECOMMENDATION_SYSTEM_DIRECTIVE`).
    #[serde(default = "default_recommendation_system_directive")]
    pub recommendation_system_directive: String,
    /// Reply language used when a request does not name one (`DEFAULT_LANGUAGE`).
    #[serde(default = "default_language")]
    pub default_language: LanguageCode,
    /// Database endpoint URL (`DB_ENDPOINT`).
    pub db_endpoint: String,
    /// Database username (`DB_USERNAME`).
    pub db_username: String,
    /// Database password (`DB_PASSWORD`).
    pub db_password: String,
    /// HTTP bind address for the API server (`HTTP_ADDR`).
    #[serde(default = "default_http_addr")]
    pub http_addr: String,
    /// Cost of a basic consultation, in rupees (`PRICE_BASIC`).
    #[serde(default = "default_price_basic")]
    pub price_basic: u32,
    /// Cost of a premium or audio consultation, in rupees (`PRICE_PREMIUM`).
    #[serde(default = "default_price_premium")]
    pub price_premium: u32,
    /// Cost of an emergency consultation, in rupees (`PRICE_EMERGENCY`).
    #[serde(default = "default_price_emergency")]
    pub price_emergency: u32,
    /// Add-on cost for video conferencing, in rupees (`PRICE_VIDEO_ADDON`).
    #[serde(default = "default_price_video_addon")]
    pub price_video_addon: u32,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_chat_model: default_openai_chat_model(),
            openai_chat_temperature: default_openai_chat_temperature(),
            openai_chat_max_tokens: default_openai_chat_max_tokens(),
            openai_recommendation_temperature: default_openai_recommendation_temperature(),
            openai_recommendation_max_tokens: default_openai_recommendation_max_tokens(),
            openai_request_timeout_secs: default_openai_request_timeout_secs(),
            openai_tts_model: default_openai_tts_model(),
            openai_tts_voice: default_openai_tts_voice(),
            doctor_system_directive: default_doctor_system_directive(),
            recommendation_system_directive: default_recommendation_system_directive(),
            default_language: default_language(),
            db_endpoint: String::new(),
            db_username: String::new(),
            db_password: String::new(),
            http_addr: default_http_addr(),
            price_basic: default_price_basic(),
            price_premium: default_price_premium(),
            price_emergency: default_price_emergency(),
            price_video_addon: default_price_video_addon(),
        }
    }
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("SEHAT_BOT"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        if result.openai_chat_temperature < 0.0 || result.openai_chat_temperature > 2.0 {
            return Err(anyhow::anyhow!("OpenAI chat temperature must be between 0 and 2."));
        }

        if result.openai_recommendation_temperature < 0.0 || result.openai_recommendation_temperature > 2.0 {
            return Err(anyhow::anyhow!("OpenAI recommendation temperature must be between 0 and 2."));
        }

        if result.openai_chat_max_tokens < 1 || result.openai_chat_max_tokens > 128000 {
            return Err(anyhow::anyhow!("OpenAI chat max tokens must be between 1 and 128000."));
        }

        if result.openai_recommendation_max_tokens < 1 || result.openai_recommendation_max_tokens > 128000 {
            return Err(anyhow::anyhow!("OpenAI recommendation max tokens must be between 1 and 128000."));
        }

        if result.openai_request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("OpenAI request timeout must be at least 1 second."));
        }

        Ok(result)
    }
}
