//! Thin wrapper around async-openai for OpenAI text-to-speech calls.

use std::{sync::Arc, time::Duration};

use anyhow::anyhow;
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{CreateSpeechRequestArgs, SpeechModel, Voice},
};
use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, instrument};

use crate::base::{config::Config, types::Res};

use super::{GenericSpeechClient, SpeechClient};

// Extra methods on `SpeechClient` applied by the openai implementation.

impl SpeechClient {
    pub fn openai(config: &Config) -> Self {
        let client = OpenAiSpeechClient::new(config);
        Self { inner: Arc::new(client) }
    }
}

// Specific implementations.

/// OpenAI text-to-speech client implementation.
#[derive(Clone)]
pub struct OpenAiSpeechClient {
    client: Client<OpenAIConfig>,
    model: SpeechModel,
    voice: Voice,
    request_timeout: Duration,
}

impl OpenAiSpeechClient {
    /// Create a new OpenAI text-to-speech client.
    #[instrument(name = "OpenAiSpeechClient::new", skip_all)]
    pub fn new(config: &Config) -> Self {
        let cfg = OpenAIConfig::new().with_api_key(config.openai_api_key.clone());

        Self {
            client: Client::with_config(cfg),
            model: parse_speech_model(&config.openai_tts_model),
            voice: parse_voice(&config.openai_tts_voice),
            request_timeout: Duration::from_secs(config.openai_request_timeout_secs),
        }
    }
}

#[async_trait]
impl GenericSpeechClient for OpenAiSpeechClient {
    /// Synthesize the given text into MP3 audio bytes.
    #[instrument(name = "OpenAiSpeechClient::synthesize", skip_all)]
    async fn synthesize(&self, text: &str) -> Res<Vec<u8>> {
        debug!("Synthesizing {} characters of speech.", text.len());

        let request = CreateSpeechRequestArgs::default().input(text).model(self.model.clone()).voice(self.voice.clone()).build()?;

        let response = timeout(self.request_timeout, self.client.audio().speech(request))
            .await
            .map_err(|_| anyhow!("OpenAI speech synthesis timed out after {}s.", self.request_timeout.as_secs()))??;

        Ok(response.bytes.to_vec())
    }
}

// Helpers.

/// Map a configured model name onto the async-openai speech model type.
fn parse_speech_model(name: &str) -> SpeechModel {
    match name {
        "tts-1" => SpeechModel::Tts1,
        "tts-1-hd" => SpeechModel::Tts1Hd,
        other => SpeechModel::Other(other.to_string()),
    }
}

/// Map a configured voice name onto the async-openai voice type.
///
/// Unknown names fall back to `alloy` rather than failing at startup.
fn parse_voice(name: &str) -> Voice {
    match name.to_lowercase().as_str() {
        "alloy" => Voice::Alloy,
        "echo" => Voice::Echo,
        "fable" => Voice::Fable,
        "onyx" => Voice::Onyx,
        "nova" => Voice::Nova,
        "shimmer" => Voice::Shimmer,
        _ => Voice::Alloy,
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_speech_models_map_to_their_variants() {
        assert!(matches!(parse_speech_model("tts-1"), SpeechModel::Tts1));
        assert!(matches!(parse_speech_model("tts-1-hd"), SpeechModel::Tts1Hd));
    }

    #[test]
    fn unknown_speech_models_pass_through() {
        let model = parse_speech_model("gpt-4o-mini-tts");

        assert!(matches!(model, SpeechModel::Other(name) if name == "gpt-4o-mini-tts"));
    }

    #[test]
    fn voices_parse_case_insensitively() {
        assert!(matches!(parse_voice("Nova"), Voice::Nova));
        assert!(matches!(parse_voice("shimmer"), Voice::Shimmer));
    }

    #[test]
    fn unknown_voices_fall_back_to_alloy() {
        assert!(matches!(parse_voice("baritone"), Voice::Alloy));
    }
}
