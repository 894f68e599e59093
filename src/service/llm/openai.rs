//! Thin wrapper around async-openai for OpenAI LLM calls.
//!
//! The module implements the `GenericLlmClient` trait for OpenAI's chat
//! completions API. All of the bot's completions (doctor chat and care
//! recommendations) flow through the single `generate` method.

use std::{sync::Arc, time::Duration};

use anyhow::anyhow;
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage, ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage, ChatCompletionRequestUserMessageContent,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, instrument};

use crate::base::{
    config::Config,
    types::{CompletionRequest, Res},
};

use super::{GenericLlmClient, LlmClient};

// Extra methods on `LlmClient` applied by the openai implementation.

impl LlmClient {
    pub fn openai(config: &Config) -> Self {
        let client = OpenAiLlmClient::new(config);
        Self { inner: Arc::new(client) }
    }
}

// Specific implementations.

/// OpenAI LLM client implementation.
#[derive(Clone)]
pub struct OpenAiLlmClient {
    client: Client<OpenAIConfig>,
    model: String,
    request_timeout: Duration,
}

impl OpenAiLlmClient {
    /// Create a new OpenAI LLM client.
    #[instrument(name = "OpenAiLlmClient::new", skip_all)]
    pub fn new(config: &Config) -> Self {
        let cfg = OpenAIConfig::new().with_api_key(config.openai_api_key.clone());

        Self {
            client: Client::with_config(cfg),
            model: config.openai_chat_model.clone(),
            request_timeout: Duration::from_secs(config.openai_request_timeout_secs),
        }
    }
}

#[async_trait]
impl GenericLlmClient for OpenAiLlmClient {
    /// Generate a completion for the given request.
    #[instrument(name = "OpenAiLlmClient::generate", skip_all)]
    async fn generate(&self, request: &CompletionRequest) -> Res<String> {
        debug!("Generating a completion with model `{}`.", self.model);

        let messages = vec![
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(request.system_directive.clone()),
                name: Some("System".to_string()),
            }),
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(request.user_prompt.clone()),
                name: Some("User".to_string()),
            }),
        ];

        let api_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(request.temperature)
            .max_completion_tokens(request.max_tokens)
            .build()?;

        // One attempt with a hard deadline. Call sites fall back to canned
        // text on failure rather than retrying.
        let response = timeout(self.request_timeout, self.client.chat().create(api_request))
            .await
            .map_err(|_| anyhow!("OpenAI completion timed out after {}s.", self.request_timeout.as_secs()))??;

        let content = response.choices.first().and_then(|choice| choice.message.content.clone()).unwrap_or_default();

        if content.trim().is_empty() {
            return Err(anyhow!("OpenAI returned an empty completion."));
        }

        Ok(content)
    }
}
