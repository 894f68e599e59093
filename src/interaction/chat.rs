//! Doctor chat turns and transcript persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    base::{
        config::Config,
        locale::LanguageCode,
        types::{ChatMessage, MessageSender, PatientProfile, Res},
    },
    service::{db::DbClient, llm::LlmClient},
    triage::router,
};

/// One chat turn from a patient.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub language: Option<LanguageCode>,
    #[serde(default, alias = "patientData")]
    pub patient_data: PatientProfile,
    #[serde(default)]
    pub consultation_id: Option<String>,
}

/// The doctor's reply for one chat turn.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub language: LanguageCode,
    pub timestamp: DateTime<Utc>,
}

/// Produce the doctor's reply for one chat turn.
///
/// When the turn belongs to a consultation, both sides of the exchange are
/// appended to its transcript. The turns are stored sequentially so their
/// timestamps keep the exchange in order.
#[instrument(skip_all)]
pub async fn respond(request: ChatRequest, db: &DbClient, llm: &LlmClient, config: &Config) -> Res<ChatReply> {
    let language = request.language.unwrap_or(config.default_language);
    let response = router::route(&request.message, &request.patient_data, language, llm, config).await;

    if let Some(consultation_id) = &request.consultation_id {
        store_turn(consultation_id, MessageSender::User, &request.message, language, db).await?;
        store_turn(consultation_id, MessageSender::Doctor, &response, language, db).await?;

        info!("Recorded a chat turn on consultation `{consultation_id}`.");
    }

    Ok(ChatReply {
        response,
        language,
        timestamp: Utc::now(),
    })
}

/// Reply to a one-off message from the proxy surface, with no patient
/// context attached.
#[instrument(skip_all)]
pub async fn proxy_reply(message: &str, llm: &LlmClient, config: &Config) -> String {
    router::route(message, &PatientProfile::default(), config.default_language, llm, config).await
}

/// Append one side of an exchange to a consultation transcript.
async fn store_turn(consultation_id: &str, sender: MessageSender, content: &str, language: LanguageCode, db: &DbClient) -> Res<ChatMessage> {
    let message = ChatMessage {
        id: None,
        consultation_id: consultation_id.to_string(),
        sender,
        content: content.to_string(),
        language,
        audio_url: None,
        timestamp: Utc::now(),
    };

    db.add_chat_message(message).await
}

// Tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use mockall::mock;

    use super::*;
    use crate::{
        base::{config::ConfigInner, locale::templates_for, types::CompletionRequest},
        service::llm::GenericLlmClient,
    };

    mock! {
        pub Llm {}

        #[async_trait]
        impl GenericLlmClient for Llm {
            async fn generate(&self, request: &CompletionRequest) -> Res<String>;
        }
    }

    fn test_config() -> Config {
        Config {
            inner: Arc::new(ConfigInner::default()),
        }
    }

    fn chat_request(message: &str, consultation_id: Option<&str>) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            language: Some(LanguageCode::En),
            patient_data: PatientProfile::default(),
            consultation_id: consultation_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn emergency_keywords_short_circuit_without_the_model() {
        let db = DbClient::surreal_memory().await.unwrap();

        let mut mock = MockLlm::new();
        mock.expect_generate().times(0);
        let llm = LlmClient::new(Arc::new(mock));

        let reply = respond(chat_request("I think I am having a heart attack", None), &db, &llm, &test_config()).await.unwrap();

        assert_eq!(reply.response, templates_for(LanguageCode::En).emergency);
        assert_eq!(reply.language, LanguageCode::En);
    }

    #[tokio::test]
    async fn consultation_turns_record_both_sides_in_order() {
        let db = DbClient::surreal_memory().await.unwrap();

        let mut mock = MockLlm::new();
        mock.expect_generate().times(1).returning(|_| Ok("Drink warm fluids and rest.".to_string()));
        let llm = LlmClient::new(Arc::new(mock));

        let reply = respond(chat_request("I feel weak since yesterday", Some("c42")), &db, &llm, &test_config()).await.unwrap();
        assert_eq!(reply.response, "Drink warm fluids and rest.");

        let transcript = db.consultation_messages("c42").await.unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].sender, MessageSender::User);
        assert_eq!(transcript[0].content, "I feel weak since yesterday");
        assert_eq!(transcript[1].sender, MessageSender::Doctor);
        assert_eq!(transcript[1].content, "Drink warm fluids and rest.");
    }

    #[tokio::test]
    async fn turns_without_a_consultation_are_not_persisted() {
        let db = DbClient::surreal_memory().await.unwrap();

        let mut mock = MockLlm::new();
        mock.expect_generate().times(1).returning(|_| Ok("Try a cold compress.".to_string()));
        let llm = LlmClient::new(Arc::new(mock));

        respond(chat_request("My eyes itch at night", None), &db, &llm, &test_config()).await.unwrap();

        assert_eq!(db.count_consultations().await.unwrap(), 0);
        assert!(db.consultation_messages("c42").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn proxy_replies_use_the_default_language_and_an_anonymous_profile() {
        let mut mock = MockLlm::new();
        mock.expect_generate()
            .withf(|request| request.user_prompt.contains("Respond in the English language.") && request.user_prompt.contains("- Age: Unknown"))
            .times(1)
            .returning(|_| Ok("Hello! What brings you in?".to_string()));
        let llm = LlmClient::new(Arc::new(mock));

        let reply = proxy_reply("Is this thing on?", &llm, &test_config()).await;

        assert_eq!(reply, "Hello! What brings you in?");
    }
}
