//! Keyword routing for doctor chat messages.

use tracing::{instrument, warn};

use crate::{
    base::{
        config::Config,
        locale::{LanguageCode, ResponseTemplates, templates_for},
        prompts,
        types::{CompletionRequest, PatientProfile},
    },
    service::llm::LlmClient,
};

/// Phrases that short-circuit straight to the emergency template.
const EMERGENCY_PHRASES: [&str; 9] = [
    "chest pain",
    "difficulty breathing",
    "severe bleeding",
    "unconscious",
    "heart attack",
    "stroke",
    "seizure",
    "can't breathe",
    "choking",
];

/// Words that ask for a symptom description.
const SYMPTOM_WORDS: [&str; 4] = ["fever", "headache", "cough", "symptoms"];

/// Phrases about timing that get the duration question.
const DURATION_PHRASES: [&str; 3] = ["how long", "when", "started"];

/// Pick a canned reply for a message, if one of the keyword rules matches.
///
/// Matching is case-insensitive and ordered: emergency phrases win over the
/// pain question, which wins over symptom inquiry, which wins over duration.
pub(crate) fn canned_reply(message: &str, templates: &'static ResponseTemplates) -> Option<&'static str> {
    let message = message.to_lowercase();

    if EMERGENCY_PHRASES.iter().any(|phrase| message.contains(phrase)) {
        return Some(templates.emergency);
    }

    if message.contains("pain") {
        return Some(templates.pain_scale);
    }

    if SYMPTOM_WORDS.iter().any(|word| message.contains(word)) {
        return Some(templates.symptom_inquiry);
    }

    if DURATION_PHRASES.iter().any(|phrase| message.contains(phrase)) {
        return Some(templates.duration);
    }

    None
}

/// Produce a doctor reply for a free-form chat message.
///
/// Canned replies cover the recognizable cases; everything else is delegated
/// to the language model with the patient's context. This function cannot
/// fail: when the model is unavailable the caller gets the greeting template
/// in the requested language.
#[instrument(skip_all)]
pub async fn route(message: &str, profile: &PatientProfile, language: LanguageCode, llm: &LlmClient, config: &Config) -> String {
    let templates = templates_for(language);

    if let Some(reply) = canned_reply(message, templates) {
        return reply.to_string();
    }

    let request = CompletionRequest {
        system_directive: config.doctor_system_directive.clone(),
        user_prompt: prompts::build_doctor_prompt(message, profile, language),
        max_tokens: config.openai_chat_max_tokens,
        temperature: config.openai_chat_temperature,
    };

    match llm.generate(&request).await {
        Ok(reply) => reply,
        Err(err) => {
            warn!("Doctor chat delegation failed, replying with the greeting: {err:#}");
            templates.greeting.to_string()
        }
    }
}

// Tests.
