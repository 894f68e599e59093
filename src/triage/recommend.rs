//! Care recommendations for completed assessments.

use tracing::{instrument, warn};

use crate::{
    base::{
        config::Config,
        prompts,
        types::{CompletionRequest, PatientProfile, SymptomReport, TriageLevel},
    },
    service::llm::LlmClient,
};

/// Returned whenever the language model cannot produce recommendations.
pub const RECOMMENDATION_FALLBACK: &str = "Please consult with a healthcare provider for personalized recommendations.";

/// Generate care recommendations for an assessed patient.
///
/// The triage level is already decided at this point and is passed along as
/// context only. This function cannot fail: on any delegation problem the
/// caller gets the fixed fallback sentence instead.
#[instrument(skip_all)]
pub async fn recommend(profile: &PatientProfile, report: &SymptomReport, triage_level: TriageLevel, llm: &LlmClient, config: &Config) -> String {
    let request = CompletionRequest {
        system_directive: config.recommendation_system_directive.clone(),
        user_prompt: prompts::build_recommendation_prompt(profile, report, triage_level),
        max_tokens: config.openai_recommendation_max_tokens,
        temperature: config.openai_recommendation_temperature,
    };

    match llm.generate(&request).await {
        Ok(recommendations) => recommendations,
        Err(err) => {
            warn!("Recommendation delegation failed, using the fallback: {err:#}");
            RECOMMENDATION_FALLBACK.to_string()
        }
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use mockall::mock;

    use super::*;
    use crate::{
        base::{
            config::ConfigInner,
            types::{PrimarySymptom, Res, Severity, SymptomOnset},
        },
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

    fn report() -> SymptomReport {
        SymptomReport {
            primary_symptom: PrimarySymptom::Fever,
            onset: SymptomOnset::OneToTwoDays,
            severity: Severity::Moderate,
            additional_symptoms: vec!["body ache".to_string()],
            emergency_symptoms: vec![],
        }
    }

    #[tokio::test]
    async fn recommendations_use_the_low_temperature_settings() {
        let mut mock = MockLlm::new();
        mock.expect_generate()
            .withf(|request| {
                request.temperature == 0.3
                    && request.max_tokens == 1000
                    && request.user_prompt.contains("Triage Level: urgent")
                    && request.user_prompt.contains("- Primary Symptom: fever")
            })
            .times(1)
            .returning(|_| Ok("Rest, fluids, and paracetamol as needed.".to_string()));

        let llm = LlmClient::new(Arc::new(mock));
        let recommendations = recommend(&PatientProfile::default(), &report(), TriageLevel::Urgent, &llm, &test_config()).await;

        assert_eq!(recommendations, "Rest, fluids, and paracetamol as needed.");
    }

    #[tokio::test]
    async fn delegation_failure_yields_the_fallback_after_one_attempt() {
        let mut mock = MockLlm::new();
        mock.expect_generate().times(1).returning(|_| Err(anyhow::anyhow!("connection reset")));

        let llm = LlmClient::new(Arc::new(mock));
        let recommendations = recommend(&PatientProfile::default(), &report(), TriageLevel::Routine, &llm, &test_config()).await;

        assert_eq!(recommendations, RECOMMENDATION_FALLBACK);
    }
}
