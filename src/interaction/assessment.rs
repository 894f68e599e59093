//! Symptom assessment: triage plus generated care recommendations.

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{
    base::{
        config::Config,
        types::{Assessment, EmergencySymptom, Patient, PrimarySymptom, Res, Severity, SymptomOnset, SymptomReport},
    },
    service::{db::DbClient, llm::LlmClient},
    triage::{classifier, recommend},
};

/// Intake form payload for a symptom assessment.
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentRequest {
    pub patient_id: String,
    pub primary_symptom: PrimarySymptom,
    pub symptom_onset: SymptomOnset,
    pub symptom_severity: Severity,
    #[serde(default)]
    pub additional_symptoms: Vec<String>,
    #[serde(default)]
    pub emergency_symptoms: Vec<EmergencySymptom>,
    #[serde(default, alias = "pain_location")]
    pub pain_description: Option<String>,
    #[serde(default)]
    pub breathing_details: Vec<String>,
}

impl AssessmentRequest {
    /// The triage-relevant slice of the form.
    pub fn report(&self) -> SymptomReport {
        SymptomReport {
            primary_symptom: self.primary_symptom,
            onset: self.symptom_onset,
            severity: self.symptom_severity,
            additional_symptoms: self.additional_symptoms.clone(),
            emergency_symptoms: self.emergency_symptoms.clone(),
        }
    }
}

/// Run an assessment for a registered patient.
///
/// Triage is decided locally first, then the language model is asked for
/// care recommendations. The stored record always carries a triage level
/// and some recommendation text, even when the model is unreachable.
#[instrument(skip_all)]
pub async fn submit(patient: &Patient, request: AssessmentRequest, db: &DbClient, llm: &LlmClient, config: &Config) -> Res<Assessment> {
    let report = request.report();
    let triage_level = classifier::classify(&report);

    info!("Assessment for patient `{}` triaged as `{triage_level}`.", request.patient_id);

    let recommendations = recommend::recommend(&patient.profile(), &report, triage_level, llm, config).await;

    let assessment = Assessment {
        id: None,
        patient_id: request.patient_id,
        primary_symptom: request.primary_symptom,
        symptom_onset: request.symptom_onset,
        symptom_severity: request.symptom_severity,
        additional_symptoms: request.additional_symptoms,
        pain_description: request.pain_description,
        breathing_details: request.breathing_details,
        emergency_symptoms: request.emergency_symptoms,
        triage_level,
        ai_recommendations: recommendations,
        created_at: Utc::now(),
    };

    db.create_assessment(assessment).await
}

// Tests.
