//! Prompt templates for LLM usage.

use crate::base::{
    locale::LanguageCode,
    types::{PatientProfile, SymptomReport, TriageLevel},
};

/// System directive for the doctor chat agent.
pub const DOCTOR_SYSTEM_DIRECTIVE: &str =
    "You are a compassionate AI doctor assistant. Respond in the patient's language with culturally appropriate medical guidance for rural India.";

/// System directive for the recommendation agent.
pub const RECOMMENDATION_SYSTEM_DIRECTIVE: &str =
    "You are a medical AI assistant specializing in rural healthcare in India. Provide practical, culturally appropriate medical guidance.";

/// Render the user prompt for one doctor chat turn.
///
/// Unknown profile fields are rendered as `Unknown` rather than omitted, so
/// the model sees the same shape for every patient.
pub fn build_doctor_prompt(message: &str, profile: &PatientProfile, language: LanguageCode) -> String {
    let age = profile.age.map_or_else(|| "Unknown".to_string(), |age| age.to_string());
    let gender = profile.gender.as_deref().unwrap_or("Unknown");
    let history = if profile.medical_conditions.is_empty() {
        "None".to_string()
    } else {
        profile.medical_conditions.join(", ")
    };

    format!(
        r#"You are an AI doctor assistant helping rural patients in India.
Respond in the {language} language.

Patient context:
- Age: {age}
- Gender: {gender}
- Medical history: {history}

Patient message: {message}

Provide a helpful, empathetic medical response. Keep it simple and practical for rural settings."#,
        language = language.name(),
    )
}

/// Render the user prompt for care recommendations after triage.
pub fn build_recommendation_prompt(profile: &PatientProfile, report: &SymptomReport, triage_level: TriageLevel) -> String {
    let age = profile.age.map_or_else(|| "Unknown".to_string(), |age| age.to_string());
    let gender = profile.gender.as_deref().unwrap_or("Unknown");
    let conditions = if profile.medical_conditions.is_empty() {
        "None".to_string()
    } else {
        profile.medical_conditions.join(", ")
    };
    let medications = profile.medications.as_deref().unwrap_or("None");
    let smoking = profile.smoking.as_deref().unwrap_or("No");
    let alcohol = profile.alcohol.as_deref().unwrap_or("No");
    let additional_symptoms = if report.additional_symptoms.is_empty() {
        "None".to_string()
    } else {
        report.additional_symptoms.join(", ")
    };

    format!(
        r#"As a medical AI assistant, provide personalized healthcare recommendations for a patient with the following information:

Patient Information:
- Age: {age}
- Gender: {gender}
- Medical Conditions: {conditions}
- Medications: {medications}
- Lifestyle: Smoking: {smoking}, Alcohol: {alcohol}

Symptoms:
- Primary Symptom: {primary_symptom}
- Severity: {severity}
- Onset: {onset}
- Additional Symptoms: {additional_symptoms}

Triage Level: {triage_level}

Please provide:
1. Specific self-care recommendations
2. Warning signs to watch for
3. When to seek immediate medical attention
4. Lifestyle modifications if applicable
5. Follow-up recommendations

Keep recommendations practical for rural healthcare settings in India."#,
        primary_symptom = report.primary_symptom,
        severity = report.severity,
        onset = report.onset,
    )
}

// Tests.
