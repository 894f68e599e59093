//! Core data model: result aliases, the symptom vocabulary, and stored records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::locale::LanguageCode;

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

// Triage.

/// Triage outcome for a symptom report, ordered from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageLevel {
    Emergency,
    Urgent,
    Routine,
}

impl TriageLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Urgent => "urgent",
            Self::Routine => "routine",
        }
    }
}

impl fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Symptom vocabulary.
//
// These mirror the intake form options. The forms are versioned separately
// from the backend, so every enum keeps an `Other` catch-all instead of
// rejecting values it has not seen before.

/// The main complaint selected on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimarySymptom {
    Fever,
    Cough,
    Headache,
    ChestPain,
    AbdominalPain,
    BreathingDifficulty,
    NauseaVomiting,
    Diarrhea,
    Fatigue,
    Dizziness,
    Rash,
    #[serde(other)]
    Other,
}

impl PrimarySymptom {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fever => "fever",
            Self::Cough => "cough",
            Self::Headache => "headache",
            Self::ChestPain => "chest_pain",
            Self::AbdominalPain => "abdominal_pain",
            Self::BreathingDifficulty => "breathing_difficulty",
            Self::NauseaVomiting => "nausea_vomiting",
            Self::Diarrhea => "diarrhea",
            Self::Fatigue => "fatigue",
            Self::Dizziness => "dizziness",
            Self::Rash => "rash",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PrimarySymptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How long ago the symptoms started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymptomOnset {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "1-2_days")]
    OneToTwoDays,
    #[serde(rename = "3-7_days")]
    ThreeToSevenDays,
    #[serde(rename = "1-2_weeks")]
    OneToTwoWeeks,
    #[serde(rename = "more_than_2_weeks")]
    MoreThanTwoWeeks,
}

impl SymptomOnset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::OneToTwoDays => "1-2_days",
            Self::ThreeToSevenDays => "3-7_days",
            Self::OneToTwoWeeks => "1-2_weeks",
            Self::MoreThanTwoWeeks => "more_than_2_weeks",
        }
    }
}

impl fmt::Display for SymptomOnset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported severity of the main complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    VerySevere,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
            Self::VerySevere => "very_severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Red-flag checklist entries from the intake form.
///
/// `None` is a real form value (the "none of the above" checkbox), not the
/// absence of an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencySymptom {
    SevereChestPain,
    DifficultyBreathing,
    LossOfConsciousness,
    SevereBleeding,
    SevereAbdominalPain,
    HighFever,
    Seizures,
    SevereHeadache,
    Paralysis,
    None,
    #[serde(other)]
    Other,
}

/// A full set of intake answers, ready for triage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomReport {
    pub primary_symptom: PrimarySymptom,
    pub onset: SymptomOnset,
    pub severity: Severity,
    #[serde(default)]
    pub additional_symptoms: Vec<String>,
    #[serde(default)]
    pub emergency_symptoms: Vec<EmergencySymptom>,
}

// LLM request.

/// A single chat-completion request to the language model.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_directive: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

// Patient context.

/// Patient details given to the language model as context.
///
/// Everything is optional; anonymous chat sessions send nothing at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientProfile {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, alias = "conditions", alias = "medicalHistory")]
    pub medical_conditions: Vec<String>,
    #[serde(default)]
    pub medications: Option<String>,
    #[serde(default)]
    pub smoking: Option<String>,
    #[serde(default)]
    pub alcohol: Option<String>,
}

// Stored records.

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub full_name: String,
    pub age: u32,
    pub gender: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub preferred_language: LanguageCode,
    pub medical_conditions: Vec<String>,
    pub medications: Option<String>,
    pub smoking: Option<String>,
    pub alcohol: Option<String>,
    pub exercise: Option<String>,
    pub pregnancy: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Patient {
    /// The record key, if the record has been stored.
    pub fn key(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.key().to_string())
    }

    /// The subset of the record that the language model gets to see.
    pub fn profile(&self) -> PatientProfile {
        PatientProfile {
            age: Some(self.age),
            gender: Some(self.gender.clone()),
            medical_conditions: self.medical_conditions.clone(),
            medications: self.medications.clone(),
            smoking: self.smoking.clone(),
            alcohol: self.alcohol.clone(),
        }
    }
}

/// A completed symptom assessment with its triage outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub patient_id: String,
    pub primary_symptom: PrimarySymptom,
    pub symptom_onset: SymptomOnset,
    pub symptom_severity: Severity,
    pub additional_symptoms: Vec<String>,
    pub pain_description: Option<String>,
    pub breathing_details: Vec<String>,
    pub emergency_symptoms: Vec<EmergencySymptom>,
    pub triage_level: TriageLevel,
    pub ai_recommendations: String,
    pub created_at: DateTime<Utc>,
}

impl Assessment {
    pub fn key(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.key().to_string())
    }
}

/// The tier a consultation was booked at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationType {
    #[default]
    Basic,
    Premium,
    Emergency,
}

impl ConsultationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Premium => "premium",
            Self::Emergency => "emergency",
        }
    }
}

impl fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a consultation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

/// A booked consultation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub patient_id: String,
    pub consultation_type: ConsultationType,
    /// Cost in rupees.
    pub cost: u32,
    pub language: LanguageCode,
    pub audio_enabled: bool,
    pub video_enabled: bool,
    pub is_emergency: bool,
    pub status: ConsultationStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Consultation {
    pub fn key(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.key().to_string())
    }
}

/// Which side of a consultation produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    User,
    Doctor,
    System,
}

/// One turn of a consultation transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub consultation_id: String,
    pub sender: MessageSender,
    pub content: String,
    pub language: LanguageCode,
    /// Set when the turn has a synthesized voice recording.
    pub audio_url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn key(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.key().to_string())
    }
}

/// A directory entry for a reachable healthcare provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthcareProvider {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub specialization: String,
    pub location: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub availability: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl HealthcareProvider {
    pub fn key(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.key().to_string())
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_uses_snake_case_wire_names() {
        assert_eq!(serde_json::to_string(&Severity::VerySevere).unwrap(), "\"very_severe\"");
        assert_eq!(serde_json::from_str::<Severity>("\"mild\"").unwrap(), Severity::Mild);
    }

    #[test]
    fn onset_keeps_the_form_values() {
        assert_eq!(serde_json::to_string(&SymptomOnset::OneToTwoDays).unwrap(), "\"1-2_days\"");
        assert_eq!(serde_json::from_str::<SymptomOnset>("\"more_than_2_weeks\"").unwrap(), SymptomOnset::MoreThanTwoWeeks);
    }

    #[test]
    fn unknown_primary_symptom_becomes_other() {
        assert_eq!(serde_json::from_str::<PrimarySymptom>("\"common_cold\"").unwrap(), PrimarySymptom::Other);
    }

    #[test]
    fn unknown_emergency_symptom_becomes_other() {
        assert_eq!(serde_json::from_str::<EmergencySymptom>("\"glowing\"").unwrap(), EmergencySymptom::Other);
        assert_eq!(serde_json::from_str::<EmergencySymptom>("\"none\"").unwrap(), EmergencySymptom::None);
    }

    #[test]
    fn triage_level_round_trips() {
        for level in [TriageLevel::Emergency, TriageLevel::Urgent, TriageLevel::Routine] {
            let encoded = serde_json::to_string(&level).unwrap();
            assert_eq!(encoded, format!("\"{level}\""));
            assert_eq!(serde_json::from_str::<TriageLevel>(&encoded).unwrap(), level);
        }
    }
}
