//! Patient registration.

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{
    base::{
        config::Config,
        locale::LanguageCode,
        types::{Patient, Res},
    },
    service::db::DbClient,
};

/// Registration payload from the intake form.
///
/// The camelCase aliases accept payloads from the older web client.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterPatientRequest {
    #[serde(alias = "fullName")]
    pub full_name: String,
    pub age: u32,
    pub gender: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub language: Option<LanguageCode>,
    #[serde(default, alias = "medicalHistory")]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub medications: Option<String>,
    #[serde(default)]
    pub smoking: Option<String>,
    #[serde(default)]
    pub alcohol: Option<String>,
    #[serde(default)]
    pub exercise: Option<String>,
    #[serde(default)]
    pub pregnancy: Option<String>,
}

impl RegisterPatientRequest {
    /// Check the form fields, returning a message suitable for a 400 response.
    pub fn validate(&self) -> Result<(), String> {
        if self.full_name.trim().is_empty() {
            return Err("Full name is required.".to_string());
        }

        if self.gender.trim().is_empty() {
            return Err("Gender is required.".to_string());
        }

        if self.age > 120 {
            return Err("Age must be 120 or less.".to_string());
        }

        Ok(())
    }
}

/// Register a new patient and persist their record.
#[instrument(skip_all)]
pub async fn register(request: RegisterPatientRequest, db: &DbClient, config: &Config) -> Res<Patient> {
    let patient = Patient {
        id: None,
        full_name: request.full_name.trim().to_string(),
        age: request.age,
        gender: request.gender,
        phone: request.phone,
        location: request.location,
        preferred_language: request.language.unwrap_or(config.default_language),
        medical_conditions: request.conditions,
        medications: request.medications,
        smoking: request.smoking,
        alcohol: request.alcohol,
        exercise: request.exercise,
        pregnancy: request.pregnancy,
        created_at: Utc::now(),
    };

    let patient = db.create_patient(patient).await?;

    info!("Registered patient `{}`.", patient.key().unwrap_or_default());

    Ok(patient)
}

// Tests.
