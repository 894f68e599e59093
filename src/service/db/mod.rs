use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{Assessment, ChatMessage, Consultation, HealthcareProvider, Patient, Res, TriageLevel, Void};

pub mod surreal;

// Traits.

/// Generic database client trait that clients must implement.
///
/// This trait defines the core functionality for storing and retrieving
/// patients, assessments, consultations, chat transcripts, and the provider
/// directory. Implementing this trait allows different database backends to
/// be used with the bot.
#[async_trait]
pub trait GenericDbClient: Send + Sync + 'static {
    /// Persists a new patient record, returning the stored copy with its assigned id.
    async fn create_patient(&self, patient: Patient) -> Res<Patient>;

    /// Gets a patient by their record key, if one exists.
    async fn get_patient(&self, patient_id: &str) -> Res<Option<Patient>>;

    /// Persists a completed symptom assessment, returning the stored copy with its assigned id.
    async fn create_assessment(&self, assessment: Assessment) -> Res<Assessment>;

    /// Gets all assessments for a patient, newest first.
    async fn assessments_for_patient(&self, patient_id: &str) -> Res<Vec<Assessment>>;

    /// Persists a new consultation booking, returning the stored copy with its assigned id.
    async fn create_consultation(&self, consultation: Consultation) -> Res<Consultation>;

    /// Gets a consultation by its record key, if one exists.
    async fn get_consultation(&self, consultation_id: &str) -> Res<Option<Consultation>>;

    /// Appends a message to a consultation transcript, returning the stored copy.
    async fn add_chat_message(&self, message: ChatMessage) -> Res<ChatMessage>;

    /// Gets the full transcript for a consultation, oldest first.
    async fn consultation_messages(&self, consultation_id: &str) -> Res<Vec<ChatMessage>>;

    /// Lists healthcare providers, optionally filtered by location and specialization.
    ///
    /// Both filters are case-insensitive substring matches, so "gujarat"
    /// finds providers in "District Hospital, Gujarat".
    async fn list_providers(&self, location: Option<&str>, specialization: Option<&str>) -> Res<Vec<HealthcareProvider>>;

    /// Seeds the provider directory with the default roster if it is empty.
    async fn seed_providers(&self) -> Void;

    async fn count_patients(&self) -> Res<u64>;
    async fn count_assessments(&self) -> Res<u64>;
    async fn count_assessments_with_level(&self, level: TriageLevel) -> Res<u64>;
    async fn count_consultations(&self) -> Res<u64>;
    async fn count_providers(&self) -> Res<u64>;
}

// Structs.

/// Database client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct DbClient {
    /// The database client instance.
    pub inner: Arc<dyn GenericDbClient>,
}

impl Deref for DbClient {
    type Target = dyn GenericDbClient;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}
