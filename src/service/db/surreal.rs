//! SurrealDB implementation of the database client.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use surrealdb::{
    Connection, Surreal,
    engine::{local::Mem, remote::ws::Ws},
    opt::auth::Root,
};
use tracing::{info, instrument};

use crate::base::{
    config::Config,
    types::{Assessment, ChatMessage, Consultation, HealthcareProvider, Patient, Res, TriageLevel, Void},
};

use super::{DbClient, GenericDbClient};

// Extra methods on `DbClient` applied by the surreal implementation.

impl DbClient {
    /// Create a new database client connected to a remote SurrealDB instance.
    #[instrument(skip_all)]
    pub async fn surreal(config: &Config) -> Res<Self> {
        let db = Surreal::new::<Ws>(&config.db_endpoint).await?;

        db.signin(Root {
            username: &config.db_username,
            password: &config.db_password,
        })
        .await?;

        let client = SurrealDbClient::init(db).await?;

        Ok(Self { inner: Arc::new(client) })
    }

    /// Create a new database client backed by an in-memory SurrealDB instance.
    ///
    /// Nothing survives the process; this exists for tests and local hacking.
    pub async fn surreal_memory() -> Res<Self> {
        let db = Surreal::new::<Mem>(()).await?;
        let client = SurrealDbClient::init(db).await?;

        Ok(Self { inner: Arc::new(client) })
    }
}

// Specific implementations.

/// SurrealDB client, generic over the connection engine.
#[derive(Clone)]
pub struct SurrealDbClient<C: Connection> {
    db: Surreal<C>,
}

/// Row shape for `count()` aggregations.
#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

impl<C: Connection> SurrealDbClient<C> {
    /// Select the namespace and define the schema on a fresh connection.
    async fn init(db: Surreal<C>) -> Res<Self> {
        db.use_ns("sehat").use_db("bot").await?;

        // Record keys are server-assigned, so the tables stay schemaless and
        // the transcript lookup path gets an index.
        db.query(
            "
            DEFINE TABLE IF NOT EXISTS patient SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS assessment SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS consultation SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS message SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS provider SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS message_consultation ON message FIELDS consultation_id;
            ",
        )
        .await?;

        info!("Database initialized successfully.");

        Ok(Self { db })
    }

    async fn count_table(&self, table: &str) -> Res<u64> {
        let mut response = self.db.query(format!("SELECT count() AS total FROM {table} GROUP ALL")).await?;
        let row: Option<CountRow> = response.take(0)?;

        Ok(row.map(|row| row.total).unwrap_or_default())
    }
}

#[async_trait]
impl<C: Connection> GenericDbClient for SurrealDbClient<C> {
    #[instrument(skip_all)]
    async fn create_patient(&self, patient: Patient) -> Res<Patient> {
        let created: Option<Patient> = self.db.create("patient").content(patient).await?;

        created.ok_or_else(|| anyhow!("Patient record was not created."))
    }

    #[instrument(skip(self))]
    async fn get_patient(&self, patient_id: &str) -> Res<Option<Patient>> {
        let patient: Option<Patient> = self.db.select(("patient", patient_id)).await?;

        Ok(patient)
    }

    #[instrument(skip_all)]
    async fn create_assessment(&self, assessment: Assessment) -> Res<Assessment> {
        let created: Option<Assessment> = self.db.create("assessment").content(assessment).await?;

        created.ok_or_else(|| anyhow!("Assessment record was not created."))
    }

    #[instrument(skip(self))]
    async fn assessments_for_patient(&self, patient_id: &str) -> Res<Vec<Assessment>> {
        let mut response = self
            .db
            .query("SELECT * FROM assessment WHERE patient_id = $patient_id ORDER BY created_at DESC")
            .bind(("patient_id", patient_id.to_string()))
            .await?;

        Ok(response.take(0)?)
    }

    #[instrument(skip_all)]
    async fn create_consultation(&self, consultation: Consultation) -> Res<Consultation> {
        let created: Option<Consultation> = self.db.create("consultation").content(consultation).await?;

        created.ok_or_else(|| anyhow!("Consultation record was not created."))
    }

    #[instrument(skip(self))]
    async fn get_consultation(&self, consultation_id: &str) -> Res<Option<Consultation>> {
        let consultation: Option<Consultation> = self.db.select(("consultation", consultation_id)).await?;

        Ok(consultation)
    }

    #[instrument(skip_all)]
    async fn add_chat_message(&self, message: ChatMessage) -> Res<ChatMessage> {
        let created: Option<ChatMessage> = self.db.create("message").content(message).await?;

        created.ok_or_else(|| anyhow!("Chat message record was not created."))
    }

    #[instrument(skip(self))]
    async fn consultation_messages(&self, consultation_id: &str) -> Res<Vec<ChatMessage>> {
        let mut response = self
            .db
            .query("SELECT * FROM message WHERE consultation_id = $consultation_id ORDER BY timestamp ASC")
            .bind(("consultation_id", consultation_id.to_string()))
            .await?;

        Ok(response.take(0)?)
    }

    #[instrument(skip(self))]
    async fn list_providers(&self, location: Option<&str>, specialization: Option<&str>) -> Res<Vec<HealthcareProvider>> {
        let mut clauses = Vec::new();

        if location.is_some() {
            clauses.push("string::contains(string::lowercase(location), string::lowercase($location))");
        }

        if specialization.is_some() {
            clauses.push("string::contains(string::lowercase(specialization), string::lowercase($specialization))");
        }

        let mut sql = "SELECT * FROM provider".to_string();

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        sql.push_str(" ORDER BY name ASC");

        let mut query = self.db.query(sql);

        if let Some(location) = location {
            query = query.bind(("location", location.to_string()));
        }

        if let Some(specialization) = specialization {
            query = query.bind(("specialization", specialization.to_string()));
        }

        let mut response = query.await?;

        Ok(response.take(0)?)
    }

    #[instrument(skip_all)]
    async fn seed_providers(&self) -> Void {
        if self.count_table("provider").await? > 0 {
            return Ok(());
        }

        for provider in default_providers() {
            let _: Option<HealthcareProvider> = self.db.create("provider").content(provider).await?;
        }

        info!("Seeded the default healthcare provider directory.");

        Ok(())
    }

    async fn count_patients(&self) -> Res<u64> {
        self.count_table("patient").await
    }

    async fn count_assessments(&self) -> Res<u64> {
        self.count_table("assessment").await
    }

    #[instrument(skip(self))]
    async fn count_assessments_with_level(&self, level: TriageLevel) -> Res<u64> {
        let mut response = self
            .db
            .query("SELECT count() AS total FROM assessment WHERE triage_level = $level GROUP ALL")
            .bind(("level", level))
            .await?;
        let row: Option<CountRow> = response.take(0)?;

        Ok(row.map(|row| row.total).unwrap_or_default())
    }

    async fn count_consultations(&self) -> Res<u64> {
        self.count_table("consultation").await
    }

    async fn count_providers(&self) -> Res<u64> {
        self.count_table("provider").await
    }
}

// Seed data.

/// The provider roster a fresh installation starts with.
fn default_providers() -> Vec<HealthcareProvider> {
    let now = Utc::now();

    vec![
        HealthcareProvider {
            id: None,
            name: "Dr. Rajesh Kumar".to_string(),
            specialization: "General Medicine".to_string(),
            location: "Rural Health Center, Rajasthan".to_string(),
            phone: Some("+91-9876543210".to_string()),
            email: Some("dr.rajesh@rhc.gov.in".to_string()),
            availability: Some("Mon-Fri 9AM-5PM".to_string()),
            created_at: now,
        },
        HealthcareProvider {
            id: None,
            name: "Dr. Priya Sharma".to_string(),
            specialization: "Pediatrics".to_string(),
            location: "Community Health Center, Uttar Pradesh".to_string(),
            phone: Some("+91-9876543211".to_string()),
            email: Some("dr.priya@chc.gov.in".to_string()),
            availability: Some("Mon-Sat 10AM-4PM".to_string()),
            created_at: now,
        },
        HealthcareProvider {
            id: None,
            name: "Dr. Amit Patel".to_string(),
            specialization: "Emergency Medicine".to_string(),
            location: "District Hospital, Gujarat".to_string(),
            phone: Some("+91-9876543212".to_string()),
            email: Some("dr.amit@dh.gov.in".to_string()),
            availability: Some("24/7".to_string()),
            created_at: now,
        },
    ]
}

// Tests.

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration};

    use super::*;
    use crate::base::{
        locale::LanguageCode,
        types::{ConsultationStatus, ConsultationType, MessageSender, PrimarySymptom, Severity, SymptomOnset},
    };

    fn patient(name: &str) -> Patient {
        Patient {
            id: None,
            full_name: name.to_string(),
            age: 34,
            gender: "female".to_string(),
            phone: None,
            location: Some("Jaipur".to_string()),
            preferred_language: LanguageCode::Hi,
            medical_conditions: vec!["diabetes".to_string()],
            medications: None,
            smoking: None,
            alcohol: None,
            exercise: None,
            pregnancy: None,
            created_at: Utc::now(),
        }
    }

    fn assessment(patient_id: &str, level: TriageLevel, created_at: DateTime<Utc>) -> Assessment {
        Assessment {
            id: None,
            patient_id: patient_id.to_string(),
            primary_symptom: PrimarySymptom::Fever,
            symptom_onset: SymptomOnset::Today,
            symptom_severity: Severity::Moderate,
            additional_symptoms: vec![],
            pain_description: None,
            breathing_details: vec![],
            emergency_symptoms: vec![],
            triage_level: level,
            ai_recommendations: "Rest and fluids.".to_string(),
            created_at,
        }
    }

    fn message(consultation_id: &str, sender: MessageSender, content: &str, timestamp: DateTime<Utc>) -> ChatMessage {
        ChatMessage {
            id: None,
            consultation_id: consultation_id.to_string(),
            sender,
            content: content.to_string(),
            language: LanguageCode::En,
            audio_url: None,
            timestamp,
        }
    }

    #[tokio::test]
    async fn patients_round_trip_through_the_store() {
        let db = DbClient::surreal_memory().await.unwrap();

        let created = db.create_patient(patient("Sita Devi")).await.unwrap();
        let key = created.key().unwrap();

        let fetched = db.get_patient(&key).await.unwrap().unwrap();

        assert_eq!(fetched.full_name, "Sita Devi");
        assert_eq!(fetched.preferred_language, LanguageCode::Hi);
        assert!(db.get_patient("no-such-patient").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn assessments_filter_by_patient_and_sort_newest_first() {
        let db = DbClient::surreal_memory().await.unwrap();
        let base = Utc::now();

        db.create_assessment(assessment("p1", TriageLevel::Routine, base)).await.unwrap();
        db.create_assessment(assessment("p1", TriageLevel::Urgent, base + Duration::seconds(30))).await.unwrap();
        db.create_assessment(assessment("p2", TriageLevel::Emergency, base + Duration::seconds(60))).await.unwrap();

        let history = db.assessments_for_patient("p1").await.unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].triage_level, TriageLevel::Urgent);
        assert_eq!(history[1].triage_level, TriageLevel::Routine);
        assert!(db.assessments_for_patient("p3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn transcripts_come_back_in_order() {
        let db = DbClient::surreal_memory().await.unwrap();
        let base = Utc::now();

        db.add_chat_message(message("c1", MessageSender::Doctor, "How can I help?", base + Duration::seconds(5))).await.unwrap();
        db.add_chat_message(message("c1", MessageSender::User, "I have a headache.", base)).await.unwrap();
        db.add_chat_message(message("c2", MessageSender::User, "Different consultation.", base)).await.unwrap();

        let transcript = db.consultation_messages("c1").await.unwrap();

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].sender, MessageSender::User);
        assert_eq!(transcript[1].sender, MessageSender::Doctor);
    }

    #[tokio::test]
    async fn provider_filters_are_case_insensitive_substrings() {
        let db = DbClient::surreal_memory().await.unwrap();
        db.seed_providers().await.unwrap();

        let gujarat = db.list_providers(Some("gujarat"), None).await.unwrap();
        assert_eq!(gujarat.len(), 1);
        assert_eq!(gujarat[0].name, "Dr. Amit Patel");

        let pediatrics = db.list_providers(None, Some("PEDIATRICS")).await.unwrap();
        assert_eq!(pediatrics.len(), 1);
        assert_eq!(pediatrics[0].name, "Dr. Priya Sharma");

        let both = db.list_providers(Some("rajasthan"), Some("general")).await.unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].name, "Dr. Rajesh Kumar");

        let none = db.list_providers(Some("goa"), None).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn unfiltered_provider_listing_sorts_by_name() {
        let db = DbClient::surreal_memory().await.unwrap();
        db.seed_providers().await.unwrap();

        let all = db.list_providers(None, None).await.unwrap();
        let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Dr. Amit Patel", "Dr. Priya Sharma", "Dr. Rajesh Kumar"]);
    }

    #[tokio::test]
    async fn seeding_twice_keeps_three_providers() {
        let db = DbClient::surreal_memory().await.unwrap();

        db.seed_providers().await.unwrap();
        db.seed_providers().await.unwrap();

        assert_eq!(db.count_providers().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn counts_track_stored_records() {
        let db = DbClient::surreal_memory().await.unwrap();
        let now = Utc::now();

        assert_eq!(db.count_patients().await.unwrap(), 0);

        db.create_patient(patient("Ram Singh")).await.unwrap();
        db.create_assessment(assessment("p1", TriageLevel::Emergency, now)).await.unwrap();
        db.create_assessment(assessment("p1", TriageLevel::Urgent, now)).await.unwrap();
        db.create_assessment(assessment("p2", TriageLevel::Urgent, now)).await.unwrap();

        let consultation = Consultation {
            id: None,
            patient_id: "p1".to_string(),
            consultation_type: ConsultationType::Basic,
            cost: 50,
            language: LanguageCode::En,
            audio_enabled: false,
            video_enabled: false,
            is_emergency: false,
            status: ConsultationStatus::Active,
            created_at: now,
            completed_at: None,
        };
        db.create_consultation(consultation).await.unwrap();

        assert_eq!(db.count_patients().await.unwrap(), 1);
        assert_eq!(db.count_assessments().await.unwrap(), 3);
        assert_eq!(db.count_assessments_with_level(TriageLevel::Emergency).await.unwrap(), 1);
        assert_eq!(db.count_assessments_with_level(TriageLevel::Urgent).await.unwrap(), 2);
        assert_eq!(db.count_assessments_with_level(TriageLevel::Routine).await.unwrap(), 0);
        assert_eq!(db.count_consultations().await.unwrap(), 1);
    }
}
