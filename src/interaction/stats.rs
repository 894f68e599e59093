//! System-wide usage statistics.

use serde::Serialize;
use tracing::instrument;

use crate::{
    base::types::{Res, TriageLevel},
    service::db::DbClient,
};

/// Aggregate counters across the whole installation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SystemStats {
    pub total_patients: u64,
    pub total_assessments: u64,
    pub total_consultations: u64,
    pub emergency_cases: u64,
    pub urgent_cases: u64,
    pub routine_cases: u64,
    pub providers: u64,
}

/// Gather the current counters.
#[instrument(skip_all)]
pub async fn gather(db: &DbClient) -> Res<SystemStats> {
    let (total_patients, total_assessments, total_consultations, emergency_cases, urgent_cases, routine_cases, providers) = futures::try_join!(
        db.count_patients(),
        db.count_assessments(),
        db.count_consultations(),
        db.count_assessments_with_level(TriageLevel::Emergency),
        db.count_assessments_with_level(TriageLevel::Urgent),
        db.count_assessments_with_level(TriageLevel::Routine),
        db.count_providers(),
    )?;

    Ok(SystemStats {
        total_patients,
        total_assessments,
        total_consultations,
        emergency_cases,
        urgent_cases,
        routine_cases,
        providers,
    })
}

// Tests.

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::base::types::{Assessment, PrimarySymptom, Severity, SymptomOnset};

    fn assessment(level: TriageLevel) -> Assessment {
        Assessment {
            id: None,
            patient_id: "p1".to_string(),
            primary_symptom: PrimarySymptom::Cough,
            symptom_onset: SymptomOnset::ThreeToSevenDays,
            symptom_severity: Severity::Mild,
            additional_symptoms: vec![],
            pain_description: None,
            breathing_details: vec![],
            emergency_symptoms: vec![],
            triage_level: level,
            ai_recommendations: "Steam inhalation.".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn a_fresh_install_reports_zeros() {
        let db = DbClient::surreal_memory().await.unwrap();

        let stats = gather(&db).await.unwrap();

        assert_eq!(stats.total_patients, 0);
        assert_eq!(stats.total_assessments, 0);
        assert_eq!(stats.providers, 0);
    }

    #[tokio::test]
    async fn counters_split_assessments_by_triage_level() {
        let db = DbClient::surreal_memory().await.unwrap();
        db.seed_providers().await.unwrap();

        db.create_assessment(assessment(TriageLevel::Emergency)).await.unwrap();
        db.create_assessment(assessment(TriageLevel::Routine)).await.unwrap();
        db.create_assessment(assessment(TriageLevel::Routine)).await.unwrap();

        let stats = gather(&db).await.unwrap();

        assert_eq!(stats.total_assessments, 3);
        assert_eq!(stats.emergency_cases, 1);
        assert_eq!(stats.urgent_cases, 0);
        assert_eq!(stats.routine_cases, 2);
        assert_eq!(stats.providers, 3);
    }
}
