//! Consultation booking and billing.

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{
    base::{
        config::Config,
        locale::LanguageCode,
        types::{Consultation, ConsultationStatus, ConsultationType, Res},
    },
    service::db::DbClient,
};

/// Booking payload for a new consultation.
#[derive(Debug, Clone, Deserialize)]
pub struct StartConsultationRequest {
    pub patient_id: String,
    #[serde(default, rename = "type")]
    pub consultation_type: ConsultationType,
    #[serde(default)]
    pub language: Option<LanguageCode>,
    #[serde(default)]
    pub audio_enabled: bool,
    #[serde(default)]
    pub video_enabled: bool,
    #[serde(default)]
    pub is_emergency: bool,
}

/// Price a consultation in rupees.
///
/// An audio add-on bills at the premium tier. An emergency, whether flagged
/// or booked as the emergency type, overrides the tier price. Video
/// conferencing stacks on top of whichever tier applies.
pub fn consultation_cost(config: &Config, consultation_type: ConsultationType, audio_enabled: bool, video_enabled: bool, is_emergency: bool) -> u32 {
    let mut cost = config.price_basic;

    if consultation_type == ConsultationType::Premium || audio_enabled {
        cost = config.price_premium;
    }

    if is_emergency || consultation_type == ConsultationType::Emergency {
        cost = config.price_emergency;
    }

    if video_enabled {
        cost += config.price_video_addon;
    }

    cost
}

/// Book a consultation for a registered patient.
#[instrument(skip_all)]
pub async fn begin(request: StartConsultationRequest, db: &DbClient, config: &Config) -> Res<Consultation> {
    let cost = consultation_cost(config, request.consultation_type, request.audio_enabled, request.video_enabled, request.is_emergency);

    let consultation = Consultation {
        id: None,
        patient_id: request.patient_id,
        consultation_type: request.consultation_type,
        cost,
        language: request.language.unwrap_or(config.default_language),
        audio_enabled: request.audio_enabled,
        video_enabled: request.video_enabled,
        is_emergency: request.is_emergency,
        status: ConsultationStatus::Active,
        created_at: Utc::now(),
        completed_at: None,
    };

    let consultation = db.create_consultation(consultation).await?;

    info!("Started a `{}` consultation `{}` costing ₹{}.", consultation.consultation_type, consultation.key().unwrap_or_default(), consultation.cost);

    Ok(consultation)
}

// Tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::base::config::ConfigInner;

    fn test_config() -> Config {
        Config {
            inner: Arc::new(ConfigInner::default()),
        }
    }

    fn cost(consultation_type: ConsultationType, audio: bool, video: bool, emergency: bool) -> u32 {
        consultation_cost(&test_config(), consultation_type, audio, video, emergency)
    }

    #[test]
    fn basic_consultations_cost_the_base_rate() {
        assert_eq!(cost(ConsultationType::Basic, false, false, false), 50);
    }

    #[test]
    fn premium_and_audio_bill_at_the_premium_tier() {
        assert_eq!(cost(ConsultationType::Premium, false, false, false), 80);
        assert_eq!(cost(ConsultationType::Basic, true, false, false), 80);
        assert_eq!(cost(ConsultationType::Premium, true, false, false), 80);
    }

    #[test]
    fn emergencies_override_the_tier_price() {
        assert_eq!(cost(ConsultationType::Basic, false, false, true), 200);
        assert_eq!(cost(ConsultationType::Premium, true, false, true), 200);
        assert_eq!(cost(ConsultationType::Emergency, false, false, false), 200);
    }

    #[test]
    fn video_stacks_on_top_of_any_tier() {
        assert_eq!(cost(ConsultationType::Basic, false, true, false), 100);
        assert_eq!(cost(ConsultationType::Premium, false, true, false), 130);
        assert_eq!(cost(ConsultationType::Basic, false, true, true), 250);
    }

    #[tokio::test]
    async fn booking_persists_an_active_consultation_with_its_price() {
        let db = DbClient::surreal_memory().await.unwrap();

        let request = StartConsultationRequest {
            patient_id: "p1".to_string(),
            consultation_type: ConsultationType::Premium,
            language: Some(LanguageCode::Hi),
            audio_enabled: false,
            video_enabled: true,
            is_emergency: false,
        };

        let consultation = begin(request, &db, &test_config()).await.unwrap();

        assert_eq!(consultation.cost, 130);
        assert_eq!(consultation.status, ConsultationStatus::Active);
        assert_eq!(consultation.language, LanguageCode::Hi);
        assert!(consultation.completed_at.is_none());

        let stored = db.get_consultation(&consultation.key().unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.cost, 130);
    }
}
