//! Emergency alerts and the national helpline directory.

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// One national helpline entry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Helpline {
    pub service: &'static str,
    pub number: &'static str,
}

/// The national emergency numbers surfaced alongside every alert.
pub const HELPLINES: [Helpline; 5] = [
    Helpline { service: "ambulance", number: "108" },
    Helpline { service: "police", number: "100" },
    Helpline { service: "fire", number: "101" },
    Helpline { service: "women_helpline", number: "1091" },
    Helpline { service: "child_helpline", number: "1098" },
];

/// Alert payload from a patient in distress.
#[derive(Debug, Clone, Deserialize)]
pub struct EmergencyAlertRequest {
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub symptoms: Option<String>,
}

/// Guidance returned for an emergency alert.
#[derive(Debug, Clone, Serialize)]
pub struct EmergencyGuidance {
    pub message: &'static str,
    pub emergency_number: &'static str,
    pub nearest_hospital: &'static str,
    pub helplines: &'static [Helpline],
}

/// Raise an emergency alert.
///
/// There is no dispatch integration; the alert is logged loudly for the
/// clinic operator and the caller gets the helpline directory back.
#[instrument(skip_all)]
pub fn alert(request: &EmergencyAlertRequest) -> EmergencyGuidance {
    let patient_id = request.patient_id.as_deref().unwrap_or("unknown");
    let symptoms = request.symptoms.as_deref().unwrap_or("not reported");

    warn!("EMERGENCY alert from patient `{patient_id}`: {symptoms}");

    EmergencyGuidance {
        message: "Emergency alert sent successfully",
        emergency_number: "108",
        nearest_hospital: "Contact local emergency services",
        helplines: &HELPLINES,
    }
}

// Tests.
