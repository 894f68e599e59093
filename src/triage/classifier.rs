//! Triage classification for symptom reports.

use crate::base::types::{EmergencySymptom, PrimarySymptom, Severity, SymptomOnset, SymptomReport, TriageLevel};

/// Assign a triage level to a symptom report.
///
/// Rules are checked in order and the first match wins:
/// 1. Any red-flag symptom, or a very severe complaint, is an emergency.
/// 2. Known bad combinations are urgent: severe chest pain, breathing
///    difficulty at any severity, severe fever or abdominal pain, and
///    anything severe that started today.
/// 3. Severity alone can still escalate: severe complaints are urgent, as
///    are moderate forms of fever, chest pain, and abdominal pain.
/// 4. Everything else is routine.
pub fn classify(report: &SymptomReport) -> TriageLevel {
    if has_red_flag(report) || report.severity == Severity::VerySevere {
        return TriageLevel::Emergency;
    }

    if is_urgent_combination(report) || is_urgent_severity(report) {
        return TriageLevel::Urgent;
    }

    TriageLevel::Routine
}

/// Whether any red-flag checkbox other than "none" was ticked.
fn has_red_flag(report: &SymptomReport) -> bool {
    report.emergency_symptoms.iter().any(|symptom| *symptom != EmergencySymptom::None)
}

/// Symptom and onset combinations that need same-day attention.
fn is_urgent_combination(report: &SymptomReport) -> bool {
    let severe = report.severity == Severity::Severe;

    (report.primary_symptom == PrimarySymptom::ChestPain && severe)
        || report.primary_symptom == PrimarySymptom::BreathingDifficulty
        || (severe && matches!(report.primary_symptom, PrimarySymptom::Fever | PrimarySymptom::AbdominalPain))
        || (report.onset == SymptomOnset::Today && severe)
}

/// Severity-only escalation rules.
fn is_urgent_severity(report: &SymptomReport) -> bool {
    report.severity == Severity::Severe
        || (report.severity == Severity::Moderate
            && matches!(
                report.primary_symptom,
                PrimarySymptom::Fever | PrimarySymptom::ChestPain | PrimarySymptom::AbdominalPain
            ))
}

// Tests.
