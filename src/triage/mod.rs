//! Triage logic for the virtual doctor.
//!
//! This module contains the clinical decision-making pieces:
//! - Classifying symptom reports into emergency, urgent, and routine tiers
//! - Routing chat messages to canned replies or the language model
//! - Generating care recommendations for completed assessments

pub mod classifier;
pub mod recommend;
pub mod router;
