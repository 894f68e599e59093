//! Request handling and patient interactions for the bot.
//!
//! This module provides the operations behind the HTTP API:
//! - Registering patients and booking consultations
//! - Running symptom assessments through triage and recommendations
//! - Driving doctor chat and persisting transcripts
//! - Emergency guidance and system statistics

pub mod assessment;
pub mod chat;
pub mod consultation;
pub mod emergency;
pub mod patient;
pub mod stats;
