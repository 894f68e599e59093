//! Library root for `sehat-bot`.
//!
//! Sehat-bot is an OpenAI-powered telehealth backend for rural clinics designed to:
//! - Register patients and keep their assessment history
//! - Triage symptom reports into emergency, urgent, and routine tiers
//! - Answer health questions in ten Indian languages, with canned replies for common intents
//! - Book consultations with tier-based pricing and keep their transcripts
//! - Speak replies aloud through OpenAI text-to-speech
//!
//! The backend serves a REST API over axum, stores records in SurrealDB,
//! and delegates open-ended questions to OpenAI. The architecture is built
//! around extensible traits that allow for different implementations of each
//! service.

pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;
pub mod triage;

use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the sehat-bot runtime:
/// - Initializes the crypto provider
/// - Creates the runtime context with database, LLM, and speech clients
/// - Starts the HTTP API server
pub async fn start(config: Config) -> Void {
    info!("Starting sehat-bot ...");

    // Start the crypto provider.
    crypto::ring::default_provider().install_default().unwrap();

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
