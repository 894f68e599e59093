//! Runtime services and shared state for the bot.

use tracing::instrument;

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    service::{db::DbClient, llm::LlmClient, speech::SpeechClient, web::ApiServer},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the database, language model, and speech clients, plus
/// the HTTP server built on top of them. It is designed to be trivially
/// cloneable, allowing it to be passed around without the need for `Arc` or
/// `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The database client instance.
    pub db: DbClient,
    /// The language model client instance.
    pub llm: LlmClient,
    /// The speech synthesis client instance.
    pub speech: SpeechClient,
    /// The HTTP API server.
    pub api: ApiServer,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        // Initialize the database and make sure the provider directory is populated.
        let db = DbClient::surreal(&config).await?;
        db.seed_providers().await?;

        // Initialize the OpenAI-backed clients.
        let llm = LlmClient::openai(&config);
        let speech = SpeechClient::openai(&config);

        // Initialize the HTTP server on top of them.
        let api = ApiServer::new(config.clone(), db.clone(), llm.clone(), speech.clone());

        Ok(Self { config, db, llm, speech, api })
    }

    pub async fn start(&self) -> Void {
        self.api.start().await
    }
}
