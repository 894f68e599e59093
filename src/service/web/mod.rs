//! The HTTP API surface.
//!
//! This module binds the interaction layer to axum routes. Handlers own the
//! resource-existence checks (404s) and payload validation (400s); the
//! interaction functions they call do the orchestration. Errors serialize as
//! `{"error": …}` bodies, matching what the web and voice frontends expect.

use anyhow::anyhow;
use axum::{
    Json, Router, async_trait,
    extract::{FromRequest, Path, Query, Request, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info, instrument};

use crate::{
    base::{
        config::Config,
        locale::LanguageCode,
        types::{Assessment, ChatMessage, Consultation, ConsultationType, HealthcareProvider, MessageSender, Patient, PrimarySymptom, Severity, TriageLevel, Void},
    },
    interaction::{
        assessment::{self, AssessmentRequest},
        chat::{self, ChatReply, ChatRequest},
        consultation::{self, StartConsultationRequest},
        emergency::{self, EmergencyAlertRequest, EmergencyGuidance},
        patient::{self, RegisterPatientRequest},
        stats::{self, SystemStats},
    },
    service::{db::DbClient, llm::LlmClient, speech::SpeechClient},
};

// Server.

/// Everything a request handler can reach.
#[derive(Clone)]
struct AppState {
    config: Config,
    db: DbClient,
    llm: LlmClient,
    speech: SpeechClient,
}

/// The HTTP API server.
#[derive(Clone)]
pub struct ApiServer {
    state: AppState,
}

impl ApiServer {
    /// Create a new API server from the application's clients.
    pub fn new(config: Config, db: DbClient, llm: LlmClient, speech: SpeechClient) -> Self {
        Self {
            state: AppState { config, db, llm, speech },
        }
    }

    /// Build the route table.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/api/register", post(register_patient))
            .route("/api/patient/:patient_id", get(get_patient))
            .route("/api/assess", post(create_assessment))
            .route("/api/assessments/:patient_id", get(patient_assessments))
            .route("/api/chat", post(chat_with_doctor))
            .route("/api/consultation", post(start_consultation))
            .route("/api/consultation/:consultation_id/messages", get(consultation_messages))
            .route("/api/providers", get(list_providers))
            .route("/api/emergency", post(emergency_alert))
            .route("/api/stats", get(system_stats))
            .route("/chat", post(proxy_chat))
            .route("/speak", post(speak))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Bind the configured address and serve until shutdown.
    #[instrument(skip_all)]
    pub async fn start(&self) -> Void {
        let listener = TcpListener::bind(self.state.config.http_addr.as_str()).await?;

        info!("Listening on `{}`.", self.state.config.http_addr);

        axum::serve(listener, self.router()).with_graceful_shutdown(shutdown_signal()).await?;

        Ok(())
    }
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

// Errors.

/// Errors surfaced by the HTTP API.
#[derive(Debug)]
pub enum ApiError {
    /// The request payload failed validation.
    Validation(String),
    /// A referenced record does not exist.
    NotFound(&'static str),
    /// An upstream delegate failed on a surface with no local fallback.
    Upstream(String),
    /// Anything else. The detail is logged, not leaked.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message.to_string()),
            Self::Upstream(message) => (StatusCode::BAD_GATEWAY, message),
            Self::Internal(err) => {
                error!("Internal error while serving a request: {err:#}");

                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// JSON body extractor that reports rejections as API validation errors
/// instead of axum's plain-text defaults.
struct AppJson<T>(T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        Ok(Self(value))
    }
}

// Response shapes.

#[derive(Debug, Serialize)]
struct RegisterResponse {
    message: &'static str,
    patient_id: String,
}

#[derive(Debug, Serialize)]
struct PatientView {
    id: String,
    full_name: String,
    age: u32,
    gender: String,
    phone: Option<String>,
    location: Option<String>,
    preferred_language: LanguageCode,
    medical_conditions: Vec<String>,
    medications: Option<String>,
    smoking: Option<String>,
    alcohol: Option<String>,
    exercise: Option<String>,
    pregnancy: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<Patient> for PatientView {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.key().unwrap_or_default(),
            full_name: patient.full_name,
            age: patient.age,
            gender: patient.gender,
            phone: patient.phone,
            location: patient.location,
            preferred_language: patient.preferred_language,
            medical_conditions: patient.medical_conditions,
            medications: patient.medications,
            smoking: patient.smoking,
            alcohol: patient.alcohol,
            exercise: patient.exercise,
            pregnancy: patient.pregnancy,
            created_at: patient.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct AssessmentOutcome {
    assessment_id: String,
    triage_level: TriageLevel,
    recommendations: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct AssessmentSummary {
    id: String,
    primary_symptom: PrimarySymptom,
    symptom_severity: Severity,
    triage_level: TriageLevel,
    created_at: DateTime<Utc>,
}

impl From<Assessment> for AssessmentSummary {
    fn from(assessment: Assessment) -> Self {
        Self {
            id: assessment.key().unwrap_or_default(),
            primary_symptom: assessment.primary_symptom,
            symptom_severity: assessment.symptom_severity,
            triage_level: assessment.triage_level,
            created_at: assessment.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct ConsultationStarted {
    consultation_id: String,
    cost: u32,
    #[serde(rename = "type")]
    consultation_type: ConsultationType,
    features: ConsultationFeatures,
}

#[derive(Debug, Serialize)]
struct ConsultationFeatures {
    audio: bool,
    video: bool,
    emergency: bool,
}

impl From<Consultation> for ConsultationStarted {
    fn from(consultation: Consultation) -> Self {
        Self {
            consultation_id: consultation.key().unwrap_or_default(),
            cost: consultation.cost,
            consultation_type: consultation.consultation_type,
            features: ConsultationFeatures {
                audio: consultation.audio_enabled,
                video: consultation.video_enabled,
                emergency: consultation.is_emergency,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct MessageView {
    id: String,
    sender: MessageSender,
    content: String,
    language: LanguageCode,
    timestamp: DateTime<Utc>,
}

impl From<ChatMessage> for MessageView {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.key().unwrap_or_default(),
            sender: message.sender,
            content: message.content,
            language: message.language,
            timestamp: message.timestamp,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProviderFilter {
    location: Option<String>,
    specialization: Option<String>,
}

#[derive(Debug, Serialize)]
struct ProviderView {
    id: String,
    name: String,
    specialization: String,
    location: String,
    phone: Option<String>,
    email: Option<String>,
    availability: Option<String>,
}

impl From<HealthcareProvider> for ProviderView {
    fn from(provider: HealthcareProvider) -> Self {
        Self {
            id: provider.key().unwrap_or_default(),
            name: provider.name,
            specialization: provider.specialization,
            location: provider.location,
            phone: provider.phone,
            email: provider.email,
            availability: provider.availability,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProxyChatRequest {
    message: String,
}

#[derive(Debug, Serialize)]
struct ProxyChatReply {
    reply: String,
}

#[derive(Debug, Deserialize)]
struct SpeakRequest {
    text: String,
}

// Handlers.

/// `GET /`:service index.
async fn index() -> Json<Value> {
    Json(json!({
        "message": "Sehat Bot API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "active",
        "features": [
            "Virtual Doctor AI",
            "Multilingual Support",
            "Voice Assistant",
            "Cost-based Pricing",
            "Emergency Detection"
        ],
    }))
}

/// `POST /api/register`:register a patient.
#[instrument(skip_all)]
async fn register_patient(State(state): State<AppState>, AppJson(request): AppJson<RegisterPatientRequest>) -> Result<impl IntoResponse, ApiError> {
    request.validate().map_err(ApiError::Validation)?;

    let patient = patient::register(request, &state.db, &state.config).await?;
    let patient_id = patient.key().ok_or_else(|| anyhow!("Stored patient is missing its id."))?;

    let response = RegisterResponse {
        message: "Patient registered successfully",
        patient_id,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /api/patient/{patient_id}`:fetch one patient record.
#[instrument(skip_all)]
async fn get_patient(State(state): State<AppState>, Path(patient_id): Path<String>) -> Result<Json<PatientView>, ApiError> {
    let patient = state.db.get_patient(&patient_id).await?.ok_or(ApiError::NotFound("Patient not found"))?;

    Ok(Json(patient.into()))
}

/// `POST /api/assess`:run a symptom assessment.
#[instrument(skip_all)]
async fn create_assessment(State(state): State<AppState>, AppJson(request): AppJson<AssessmentRequest>) -> Result<impl IntoResponse, ApiError> {
    let patient = state.db.get_patient(&request.patient_id).await?.ok_or(ApiError::NotFound("Patient not found"))?;

    let assessment = assessment::submit(&patient, request, &state.db, &state.llm, &state.config).await?;
    let assessment_id = assessment.key().ok_or_else(|| anyhow!("Stored assessment is missing its id."))?;

    let outcome = AssessmentOutcome {
        assessment_id,
        triage_level: assessment.triage_level,
        recommendations: assessment.ai_recommendations,
        created_at: assessment.created_at,
    };

    Ok((StatusCode::CREATED, Json(outcome)))
}

/// `GET /api/assessments/{patient_id}`:assessment history, newest first.
#[instrument(skip_all)]
async fn patient_assessments(State(state): State<AppState>, Path(patient_id): Path<String>) -> Result<Json<Vec<AssessmentSummary>>, ApiError> {
    let assessments = state.db.assessments_for_patient(&patient_id).await?;

    Ok(Json(assessments.into_iter().map(Into::into).collect()))
}

/// `POST /api/chat`:one doctor chat turn.
#[instrument(skip_all)]
async fn chat_with_doctor(State(state): State<AppState>, AppJson(request): AppJson<ChatRequest>) -> Result<Json<ChatReply>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::Validation("Message is required".to_string()));
    }

    if let Some(consultation_id) = &request.consultation_id {
        state.db.get_consultation(consultation_id).await?.ok_or(ApiError::NotFound("Consultation not found"))?;
    }

    let reply = chat::respond(request, &state.db, &state.llm, &state.config).await?;

    Ok(Json(reply))
}

/// `POST /api/consultation`:book a consultation.
#[instrument(skip_all)]
async fn start_consultation(State(state): State<AppState>, AppJson(request): AppJson<StartConsultationRequest>) -> Result<impl IntoResponse, ApiError> {
    state.db.get_patient(&request.patient_id).await?.ok_or(ApiError::NotFound("Patient not found"))?;

    let consultation = consultation::begin(request, &state.db, &state.config).await?;
    let started = ConsultationStarted::from(consultation);

    Ok((StatusCode::CREATED, Json(started)))
}

/// `GET /api/consultation/{consultation_id}/messages`:ordered transcript.
///
/// An unknown consultation yields an empty list rather than a 404, matching
/// the frontends that poll this before the first message lands.
#[instrument(skip_all)]
async fn consultation_messages(State(state): State<AppState>, Path(consultation_id): Path<String>) -> Result<Json<Vec<MessageView>>, ApiError> {
    let messages = state.db.consultation_messages(&consultation_id).await?;

    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

/// `GET /api/providers`:the provider directory, optionally filtered.
#[instrument(skip_all)]
async fn list_providers(State(state): State<AppState>, Query(filter): Query<ProviderFilter>) -> Result<Json<Vec<ProviderView>>, ApiError> {
    let providers = state.db.list_providers(filter.location.as_deref(), filter.specialization.as_deref()).await?;

    Ok(Json(providers.into_iter().map(Into::into).collect()))
}

/// `POST /api/emergency`:raise an emergency alert.
#[instrument(skip_all)]
async fn emergency_alert(AppJson(request): AppJson<EmergencyAlertRequest>) -> Json<EmergencyGuidance> {
    Json(emergency::alert(&request))
}

/// `GET /api/stats`:system-wide counters.
#[instrument(skip_all)]
async fn system_stats(State(state): State<AppState>) -> Result<Json<SystemStats>, ApiError> {
    Ok(Json(stats::gather(&state.db).await?))
}

/// `POST /chat`:proxy surface for the voice frontend.
#[instrument(skip_all)]
async fn proxy_chat(State(state): State<AppState>, AppJson(request): AppJson<ProxyChatRequest>) -> Result<Json<ProxyChatReply>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::Validation("Message is required".to_string()));
    }

    let reply = chat::proxy_reply(&request.message, &state.llm, &state.config).await;

    Ok(Json(ProxyChatReply { reply }))
}

/// `POST /speak`:synthesize spoken audio for a reply.
///
/// This is the one surface that exposes delegate failure to the caller;
/// there is no canned fallback for audio.
#[instrument(skip_all)]
async fn speak(State(state): State<AppState>, AppJson(request): AppJson<SpeakRequest>) -> Result<impl IntoResponse, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::Validation("Text is required".to_string()));
    }

    let audio = state
        .speech
        .synthesize(&request.text)
        .await
        .map_err(|err| ApiError::Upstream(format!("Speech synthesis failed: {err:#}")))?;

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio))
}
