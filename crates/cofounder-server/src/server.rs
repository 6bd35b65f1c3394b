use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use cofounder_common::api::{GenerateRequest, GenerateResponse, GenerationResult, HealthResponse};
use cofounder_common::generator::TextGenerator;
use cofounder_common::prompt::build_prompt;
use cofounder_common::sections::split_sections;

use crate::error::ApiError;

type SharedState = Arc<AppState>;

pub struct AppState {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl AppState {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/generate", post(generate).fallback(method_not_allowed))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

async fn generate(
    State(state): State<SharedState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejected generate request body");
        ApiError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let result = run_generation(state.generator.as_deref(), &request)
        .await
        .inspect_err(|e| match e {
            ApiError::Validation(_) => warn!(error = %e, "invalid generate request"),
            ApiError::Auth(upstream) => error!(upstream = %upstream, "gemini rejected the API key"),
            ApiError::Generation(details) => error!(details = %details, "generation failed"),
            _ => error!(error = %e, "generate request failed"),
        })?;

    Ok(Json(result.into()))
}

/// Validate the request, call the backend once, and split the answer into sections.
async fn run_generation(
    generator: Option<&dyn TextGenerator>,
    request: &GenerateRequest,
) -> Result<GenerationResult, ApiError> {
    let idea = request.idea.trim();
    if idea.is_empty() {
        return Err(ApiError::empty_idea());
    }
    let generator = generator.ok_or(ApiError::Configuration)?;

    let mode = request.mode();
    let prompt = build_prompt(mode, idea);

    let started = Instant::now();
    let raw = generator.generate(&prompt).await?;
    let sections = split_sections(&raw);

    info!(
        %mode,
        idea_chars = idea.chars().count(),
        sections = sections.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "generation complete"
    );

    Ok(GenerationResult {
        raw,
        sections,
        mode,
    })
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
