// Axum API Server Module
//
// Purpose: JSON endpoints around the recommendation pipeline
// The recommend endpoint never reports failure; it degrades to a static payload.

#[cfg(feature = "api")]
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use crate::composer::ComposerPolicy;

#[cfg(feature = "api")]
use crate::recommender::{NameRecommender, RecommendationResponse, Recommender};

#[cfg(feature = "api")]
use crate::reference::{ReferenceData, ReferenceSummary};

#[cfg(feature = "api")]
use crate::survey::normalize;

#[cfg(feature = "api")]
use crate::types::SurveyData;

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<dyn NameRecommender>,
    pub reference_summary: ReferenceSummary,
}

#[cfg(feature = "api")]
impl AppState {
    pub fn new(reference: Arc<ReferenceData>, policy: ComposerPolicy) -> Self {
        tracing::info!("Initializing recommender ({} candidates, other gender -> {:?})",
            policy.candidate_count, policy.other_gender_bucket);
        let reference_summary = reference.summary();
        let recommender = Arc::new(Recommender::new(reference, policy));
        Self {
            recommender,
            reference_summary,
        }
    }

    /// State around a caller-supplied pipeline
    pub fn with_recommender(recommender: Arc<dyn NameRecommender>, reference_summary: ReferenceSummary) -> Self {
        Self {
            recommender,
            reference_summary,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Name endpoints
        .route("/api/names/recommend", post(recommend_names))

        // Survey endpoints
        .route("/api/surveys", post(submit_survey))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "reference": state.reference_summary,
    }))
}

/// Body is parsed by hand so a malformed payload still gets the fallback payload
#[cfg(feature = "api")]
async fn recommend_names(
    State(state): State<AppState>,
    body: Bytes,
) -> Json<RecommendationResponse> {
    let survey: SurveyData = match serde_json::from_slice(&body) {
        Ok(survey) => survey,
        Err(e) => {
            tracing::warn!("Unreadable recommendation request, serving fallback: {}", e);
            return Json(RecommendationResponse::fallback());
        }
    };

    tracing::info!(
        "Name recommendation request: nationality={} gender={:?} role={:?}",
        survey.nationality, survey.gender, survey.family_role
    );

    // CPU-bound work: run in blocking thread pool
    let recommender = state.recommender.clone();
    let result = tokio::task::spawn_blocking(move || recommender.recommend(&survey)).await;

    match result {
        Ok(Ok(recommendation)) => Json(RecommendationResponse::from(recommendation)),
        Ok(Err(e)) => {
            tracing::error!("Name recommendation error, serving fallback: {:#}", e);
            Json(RecommendationResponse::fallback())
        }
        Err(e) => {
            tracing::error!("Recommendation task join error, serving fallback: {}", e);
            Json(RecommendationResponse::fallback())
        }
    }
}

#[cfg(feature = "api")]
async fn submit_survey(body: Bytes) -> Result<Json<serde_json::Value>, AppError> {
    let survey: SurveyData = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("Survey API error: {}", e);
        AppError::BadRequest("Failed to process survey data".to_string())
    })?;

    let normalized = normalize(&survey, chrono::Utc::now());
    tracing::info!("Survey data received and normalized for {}", normalized.english_name);

    Ok(Json(serde_json::json!({
        "success": true,
        "data": normalized,
    })))
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
enum AppError {
    BadRequest(String),
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
