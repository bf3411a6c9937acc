use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{Mode, RecommendPayload, RecommendationRequest, RecommendationResponse},
    services::{fallback, orchestrator, orchestrator::RecommendationOutcome},
    state::AppState,
};

/// Handler for the recommend endpoint.
///
/// Validation failures (bad body, bad mode) and a missing generation
/// credential are the only non-200 answers. Once validation passes, the
/// orchestrator always produces items; degraded output is flagged via the
/// `note` field instead of an error status.
pub async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendPayload>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(payload) = payload
        .map_err(|rejection| AppError::InvalidInput(format!("Invalid JSON body: {}", rejection.body_text())))?;

    let mode = payload
        .mode
        .as_deref()
        .and_then(Mode::parse)
        .ok_or_else(|| AppError::InvalidInput("mode must be 'movie' or 'book'".to_string()))?;

    let generator = state
        .generator
        .clone()
        .ok_or_else(|| AppError::Configuration("GEMINI_API_KEY is not set".to_string()))?;

    let request = RecommendationRequest::from_payload(mode, payload);

    tracing::info!(mode = %mode, "Recommendation request accepted");

    let response = match orchestrator::run(generator, state.posters.clone(), &request).await {
        RecommendationOutcome::Generated(items) => RecommendationResponse {
            mode,
            items,
            note: None,
            error: None,
        },
        RecommendationOutcome::Fallback { items, error } => RecommendationResponse {
            mode,
            items,
            note: Some(fallback::FALLBACK_NOTE.to_string()),
            error: Some(error.to_string()),
        },
    };

    Ok(Json(response))
}
