//! Analysis handler

use axum::{extract::State, Json};

use crate::logic::analysis::{AnalysisResult, PodFailureData};
use crate::{AppError, AppResult, AppState};

/// Analyze the captured logs of a failed pod
pub async fn analyze(
    State(state): State<AppState>,
    Json(data): Json<Option<PodFailureData>>,
) -> AppResult<Json<AnalysisResult>> {
    let data = data
        .ok_or_else(|| AppError::InvalidInput("Invalid pod failure data provided".to_string()))?;
    let pod = data
        .pod
        .as_ref()
        .ok_or_else(|| AppError::InvalidInput("Invalid pod failure data: missing pod".to_string()))?;
    let logs = data
        .logs
        .as_deref()
        .ok_or_else(|| AppError::InvalidInput("Invalid pod failure data: missing logs".to_string()))?;

    tracing::info!("Received analysis request for pod '{}'", pod.metadata.name);

    let result = state.engine.analyze(logs);

    tracing::info!(
        "Analysis complete for pod '{}': {} significant events",
        pod.metadata.name,
        result.summary.significant_events
    );

    Ok(Json(result))
}

// ============================================================================
// TESTS
// ============================================================================
