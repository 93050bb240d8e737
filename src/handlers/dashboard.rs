// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{common::error::AppError, config::AppState};

// GET /api/dashboard/metrics
// KPIs + dados dos três gráficos, recalculados a partir do export atual.
pub async fn get_metrics(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let metrics = app_state.dashboard_service.load_metrics().await?;

    Ok((StatusCode::OK, Json(metrics)))
}
