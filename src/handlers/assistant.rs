// src/handlers/assistant.rs

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::assistant::ChatPayload};

// POST /api/assistant/chat
// Repassa o stream SSE do gateway de IA sem remontar as mensagens.
pub async fn chat(
    State(app_state): State<AppState>,
    Json(payload): Json<ChatPayload>,
) -> Result<Response, AppError> {
    payload.validate()?;

    // Sem snapshot completo não há contexto: qualquer falha aqui aborta a conversa
    let metrics = app_state.dashboard_service.load_metrics().await?;

    let upstream = app_state
        .assistant_service
        .stream_analysis(payload.messages, &metrics)
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(upstream.bytes_stream()),
    )
        .into_response())
}
