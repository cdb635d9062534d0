//! Shop-assistant chat route.
//!
//! Intent understanding is entirely delegated to the hosted model; the
//! route only validates that a message is present and forwards it.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    messaggio: Option<String>,
}

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let Some(messaggio) = request.messaggio.filter(|m| !m.trim().is_empty()) else {
        return Err(ApiError::Validation("Il messaggio è richiesto.".to_string()));
    };

    let Some(assistant) = state.assistant.as_ref() else {
        return Err(ApiError::Unavailable(
            "L'assistente non è configurato.".to_string(),
        ));
    };

    let risposta = assistant.ask(messaggio.trim()).await.map_err(|e| {
        warn!(%e, "Assistant call failed");
        ApiError::Upstream("L'assistente non è al momento raggiungibile.".to_string())
    })?;

    Ok(Json(json!({ "risposta": risposta })))
}
