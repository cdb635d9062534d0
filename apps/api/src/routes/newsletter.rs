//! Newsletter signup route.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use bottega_core::types::NewsletterSubscription;
use bottega_core::validation::validate_email;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    email: Option<String>,
}

/// POST /api/newsletter
pub async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let Some(email) = request.email else {
        return Err(ApiError::Validation("L'email è richiesta.".to_string()));
    };
    let email = email.trim().to_lowercase();

    validate_email(&email).map_err(|e| ApiError::Validation(e.to_string()))?;

    if state.newsletter.find_by_email(&email).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "L'email '{email}' è già iscritta alla newsletter."
        )));
    }

    let subscription = NewsletterSubscription {
        id: Uuid::new_v4().to_string(),
        email: email.clone(),
        created_at: Utc::now(),
    };
    state.newsletter.insert(&subscription).await?;

    info!(%email, "Newsletter signup recorded");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "messaggio": "Iscrizione alla newsletter completata!" })),
    ))
}
