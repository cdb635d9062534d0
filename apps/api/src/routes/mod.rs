//! HTTP routes.
//!
//! ## Endpoint Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           /api                                          │
//! │                                                                         │
//! │  GET  /prodotti             catalog listing                             │
//! │  POST /prodotti             add a product                               │
//! │  POST /scontrino            checkout → receipt (persisted once)         │
//! │  GET  /scontrini/{user_id}  receipt history, newest first               │
//! │  POST /register             account creation (argon2)                   │
//! │  POST /login                credential check, echoes identity           │
//! │  GET  /profilo/{user_id}    profile view                                │
//! │  PUT  /profilo/{user_id}    address update + geocoding                  │
//! │  POST /newsletter           email signup                                │
//! │  POST /chat                 shop assistant (generative model)           │
//! │  GET  /health               liveness probe                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers are thin: parse, call into core/store, map the result onto the
//! Italian wire contract. All error payloads are `{"errore": "<message>"}`.

pub mod auth;
pub mod chat;
pub mod checkout;
pub mod newsletter;
pub mod products;
pub mod profile;
pub mod receipts;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the application router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/prodotti", get(products::list).post(products::create))
        .route("/api/scontrino", post(checkout::checkout))
        .route("/api/scontrini/:user_id", get(receipts::history))
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route(
            "/api/profilo/:user_id",
            get(profile::show).put(profile::update),
        )
        .route("/api/newsletter", post(newsletter::subscribe))
        .route("/api/chat", post(chat::chat))
        .route("/api/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
