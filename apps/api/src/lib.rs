//! # Bottega API
//!
//! HTTP backend for the Bottega shop, exposed as a library so integration
//! tests can drive the router directly.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           API Server                                    │
//! │                                                                         │
//! │  Browser ───► HTTP (5000) ───► Routes ───► Core / Store ───► MongoDB   │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                    Geocoding + Generative model                         │
//! │                       (outbound collaborators)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
