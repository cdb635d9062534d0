//! Registration and login routes.
//!
//! There is no session layer: a successful call simply echoes
//! `{id, username}` and the client keeps it. Passwords are stored only as
//! argon2 hashes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use bottega_core::types::User;
use bottega_core::validation::{validate_email, validate_password, validate_username};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    username: Option<String>,
    password: Option<String>,
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let (Some(username), Some(email), Some(password)) =
        (request.username, request.email, request.password)
    else {
        return Err(ApiError::Validation(
            "Username, email e password sono richiesti.".to_string(),
        ));
    };
    let username = username.trim().to_string();
    let email = email.trim().to_string();

    validate_username(&username).map_err(|e| ApiError::Validation(e.to_string()))?;
    validate_email(&email).map_err(|e| ApiError::Validation(e.to_string()))?;
    validate_password(&password).map_err(|e| ApiError::Validation(e.to_string()))?;

    if state.users.find_by_username(&username).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "L'utente '{username}' esiste già."
        )));
    }
    if state.users.find_by_email(&email).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "L'email '{email}' è già in uso."
        )));
    }

    let password_hash = hash_password(&password)?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        username: username.clone(),
        email,
        password_hash,
        address: None,
        created_at: Utc::now(),
    };
    state.users.insert(&user).await?;

    info!(user_id = %user.id, %username, "New account registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "messaggio": "Registrazione effettuata con successo!",
            "utente": { "id": user.id, "username": username }
        })),
    ))
}

/// POST /api/login
///
/// An unknown username and a wrong password produce the same generic
/// message, so the endpoint does not reveal which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let (Some(username), Some(password)) = (request.username, request.password) else {
        return Err(ApiError::Validation(
            "Username e password sono richiesti.".to_string(),
        ));
    };

    let user = state.users.find_by_username(username.trim()).await?;

    match user {
        Some(user) if verify_password(&password, &user.password_hash) => {
            info!(user_id = %user.id, username = %user.username, "Login successful");
            Ok(Json(json!({
                "messaggio": "Login effettuato con successo!",
                "utente": { "id": user.id, "username": user.username }
            })))
        }
        _ => Err(ApiError::Unauthorized(
            "Credenziali non valide. Riprova o crea un account.".to_string(),
        )),
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hashes a password for storage.
fn hash_password(password: &str) -> Result<String, ApiError> {
    use argon2::{
        password_hash::{rand_core::OsRng, SaltString},
        Argon2, PasswordHasher,
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {e}")))?;

    Ok(hash.to_string())
}

/// Verifies a password against its stored hash.
fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};

    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("password123").unwrap();
        assert_ne!(hash, "password123");
        assert!(verify_password("password123", &hash));
        assert!(!verify_password("qwerty", &hash));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!verify_password("password123", "not-a-phc-string"));
    }
}
