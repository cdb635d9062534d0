//! Profile routes: view and address update with geocoding.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use bottega_core::types::{Address, GeoPoint, User};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// A profile on the wire. The password hash never leaves the server.
#[derive(Debug, Serialize)]
pub struct ProfileDto {
    pub id: String,
    pub username: String,
    pub email: String,
    pub indirizzo: Option<String>,
    pub posizione: Option<PositionDto>,
}

#[derive(Debug, Serialize)]
pub struct PositionDto {
    pub lat: f64,
    pub lon: f64,
}

impl From<&User> for ProfileDto {
    fn from(user: &User) -> Self {
        let (indirizzo, posizione) = match &user.address {
            Some(address) => (
                Some(address.line.clone()),
                address.location.map(|p| PositionDto {
                    lat: p.latitude,
                    lon: p.longitude,
                }),
            ),
            None => (None, None),
        };

        ProfileDto {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            indirizzo,
            posizione,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    indirizzo: Option<String>,
}

/// GET /api/profilo/{user_id}
pub async fn show(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<ProfileDto>> {
    let user = state
        .users
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Utente con ID {user_id} non trovato.")))?;

    Ok(Json(ProfileDto::from(&user)))
}

/// PUT /api/profilo/{user_id}
///
/// Updates the profile address. The address is geocoded through the
/// external service and stored together with the resolved coordinates;
/// when the service has no match or is unreachable the address is stored
/// ungeocoded rather than lost.
pub async fn update(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileDto>> {
    let Some(indirizzo) = request.indirizzo else {
        return Err(ApiError::Validation("L'indirizzo è richiesto.".to_string()));
    };
    let indirizzo = indirizzo.trim().to_string();
    if indirizzo.is_empty() {
        return Err(ApiError::Validation("L'indirizzo è richiesto.".to_string()));
    }

    let user = state
        .users
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Utente con ID {user_id} non trovato.")))?;

    let location = resolve_location(&state, &indirizzo).await;

    let address = Address {
        line: indirizzo,
        location,
    };
    state.users.update_address(&user.id, &address).await?;

    info!(
        user_id = %user.id,
        geocoded = address.location.is_some(),
        "Profile address updated"
    );

    let updated = User {
        address: Some(address),
        ..user
    };
    Ok(Json(ProfileDto::from(&updated)))
}

/// Geocodes the address when a client is configured. Lookup failures are
/// logged and degrade to "no coordinates"; they never fail the update.
async fn resolve_location(state: &AppState, address: &str) -> Option<GeoPoint> {
    let geocoder = state.geocoder.as_ref()?;
    match geocoder.geocode(address).await {
        Ok(location) => location,
        Err(e) => {
            warn!(%e, "Geocoding failed, storing address without coordinates");
            None
        }
    }
}
