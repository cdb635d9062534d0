//! Catalog routes: listing and product creation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use bottega_core::money::Money;
use bottega_core::types::Product;
use bottega_core::validation::{validate_category, validate_price_cents, validate_product_name};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// A catalog product on the wire (prices in euros).
#[derive(Debug, Serialize)]
pub struct ProductDto {
    pub id: String,
    pub nome: String,
    pub prezzo_lordo: f64,
    pub categoria: String,
}

impl From<&Product> for ProductDto {
    fn from(product: &Product) -> Self {
        ProductDto {
            id: product.id.clone(),
            nome: product.name.clone(),
            prezzo_lordo: product.gross_price().to_euros(),
            categoria: product.category.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewProductRequest {
    nome: Option<String>,
    prezzo_lordo: Option<f64>,
    categoria: Option<String>,
}

/// GET /api/prodotti
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ProductDto>>> {
    let products = state.products.list().await?;
    Ok(Json(products.iter().map(ProductDto::from).collect()))
}

/// POST /api/prodotti
///
/// `nome` and `prezzo_lordo` are required; `categoria` defaults to "Altro".
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<NewProductRequest>,
) -> ApiResult<(StatusCode, Json<ProductDto>)> {
    let (Some(nome), Some(prezzo_lordo)) = (request.nome, request.prezzo_lordo) else {
        return Err(ApiError::Validation("Dati mancanti.".to_string()));
    };
    let categoria = request.categoria.unwrap_or_else(|| "Altro".to_string());

    validate_product_name(&nome).map_err(|e| ApiError::Validation(e.to_string()))?;
    validate_category(&categoria).map_err(|e| ApiError::Validation(e.to_string()))?;

    let gross = Money::from_euros(prezzo_lordo)
        .map_err(|_| ApiError::Validation("prezzo_lordo non valido.".to_string()))?;
    validate_price_cents(gross.cents()).map_err(|e| ApiError::Validation(e.to_string()))?;

    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: nome.trim().to_string(),
        gross_price_cents: gross.cents(),
        category: categoria.trim().to_string(),
        created_at: Utc::now(),
    };

    state.products.insert(&product).await?;
    info!(product_id = %product.id, name = %product.name, "Product added to catalog");

    Ok((StatusCode::CREATED, Json(ProductDto::from(&product))))
}
