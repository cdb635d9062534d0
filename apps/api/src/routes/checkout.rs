//! Checkout route.
//!
//! The one route with a side effect worth being careful about: a receipt is
//! computed by the calculator and persisted EXACTLY ONCE on success. Any
//! failure - incomplete item, unknown product, calculation error - aborts
//! before the insert, so no partial receipt ever reaches the store.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::{error, info};

use bottega_core::types::CartItem;
use bottega_core::validation::validate_category;

use crate::error::{ApiError, ApiResult};
use crate::routes::receipts::ReceiptDto;
use crate::state::AppState;

/// One requested cart line. Every field is required: an item missing its
/// `categoria` (or any other field) is incomplete and rejected before the
/// calculator runs.
#[derive(Debug, Deserialize)]
pub struct CartLineRequest {
    pub id: String,
    #[allow(dead_code)]
    pub nome: String,
    #[allow(dead_code)]
    pub prezzo_lordo: f64,
    pub categoria: String,
    pub quantita: i64,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub user_id: String,
    pub carrello: Vec<CartLineRequest>,
}

/// POST /api/scontrino
///
/// The caller sends the full item shape (`id`, `nome`, `prezzo_lordo`,
/// `categoria`, `quantita`), but the catalog is authoritative: each line is
/// resolved by `id` and priced from the stored gross price and category,
/// never from the caller-supplied ones.
pub async fn checkout(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> ApiResult<Json<ReceiptDto>> {
    // Manual deserialization so an incomplete item is a 400, not a framework
    // rejection with a different shape.
    let request: CheckoutRequest = serde_json::from_value(payload)
        .map_err(|e| ApiError::Validation(format!("Dati del carrello non validi: {e}")))?;

    if request.carrello.is_empty() {
        return Err(bottega_core::error::CoreError::EmptyCart.into());
    }

    let mut cart = Vec::with_capacity(request.carrello.len());
    for line in &request.carrello {
        validate_category(&line.categoria).map_err(|e| ApiError::Validation(e.to_string()))?;

        let product = state
            .products
            .get(&line.id)
            .await?
            .ok_or_else(|| bottega_core::error::CoreError::ProductNotFound(line.id.clone()))
            .map_err(ApiError::from)?;

        cart.push(CartItem::from_product(&product, line.quantita));
    }

    let receipt = state.calculator.generate(&cart, &request.user_id)?;

    if let Err(e) = state.receipts.insert(&receipt).await {
        // Computed but not persisted: log the full receipt so the amounts
        // are recoverable, then fail the request.
        error!(
            receipt_id = %receipt.id,
            user_id = %receipt.user_id,
            grand_total_cents = receipt.grand_total_cents,
            tax_total_cents = receipt.tax_total_cents,
            lines = receipt.lines.len(),
            %e,
            "Receipt computed but persistence failed"
        );
        return Err(ApiError::Internal(e.to_string()));
    }

    info!(
        receipt_id = %receipt.id,
        user_id = %receipt.user_id,
        grand_total_cents = receipt.grand_total_cents,
        "Receipt generated and persisted"
    );

    Ok(Json(ReceiptDto::from(&receipt)))
}
