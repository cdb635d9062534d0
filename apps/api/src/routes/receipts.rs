//! Receipt history route and the receipt wire representation.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use bottega_core::money::Money;
use bottega_core::types::{Receipt, ReceiptLine};

use crate::error::ApiResult;
use crate::state::AppState;

/// One itemized line on the wire.
#[derive(Debug, Serialize)]
pub struct ReceiptLineDto {
    pub nome_prodotto: String,
    pub quantita: i64,
    pub prezzo_totale: f64,
}

impl From<&ReceiptLine> for ReceiptLineDto {
    fn from(line: &ReceiptLine) -> Self {
        ReceiptLineDto {
            nome_prodotto: line.product_name.clone(),
            quantita: line.quantity,
            prezzo_totale: line.line_total().to_euros(),
        }
    }
}

/// A receipt on the wire: euro amounts, RFC 3339 creation time.
#[derive(Debug, Serialize)]
pub struct ReceiptDto {
    pub voci: Vec<ReceiptLineDto>,
    pub totale_iva: f64,
    pub totale_complessivo: f64,
    pub data_creazione: String,
    pub user_id: String,
}

impl From<&Receipt> for ReceiptDto {
    fn from(receipt: &Receipt) -> Self {
        ReceiptDto {
            voci: receipt.lines.iter().map(ReceiptLineDto::from).collect(),
            totale_iva: Money::from_cents(receipt.tax_total_cents).to_euros(),
            totale_complessivo: Money::from_cents(receipt.grand_total_cents).to_euros(),
            data_creazione: receipt.created_at.to_rfc3339(),
            user_id: receipt.user_id.clone(),
        }
    }
}

/// GET /api/scontrini/{user_id}
///
/// Returns the purchaser's receipts, newest first. An unknown purchaser is
/// indistinguishable from one with no purchases: both get an empty list.
pub async fn history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<ReceiptDto>>> {
    let receipts = state.receipts.list_for_user(&user_id).await?;
    Ok(Json(receipts.iter().map(ReceiptDto::from).collect()))
}
