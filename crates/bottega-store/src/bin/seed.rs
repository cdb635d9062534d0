//! # Seed Data Generator
//!
//! Populates the catalog with the sample products used in development.
//!
//! ## Usage
//! ```bash
//! # Defaults: mongodb://localhost:27017, database "bottega"
//! cargo run -p bottega-store --bin seed
//!
//! # Against another cluster/database
//! MONGODB_URI="mongodb+srv://..." MONGODB_DB=db1 cargo run -p bottega-store --bin seed
//! ```
//!
//! Seeding is idempotent: if the `prodotti` collection already has
//! documents, nothing is inserted.

use std::env;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use bottega_core::types::Product;
use bottega_store::{MongoStore, ProductStore};

/// Sample catalog: (name, gross price in cents, category).
const SAMPLE_PRODUCTS: &[(&str, i64, &str)] = &[
    ("Pane Casereccio", 241, "Alimentari"),
    ("Agenda 2024", 1550, "Altro"),
    ("Oki (antidolorifico)", 499, "Medicinali"),
    ("Latte Intero 1L", 159, "Alimentari"),
    ("Termometro Digitale", 890, "Medicinali"),
    ("Shampoo Neutro", 380, "Altro"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let uri = env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let db_name = env::var("MONGODB_DB").unwrap_or_else(|_| "bottega".to_string());

    let store = MongoStore::connect(&uri, &db_name).await?;
    let products = store.products();

    let existing = products.list().await?;
    if !existing.is_empty() {
        info!(count = existing.len(), "Catalog already populated, nothing to do");
        return Ok(());
    }

    for (name, cents, category) in SAMPLE_PRODUCTS {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: (*name).to_string(),
            gross_price_cents: *cents,
            category: (*category).to_string(),
            created_at: Utc::now(),
        };
        products.insert(&product).await?;
    }

    info!(count = SAMPLE_PRODUCTS.len(), "Catalog seeded");
    Ok(())
}
