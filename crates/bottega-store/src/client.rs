//! # MongoDB Client Management
//!
//! Connection setup and the `MongoStore` facade.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      MongoDB Connection                                 │
//! │                                                                         │
//! │  App Startup                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MongoStore::connect(uri, db_name).await                                │
//! │       │  (pings the cluster so a bad URI fails at boot, not on the     │
//! │       │   first checkout)                                               │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │              MongoStore                 │                            │
//! │  │  .products()   → prodotti collection    │                            │
//! │  │  .receipts()   → scontrini collection   │                            │
//! │  │  .users()      → utenti collection      │                            │
//! │  │  .newsletter() → newsletter collection  │                            │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       │ The driver multiplexes connections internally; repositories    │
//! │       │ are cheap clones sharing the same client.                      │
//! │       ▼                                                                 │
//! │  Handlers call repositories through the store traits                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use mongodb::bson::doc;
use mongodb::{Client, Database};
use tracing::info;

use bottega_core::types::{NewsletterSubscription, Product, Receipt, User};

use crate::error::{StoreError, StoreResult};
use crate::repository::mongo::{
    MongoNewsletterStore, MongoProductStore, MongoReceiptStore, MongoUserStore,
};

/// Collection names, matching the documents the original data set uses.
pub const PRODUCTS_COLLECTION: &str = "prodotti";
pub const RECEIPTS_COLLECTION: &str = "scontrini";
pub const USERS_COLLECTION: &str = "utenti";
pub const NEWSLETTER_COLLECTION: &str = "newsletter";

/// Facade over one MongoDB database and its collections.
///
/// ## Usage
/// ```rust,ignore
/// let store = MongoStore::connect("mongodb://localhost:27017", "bottega").await?;
/// let products = store.products().list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connects to the cluster and verifies it answers a ping.
    ///
    /// Failing fast here means a misconfigured URI surfaces at boot
    /// instead of on the first request.
    pub async fn connect(uri: &str, db_name: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        info!(db = %db_name, "Connected to MongoDB");

        Ok(MongoStore {
            database: client.database(db_name),
        })
    }

    /// Catalog repository over the `prodotti` collection.
    pub fn products(&self) -> MongoProductStore {
        MongoProductStore::new(self.database.collection::<Product>(PRODUCTS_COLLECTION))
    }

    /// Receipt repository over the `scontrini` collection.
    pub fn receipts(&self) -> MongoReceiptStore {
        MongoReceiptStore::new(self.database.collection::<Receipt>(RECEIPTS_COLLECTION))
    }

    /// User repository over the `utenti` collection.
    pub fn users(&self) -> MongoUserStore {
        MongoUserStore::new(self.database.collection::<User>(USERS_COLLECTION))
    }

    /// Newsletter repository over the `newsletter` collection.
    pub fn newsletter(&self) -> MongoNewsletterStore {
        MongoNewsletterStore::new(
            self.database
                .collection::<NewsletterSubscription>(NEWSLETTER_COLLECTION),
        )
    }

    /// The underlying database handle (used by the seed binary).
    pub fn database(&self) -> &Database {
        &self.database
    }
}
