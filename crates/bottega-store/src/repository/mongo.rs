//! # MongoDB Repositories
//!
//! One repository per collection, all driven by the shared client in
//! [`crate::client::MongoStore`].
//!
//! ## Collections
//! ```text
//! ┌──────────────┬─────────────────────────────┬───────────────────────────┐
//! │ Collection   │ Document                    │ Access pattern            │
//! ├──────────────┼─────────────────────────────┼───────────────────────────┤
//! │ prodotti     │ Product                     │ list, get by id, insert   │
//! │ scontrini    │ Receipt                     │ insert-once, history by   │
//! │              │                             │ user_id, newest first     │
//! │ utenti       │ User                        │ find by username/email,   │
//! │              │                             │ insert, address update    │
//! │ newsletter   │ NewsletterSubscription      │ duplicate check, insert   │
//! └──────────────┴─────────────────────────────┴───────────────────────────┘
//! ```
//!
//! ## Document Identity
//! Documents carry their own `id` field (UUID v4 string); the driver's `_id`
//! ObjectId is left to the server. Timestamps serialize as RFC 3339 strings,
//! which sort correctly with a plain descending sort.

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, to_bson};
use mongodb::Collection;
use tracing::debug;

use bottega_core::types::{Address, NewsletterSubscription, Product, Receipt, User};

use crate::error::{StoreError, StoreResult};
use crate::repository::{NewsletterStore, ProductStore, ReceiptStore, UserStore};

// =============================================================================
// Products
// =============================================================================

/// MongoDB-backed catalog repository.
#[derive(Debug, Clone)]
pub struct MongoProductStore {
    collection: Collection<Product>,
}

impl MongoProductStore {
    /// Wraps the `prodotti` collection.
    pub fn new(collection: Collection<Product>) -> Self {
        MongoProductStore { collection }
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "name": 1 }).await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        debug!(count = products.len(), "Listed catalog");
        Ok(products)
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Product>> {
        let product = self.collection.find_one(doc! { "id": id }).await?;
        Ok(product)
    }

    async fn insert(&self, product: &Product) -> StoreResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");
        self.collection.insert_one(product).await?;
        Ok(())
    }
}

// =============================================================================
// Receipts
// =============================================================================

/// MongoDB-backed receipt repository.
#[derive(Debug, Clone)]
pub struct MongoReceiptStore {
    collection: Collection<Receipt>,
}

impl MongoReceiptStore {
    /// Wraps the `scontrini` collection.
    pub fn new(collection: Collection<Receipt>) -> Self {
        MongoReceiptStore { collection }
    }
}

#[async_trait]
impl ReceiptStore for MongoReceiptStore {
    async fn insert(&self, receipt: &Receipt) -> StoreResult<()> {
        debug!(
            id = %receipt.id,
            user_id = %receipt.user_id,
            grand_total_cents = receipt.grand_total_cents,
            "Persisting receipt"
        );
        self.collection.insert_one(receipt).await?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<Receipt>> {
        let cursor = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .await?;
        let receipts: Vec<Receipt> = cursor.try_collect().await?;

        debug!(user_id = %user_id, count = receipts.len(), "Fetched receipt history");
        Ok(receipts)
    }
}

// =============================================================================
// Users
// =============================================================================

/// MongoDB-backed user repository.
#[derive(Debug, Clone)]
pub struct MongoUserStore {
    collection: Collection<User>,
}

impl MongoUserStore {
    /// Wraps the `utenti` collection.
    pub fn new(collection: Collection<User>) -> Self {
        MongoUserStore { collection }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let user = self.collection.find_one(doc! { "id": id }).await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "username": username })
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn insert(&self, user: &User) -> StoreResult<()> {
        debug!(id = %user.id, username = %user.username, "Inserting user");
        self.collection.insert_one(user).await?;
        Ok(())
    }

    async fn update_address(&self, user_id: &str, address: &Address) -> StoreResult<()> {
        let address_doc = to_bson(address)?;
        let result = self
            .collection
            .update_one(
                doc! { "id": user_id },
                doc! { "$set": { "address": address_doc } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::not_found("Utente", user_id));
        }

        debug!(user_id = %user_id, "Updated profile address");
        Ok(())
    }
}

// =============================================================================
// Newsletter
// =============================================================================

/// MongoDB-backed newsletter repository.
#[derive(Debug, Clone)]
pub struct MongoNewsletterStore {
    collection: Collection<NewsletterSubscription>,
}

impl MongoNewsletterStore {
    /// Wraps the `newsletter` collection.
    pub fn new(collection: Collection<NewsletterSubscription>) -> Self {
        MongoNewsletterStore { collection }
    }
}

#[async_trait]
impl NewsletterStore for MongoNewsletterStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<NewsletterSubscription>> {
        let subscription = self.collection.find_one(doc! { "email": email }).await?;
        Ok(subscription)
    }

    async fn insert(&self, subscription: &NewsletterSubscription) -> StoreResult<()> {
        debug!(email = %subscription.email, "Recording newsletter signup");
        self.collection.insert_one(subscription).await?;
        Ok(())
    }
}
