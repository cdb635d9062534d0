//! # Store Traits
//!
//! Behavior contracts for every collection the backend touches.
//!
//! ## Why Traits?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Dependency Injection Seam                            │
//! │                                                                         │
//! │  apps/api holds Arc<dyn ReceiptStore> etc. and never names MongoDB.    │
//! │                                                                         │
//! │         ┌──────────────────┐        ┌──────────────────┐               │
//! │         │  Mongo* (prod)   │        │  Memory* (tests) │               │
//! │         │  one collection  │        │  Mutex<Vec<T>>   │               │
//! │         │  per repository  │        │  no I/O at all   │               │
//! │         └──────────────────┘        └──────────────────┘               │
//! │                                                                         │
//! │  The checkout path takes the receipt store explicitly rather than      │
//! │  reaching into a process-global client, so tests substitute fakes.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod memory;
pub mod mongo;

use async_trait::async_trait;

use bottega_core::types::{Address, NewsletterSubscription, Product, Receipt, User};

use crate::error::StoreResult;

// =============================================================================
// Product Store
// =============================================================================

/// Catalog access. Stored prices and categories are authoritative at checkout.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Lists the whole catalog.
    async fn list(&self) -> StoreResult<Vec<Product>>;

    /// Looks up one product by id.
    async fn get(&self, id: &str) -> StoreResult<Option<Product>>;

    /// Inserts a new product.
    async fn insert(&self, product: &Product) -> StoreResult<()>;
}

// =============================================================================
// Receipt Store
// =============================================================================

/// Receipt persistence: insert-once on checkout, history reads after.
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Persists a freshly generated receipt. Called exactly once per checkout.
    async fn insert(&self, receipt: &Receipt) -> StoreResult<()>;

    /// Returns a purchaser's receipts, newest first.
    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<Receipt>>;
}

// =============================================================================
// User Store
// =============================================================================

/// User accounts and profiles.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a user by id.
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>>;

    /// Looks up a user by login name.
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Looks up a user by email.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Inserts a new account. Uniqueness of username/email is checked by
    /// the caller via the find methods before inserting.
    async fn insert(&self, user: &User) -> StoreResult<()>;

    /// Replaces the profile address (with its geocoded location).
    async fn update_address(&self, user_id: &str, address: &Address) -> StoreResult<()>;
}

// =============================================================================
// Newsletter Store
// =============================================================================

/// Newsletter signups.
#[async_trait]
pub trait NewsletterStore: Send + Sync {
    /// Looks up a signup by email (duplicate check).
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<NewsletterSubscription>>;

    /// Records a signup.
    async fn insert(&self, subscription: &NewsletterSubscription) -> StoreResult<()>;
}
