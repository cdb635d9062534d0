//! # In-Memory Repositories
//!
//! Offline implementations of the store traits, backed by mutex-guarded
//! vectors. Used by unit and integration tests (and handy for local demos)
//! so nothing in the test suite needs a running MongoDB.
//!
//! Semantics mirror the MongoDB repositories exactly: same sort orders,
//! same not-found behavior, same caller-driven uniqueness checks.

use std::sync::Mutex;

use async_trait::async_trait;

use bottega_core::types::{Address, NewsletterSubscription, Product, Receipt, User};

use crate::error::{StoreError, StoreResult};
use crate::repository::{NewsletterStore, ProductStore, ReceiptStore, UserStore};

// A poisoned lock only happens if another test thread panicked mid-write;
// the data is still usable for the remaining assertions.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// =============================================================================
// Products
// =============================================================================

/// In-memory catalog.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    products: Mutex<Vec<Product>>,
}

impl MemoryProductStore {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-loaded with products.
    pub fn with_products(products: Vec<Product>) -> Self {
        MemoryProductStore {
            products: Mutex::new(products),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        let mut products = lock(&self.products).clone();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Product>> {
        Ok(lock(&self.products).iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, product: &Product) -> StoreResult<()> {
        lock(&self.products).push(product.clone());
        Ok(())
    }
}

// =============================================================================
// Receipts
// =============================================================================

/// In-memory receipt store.
#[derive(Debug, Default)]
pub struct MemoryReceiptStore {
    receipts: Mutex<Vec<Receipt>>,
}

impl MemoryReceiptStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted receipts (for persistence-side-effect assertions).
    pub fn len(&self) -> usize {
        lock(&self.receipts).len()
    }

    /// True when nothing has been persisted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReceiptStore for MemoryReceiptStore {
    async fn insert(&self, receipt: &Receipt) -> StoreResult<()> {
        lock(&self.receipts).push(receipt.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<Receipt>> {
        let mut receipts: Vec<Receipt> = lock(&self.receipts)
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        receipts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(receipts)
    }
}

/// A receipt store whose writes always fail.
///
/// Exercises the "computation succeeded, persistence failed" path: the
/// checkout service must surface a persistence error and write nothing.
#[derive(Debug, Default)]
pub struct FailingReceiptStore;

#[async_trait]
impl ReceiptStore for FailingReceiptStore {
    async fn insert(&self, _receipt: &Receipt) -> StoreResult<()> {
        Err(StoreError::QueryFailed("write refused".to_string()))
    }

    async fn list_for_user(&self, _user_id: &str) -> StoreResult<Vec<Receipt>> {
        Err(StoreError::QueryFailed("read refused".to_string()))
    }
}

// =============================================================================
// Users
// =============================================================================

/// In-memory user store.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(lock(&self.users).iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(lock(&self.users)
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(lock(&self.users).iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: &User) -> StoreResult<()> {
        lock(&self.users).push(user.clone());
        Ok(())
    }

    async fn update_address(&self, user_id: &str, address: &Address) -> StoreResult<()> {
        let mut users = lock(&self.users);
        match users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.address = Some(address.clone());
                Ok(())
            }
            None => Err(StoreError::not_found("Utente", user_id)),
        }
    }
}

// =============================================================================
// Newsletter
// =============================================================================

/// In-memory newsletter store.
#[derive(Debug, Default)]
pub struct MemoryNewsletterStore {
    subscriptions: Mutex<Vec<NewsletterSubscription>>,
}

impl MemoryNewsletterStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewsletterStore for MemoryNewsletterStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<NewsletterSubscription>> {
        Ok(lock(&self.subscriptions)
            .iter()
            .find(|s| s.email == email)
            .cloned())
    }

    async fn insert(&self, subscription: &NewsletterSubscription) -> StoreResult<()> {
        lock(&self.subscriptions).push(subscription.clone());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn product(id: &str, name: &str, cents: i64, category: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            gross_price_cents: cents,
            category: category.to_string(),
            created_at: Utc::now(),
        }
    }

    fn receipt(id: &str, user_id: &str, age_minutes: i64) -> Receipt {
        Receipt {
            id: id.to_string(),
            lines: vec![],
            tax_total_cents: 0,
            grand_total_cents: 0,
            created_at: Utc::now() - Duration::minutes(age_minutes),
            user_id: user_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_product_store_get_and_list() {
        let store = MemoryProductStore::with_products(vec![
            product("p2", "Shampoo Neutro", 380, "Altro"),
            product("p1", "Pane Casereccio", 241, "Alimentari"),
        ]);

        let listed = store.list().await.unwrap();
        // Sorted by name, like the MongoDB repository
        assert_eq!(listed[0].name, "Pane Casereccio");
        assert_eq!(listed[1].name, "Shampoo Neutro");

        assert!(store.get("p1").await.unwrap().is_some());
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_receipt_history_is_newest_first() {
        let store = MemoryReceiptStore::new();
        store.insert(&receipt("r-old", "u1", 60)).await.unwrap();
        store.insert(&receipt("r-new", "u1", 0)).await.unwrap();
        store.insert(&receipt("r-other", "u2", 0)).await.unwrap();

        let history = store.list_for_user("u1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, "r-new");
        assert_eq!(history[1].id, "r-old");
    }

    #[tokio::test]
    async fn test_failing_receipt_store_refuses_writes() {
        let store = FailingReceiptStore;
        let err = store.insert(&receipt("r1", "u1", 0)).await.unwrap_err();
        assert!(matches!(err, StoreError::QueryFailed(_)));
    }

    #[tokio::test]
    async fn test_user_address_update() {
        let store = MemoryUserStore::new();
        let user = User {
            id: "u1".to_string(),
            username: "mario.rossi".to_string(),
            email: "mario.rossi@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            address: None,
            created_at: Utc::now(),
        };
        store.insert(&user).await.unwrap();

        let address = Address {
            line: "Via Roma 1, Milano".to_string(),
            location: None,
        };
        store.update_address("u1", &address).await.unwrap();

        let updated = store.find_by_id("u1").await.unwrap().unwrap();
        assert_eq!(updated.address.unwrap().line, "Via Roma 1, Milano");

        let err = store.update_address("ghost", &address).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
