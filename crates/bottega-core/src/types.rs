//! # Domain Types
//!
//! Core domain types used throughout Bottega.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │    Receipt      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  product_id     │   │  id (UUID)      │       │
//! │  │  name           │   │  name           │   │  lines          │       │
//! │  │  gross_cents    │   │  gross_cents    │   │  tax_total      │       │
//! │  │  category       │   │  category       │   │  grand_total    │       │
//! │  └─────────────────┘   │  quantity       │   │  user_id        │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────────┐                     │
//! │  │      User       │   │ NewsletterSubscription  │                     │
//! │  │  ─────────────  │   └─────────────────────────┘                     │
//! │  │  password_hash  │                                                   │
//! │  │  address + geo  │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle Notes
//! - A `CartItem` is a transient input value with no identity of its own.
//! - A `Receipt` is constructed once per checkout, persisted immediately,
//!   and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// The stored gross price and category are AUTHORITATIVE for pricing:
/// checkout resolves cart items against the catalog and never trusts
/// caller-supplied prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in listings and on receipts.
    pub name: String,

    /// Unit gross price (tax-exclusive) in cents.
    pub gross_price_cents: i64,

    /// Category label; resolved against the tax table at checkout.
    pub category: String,

    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the gross price as a Money type.
    #[inline]
    pub fn gross_price(&self) -> Money {
        Money::from_cents(self.gross_price_cents)
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// One requested line of a cart, already validated and priced.
///
/// By the time a `CartItem` reaches the calculator every field has been
/// checked at the deserialization boundary and the price/category have been
/// resolved from the catalog. The calculator only does arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Product ID (UUID) this line refers to.
    pub product_id: String,

    /// Product name at the time of checkout (frozen onto the receipt line).
    pub name: String,

    /// Unit gross price (tax-exclusive) in cents.
    pub gross_price_cents: i64,

    /// Category label.
    pub category: String,

    /// Requested quantity (validated positive).
    pub quantity: i64,
}

impl CartItem {
    /// Builds a cart line from an authoritative catalog product.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            gross_price_cents: product.gross_price_cents,
            category: product.category.clone(),
            quantity,
        }
    }

    /// Returns the unit gross price as Money.
    #[inline]
    pub fn gross_price(&self) -> Money {
        Money::from_cents(self.gross_price_cents)
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// One itemized line of a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    /// Product name at the time of checkout (frozen).
    pub product_name: String,

    /// Quantity sold.
    pub quantity: i64,

    /// Line total in cents: nickel-rounded unit final price × quantity.
    pub line_total_cents: i64,
}

impl ReceiptLine {
    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

/// A finalized receipt.
///
/// Invariants (held by construction in the calculator):
/// - `grand_total_cents` = sum of all line totals
/// - `tax_total_cents` = grand total − Σ(gross price × quantity), derived by
///   difference so per-unit rounding artifacts accumulate into the reported
///   tax figure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Itemized lines, in cart order.
    pub lines: Vec<ReceiptLine>,

    /// Aggregate VAT amount in cents, derived by difference.
    pub tax_total_cents: i64,

    /// Grand total in cents.
    pub grand_total_cents: i64,

    /// When the receipt was generated.
    pub created_at: DateTime<Utc>,

    /// Identifier of the purchasing party (opaque to the calculator).
    pub user_id: String,
}

impl Receipt {
    /// Returns the aggregate tax as Money.
    #[inline]
    pub fn tax_total(&self) -> Money {
        Money::from_cents(self.tax_total_cents)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_cents(self.grand_total_cents)
    }
}

// =============================================================================
// User & Profile
// =============================================================================

/// Geographic coordinates resolved from a user's address.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A postal address with its geocoded position, stored on the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    /// Free-form address line as entered by the user.
    pub line: String,

    /// Coordinates resolved by the geocoding collaborator, when available.
    pub location: Option<GeoPoint>,
}

/// A registered user account.
///
/// There is no session layer: endpoints simply echo `{id, username}` back.
/// The password is stored only as an argon2 hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Login name, unique.
    pub username: String,

    /// Contact email, unique.
    pub email: String,

    /// Argon2 password hash (never the plaintext).
    pub password_hash: String,

    /// Optional profile address with geocoded coordinates.
    pub address: Option<Address>,

    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Newsletter
// =============================================================================

/// A newsletter signup record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsletterSubscription {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Subscriber email, unique.
    pub email: String,

    /// When the signup happened.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_item_from_product_freezes_fields() {
        let product = Product {
            id: "p1".to_string(),
            name: "Pane Casereccio".to_string(),
            gross_price_cents: 241,
            category: "Alimentari".to_string(),
            created_at: Utc::now(),
        };

        let item = CartItem::from_product(&product, 3);
        assert_eq!(item.product_id, "p1");
        assert_eq!(item.name, "Pane Casereccio");
        assert_eq!(item.gross_price_cents, 241);
        assert_eq!(item.category, "Alimentari");
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_receipt_money_accessors() {
        let receipt = Receipt {
            id: "r1".to_string(),
            lines: vec![],
            tax_total_cents: 27,
            grand_total_cents: 750,
            created_at: Utc::now(),
            user_id: "u1".to_string(),
        };
        assert_eq!(receipt.tax_total().cents(), 27);
        assert_eq!(receipt.grand_total().cents(), 750);
    }
}
