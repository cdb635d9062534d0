//! # bottega-core: Pure Business Logic for Bottega
//!
//! This crate is the **heart** of the Bottega backend. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bottega Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      HTTP API (axum)                            │   │
//! │  │   /api/prodotti  /api/scontrino  /api/register  /api/chat ...  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bottega-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  receipt  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │Calculator │  │   rules   │  │   │
//! │  │   │  Receipt  │  │  TaxRate  │  │ tax table │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bottega-store (Document Store)                  │   │
//! │  │           MongoDB collections behind store traits               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, Receipt, User, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`tax`] - Tax rates and the category → rate table
//! - [`receipt`] - The receipt calculation engine
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: the calculator is deterministic on totals - same
//!    cart in, same lines and totals out
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are euro cents (i64); the
//!    nickel-floor and tax-by-difference rules are exact integer arithmetic
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use bottega_core::money::Money;
//! use bottega_core::receipt::ReceiptCalculator;
//! use bottega_core::tax::TaxTable;
//!
//! let calc = ReceiptCalculator::new(TaxTable::standard());
//!
//! // €2.41 gross at the Alimentari rate (4%) floors to €2.50 on the shelf
//! let unit = calc
//!     .unit_final_price("Pane", Money::from_cents(241), "Alimentari")
//!     .unwrap();
//! assert_eq!(unit.cents(), 250);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod receipt;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bottega_core::Money` instead of
// `use bottega_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt::ReceiptCalculator;
pub use tax::{TaxRate, TaxTable};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and keeps a single checkout request bounded.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in a cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum gross price of a single product, in cents (€1,000,000)
///
/// ## Business Reason
/// No catalog item costs a million euros; anything above this is corrupt or
/// hostile input. The bound also keeps line totals (price × quantity, summed
/// over MAX_CART_ITEMS lines) comfortably inside i64, so receipt arithmetic
/// never overflows.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;
