//! # bottega-store: Document Store Layer for Bottega
//!
//! This crate provides document-store access for the Bottega backend.
//! It uses MongoDB, with every collection hidden behind a store trait.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bottega Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (POST /api/scontrino)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  bottega-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌───────────────┐  │   │
//! │  │   │  MongoStore   │    │  Repositories  │   │  Memory fakes │  │   │
//! │  │   │  (client.rs)  │    │  (mongo.rs)    │   │  (memory.rs)  │  │   │
//! │  │   │               │    │                │   │               │  │   │
//! │  │   │ connect + ping│◄───│ ProductStore   │   │ for tests,    │  │   │
//! │  │   │ collections   │    │ ReceiptStore   │   │ no I/O        │  │   │
//! │  │   └───────────────┘    │ UserStore      │   └───────────────┘  │   │
//! │  │                        │ NewsletterStore│                      │   │
//! │  │                        └────────────────┘                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MongoDB: prodotti, scontrini, utenti, newsletter                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - Client creation and the `MongoStore` facade
//! - [`error`] - Store error types
//! - [`repository`] - Store traits plus MongoDB and in-memory implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bottega_store::{MongoStore, ReceiptStore};
//!
//! let store = MongoStore::connect("mongodb://localhost:27017", "bottega").await?;
//! store.receipts().insert(&receipt).await?;
//! let history = store.receipts().list_for_user("user-1").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod error;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::MongoStore;
pub use error::{StoreError, StoreResult};

// Trait re-exports for convenience
pub use repository::{NewsletterStore, ProductStore, ReceiptStore, UserStore};

// Implementation re-exports
pub use repository::memory::{
    FailingReceiptStore, MemoryNewsletterStore, MemoryProductStore, MemoryReceiptStore,
    MemoryUserStore,
};
pub use repository::mongo::{
    MongoNewsletterStore, MongoProductStore, MongoReceiptStore, MongoUserStore,
};
