//! # Store Error Types
//!
//! Error types for document-store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Driver Error (mongodb::error::Error)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in apps/api) ← Mapped to an HTTP status                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Client receives {"errore": "..."} with 4xx/5xx                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Document-store operation errors.
///
/// These wrap driver errors and provide the categories the API layer
/// needs to pick a status code: persistence failures are infrastructure
/// errors (5xx), NotFound/Duplicate come from explicit checks (4xx).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Document not found.
    ///
    /// ## When This Occurs
    /// - An id doesn't exist in its collection
    /// - An update matched zero documents
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A uniqueness rule was violated (username, email, newsletter entry).
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Connecting to (or pinging) the cluster failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A read/write against a collection failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A document could not be (de)serialized.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Convert driver errors to StoreError.
///
/// Uniqueness is enforced by explicit find-then-insert checks in the
/// repositories, so driver errors here are always infrastructure failures.
impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::QueryFailed(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for StoreError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::not_found("Prodotto", "abc-123");
        assert_eq!(err.to_string(), "Prodotto not found: abc-123");

        let err = StoreError::duplicate("username", "mario.rossi");
        assert_eq!(
            err.to_string(),
            "Duplicate username: 'mario.rossi' already exists"
        );
    }
}
