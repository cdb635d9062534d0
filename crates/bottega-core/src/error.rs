//! # Error Types
//!
//! Domain-specific error types for bottega-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bottega-core errors (this file)                                        │
//! │  ├── CoreError        - Receipt/domain failures                         │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  bottega-store errors (separate crate)                                  │
//! │  └── StoreError       - Document store failures                         │
//! │                                                                         │
//! │  apps/api errors                                                        │
//! │  └── ApiError         - What the client sees (status + JSON)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Client     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Taxonomy (matters for status mapping)
//! - Validation errors are client-caused: surfaced with a descriptive
//!   message and a client-error status.
//! - `FinalBelowGross` is an internal consistency failure: a defect signal,
//!   surfaced as a server error without leaking detail.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product referenced by a cart line cannot be found.
    ///
    /// ## When This Occurs
    /// - The cart carries an id that is not in the catalog
    /// - The product was removed between listing and checkout
    #[error("Prodotto con ID {0} non trovato.")]
    ProductNotFound(String),

    /// Checkout was attempted with no items.
    #[error("Il carrello è vuoto.")]
    EmptyCart,

    /// The nickel-rounded final price came out below the gross price.
    ///
    /// ## When This Occurs
    /// Mathematically impossible for realistic (euro-scale) prices and
    /// non-negative rates; reachable only for corrupt data or micro
    /// amounts where the 5-cent floor eats more than the tax adds.
    /// Never returned silently: this is a should-never-happen defect
    /// signal surfaced as an internal failure.
    #[error(
        "Errore di calcolo per {product}: il prezzo finale ({final_price}) è inferiore al lordo ({gross_price})."
    )]
    FinalBelowGross {
        product: String,
        final_price: String,
        gross_price: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// True for client-caused failures that map to a 4xx status.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::ProductNotFound(_) | CoreError::EmptyCart | CoreError::Validation(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when input doesn't meet requirements and are caught before
/// any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., username already taken).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_the_id() {
        let err = CoreError::ProductNotFound("abc-123".to_string());
        assert_eq!(err.to_string(), "Prodotto con ID abc-123 non trovato.");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "categoria".to_string(),
        };
        assert_eq!(err.to_string(), "categoria is required");

        let err = ValidationError::MustBePositive {
            field: "quantita".to_string(),
        };
        assert_eq!(err.to_string(), "quantita must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "quantita".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert!(core_err.is_validation());
    }

    #[test]
    fn test_consistency_error_is_not_validation() {
        let err = CoreError::FinalBelowGross {
            product: "Pane".to_string(),
            final_price: "€0.00".to_string(),
            gross_price: "€0.03".to_string(),
        };
        assert!(!err.is_validation());
    }
}
