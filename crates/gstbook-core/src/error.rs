//! # Error Types
//!
//! Domain-specific error types for gstbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gstbook-core errors (this file)                                       │
//! │  ├── CoreError        - Engine and document rule failures              │
//! │  └── ValidationError  - Editor input validation failures               │
//! │                                                                         │
//! │  gstbook-store errors (separate crate)                                 │
//! │  └── StoreError       - Database / config failures                     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → caller               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT An Error
//! The infallible totals functions never fail. A malformed place of supply
//! falls back to the intra-state split, non-numeric amounts count as zero, an
//! empty item list totals zero, a negative payable is clamped and amounts past
//! the paise range saturate. The `try_*` totals report that last case as
//! [`CoreError::AmountOverflow`] instead.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Amount is too large to be spoken in crore/lakh/thousand words.
    ///
    /// ## When This Occurs
    /// - The rounded rupee amount has more than 9 digits (≥ 100 crore)
    ///
    /// The caller should show the figure without a words line rather than
    /// print truncated or wrong compliance text.
    #[error("Amount {amount} is too large to write in words (limit is 99,99,99,999)")]
    AmountTooLarge { amount: u64 },

    /// Amount in words was requested for a negative amount.
    #[error("Cannot write a negative amount in words: {paise} paise")]
    NegativeAmount { paise: i64 },

    /// An intermediate or final amount left the representable paise range.
    ///
    /// ## When This Occurs
    /// - Absurd quantity × rate products (e.g. qty 1e17 at ₹1,000)
    /// - Stored rates far beyond any real price
    #[error("Amount exceeds the representable range")]
    AmountOverflow,

    /// No line item with this id exists on the document.
    #[error("Line item not found: {0}")]
    LineItemNotFound(String),

    /// Removing the only line item of a document.
    ///
    /// ## User Workflow
    /// ```text
    /// Document with 1 item
    ///      │
    ///      ▼
    /// remove_item("1")
    ///      │
    ///      ▼
    /// LastLineItem → document unchanged, delete button disabled in UI
    /// ```
    #[error("A document must keep at least one line item")]
    LastLineItem,

    /// No additional charge with this id exists on the document.
    #[error("Additional charge not found: {0}")]
    ChargeNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised at the editor boundary.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., malformed GSTIN or place of supply).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
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
    fn test_error_messages() {
        let err = CoreError::AmountTooLarge {
            amount: 1_000_000_000,
        };
        assert_eq!(
            err.to_string(),
            "Amount 1000000000 is too large to write in words (limit is 99,99,99,999)"
        );
        assert_eq!(
            CoreError::LastLineItem.to_string(),
            "A document must keep at least one line item"
        );
        assert_eq!(
            CoreError::AmountOverflow.to_string(),
            "Amount exceeds the representable range"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustNotBeNegative {
            field: "qty".to_string(),
        };
        assert_eq!(err.to_string(), "qty must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "place_of_supply".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
