//! # Validation Module
//!
//! Input validation for the document editor and the seller profile.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Editor (frontend)                                            │
//! │  └── Immediate feedback while typing                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Checked before a document is saved or a profile is loaded        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Totals engine                                                │
//! │  └── Never validates; coerces, computes and saturates at the limits   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gstbook_core::validation::{validate_gstin, validate_state_code};
//!
//! assert!(validate_state_code("29").is_ok());
//! assert!(validate_gstin("29ABCDE1234F1Z5").is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::tax::{parse_code_digits, parse_state_code};
use crate::totals::try_calculate_document_total;
use crate::types::{DocumentBase, LineItem, SellerProfile, TaxRate};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Highest GST state code in use (99 = Centre Jurisdiction).
pub const MAX_STATE_CODE: u8 = 99;

/// GSTINs are always 15 characters.
pub const GSTIN_LENGTH: usize = 15;

/// Largest quantity accepted on one line (one crore units).
pub const MAX_QUANTITY: f64 = 10_000_000.0;

/// Largest unit rate accepted on one line (₹100 crore).
pub const MAX_RATE: Money = Money::from_rupees(1_000_000_000);

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity: finite, not negative, at most [`MAX_QUANTITY`].
///
/// ## Example
/// ```rust
/// use gstbook_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1.5).is_ok());
/// assert!(validate_quantity(0.0).is_ok());
/// assert!(validate_quantity(-1.0).is_err());
/// assert!(validate_quantity(f64::NAN).is_err());
/// assert!(validate_quantity(1e17).is_err());
/// ```
pub fn validate_quantity(qty: f64) -> ValidationResult<()> {
    if !qty.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "qty".to_string(),
            reason: "must be a number".to_string(),
        });
    }

    if qty < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "qty".to_string(),
        });
    }

    if qty > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "qty".to_string(),
            min: 0,
            max: MAX_QUANTITY as i64,
        });
    }

    Ok(())
}

/// Validates a unit rate: zero up to [`MAX_RATE`]; negative is not allowed.
pub fn validate_rate(rate: Money) -> ValidationResult<()> {
    if rate.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "rate".to_string(),
        });
    }

    if rate > MAX_RATE {
        return Err(ValidationError::OutOfRange {
            field: "rate".to_string(),
            min: 0,
            max: MAX_RATE.paise(),
        });
    }

    Ok(())
}

/// Validates a GST rate: 0% to 100%.
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    if rate.bps() > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

// =============================================================================
// Jurisdiction Validators
// =============================================================================

/// Validates a bare GST state code such as `"29"`.
pub fn validate_state_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "state_code".to_string(),
        });
    }

    match parse_code_digits(code) {
        Some(n) if (1..=MAX_STATE_CODE).contains(&n) => Ok(()),
        _ => Err(ValidationError::InvalidFormat {
            field: "state_code".to_string(),
            reason: "must be a two-digit GST state code".to_string(),
        }),
    }
}

/// Validates a place of supply of the form `"<State> (<code>)"`.
///
/// The engine itself tolerates a malformed value (it falls back to the
/// intra-state split); this check lets the editor warn before saving.
pub fn validate_place_of_supply(place: &str) -> ValidationResult<()> {
    if place.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "place_of_supply".to_string(),
        });
    }

    if parse_state_code(place).is_none() {
        return Err(ValidationError::InvalidFormat {
            field: "place_of_supply".to_string(),
            reason: "must end with a state code in parentheses, e.g. \"Karnataka (29)\""
                .to_string(),
        });
    }

    Ok(())
}

/// Validates the shape of a GSTIN.
///
/// ## Rules
/// - Exactly 15 ASCII alphanumeric characters
/// - Starts with a valid two-digit state code
///
/// The checksum character is not verified.
///
/// ## Example
/// ```rust
/// use gstbook_core::validation::validate_gstin;
///
/// assert!(validate_gstin("29ABCDE1234F1Z5").is_ok());
/// assert!(validate_gstin("ABCDE1234F1Z5").is_err());
/// assert!(validate_gstin("").is_err());
/// ```
pub fn validate_gstin(gstin: &str) -> ValidationResult<()> {
    let gstin = gstin.trim();

    if gstin.is_empty() {
        return Err(ValidationError::Required {
            field: "gstin".to_string(),
        });
    }

    if gstin.len() != GSTIN_LENGTH || !gstin.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "gstin".to_string(),
            reason: format!("must be {} letters and digits", GSTIN_LENGTH),
        });
    }

    validate_state_code(&gstin[..2]).map_err(|_| ValidationError::InvalidFormat {
        field: "gstin".to_string(),
        reason: "must start with a state code".to_string(),
    })
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates every numeric field of a line item.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_quantity(item.qty)?;
    validate_rate(item.rate)?;
    validate_tax_rate(item.tax_rate)?;
    Ok(())
}

/// Validates a document before it is saved.
///
/// ## Rules
/// - Number is present
/// - At least one line item, each valid
/// - Place of supply carries a state code
/// - The payable total fits in paise
pub fn validate_document(doc: &DocumentBase) -> ValidationResult<()> {
    if doc.number.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "number".to_string(),
        });
    }

    if doc.items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    for item in &doc.items {
        validate_line_item(item)?;
    }

    validate_place_of_supply(&doc.place_of_supply)?;

    try_calculate_document_total(doc).map_err(|_| ValidationError::OutOfRange {
        field: "total".to_string(),
        min: 0,
        max: Money::MAX.paise(),
    })?;

    Ok(())
}

/// Validates the seller profile loaded from configuration.
///
/// The GSTIN is optional (unregistered sellers), but when present its state
/// prefix must match the configured state code.
pub fn validate_seller_profile(seller: &SellerProfile) -> ValidationResult<()> {
    if seller.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "seller.name".to_string(),
        });
    }

    validate_state_code(&seller.state_code)?;

    if !seller.gstin.trim().is_empty() {
        validate_gstin(&seller.gstin)?;
        if parse_code_digits(&seller.gstin.trim()[..2]) != parse_code_digits(&seller.state_code) {
            return Err(ValidationError::InvalidFormat {
                field: "gstin".to_string(),
                reason: "state prefix does not match seller state code".to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::types::{Invoice, SellerProfile};

    fn seller() -> SellerProfile {
        SellerProfile {
            name: "Acme Studio".to_string(),
            gstin: "29ABCDE1234F1Z5".to_string(),
            state: "Karnataka".to_string(),
            state_code: "29".to_string(),
            ..SellerProfile::default()
        }
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1.0).is_ok());
        assert!(validate_quantity(0.25).is_ok());
        assert!(validate_quantity(-0.5).is_err());
        assert!(validate_quantity(f64::INFINITY).is_err());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());
        assert!(matches!(
            validate_quantity(1e17),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_rate_and_tax_rate() {
        assert!(validate_rate(Money::zero()).is_ok());
        assert!(validate_rate(Money::from_paise(-1)).is_err());
        assert!(validate_rate(MAX_RATE).is_ok());
        assert!(matches!(
            validate_rate(Money::MAX),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_tax_rate(TaxRate::from_bps(10_000)).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(10_001)).is_err());
    }

    #[test]
    fn test_validate_state_code() {
        assert!(validate_state_code("29").is_ok());
        assert!(validate_state_code("07").is_ok());
        assert!(validate_state_code("00").is_err());
        assert!(validate_state_code("KA").is_err());
        assert!(validate_state_code("").is_err());
    }

    #[test]
    fn test_validate_place_of_supply() {
        assert!(validate_place_of_supply("Karnataka (29)").is_ok());
        assert!(validate_place_of_supply("Karnataka").is_err());
        assert!(validate_place_of_supply("  ").is_err());
    }

    #[test]
    fn test_validate_gstin() {
        assert!(validate_gstin("29ABCDE1234F1Z5").is_ok());
        assert!(validate_gstin("29ABCDE1234F1Z").is_err());
        assert!(validate_gstin("XXABCDE1234F1Z5").is_err());
        assert!(validate_gstin("29ABCDE1234F1Z-").is_err());
    }

    #[test]
    fn test_validate_document() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let mut invoice = Invoice::new(&seller(), date);
        assert!(validate_document(&invoice.base).is_ok());

        invoice.base.items[0].qty = -1.0;
        assert!(validate_document(&invoice.base).is_err());

        invoice.base.items[0].qty = 1.0;
        invoice.base.place_of_supply = "Nowhere".to_string();
        assert!(validate_document(&invoice.base).is_err());

        invoice.base.place_of_supply = "Karnataka (29)".to_string();
        invoice.base.items.clear();
        assert!(validate_document(&invoice.base).is_err());
    }

    #[test]
    fn test_validate_document_rejects_absurd_amounts() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let mut invoice = Invoice::new(&seller(), date);

        invoice.base.items[0].qty = 1e17;
        invoice.base.items[0].rate = Money::from_rupees(1000);
        assert!(validate_document(&invoice.base).is_err());

        // Each line in range, but the charges push the total past i64
        invoice.base.items[0].qty = 1.0;
        invoice.base.additional_charges.push(crate::types::AdditionalCharge {
            id: "c1".to_string(),
            label: "Freight".to_string(),
            amount: Money::MAX,
        });
        let err = validate_document(&invoice.base).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { ref field, .. } if field == "total"));
    }

    #[test]
    fn test_validate_seller_profile() {
        assert!(validate_seller_profile(&seller()).is_ok());

        let mut mismatched = seller();
        mismatched.state_code = "27".to_string();
        assert!(validate_seller_profile(&mismatched).is_err());

        let mut unregistered = seller();
        unregistered.gstin = String::new();
        assert!(validate_seller_profile(&unregistered).is_ok());
    }
}
