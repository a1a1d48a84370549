//! # GST Line Calculation
//!
//! Per-line tax computation and the intra/inter-state decision.
//!
//! ## CGST/SGST vs IGST
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Which tax applies?                                  │
//! │                                                                         │
//! │  seller state code ──┐                                                  │
//! │                      ├── same?  ──► CGST = SGST = tax / 2, IGST = 0     │
//! │  place of supply  ───┘                                                  │
//! │  "Karnataka (29)"    └─ differ? ──► IGST = tax, CGST = SGST = 0         │
//! │                                                                         │
//! │  The decision is made ONCE per document and applied to every line.     │
//! │  Unreadable place of supply → treated as same state.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::LineItem;

// =============================================================================
// Line Calculation
// =============================================================================

/// Result of taxing one line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItemCalc {
    /// qty × rate, before tax.
    pub taxable_value: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub igst: Money,
    /// taxable_value + total tax.
    pub total: Money,
}

impl LineItemCalc {
    /// Total tax on the line, whichever branch was used.
    pub fn total_tax(&self) -> Money {
        self.cgst + self.sgst + self.igst
    }
}

/// Calculates taxable value, GST split and line total for one item.
///
/// ## Rules
/// - `taxable_value = qty × rate` (rounded to the paisa)
/// - `tax = taxable_value × tax_rate` (rounded half away from zero)
/// - inter-state: all tax is IGST; intra-state: split into CGST + SGST,
///   with the odd paisa (if any) going to SGST so the halves add up exactly
/// - `total = taxable_value + tax`
///
/// Inputs are not validated. A non-finite quantity counts as zero; negative
/// values flow through the arithmetic unchanged. Amounts past the paise
/// range saturate; use [`try_calculate_line_item`] to detect that.
///
/// ## Example
/// ```rust
/// use gstbook_core::money::Money;
/// use gstbook_core::tax::calculate_line_item;
/// use gstbook_core::types::LineItem;
///
/// let mut item = LineItem::new("1");
/// item.qty = 2.0;
/// item.rate = Money::from_rupees(100);
///
/// let intra = calculate_line_item(&item, false);
/// assert_eq!(intra.cgst, Money::from_rupees(18));
/// assert_eq!(intra.sgst, Money::from_rupees(18));
/// assert_eq!(intra.total, Money::from_rupees(236));
///
/// let inter = calculate_line_item(&item, true);
/// assert_eq!(inter.igst, Money::from_rupees(36));
/// assert_eq!(inter.total, Money::from_rupees(236));
/// ```
pub fn calculate_line_item(item: &LineItem, is_inter_state: bool) -> LineItemCalc {
    let taxable_value = item.rate.multiply_quantity(item.qty);
    let total_tax = taxable_value.calculate_tax(item.tax_rate);

    assemble(
        taxable_value,
        total_tax,
        taxable_value + total_tax,
        is_inter_state,
    )
}

/// Checked form of [`calculate_line_item`].
///
/// ## Returns
/// * `Ok(calc)` - Same result as [`calculate_line_item`]
/// * `Err(CoreError::AmountOverflow)` - qty × rate, the tax or the line total
///   does not fit in paise
///
/// ## Example
/// ```rust
/// use gstbook_core::money::Money;
/// use gstbook_core::tax::try_calculate_line_item;
/// use gstbook_core::types::LineItem;
///
/// let mut item = LineItem::new("1");
/// item.qty = 1e17;
/// item.rate = Money::from_rupees(1000);
///
/// assert!(try_calculate_line_item(&item, false).is_err());
/// ```
pub fn try_calculate_line_item(item: &LineItem, is_inter_state: bool) -> CoreResult<LineItemCalc> {
    let taxable_value = item
        .rate
        .checked_multiply_quantity(item.qty)
        .ok_or(CoreError::AmountOverflow)?;
    let total_tax = taxable_value
        .checked_calculate_tax(item.tax_rate)
        .ok_or(CoreError::AmountOverflow)?;
    let total = taxable_value
        .checked_add(total_tax)
        .ok_or(CoreError::AmountOverflow)?;

    Ok(assemble(taxable_value, total_tax, total, is_inter_state))
}

fn assemble(
    taxable_value: Money,
    total_tax: Money,
    total: Money,
    is_inter_state: bool,
) -> LineItemCalc {
    let (cgst, sgst, igst) = if is_inter_state {
        (Money::zero(), Money::zero(), total_tax)
    } else {
        let (cgst, sgst) = total_tax.split_half();
        (cgst, sgst, Money::zero())
    };

    LineItemCalc {
        taxable_value,
        cgst,
        sgst,
        igst,
        total,
    }
}

// =============================================================================
// Jurisdiction
// =============================================================================

/// Extracts the numeric state code from a place of supply such as
/// `"Maharashtra (27)"`.
///
/// Only a trailing parenthetical of one or two digits is accepted.
///
/// ## Example
/// ```rust
/// use gstbook_core::tax::parse_state_code;
///
/// assert_eq!(parse_state_code("Maharashtra (27)"), Some(27));
/// assert_eq!(parse_state_code("Delhi (07)"), Some(7));
/// assert_eq!(parse_state_code("Maharashtra"), None);
/// assert_eq!(parse_state_code(""), None);
/// ```
pub fn parse_state_code(place_of_supply: &str) -> Option<u8> {
    let trimmed = place_of_supply.trim_end();
    let inner = trimmed.strip_suffix(')')?;
    let open = inner.rfind('(')?;
    parse_code_digits(&inner[open + 1..])
}

/// Parses a bare state code such as `"29"` or `"7"`.
pub fn parse_code_digits(code: &str) -> Option<u8> {
    let code = code.trim();
    if code.is_empty() || code.len() > 2 || !code.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    code.parse().ok()
}

/// Decides whether a document is an inter-state supply.
///
/// Inter-state only when the place of supply carries a readable state code
/// that differs from the seller's. Codes compare numerically, so `"7"` and
/// `"07"` are the same state. A missing or malformed place of supply is
/// intra-state.
///
/// ## Example
/// ```rust
/// use gstbook_core::tax::is_inter_state;
///
/// assert!(!is_inter_state("Karnataka (29)", "29"));
/// assert!(is_inter_state("Tamil Nadu (33)", "29"));
/// assert!(!is_inter_state("somewhere", "29"));
/// ```
pub fn is_inter_state(place_of_supply: &str, seller_state_code: &str) -> bool {
    match parse_state_code(place_of_supply) {
        Some(supply) => Some(supply) != parse_code_digits(seller_state_code),
        None => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaxRate;

    fn item(qty: f64, rate_rupees: i64, tax_pct: f64) -> LineItem {
        LineItem {
            qty,
            rate: Money::from_rupees(rate_rupees),
            tax_rate: TaxRate::from_percentage(tax_pct),
            ..LineItem::new("1")
        }
    }

    #[test]
    fn test_intra_state_split() {
        let calc = calculate_line_item(&item(2.0, 100, 18.0), false);
        assert_eq!(calc.taxable_value, Money::from_rupees(200));
        assert_eq!(calc.cgst, Money::from_rupees(18));
        assert_eq!(calc.sgst, Money::from_rupees(18));
        assert_eq!(calc.igst, Money::zero());
        assert_eq!(calc.total, Money::from_rupees(236));
    }

    #[test]
    fn test_inter_state_igst() {
        let calc = calculate_line_item(&item(2.0, 100, 18.0), true);
        assert_eq!(calc.taxable_value, Money::from_rupees(200));
        assert_eq!(calc.cgst, Money::zero());
        assert_eq!(calc.sgst, Money::zero());
        assert_eq!(calc.igst, Money::from_rupees(36));
        assert_eq!(calc.total, Money::from_rupees(236));
    }

    #[test]
    fn test_exactly_one_branch_populated() {
        for inter in [false, true] {
            let calc = calculate_line_item(&item(3.0, 333, 12.0), inter);
            let split = calc.cgst + calc.sgst;
            assert!(split.is_zero() != calc.igst.is_zero());
            assert_eq!(calc.total, calc.taxable_value + calc.total_tax());
        }
    }

    #[test]
    fn test_zero_rate_has_no_tax() {
        let calc = calculate_line_item(&item(1.0, 1000, 0.0), false);
        assert_eq!(calc.total_tax(), Money::zero());
        assert_eq!(calc.total, Money::from_rupees(1000));
    }

    #[test]
    fn test_odd_paisa_split_adds_up() {
        // ₹0.10 @ 5% = 0.5 paise → 1 paisa of tax, split 0 + 1
        let line = LineItem {
            qty: 1.0,
            rate: Money::from_paise(10),
            tax_rate: TaxRate::from_bps(500),
            ..LineItem::new("1")
        };
        let calc = calculate_line_item(&line, false);
        assert_eq!(calc.cgst + calc.sgst, Money::from_paise(1));
    }

    #[test]
    fn test_non_finite_qty_counts_as_zero() {
        let calc = calculate_line_item(&item(f64::NAN, 100, 18.0), false);
        assert_eq!(calc, LineItemCalc::default());
    }

    #[test]
    fn test_negative_qty_propagates() {
        let calc = calculate_line_item(&item(-1.0, 100, 18.0), true);
        assert_eq!(calc.taxable_value, Money::from_rupees(-100));
        assert_eq!(calc.igst, Money::from_rupees(-18));
        assert_eq!(calc.total, Money::from_rupees(-118));
    }

    #[test]
    fn test_huge_quantity_saturates_or_reports_overflow() {
        // 1e17 × ₹1,000 = 1e22 paise, far past i64
        let line = item(1e17, 1000, 18.0);

        let calc = calculate_line_item(&line, false);
        assert_eq!(calc.taxable_value, Money::MAX);
        assert_eq!(calc.total, Money::MAX);

        assert!(matches!(
            try_calculate_line_item(&line, false),
            Err(CoreError::AmountOverflow)
        ));
    }

    #[test]
    fn test_tax_overflow_is_reported() {
        // taxable value fits, but taxable + 18% does not
        let line = LineItem {
            qty: 1.0,
            rate: Money::from_paise(i64::MAX / 10 * 9),
            tax_rate: TaxRate::from_bps(1800),
            ..LineItem::new("1")
        };
        assert!(try_calculate_line_item(&line, true).is_err());
        assert_eq!(calculate_line_item(&line, true).total, Money::MAX);
    }

    #[test]
    fn test_checked_line_matches_infallible() {
        let line = item(7.5, 49, 28.0);
        for inter in [false, true] {
            assert_eq!(
                try_calculate_line_item(&line, inter).unwrap(),
                calculate_line_item(&line, inter)
            );
        }
    }

    #[test]
    fn test_idempotent() {
        let line = item(7.5, 49, 28.0);
        assert_eq!(calculate_line_item(&line, false), calculate_line_item(&line, false));
    }

    #[test]
    fn test_parse_state_code() {
        assert_eq!(parse_state_code("Karnataka (29)"), Some(29));
        assert_eq!(parse_state_code("Karnataka (29)  "), Some(29));
        assert_eq!(parse_state_code("Jammu (and) Kashmir (01)"), Some(1));
        assert_eq!(parse_state_code("Karnataka (KA)"), None);
        assert_eq!(parse_state_code("Karnataka (290)"), None);
        assert_eq!(parse_state_code("Karnataka ()"), None);
        assert_eq!(parse_state_code("(29) Karnataka"), None);
    }

    #[test]
    fn test_is_inter_state() {
        assert!(!is_inter_state("Karnataka (29)", "29"));
        assert!(!is_inter_state("Delhi (7)", "07"));
        assert!(is_inter_state("Kerala (32)", "29"));
        // malformed → intra-state
        assert!(!is_inter_state("", "29"));
        assert!(!is_inter_state("Kerala", "29"));
    }
}
