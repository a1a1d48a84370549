//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Paise?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  On a GST invoice this shows up as CGST ₹9.000000001 + SGST ₹8.99999   │
//! │  and a grand total that no longer matches its own line items.          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹236.00 = 23600 paise                                               │
//! │    Every split (CGST/SGST) sums back to the exact tax in paise         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gstbook_core::money::Money;
//!
//! let rate = Money::from_rupees(100);          // ₹100.00
//! let taxable = rate.multiply_quantity(2.0);    // ₹200.00
//! assert_eq!(taxable.paise(), 20000);
//! assert_eq!(taxable.to_string(), "₹200.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::types::TaxRate;
use crate::words;

/// Basis points in 100%.
const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in paise (1/100 of an Indian Rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: round-off adjustments and raw breakdowns may go negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Saturating operators**: `+`, `-`, `Sum` and the rate helpers stop at
///   [`Money::MAX`] / [`Money::MIN`] instead of wrapping; the `checked_*`
///   methods report overflow as `None`
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  LineItem.rate ──► taxable_value ──► CGST/SGST or IGST ──► line total   │
/// │                                                                         │
/// │  Σ line totals − discount + charges + round_off ──► final total        │
/// │                                                                         │
/// │  final total ──► "₹1,23,456.00" and "one lakh ... rupees only"         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Largest representable amount (≈ ₹9.2 × 10^16).
    pub const MAX: Money = Money(i64::MAX);

    /// Smallest representable amount.
    pub const MIN: Money = Money(i64::MIN);

    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use gstbook_core::money::Money;
    ///
    /// let price = Money::from_paise(10050); // ₹100.50
    /// assert_eq!(price.paise(), 10050);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees.saturating_mul(100))
    }

    /// Creates a Money value from rupees and paise.
    ///
    /// ## Example
    /// ```rust
    /// use gstbook_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees_paise(10, 99).paise(), 1099);
    /// assert_eq!(Money::from_rupees_paise(-5, 50).paise(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the rupee part should be negative.
    #[inline]
    pub const fn from_rupees_paise(rupees: i64, paise: i64) -> Self {
        let whole = rupees.saturating_mul(100);
        if rupees < 0 {
            Money(whole.saturating_sub(paise))
        } else {
            Money(whole.saturating_add(paise))
        }
    }

    /// Converts a floating rupee amount (as typed into a form field) to paise.
    ///
    /// Non-finite input (NaN, ±∞) becomes zero.
    pub fn from_rupees_f64(rupees: f64) -> Self {
        if !rupees.is_finite() {
            return Money::zero();
        }
        Money((rupees * 100.0).round() as i64)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Clamps negative amounts to zero.
    ///
    /// ## Example
    /// ```rust
    /// use gstbook_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(-400).clamp_non_negative(), Money::zero());
    /// assert_eq!(Money::from_rupees(12).clamp_non_negative(), Money::from_rupees(12));
    /// ```
    #[inline]
    pub const fn clamp_non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            Money(self.0)
        }
    }

    /// Calculates tax at the given rate, rounded half away from zero.
    ///
    /// ## Implementation
    /// Integer math in i128: `amount_paise * bps / 10000`.
    ///
    /// ## Example
    /// ```rust
    /// use gstbook_core::money::Money;
    /// use gstbook_core::types::TaxRate;
    ///
    /// let taxable = Money::from_rupees(200);
    /// let tax = taxable.calculate_tax(TaxRate::from_percentage(18.0));
    /// assert_eq!(tax, Money::from_rupees(36));
    ///
    /// // ₹0.05 at 5% = 0.25 paise → 0 paise
    /// assert_eq!(Money::from_paise(5).calculate_tax(TaxRate::from_bps(500)).paise(), 0);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.percentage_of(rate.bps())
    }

    /// Checked [`calculate_tax`](Self::calculate_tax): `None` if the tax does
    /// not fit in paise.
    pub fn checked_calculate_tax(&self, rate: TaxRate) -> Option<Money> {
        self.checked_percentage_of(rate.bps())
    }

    /// Returns `bps` basis points of this amount, rounded half away from zero.
    ///
    /// Used for percentage discounts (1000 bps = 10%). Saturates at
    /// [`Money::MAX`] / [`Money::MIN`].
    pub fn percentage_of(&self, bps: u32) -> Money {
        Money::saturating_from_i128(self.scaled_bps(bps))
    }

    /// Checked [`percentage_of`](Self::percentage_of).
    pub fn checked_percentage_of(&self, bps: u32) -> Option<Money> {
        i64::try_from(self.scaled_bps(bps)).ok().map(Money)
    }

    fn scaled_bps(&self, bps: u32) -> i128 {
        div_round_half_away(self.0 as i128 * bps as i128, BPS_SCALE)
    }

    fn saturating_from_i128(paise: i128) -> Money {
        match i64::try_from(paise) {
            Ok(p) => Money(p),
            Err(_) if paise < 0 => Money::MIN,
            Err(_) => Money::MAX,
        }
    }

    /// Multiplies a unit rate by a (possibly fractional) quantity.
    ///
    /// The product is rounded to the nearest paisa. A non-finite quantity is
    /// treated as zero. A product beyond the paise range saturates; use
    /// [`checked_multiply_quantity`](Self::checked_multiply_quantity) to
    /// detect that.
    ///
    /// ## Example
    /// ```rust
    /// use gstbook_core::money::Money;
    ///
    /// let hourly = Money::from_rupees(1200);
    /// assert_eq!(hourly.multiply_quantity(1.5), Money::from_rupees(1800));
    /// assert_eq!(hourly.multiply_quantity(f64::NAN), Money::zero());
    /// assert_eq!(hourly.multiply_quantity(1e30), Money::MAX);
    /// ```
    pub fn multiply_quantity(&self, qty: f64) -> Money {
        if !qty.is_finite() {
            return Money::zero();
        }
        // `as` saturates float → int conversions.
        Money((self.0 as f64 * qty).round() as i64)
    }

    /// Checked [`multiply_quantity`](Self::multiply_quantity): `None` when the
    /// product does not fit in paise.
    ///
    /// ## Example
    /// ```rust
    /// use gstbook_core::money::Money;
    ///
    /// let rate = Money::from_rupees(1000);
    /// assert_eq!(rate.checked_multiply_quantity(2.0), Some(Money::from_rupees(2000)));
    /// assert_eq!(rate.checked_multiply_quantity(1e17), None);
    /// ```
    pub fn checked_multiply_quantity(&self, qty: f64) -> Option<Money> {
        if !qty.is_finite() {
            return Some(Money::zero());
        }
        Money::checked_from_paise_f64(self.0 as f64 * qty)
    }

    /// Converts a float paise value, rounding to the nearest paisa.
    ///
    /// `None` for non-finite values and values outside the `i64` range.
    pub fn checked_from_paise_f64(paise: f64) -> Option<Money> {
        // i64::MIN as f64 is exactly -2^63; i64::MAX rounds up to 2^63.
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;
        let rounded = paise.round();
        if rounded.is_finite() && rounded >= -LIMIT && rounded < LIMIT {
            Some(Money(rounded as i64))
        } else {
            None
        }
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Splits an amount into two halves that sum back to the original.
    ///
    /// The first half is truncated; any odd paisa goes to the second.
    ///
    /// ## Example
    /// ```rust
    /// use gstbook_core::money::Money;
    ///
    /// let (cgst, sgst) = Money::from_paise(3601).split_half();
    /// assert_eq!(cgst.paise(), 1800);
    /// assert_eq!(sgst.paise(), 1801);
    /// ```
    pub const fn split_half(&self) -> (Money, Money) {
        let first = self.0 / 2;
        (Money(first), Money(self.0 - first))
    }

    /// Rounds to the nearest whole rupee (half away from zero).
    ///
    /// ## Example
    /// ```rust
    /// use gstbook_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(12350).rounded_rupees(), 124);
    /// assert_eq!(Money::from_paise(12349).rounded_rupees(), 123);
    /// ```
    pub fn rounded_rupees(&self) -> i64 {
        div_round_half_away(self.0 as i128, 100) as i64
    }

    /// Renders the amount in words for invoice compliance text.
    ///
    /// Paise are rounded to the nearest rupee first; they are never spoken.
    ///
    /// ## Example
    /// ```rust
    /// use gstbook_core::money::Money;
    ///
    /// let words = Money::from_paise(23600).in_words().unwrap();
    /// assert_eq!(words, "two hundred and thirty six rupees only");
    /// ```
    pub fn in_words(&self) -> CoreResult<String> {
        words::money_to_words(*self)
    }
}

/// Integer division rounding half away from zero.
fn div_round_half_away(numerator: i128, denominator: i128) -> i128 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    }
}

/// Formats a rupee amount the way invoices display it: `₹1,23,456.00`.
///
/// ## Indian Digit Grouping
/// ```text
/// International:  123,456,789.00
/// Indian:       12,34,56,789.00   (last three digits, then pairs)
/// ```
///
/// ## Example
/// ```rust
/// use gstbook_core::money::{format_currency, Money};
///
/// assert_eq!(format_currency(Money::from_rupees(123456)), "₹1,23,456.00");
/// assert_eq!(format_currency(Money::from_paise(-123450)), "-₹1,234.50");
/// ```
pub fn format_currency(amount: Money) -> String {
    amount.to_string()
}

/// Inserts Indian-style separators into a plain digit string.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the en-IN rupee convention (see [`format_currency`]).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        // unsigned_abs avoids overflow on i64::MIN
        let magnitude = self.0.unsigned_abs();
        let rupees = group_indian(&(magnitude / 100).to_string());
        write!(f, "{}₹{}.{:02}", sign, rupees, magnitude % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(1099);
        assert_eq!(money.paise(), 1099);
        assert_eq!(money.rupees(), 10);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_from_rupees_f64() {
        assert_eq!(Money::from_rupees_f64(1500.5).paise(), 150050);
        assert_eq!(Money::from_rupees_f64(0.1 + 0.2).paise(), 30);
        assert_eq!(Money::from_rupees_f64(f64::NAN), Money::zero());
        assert_eq!(Money::from_rupees_f64(f64::INFINITY), Money::zero());
    }

    #[test]
    fn test_display_indian_grouping() {
        assert_eq!(Money::from_paise(0).to_string(), "₹0.00");
        assert_eq!(Money::from_paise(5).to_string(), "₹0.05");
        assert_eq!(Money::from_rupees(999).to_string(), "₹999.00");
        assert_eq!(Money::from_rupees(1000).to_string(), "₹1,000.00");
        assert_eq!(Money::from_rupees(123456).to_string(), "₹1,23,456.00");
        assert_eq!(Money::from_rupees(1234567).to_string(), "₹12,34,567.00");
        assert_eq!(Money::from_rupees(123456789).to_string(), "₹12,34,56,789.00");
        assert_eq!(Money::from_paise(-123450).to_string(), "-₹1,234.50");
    }

    #[test]
    fn test_display_extreme_values() {
        // Must not panic on the most negative value
        let s = Money::from_paise(i64::MIN).to_string();
        assert!(s.starts_with("-₹"));
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((-a).paise(), -1000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.paise(), 2000);
    }

    #[test]
    fn test_tax_calculation_basic() {
        let amount = Money::from_rupees(200);
        let tax = amount.calculate_tax(TaxRate::from_bps(1800));
        assert_eq!(tax, Money::from_rupees(36));
    }

    #[test]
    fn test_tax_calculation_rounds_half_away_from_zero() {
        // 50 paise at 5% = 2.5 paise → 3
        assert_eq!(Money::from_paise(50).calculate_tax(TaxRate::from_bps(500)).paise(), 3);
        // -50 paise at 5% = -2.5 paise → -3
        assert_eq!(Money::from_paise(-50).calculate_tax(TaxRate::from_bps(500)).paise(), -3);
    }

    #[test]
    fn test_percentage_of() {
        let subtotal = Money::from_rupees(1000);
        assert_eq!(subtotal.percentage_of(1000), Money::from_rupees(100));
        assert_eq!(subtotal.percentage_of(0), Money::zero());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit = Money::from_paise(299);
        assert_eq!(unit.multiply_quantity(3.0).paise(), 897);
        assert_eq!(unit.multiply_quantity(0.0), Money::zero());
        assert_eq!(unit.multiply_quantity(-2.0).paise(), -598);
        assert_eq!(unit.multiply_quantity(f64::INFINITY), Money::zero());
    }

    #[test]
    fn test_operators_saturate_instead_of_wrapping() {
        assert_eq!(Money::MAX + Money::from_paise(1), Money::MAX);
        assert_eq!(Money::MIN - Money::from_paise(1), Money::MIN);
        assert_eq!(-Money::MIN, Money::MAX);
        assert_eq!(Money::MIN.abs(), Money::MAX);

        let mut running = Money::MAX;
        running += Money::from_rupees(1);
        assert_eq!(running, Money::MAX);

        let total: Money = [Money::MAX, Money::MAX].into_iter().sum();
        assert_eq!(total, Money::MAX);
        assert_eq!(Money::from_rupees(i64::MAX), Money::MAX);
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        assert_eq!(Money::MAX.checked_add(Money::from_paise(1)), None);
        assert_eq!(Money::MIN.checked_sub(Money::from_paise(1)), None);
        assert_eq!(
            Money::from_paise(2).checked_add(Money::from_paise(3)),
            Some(Money::from_paise(5))
        );

        let rate = Money::from_rupees(1000);
        assert_eq!(rate.checked_multiply_quantity(1e17), None);
        assert_eq!(rate.multiply_quantity(1e17), Money::MAX);
        assert_eq!(rate.checked_multiply_quantity(f64::NAN), Some(Money::zero()));

        assert_eq!(Money::MAX.checked_calculate_tax(TaxRate::from_bps(20_000)), None);
        assert!(Money::MAX.checked_calculate_tax(TaxRate::from_bps(1800)).is_some());
        assert_eq!(Money::MAX.percentage_of(20_000), Money::MAX);
        assert_eq!(Money::MIN.percentage_of(20_000), Money::MIN);
    }

    #[test]
    fn test_checked_from_paise_f64() {
        assert_eq!(Money::checked_from_paise_f64(1234.4), Some(Money::from_paise(1234)));
        assert_eq!(Money::checked_from_paise_f64(1e300), None);
        assert_eq!(Money::checked_from_paise_f64(-1e19), None);
        assert_eq!(Money::checked_from_paise_f64(f64::NAN), None);
    }

    #[test]
    fn test_split_half_preserves_total() {
        for paise in [0_i64, 1, 2, 3601, 99_999, -7] {
            let (a, b) = Money::from_paise(paise).split_half();
            assert_eq!(a + b, Money::from_paise(paise));
        }
    }

    #[test]
    fn test_rounded_rupees() {
        assert_eq!(Money::from_paise(0).rounded_rupees(), 0);
        assert_eq!(Money::from_paise(49).rounded_rupees(), 0);
        assert_eq!(Money::from_paise(50).rounded_rupees(), 1);
        assert_eq!(Money::from_paise(-150).rounded_rupees(), -2);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_paise(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().paise(), 100);
        assert_eq!(negative.clamp_non_negative(), Money::zero());
    }
}
