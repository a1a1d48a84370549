//! # Amount in Words
//!
//! Renders a rupee amount as English words using the Indian numbering system,
//! as required on the face of a GST tax invoice.
//!
//! ## Indian Grouping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Amount zero-padded to 9 digits, split right-to-left:                   │
//! │                                                                         │
//! │      0 1 │ 2 3 │ 4 5 │ 6 │ 7 8                                          │
//! │      ────┼─────┼─────┼───┼────                                          │
//! │     crore│lakh │thou.│hun│units                                         │
//! │       (2)│ (2) │ (2) │(1)│ (2)                                          │
//! │                                                                         │
//! │  12,34,56,078 → "twelve crore thirty four lakh fifty six thousand      │
//! │                  and seventy eight rupees only"                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Anything with more than 9 digits (≥ 100 crore) is refused with
//! [`CoreError::AmountTooLarge`].

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Largest amount (in rupees) that can be written in words.
pub const MAX_WORDS_AMOUNT: u64 = 999_999_999;

const SUFFIX: &str = "rupees only";

const ONES: [&str; 20] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Scale groups above the final tens-and-units group, highest first.
const GROUPS: [(u64, u64, &str); 4] = [
    // (divisor, width, scale word)
    (10_000_000, 100, "crore"),
    (100_000, 100, "lakh"),
    (1_000, 100, "thousand"),
    (100, 10, "hundred"),
];

/// Words for a value 1..=99.
fn two_digit_words(n: u64) -> String {
    debug_assert!(n < 100);
    if n < 20 {
        return ONES[n as usize].to_string();
    }
    let tens = TENS[(n / 10) as usize];
    match n % 10 {
        0 => tens.to_string(),
        units => format!("{} {}", tens, ONES[units as usize]),
    }
}

/// Converts a whole-rupee amount into words.
///
/// ## Rules
/// - Every non-zero group is followed by its scale word
/// - The last (tens and units) group is preceded by "and" only when
///   a higher group was spoken
/// - Zero is "zero rupees only"
///
/// ## Example
/// ```rust
/// use gstbook_core::words::number_to_words;
///
/// assert_eq!(number_to_words(0).unwrap(), "zero rupees only");
/// assert_eq!(number_to_words(100).unwrap(), "one hundred rupees only");
/// assert_eq!(
///     number_to_words(123456).unwrap(),
///     "one lakh twenty three thousand four hundred and fifty six rupees only"
/// );
/// assert!(number_to_words(1_000_000_000).is_err());
/// ```
pub fn number_to_words(amount: u64) -> CoreResult<String> {
    if amount > MAX_WORDS_AMOUNT {
        return Err(CoreError::AmountTooLarge { amount });
    }

    let mut parts: Vec<String> = Vec::with_capacity(6);

    for (divisor, width, scale) in GROUPS {
        let value = amount / divisor % width;
        if value != 0 {
            parts.push(format!("{} {}", two_digit_words(value), scale));
        }
    }

    let units = amount % 100;
    if units != 0 {
        if !parts.is_empty() {
            parts.push("and".to_string());
        }
        parts.push(two_digit_words(units));
    }

    if parts.is_empty() {
        return Ok(format!("zero {}", SUFFIX));
    }

    Ok(format!("{} {}", parts.join(" "), SUFFIX))
}

/// Converts a [`Money`] amount into words, rounding paise to the nearest rupee.
///
/// Only an amount that is still negative after rounding is rejected, so
/// `-₹0.01` reads as zero rupees.
pub fn money_to_words(amount: Money) -> CoreResult<String> {
    let rupees = amount.rounded_rupees();
    if rupees < 0 {
        return Err(CoreError::NegativeAmount {
            paise: amount.paise(),
        });
    }
    number_to_words(rupees as u64)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: u64) -> String {
        number_to_words(n).unwrap()
    }

    #[test]
    fn test_zero() {
        assert_eq!(words(0), "zero rupees only");
    }

    #[test]
    fn test_below_hundred_has_no_and() {
        assert_eq!(words(7), "seven rupees only");
        assert_eq!(words(19), "nineteen rupees only");
        assert_eq!(words(20), "twenty rupees only");
        assert_eq!(words(45), "forty five rupees only");
    }

    #[test]
    fn test_round_hundreds_and_thousands() {
        assert_eq!(words(100), "one hundred rupees only");
        assert_eq!(words(1000), "one thousand rupees only");
        assert_eq!(words(20000), "twenty thousand rupees only");
    }

    #[test]
    fn test_and_before_final_group() {
        assert_eq!(words(101), "one hundred and one rupees only");
        assert_eq!(words(1005), "one thousand and five rupees only");
        assert_eq!(words(236), "two hundred and thirty six rupees only");
        assert_eq!(words(1_00_090), "one lakh and ninety rupees only");
    }

    #[test]
    fn test_lakh_grouping() {
        assert_eq!(
            words(123456),
            "one lakh twenty three thousand four hundred and fifty six rupees only"
        );
        assert_eq!(words(10_00_000), "ten lakh rupees only");
    }

    #[test]
    fn test_crore_grouping() {
        assert_eq!(
            words(12_34_56_078),
            "twelve crore thirty four lakh fifty six thousand and seventy eight rupees only"
        );
        assert_eq!(
            words(MAX_WORDS_AMOUNT),
            "ninety nine crore ninety nine lakh ninety nine thousand nine hundred and ninety nine rupees only"
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        let err = number_to_words(1_000_000_000).unwrap_err();
        assert!(matches!(
            err,
            CoreError::AmountTooLarge {
                amount: 1_000_000_000
            }
        ));
        assert!(number_to_words(u64::MAX).is_err());
    }

    #[test]
    fn test_money_rounds_paise() {
        assert_eq!(
            money_to_words(Money::from_paise(10049)).unwrap(),
            "one hundred rupees only"
        );
        assert_eq!(
            money_to_words(Money::from_paise(10050)).unwrap(),
            "one hundred and one rupees only"
        );
    }

    #[test]
    fn test_money_negative_is_reported() {
        assert!(matches!(
            money_to_words(Money::from_paise(-50)),
            Err(CoreError::NegativeAmount { paise: -50 })
        ));
        assert!(money_to_words(Money::from_rupees(-3)).is_err());
    }

    #[test]
    fn test_money_rounding_to_zero_is_not_negative() {
        assert_eq!(money_to_words(Money::from_paise(-1)).unwrap(), "zero rupees only");
        assert_eq!(money_to_words(Money::from_paise(-49)).unwrap(), "zero rupees only");
    }
}
