//! # Domain Types
//!
//! Core domain types shared by the engine, the store and the frontend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Document (kind = invoice | quotation)                                 │
//! │  ├── Invoice    { base, status: InvoiceStatus,   due_date }            │
//! │  └── Quotation  { base, status: QuotationStatus, valid_until }         │
//! │                                                                         │
//! │  DocumentBase                                                          │
//! │  ├── items: Vec<LineItem>            qty × rate @ tax_rate             │
//! │  ├── place_of_supply                 "Karnataka (29)"                  │
//! │  ├── discount: Discount              Fixed(₹) | Percentage(bps)        │
//! │  ├── additional_charges              Vec<AdditionalCharge>             │
//! │  └── round_off: Money                signed manual adjustment          │
//! │                                                                         │
//! │  SellerProfile                       who is issuing the document       │
//! │  Lead                                pipeline entry: expected value    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lenient Numbers
//! Documents come back from storage as whatever the editor last wrote. A
//! half-typed quantity can be `""` or `null`. Numeric fields of line items,
//! charges and the round-off therefore accept numbers, numeric strings,
//! booleans and `null`, and coerce anything else to zero. Amounts beyond the
//! paise range pin to [`Money::MAX`] / [`Money::MIN`]; validation and the
//! checked totals reject them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// GST rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01%. 1800 bps = 18% GST, 250 bps = 2.5% (half of a 5% slab).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// The rate every new line item starts with.
    pub const DEFAULT: TaxRate = TaxRate(1800);

    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (18.0 → 1800 bps).
    ///
    /// Negative or non-finite percentages become zero.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return TaxRate::zero();
        }
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate (exempt / nil-rated supplies).
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::DEFAULT
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One billable row of an invoice or quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Unique within the parent document.
    pub id: String,

    pub description: String,

    /// HSN/SAC classification code. Free-form, never interpreted.
    #[serde(default)]
    pub hsn: String,

    /// Quantity. Fractional values (hours, kilograms) are allowed.
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub qty: f64,

    /// Unit price in paise, before tax.
    #[serde(default, deserialize_with = "lenient::money_or_zero")]
    pub rate: Money,

    /// GST rate applied to this line.
    #[serde(default = "TaxRate::zero", deserialize_with = "lenient::tax_rate_or_zero")]
    pub tax_rate: TaxRate,
}

impl LineItem {
    /// Creates a line item with the editor defaults: qty 1, rate 0, 18% GST.
    pub fn new(id: impl Into<String>) -> Self {
        LineItem {
            id: id.into(),
            description: String::new(),
            hsn: String::new(),
            qty: 1.0,
            rate: Money::zero(),
            tax_rate: TaxRate::DEFAULT,
        }
    }

    /// Sets one field in place.
    pub fn apply(&mut self, field: LineItemField) {
        match field {
            LineItemField::Description(description) => self.description = description,
            LineItemField::Hsn(hsn) => self.hsn = hsn,
            LineItemField::Qty(qty) => self.qty = qty,
            LineItemField::Rate(rate) => self.rate = rate,
            LineItemField::TaxRate(tax_rate) => self.tax_rate = tax_rate,
        }
    }
}

/// A single-field edit of a [`LineItem`], as emitted by the line editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum LineItemField {
    Description(String),
    Hsn(String),
    Qty(f64),
    Rate(Money),
    TaxRate(TaxRate),
}

// =============================================================================
// Additional Charge
// =============================================================================

/// A freight/packing/handling style charge added after line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdditionalCharge {
    pub id: String,
    pub label: String,
    #[serde(default, deserialize_with = "lenient::money_or_zero")]
    pub amount: Money,
}

// =============================================================================
// Discount
// =============================================================================

/// Document-level discount.
///
/// - `Fixed` is an amount in paise subtracted from the tax-inclusive sum.
/// - `Percentage` is in basis points of the summed taxable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Discount {
    Fixed(Money),
    Percentage(u32),
}

impl Discount {
    /// True when the discount takes nothing off.
    pub fn is_zero(&self) -> bool {
        match self {
            Discount::Fixed(amount) => amount.is_zero(),
            Discount::Percentage(bps) => *bps == 0,
        }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::Fixed(Money::zero())
    }
}

// =============================================================================
// Statuses
// =============================================================================

/// Where an invoice is in its payment lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    /// Money not yet received: drafts, sent and overdue invoices.
    pub fn is_outstanding(&self) -> bool {
        matches!(
            self,
            InvoiceStatus::Draft | InvoiceStatus::Sent | InvoiceStatus::Overdue
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a quotation is in its negotiation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum QuotationStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
}

impl QuotationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Draft => "draft",
            QuotationStatus::Sent => "sent",
            QuotationStatus::Accepted => "accepted",
            QuotationStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Documents
// =============================================================================

/// Fields shared by invoices and quotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DocumentBase {
    pub id: String,

    /// Human-readable document code, e.g. `INV2612345`.
    pub number: String,

    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Weak reference; the client may since have been deleted.
    #[serde(default)]
    pub client_id: String,

    pub items: Vec<LineItem>,

    /// `"<State name> (<two-digit code>)"`.
    #[serde(default)]
    pub place_of_supply: String,

    #[serde(default)]
    pub discount: Discount,

    #[serde(default)]
    pub additional_charges: Vec<AdditionalCharge>,

    /// Signed adjustment applied last.
    #[serde(default, deserialize_with = "lenient::money_or_zero")]
    pub round_off: Money,

    #[serde(default = "default_true")]
    pub show_bank_details: bool,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub terms: String,
}

fn default_true() -> bool {
    true
}

/// A tax invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    #[serde(flatten)]
    #[ts(flatten)]
    pub base: DocumentBase,

    #[serde(default)]
    pub status: InvoiceStatus,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,
}

/// A price quotation, convertible into an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quotation {
    #[serde(flatten)]
    #[ts(flatten)]
    pub base: DocumentBase,

    #[serde(default)]
    pub status: QuotationStatus,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub valid_until: Option<NaiveDate>,
}

/// Invoice or quotation, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Document {
    Invoice(Invoice),
    Quotation(Quotation),
}

/// Which kind of document, without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    Quotation,
}

// =============================================================================
// Seller Profile
// =============================================================================

/// The business issuing documents.
///
/// Its `state_code` is one side of the intra/inter-state comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SellerProfile {
    pub name: String,

    /// 15-character GSTIN. The first two digits are the state code.
    #[serde(default)]
    pub gstin: String,

    /// State name as printed, e.g. "Karnataka".
    pub state: String,

    /// Two-digit GST state code, e.g. "29".
    pub state_code: String,

    /// Prefix for generated invoice numbers.
    #[serde(default = "default_invoice_prefix")]
    pub invoice_prefix: String,

    /// Prefix for generated quotation numbers.
    #[serde(default = "default_quotation_prefix")]
    pub quotation_prefix: String,
}

fn default_invoice_prefix() -> String {
    "INV".to_string()
}

fn default_quotation_prefix() -> String {
    "QT".to_string()
}

impl SellerProfile {
    /// Default place of supply for new documents: the seller's own state.
    ///
    /// ## Example
    /// ```rust
    /// use gstbook_core::SellerProfile;
    ///
    /// let seller = SellerProfile {
    ///     state: "Karnataka".into(),
    ///     state_code: "29".into(),
    ///     ..SellerProfile::default()
    /// };
    /// assert_eq!(seller.place_of_supply(), "Karnataka (29)");
    /// ```
    pub fn place_of_supply(&self) -> String {
        format!("{} ({})", self.state, self.state_code)
    }
}

impl Default for SellerProfile {
    fn default() -> Self {
        SellerProfile {
            name: String::new(),
            gstin: String::new(),
            state: String::new(),
            state_code: String::new(),
            invoice_prefix: default_invoice_prefix(),
            quotation_prefix: default_quotation_prefix(),
        }
    }
}

// =============================================================================
// Lead
// =============================================================================

/// A sales lead as far as the dashboard cares: its expected deal value.
///
/// Lead records carry contact and status fields owned by the lead board;
/// those are ignored here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Lead {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Expected deal value.
    #[serde(default, deserialize_with = "lenient::money_or_zero")]
    pub value: Money,
}

// =============================================================================
// Lenient numeric deserializers
// =============================================================================

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::TaxRate;
    use crate::money::Money;

    /// Coerces a loosely typed JSON value to a finite number, else zero.
    fn coerce(value: Value) -> f64 {
        let n = match value {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Value::Bool(true) => 1.0,
            _ => 0.0,
        };
        if n.is_finite() {
            n
        } else {
            0.0
        }
    }

    pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(coerce(Value::deserialize(deserializer)?))
    }

    pub fn money_or_zero<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let paise = coerce(Value::deserialize(deserializer)?);
        Ok(Money::checked_from_paise_f64(paise).unwrap_or(if paise < 0.0 {
            Money::MIN
        } else {
            Money::MAX
        }))
    }

    pub fn tax_rate_or_zero<'de, D>(deserializer: D) -> Result<TaxRate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bps = coerce(Value::deserialize(deserializer)?);
        if bps <= 0.0 {
            return Ok(TaxRate::zero());
        }
        Ok(TaxRate::from_bps(bps.round() as u32))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(18.0).bps(), 1800);
        assert_eq!(TaxRate::from_percentage(2.5).bps(), 250);
        assert_eq!(TaxRate::from_percentage(-5.0), TaxRate::zero());
        assert_eq!(TaxRate::from_percentage(f64::NAN), TaxRate::zero());
        assert!((TaxRate::from_bps(1250).percentage() - 12.5).abs() < 0.001);
    }

    #[test]
    fn test_line_item_defaults() {
        let item = LineItem::new("1");
        assert_eq!(item.qty, 1.0);
        assert_eq!(item.rate, Money::zero());
        assert_eq!(item.tax_rate.bps(), 1800);
    }

    #[test]
    fn test_line_item_apply_field() {
        let mut item = LineItem::new("1");
        item.apply(LineItemField::Qty(4.0));
        item.apply(LineItemField::Rate(Money::from_rupees(250)));
        item.apply(LineItemField::Hsn("9983".to_string()));
        assert_eq!(item.qty, 4.0);
        assert_eq!(item.rate.paise(), 25000);
        assert_eq!(item.hsn, "9983");
    }

    #[test]
    fn test_line_item_lenient_numbers() {
        let item: LineItem = serde_json::from_value(json!({
            "id": "1",
            "description": "Consulting",
            "qty": "3",
            "rate": null,
            "tax_rate": "abc"
        }))
        .unwrap();
        assert_eq!(item.qty, 3.0);
        assert_eq!(item.rate, Money::zero());
        assert_eq!(item.tax_rate, TaxRate::zero());
    }

    #[test]
    fn test_charge_amount_coerces_to_zero() {
        let charge: AdditionalCharge = serde_json::from_value(json!({
            "id": "c1",
            "label": "Freight",
            "amount": "not a number"
        }))
        .unwrap();
        assert_eq!(charge.amount, Money::zero());
    }

    #[test]
    fn test_lead_ignores_board_fields() {
        let lead: Lead = serde_json::from_value(json!({
            "id": "l1",
            "name": "Initech",
            "status": "Proposal",
            "email": "ops@initech.example",
            "value": "250000"
        }))
        .unwrap();
        assert_eq!(lead.value, Money::from_paise(250_000));

        let bare: Lead = serde_json::from_value(json!({ "id": "l2" })).unwrap();
        assert_eq!(bare.value, Money::zero());
    }

    #[test]
    fn test_out_of_range_amount_pins_to_limit() {
        let line: LineItem = serde_json::from_value(json!({
            "id": "1",
            "description": "Bulk order",
            "qty": 1,
            "rate": "1e300",
            "tax_rate": 1800
        }))
        .unwrap();
        assert_eq!(line.rate, Money::MAX);

        let charge: AdditionalCharge = serde_json::from_value(json!({
            "id": "c1",
            "label": "Refund",
            "amount": -1e300
        }))
        .unwrap();
        assert_eq!(charge.amount, Money::MIN);
    }

    #[test]
    fn test_invoice_status_outstanding() {
        assert!(InvoiceStatus::Draft.is_outstanding());
        assert!(InvoiceStatus::Sent.is_outstanding());
        assert!(InvoiceStatus::Overdue.is_outstanding());
        assert!(!InvoiceStatus::Paid.is_outstanding());
    }

    #[test]
    fn test_discount_default_is_zero() {
        assert!(Discount::default().is_zero());
        assert!(!Discount::Percentage(1000).is_zero());
    }

    #[test]
    fn test_document_is_tagged_by_kind() {
        let doc: Document = serde_json::from_value(json!({
            "kind": "quotation",
            "id": "qt-1",
            "number": "QT2610001",
            "date": "2026-10-19",
            "items": [],
            "place_of_supply": "Kerala (32)",
            "status": "sent",
            "valid_until": "2026-11-18"
        }))
        .unwrap();

        match doc {
            Document::Quotation(q) => {
                assert_eq!(q.status, QuotationStatus::Sent);
                assert_eq!(q.base.number, "QT2610001");
                assert!(q.base.show_bank_details);
                assert_eq!(q.base.discount, Discount::default());
            }
            Document::Invoice(_) => panic!("expected a quotation"),
        }
    }
}
