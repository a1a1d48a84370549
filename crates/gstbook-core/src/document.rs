//! # Document Lifecycle
//!
//! Creation, editing, duplication and conversion of invoices and quotations.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  new_quotation() ──► edit ──► Sent ──► convert_to_invoice()             │
//! │        │                                   │        │                   │
//! │        │                                   │        └► quotation:       │
//! │        │                                   │           Accepted         │
//! │        │                                   ▼                            │
//! │        │                          new Invoice (Draft, fresh id/number,  │
//! │        │                          cloned items and charges)             │
//! │        │                                                                │
//! │  new_invoice() ──► edit ──► Sent ──► Paid                               │
//! │                              └────► Overdue                             │
//! │                                                                         │
//! │  duplicate(): same content, fresh id/number/date, status reset to Draft │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every document keeps at least one line item.

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::tax;
use crate::totals::{self, DocumentTotals};
use crate::types::{
    AdditionalCharge, Discount, Document, DocumentBase, DocumentKind, Invoice, InvoiceStatus,
    LineItem, LineItemField, Quotation, QuotationStatus, SellerProfile,
};

/// Default terms printed on new invoices.
pub const DEFAULT_INVOICE_TERMS: &str = "1. Subject to local jurisdiction.\n2. Payment within due date.";

/// Default terms printed on new quotations.
pub const DEFAULT_QUOTATION_TERMS: &str = "1. Valid for 30 days.\n2. Subject to final agreement.";

/// Description of the line item every new document starts with.
pub const DEFAULT_ITEM_DESCRIPTION: &str = "PROFESSIONAL SERVICES";

/// HSN/SAC code of the starter line item.
pub const DEFAULT_ITEM_HSN: &str = "9983";

// =============================================================================
// Identifiers
// =============================================================================

/// Generates a document id such as `inv-550e8400-...`.
pub fn generate_document_id(kind: DocumentKind) -> String {
    let prefix = match kind {
        DocumentKind::Invoice => "inv",
        DocumentKind::Quotation => "qt",
    };
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// Generates a line item or charge id.
pub fn generate_item_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a human-readable document number: `<PREFIX><YY><5 digits>`.
///
/// ## Example
/// `INV2648213` for an invoice dated 2026.
pub fn generate_document_number(prefix: &str, date: NaiveDate) -> String {
    // 10000..=99999 drawn from the random bits of a v4 UUID
    let serial = 10_000 + (Uuid::new_v4().as_u128() % 90_000) as u32;
    format!("{}{:02}{}", prefix, date.year().rem_euclid(100), serial)
}

// =============================================================================
// Base access
// =============================================================================

impl AsRef<DocumentBase> for DocumentBase {
    fn as_ref(&self) -> &DocumentBase {
        self
    }
}

impl AsRef<DocumentBase> for Invoice {
    fn as_ref(&self) -> &DocumentBase {
        &self.base
    }
}

impl AsRef<DocumentBase> for Quotation {
    fn as_ref(&self) -> &DocumentBase {
        &self.base
    }
}

impl AsRef<DocumentBase> for Document {
    fn as_ref(&self) -> &DocumentBase {
        self.base()
    }
}

// =============================================================================
// Shared editing operations
// =============================================================================

impl DocumentBase {
    /// Creates an empty base with one starter line item.
    fn new(kind: DocumentKind, seller: &SellerProfile, date: NaiveDate) -> Self {
        let (prefix, terms) = match kind {
            DocumentKind::Invoice => (seller.invoice_prefix.as_str(), DEFAULT_INVOICE_TERMS),
            DocumentKind::Quotation => (seller.quotation_prefix.as_str(), DEFAULT_QUOTATION_TERMS),
        };

        let mut starter = LineItem::new("1");
        starter.description = DEFAULT_ITEM_DESCRIPTION.to_string();
        starter.hsn = DEFAULT_ITEM_HSN.to_string();

        DocumentBase {
            id: generate_document_id(kind),
            number: generate_document_number(prefix, date),
            date,
            client_id: String::new(),
            items: vec![starter],
            place_of_supply: seller.place_of_supply(),
            discount: Discount::default(),
            additional_charges: Vec::new(),
            round_off: Money::zero(),
            show_bank_details: true,
            notes: String::new(),
            terms: terms.to_string(),
        }
    }

    /// Appends a default line item and returns its id.
    pub fn add_item(&mut self) -> String {
        let id = generate_item_id();
        self.items.push(LineItem::new(id.clone()));
        id
    }

    /// Changes one field of the line item with the given id.
    pub fn update_item(&mut self, id: &str, field: LineItemField) -> CoreResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| CoreError::LineItemNotFound(id.to_string()))?;
        item.apply(field);
        Ok(())
    }

    /// Removes a line item. The last remaining item cannot be removed.
    pub fn remove_item(&mut self, id: &str) -> CoreResult<LineItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| CoreError::LineItemNotFound(id.to_string()))?;
        if self.items.len() <= 1 {
            return Err(CoreError::LastLineItem);
        }
        Ok(self.items.remove(index))
    }

    /// Adds an additional charge and returns its id.
    pub fn add_charge(&mut self, label: impl Into<String>, amount: Money) -> String {
        let id = generate_item_id();
        self.additional_charges.push(AdditionalCharge {
            id: id.clone(),
            label: label.into(),
            amount,
        });
        id
    }

    /// Removes an additional charge.
    pub fn remove_charge(&mut self, id: &str) -> CoreResult<AdditionalCharge> {
        let index = self
            .additional_charges
            .iter()
            .position(|charge| charge.id == id)
            .ok_or_else(|| CoreError::ChargeNotFound(id.to_string()))?;
        Ok(self.additional_charges.remove(index))
    }

    /// Whether this document is an inter-state supply for `seller`.
    pub fn is_inter_state(&self, seller: &SellerProfile) -> bool {
        tax::is_inter_state(&self.place_of_supply, &seller.state_code)
    }

    /// Editor breakdown with the jurisdiction resolved against `seller`.
    pub fn totals(&self, seller: &SellerProfile) -> DocumentTotals {
        totals::calculate_breakdown(self, self.is_inter_state(seller))
    }

    /// Canonical (clamped) payable amount.
    pub fn total(&self) -> Money {
        totals::calculate_document_total(self)
    }

    /// Like [`total`](Self::total), but reports overflow instead of
    /// saturating.
    pub fn try_total(&self) -> CoreResult<Money> {
        totals::try_calculate_document_total(self)
    }

    /// Copy with fresh id, number and date.
    fn renumbered(&self, kind: DocumentKind, prefix: &str, date: NaiveDate) -> Self {
        DocumentBase {
            id: generate_document_id(kind),
            number: generate_document_number(prefix, date),
            date,
            ..self.clone()
        }
    }
}

// =============================================================================
// Document (tagged union)
// =============================================================================

impl Document {
    /// Creates a draft invoice with one starter line item.
    pub fn new_invoice(seller: &SellerProfile, date: NaiveDate) -> Self {
        Document::Invoice(Invoice::new(seller, date))
    }

    /// Creates a draft quotation with one starter line item.
    pub fn new_quotation(seller: &SellerProfile, date: NaiveDate) -> Self {
        Document::Quotation(Quotation::new(seller, date))
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Invoice(_) => DocumentKind::Invoice,
            Document::Quotation(_) => DocumentKind::Quotation,
        }
    }

    pub fn base(&self) -> &DocumentBase {
        match self {
            Document::Invoice(invoice) => &invoice.base,
            Document::Quotation(quotation) => &quotation.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut DocumentBase {
        match self {
            Document::Invoice(invoice) => &mut invoice.base,
            Document::Quotation(quotation) => &mut quotation.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    /// Status as a lowercase label, e.g. for list badges.
    pub fn status_label(&self) -> &'static str {
        match self {
            Document::Invoice(invoice) => invoice.status.as_str(),
            Document::Quotation(quotation) => quotation.status.as_str(),
        }
    }

    /// Copy with fresh id, number and date, reset to draft.
    pub fn duplicate(&self, seller: &SellerProfile, date: NaiveDate) -> Self {
        match self {
            Document::Invoice(invoice) => Document::Invoice(invoice.duplicate(seller, date)),
            Document::Quotation(quotation) => {
                Document::Quotation(quotation.duplicate(seller, date))
            }
        }
    }

    pub fn is_inter_state(&self, seller: &SellerProfile) -> bool {
        self.base().is_inter_state(seller)
    }

    pub fn totals(&self, seller: &SellerProfile) -> DocumentTotals {
        self.base().totals(seller)
    }

    pub fn total(&self) -> Money {
        self.base().total()
    }
}

impl From<Invoice> for Document {
    fn from(invoice: Invoice) -> Self {
        Document::Invoice(invoice)
    }
}

impl From<Quotation> for Document {
    fn from(quotation: Quotation) -> Self {
        Document::Quotation(quotation)
    }
}

// =============================================================================
// Invoice
// =============================================================================

impl Invoice {
    pub fn new(seller: &SellerProfile, date: NaiveDate) -> Self {
        Invoice {
            base: DocumentBase::new(DocumentKind::Invoice, seller, date),
            status: InvoiceStatus::Draft,
            due_date: None,
        }
    }

    /// Copy with fresh id, number and date. Draft, no due date.
    pub fn duplicate(&self, seller: &SellerProfile, date: NaiveDate) -> Self {
        Invoice {
            base: self
                .base
                .renumbered(DocumentKind::Invoice, &seller.invoice_prefix, date),
            status: InvoiceStatus::Draft,
            due_date: None,
        }
    }
}

// =============================================================================
// Quotation
// =============================================================================

impl Quotation {
    pub fn new(seller: &SellerProfile, date: NaiveDate) -> Self {
        Quotation {
            base: DocumentBase::new(DocumentKind::Quotation, seller, date),
            status: QuotationStatus::Draft,
            valid_until: None,
        }
    }

    /// Copy with fresh id, number and date. Draft, same validity.
    pub fn duplicate(&self, seller: &SellerProfile, date: NaiveDate) -> Self {
        Quotation {
            base: self
                .base
                .renumbered(DocumentKind::Quotation, &seller.quotation_prefix, date),
            status: QuotationStatus::Draft,
            valid_until: self.valid_until,
        }
    }

    /// Converts this quotation into a new draft invoice.
    ///
    /// Items and charges are cloned; the invoice gets a fresh id, number and
    /// date. The quotation itself is marked accepted.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use gstbook_core::types::{InvoiceStatus, Quotation, QuotationStatus, SellerProfile};
    ///
    /// let seller = SellerProfile::default();
    /// let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    /// let mut quotation = Quotation::new(&seller, date);
    ///
    /// let invoice = quotation.convert_to_invoice(&seller, date);
    /// assert_eq!(invoice.status, InvoiceStatus::Draft);
    /// assert_eq!(invoice.base.items, quotation.base.items);
    /// assert_ne!(invoice.base.id, quotation.base.id);
    /// assert_eq!(quotation.status, QuotationStatus::Accepted);
    /// ```
    pub fn convert_to_invoice(&mut self, seller: &SellerProfile, date: NaiveDate) -> Invoice {
        let mut base = self
            .base
            .renumbered(DocumentKind::Invoice, &seller.invoice_prefix, date);
        base.terms = base
            .terms
            .replace("Valid for 30 days", "Payment within 15 days");

        self.status = QuotationStatus::Accepted;

        Invoice {
            base,
            status: InvoiceStatus::Draft,
            due_date: None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaxRate;

    fn seller() -> SellerProfile {
        SellerProfile {
            name: "Acme Studio".to_string(),
            gstin: "29ABCDE1234F1Z5".to_string(),
            state: "Karnataka".to_string(),
            state_code: "29".to_string(),
            ..SellerProfile::default()
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_new_invoice_defaults() {
        let doc = Document::new_invoice(&seller(), date());
        let base = doc.base();
        assert_eq!(doc.kind(), DocumentKind::Invoice);
        assert!(base.id.starts_with("inv-"));
        assert!(base.number.starts_with("INV26"));
        assert_eq!(base.number.len(), "INV26".len() + 5);
        assert_eq!(base.place_of_supply, "Karnataka (29)");
        assert_eq!(base.items.len(), 1);
        assert_eq!(base.items[0].tax_rate, TaxRate::from_bps(1800));
        assert_eq!(base.terms, DEFAULT_INVOICE_TERMS);
        assert_eq!(doc.status_label(), "draft");
    }

    #[test]
    fn test_new_quotation_defaults() {
        let doc = Document::new_quotation(&seller(), date());
        assert!(doc.id().starts_with("qt-"));
        assert!(doc.base().number.starts_with("QT26"));
        assert_eq!(doc.base().terms, DEFAULT_QUOTATION_TERMS);
    }

    #[test]
    fn test_update_and_remove_items() {
        let mut doc = Document::new_invoice(&seller(), date());
        let base = doc.base_mut();
        let second = base.add_item();

        base.update_item(&second, LineItemField::Qty(2.0)).unwrap();
        base.update_item(&second, LineItemField::Rate(Money::from_rupees(100)))
            .unwrap();
        assert_eq!(base.items[1].qty, 2.0);

        let removed = base.remove_item("1").unwrap();
        assert_eq!(removed.id, "1");
        assert_eq!(base.items.len(), 1);

        assert!(matches!(base.remove_item(&second), Err(CoreError::LastLineItem)));
        assert_eq!(base.items.len(), 1);
        assert!(matches!(
            base.update_item("missing", LineItemField::Qty(1.0)),
            Err(CoreError::LineItemNotFound(_))
        ));
    }

    #[test]
    fn test_charges() {
        let mut doc = Document::new_invoice(&seller(), date());
        let base = doc.base_mut();
        let id = base.add_charge("Freight", Money::from_rupees(150));
        assert_eq!(base.additional_charges.len(), 1);
        assert_eq!(base.remove_charge(&id).unwrap().label, "Freight");
        assert!(matches!(
            base.remove_charge(&id),
            Err(CoreError::ChargeNotFound(_))
        ));
    }

    #[test]
    fn test_jurisdiction_uses_place_of_supply() {
        let mut doc = Document::new_invoice(&seller(), date());
        {
            let base = doc.base_mut();
            base.items[0].qty = 2.0;
            base.items[0].rate = Money::from_rupees(100);
        }
        assert!(!doc.is_inter_state(&seller()));
        assert_eq!(doc.totals(&seller()).cgst, Money::from_rupees(18));

        doc.base_mut().place_of_supply = "Maharashtra (27)".to_string();
        assert!(doc.is_inter_state(&seller()));
        let totals = doc.totals(&seller());
        assert_eq!(totals.igst, Money::from_rupees(36));
        assert_eq!(totals.final_total, doc.total());
    }

    #[test]
    fn test_duplicate_resets_status() {
        let mut invoice = Invoice::new(&seller(), date());
        invoice.status = InvoiceStatus::Paid;
        invoice.due_date = Some(date());

        let later = NaiveDate::from_ymd_opt(2027, 1, 2).unwrap();
        let copy = Document::from(invoice.clone()).duplicate(&seller(), later);
        match copy {
            Document::Invoice(copy) => {
                assert_eq!(copy.status, InvoiceStatus::Draft);
                assert_eq!(copy.due_date, None);
                assert_eq!(copy.base.date, later);
                assert!(copy.base.number.starts_with("INV27"));
                assert_ne!(copy.base.id, invoice.base.id);
                assert_eq!(copy.base.items, invoice.base.items);
            }
            Document::Quotation(_) => panic!("expected an invoice"),
        }
    }

    #[test]
    fn test_convert_quotation() {
        let mut quotation = Quotation::new(&seller(), date());
        quotation.status = QuotationStatus::Sent;
        quotation
            .base
            .add_charge("Installation", Money::from_rupees(500));

        let invoice = quotation.convert_to_invoice(&seller(), date());
        assert_eq!(quotation.status, QuotationStatus::Accepted);
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert!(invoice.base.id.starts_with("inv-"));
        assert!(invoice.base.number.starts_with("INV"));
        assert_eq!(invoice.base.additional_charges, quotation.base.additional_charges);
        assert!(invoice.base.terms.contains("Payment within 15 days"));
        assert!(!invoice.base.terms.contains("Valid for 30 days"));
        assert_eq!(invoice.base.total(), quotation.base.total());
    }
}
