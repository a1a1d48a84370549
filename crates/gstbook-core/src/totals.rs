//! # Document Totals
//!
//! Folds the line items of an invoice or quotation into a payable amount.
//!
//! ## Aggregation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Σ lines        taxable, CGST, SGST, IGST, tax-inclusive total       │
//! │          │                                                              │
//! │  2. discount       Fixed(₹)         → that amount                      │
//! │          │         Percentage(bps)  → bps of Σ taxable                 │
//! │          │         subtracted from the TAX-INCLUSIVE total             │
//! │          │                                                              │
//! │  3. + additional charges                                               │
//! │          │                                                              │
//! │  4. + round_off (signed)                                               │
//! │          │                                                              │
//! │          ▼                                                              │
//! │     final_total ── raw in the breakdown, clamped at ₹0 in              │
//! │                    calculate_document_total                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Entry Points
//! - [`calculate_breakdown`]: every figure the editor shows, unclamped, with
//!   the jurisdiction-aware tax split
//! - [`calculate_document_total`]: the single canonical amount used by lists,
//!   dashboards and the words line; never negative
//!
//! Both agree on the tax-inclusive line total, which does not depend on
//! whether the tax is CGST/SGST or IGST. Both saturate at the paise limits;
//! [`try_calculate_breakdown`] and [`try_calculate_document_total`] report
//! [`CoreError::AmountOverflow`] instead.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::tax::{calculate_line_item, try_calculate_line_item};
use crate::types::{Discount, DocumentBase, Invoice, InvoiceStatus, Lead};

// =============================================================================
// Breakdown
// =============================================================================

/// Every total shown under the line items of a document editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DocumentTotals {
    /// Σ taxable values.
    pub taxable: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub igst: Money,
    /// Σ tax-inclusive line totals.
    pub total: Money,
    pub discount_amount: Money,
    pub additional_charges_total: Money,
    /// `total - discount + charges + round_off`. May be negative.
    pub final_total: Money,
}

impl DocumentTotals {
    /// Total GST across all heads.
    pub fn total_tax(&self) -> Money {
        self.cgst + self.sgst + self.igst
    }
}

/// Computes the discount for a document given its summed taxable value.
///
/// ## Example
/// ```rust
/// use gstbook_core::money::Money;
/// use gstbook_core::totals::discount_amount;
/// use gstbook_core::types::Discount;
///
/// let taxable = Money::from_rupees(1000);
/// assert_eq!(discount_amount(&Discount::Percentage(1000), taxable), Money::from_rupees(100));
/// assert_eq!(discount_amount(&Discount::Fixed(Money::from_rupees(50)), taxable), Money::from_rupees(50));
/// ```
pub fn discount_amount(discount: &Discount, taxable: Money) -> Money {
    match *discount {
        Discount::Fixed(amount) => amount,
        Discount::Percentage(bps) => taxable.percentage_of(bps),
    }
}

/// Computes the full editor breakdown for a document.
///
/// A document without line items yields an all-zero breakdown.
pub fn calculate_breakdown<D>(doc: &D, is_inter_state: bool) -> DocumentTotals
where
    D: AsRef<DocumentBase> + ?Sized,
{
    let base = doc.as_ref();
    if base.items.is_empty() {
        return DocumentTotals::default();
    }

    let mut totals = DocumentTotals::default();
    for item in &base.items {
        let line = calculate_line_item(item, is_inter_state);
        totals.taxable += line.taxable_value;
        totals.cgst += line.cgst;
        totals.sgst += line.sgst;
        totals.igst += line.igst;
        totals.total += line.total;
    }

    totals.discount_amount = discount_amount(&base.discount, totals.taxable);
    totals.additional_charges_total = base.additional_charges.iter().map(|c| c.amount).sum();
    totals.final_total = totals.total - totals.discount_amount
        + totals.additional_charges_total
        + base.round_off;

    totals
}

/// Calculates the final payable amount of a document.
///
/// This is the canonical total: it is clamped so that it is never negative,
/// and returns zero for a document without line items.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use gstbook_core::money::Money;
/// use gstbook_core::totals::calculate_document_total;
/// use gstbook_core::types::{Discount, Document, SellerProfile, TaxRate};
///
/// let seller = SellerProfile { state: "Goa".into(), state_code: "30".into(), ..Default::default() };
/// let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// let mut doc = Document::new_invoice(&seller, date);
///
/// let base = doc.base_mut();
/// base.items[0].rate = Money::from_rupees(1000);
/// base.items[0].tax_rate = TaxRate::zero();
/// base.discount = Discount::Percentage(1000); // 10%
///
/// assert_eq!(calculate_document_total(&doc), Money::from_rupees(900));
/// ```
pub fn calculate_document_total<D>(doc: &D) -> Money
where
    D: AsRef<DocumentBase> + ?Sized,
{
    if doc.as_ref().items.is_empty() {
        return Money::zero();
    }
    // The split branch does not affect the tax-inclusive total.
    calculate_breakdown(doc, false)
        .final_total
        .clamp_non_negative()
}

/// Checked form of [`calculate_breakdown`].
///
/// ## Returns
/// * `Ok(totals)` - Same figures as [`calculate_breakdown`]
/// * `Err(CoreError::AmountOverflow)` - Some line, sum or the final total
///   does not fit in paise
pub fn try_calculate_breakdown<D>(doc: &D, is_inter_state: bool) -> CoreResult<DocumentTotals>
where
    D: AsRef<DocumentBase> + ?Sized,
{
    let base = doc.as_ref();
    if base.items.is_empty() {
        return Ok(DocumentTotals::default());
    }

    let add = |a: Money, b: Money| a.checked_add(b).ok_or(CoreError::AmountOverflow);

    let mut totals = DocumentTotals::default();
    for item in &base.items {
        let line = try_calculate_line_item(item, is_inter_state)?;
        totals.taxable = add(totals.taxable, line.taxable_value)?;
        totals.cgst = add(totals.cgst, line.cgst)?;
        totals.sgst = add(totals.sgst, line.sgst)?;
        totals.igst = add(totals.igst, line.igst)?;
        totals.total = add(totals.total, line.total)?;
    }

    totals.discount_amount = match base.discount {
        Discount::Fixed(amount) => amount,
        Discount::Percentage(bps) => totals
            .taxable
            .checked_percentage_of(bps)
            .ok_or(CoreError::AmountOverflow)?,
    };
    totals.additional_charges_total = base
        .additional_charges
        .iter()
        .try_fold(Money::zero(), |sum, c| add(sum, c.amount))?;

    let after_discount = totals
        .total
        .checked_sub(totals.discount_amount)
        .ok_or(CoreError::AmountOverflow)?;
    let with_charges = add(after_discount, totals.additional_charges_total)?;
    totals.final_total = add(with_charges, base.round_off)?;

    Ok(totals)
}

/// Checked form of [`calculate_document_total`].
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use gstbook_core::money::Money;
/// use gstbook_core::totals::try_calculate_document_total;
/// use gstbook_core::types::{Document, SellerProfile};
///
/// let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// let mut doc = Document::new_invoice(&SellerProfile::default(), date);
///
/// doc.base_mut().items[0].qty = 1e17;
/// doc.base_mut().items[0].rate = Money::from_rupees(1000);
/// assert!(try_calculate_document_total(&doc).is_err());
/// ```
pub fn try_calculate_document_total<D>(doc: &D) -> CoreResult<Money>
where
    D: AsRef<DocumentBase> + ?Sized,
{
    Ok(try_calculate_breakdown(doc, false)?
        .final_total
        .clamp_non_negative())
}

// =============================================================================
// Dashboard
// =============================================================================

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardSummary {
    /// Σ canonical totals of paid invoices.
    pub revenue: Money,
    /// Σ canonical totals of draft, sent and overdue invoices.
    pub outstanding: Money,
    pub paid_count: usize,
    pub outstanding_count: usize,
    pub invoice_count: usize,
    /// Σ expected values of open leads ("Sales Pipeline").
    pub pipeline_value: Money,
    pub lead_count: usize,
}

/// Aggregates revenue and outstanding amounts over a set of invoices.
pub fn summarize_invoices<'a, I>(invoices: I) -> DashboardSummary
where
    I: IntoIterator<Item = &'a Invoice>,
{
    let mut summary = DashboardSummary::default();
    for invoice in invoices {
        summary.invoice_count += 1;
        let total = calculate_document_total(invoice);
        if invoice.status == InvoiceStatus::Paid {
            summary.revenue += total;
            summary.paid_count += 1;
        } else if invoice.status.is_outstanding() {
            summary.outstanding += total;
            summary.outstanding_count += 1;
        }
    }
    summary
}

/// Sums the expected value of every lead.
///
/// ## Example
/// ```rust
/// use gstbook_core::money::Money;
/// use gstbook_core::totals::pipeline_value;
/// use gstbook_core::types::Lead;
///
/// let leads = vec![
///     Lead { value: Money::from_rupees(50_000), ..Lead::default() },
///     Lead { value: Money::from_rupees(12_500), ..Lead::default() },
/// ];
/// assert_eq!(pipeline_value(&leads), Money::from_rupees(62_500));
/// ```
pub fn pipeline_value<'a, L>(leads: L) -> Money
where
    L: IntoIterator<Item = &'a Lead>,
{
    leads.into_iter().map(|lead| lead.value).sum()
}

/// Full dashboard: invoice figures plus the lead pipeline.
pub fn summarize_dashboard<'a, I, L>(invoices: I, leads: L) -> DashboardSummary
where
    I: IntoIterator<Item = &'a Invoice>,
    L: IntoIterator<Item = &'a Lead>,
{
    let mut summary = summarize_invoices(invoices);
    for lead in leads {
        summary.pipeline_value += lead.value;
        summary.lead_count += 1;
    }
    summary
}

// =============================================================================
// Unit Tests
// =============================================================================
