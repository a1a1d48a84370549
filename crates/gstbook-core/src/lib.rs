//! # gstbook-core: GST Tax & Totals Engine
//!
//! This crate is the **heart** of gstbook. It contains the invoice arithmetic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        gstbook Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Frontend (editor, lists, dashboard, print)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ gstbook-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌─────────┐           │   │
//! │  │   │   tax   │─►│ totals  │─►│  words  │  │  money  │           │   │
//! │  │   │ per-line│  │ per-doc │  │ lakh/cr │  │ ₹ 1,23, │           │   │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └─────────┘           │   │
//! │  │   ┌─────────┐  ┌──────────┐  ┌────────────┐                    │   │
//! │  │   │  types  │  │ document │  │ validation │                    │   │
//! │  │   └─────────┘  └──────────┘  └────────────┘                    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              gstbook-store (persistence layer)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, Document, SellerProfile, ...)
//! - [`money`] - Money in integer paise, and the ₹ formatter
//! - [`tax`] - Per-line GST calculation and the inter-state decision
//! - [`totals`] - Document totals, editor breakdown, dashboard summary
//! - [`words`] - Amount in words (Indian numbering)
//! - [`document`] - Document creation, editing and conversion
//! - [`validation`] - Editor and profile validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gstbook_core::{calculate_document_total, format_currency, Document, Money, SellerProfile};
//!
//! let seller = SellerProfile {
//!     name: "Acme Studio".into(),
//!     state: "Karnataka".into(),
//!     state_code: "29".into(),
//!     ..SellerProfile::default()
//! };
//! let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//!
//! let mut invoice = Document::new_invoice(&seller, date);
//! invoice.base_mut().items[0].qty = 2.0;
//! invoice.base_mut().items[0].rate = Money::from_rupees(100);
//!
//! let total = calculate_document_total(&invoice);
//! assert_eq!(format_currency(total), "₹236.00");
//! assert_eq!(total.in_words().unwrap(), "two hundred and thirty six rupees only");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod money;
pub mod tax;
pub mod totals;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{format_currency, Money};
pub use tax::{calculate_line_item, is_inter_state, try_calculate_line_item, LineItemCalc};
pub use totals::{
    calculate_breakdown, calculate_document_total, try_calculate_breakdown,
    try_calculate_document_total, DashboardSummary, DocumentTotals,
};
pub use types::*;
pub use words::number_to_words;
