//! # Document Repository
//!
//! Typed invoice and quotation collections on top of [`BlobRepository`].
//!
//! ## Write Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  save_invoice(invoice)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_document(&invoice.base)      ← reject before touching disk    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  write_lock.lock().await               ← one read-modify-write at once  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load bos_cloud_invoices → Vec<Invoice>                                 │
//! │       │                                                                 │
//! │       ├── id exists? replace in place                                   │
//! │       └── new?       insert at the front (newest first)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  save bos_cloud_invoices (whole blob)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Converting a quotation writes both collections in one transaction.
//! Leads are read-only here: the dashboard sums their expected values.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use gstbook_core::totals::{summarize_dashboard, DashboardSummary};
use gstbook_core::validation::validate_document;
use gstbook_core::{
    DocumentBase, Invoice, InvoiceStatus, Lead, Quotation, QuotationStatus, SellerProfile,
};

use crate::error::{StoreError, StoreResult};
use crate::repository::blob::{BlobRepository, StorageKey};

// =============================================================================
// Stored Collections
// =============================================================================

/// A document type persisted as one list under one storage key.
trait StoredDocument: Serialize + DeserializeOwned + Clone {
    const KEY: StorageKey;
    const ENTITY: &'static str;

    fn base(&self) -> &DocumentBase;

    fn id(&self) -> &str {
        &self.base().id
    }
}

impl StoredDocument for Invoice {
    const KEY: StorageKey = StorageKey::Invoices;
    const ENTITY: &'static str = "Invoice";

    fn base(&self) -> &DocumentBase {
        &self.base
    }
}

impl StoredDocument for Quotation {
    const KEY: StorageKey = StorageKey::Quotations;
    const ENTITY: &'static str = "Quotation";

    fn base(&self) -> &DocumentBase {
        &self.base
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for invoices and quotations.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    blobs: BlobRepository,
    write_lock: Arc<Mutex<()>>,
}

impl DocumentRepository {
    pub fn new(blobs: BlobRepository, write_lock: Arc<Mutex<()>>) -> Self {
        DocumentRepository { blobs, write_lock }
    }

    // -------------------------------------------------------------------------
    // Invoices
    // -------------------------------------------------------------------------

    /// All invoices, newest first.
    pub async fn list_invoices(&self) -> StoreResult<Vec<Invoice>> {
        self.list().await
    }

    pub async fn get_invoice(&self, id: &str) -> StoreResult<Invoice> {
        self.get(id).await
    }

    /// Inserts a new invoice at the front, or replaces the one with its id.
    pub async fn save_invoice(&self, invoice: &Invoice) -> StoreResult<()> {
        self.upsert(invoice).await
    }

    /// Returns `false` if no invoice had that id.
    pub async fn delete_invoice(&self, id: &str) -> StoreResult<bool> {
        self.delete::<Invoice>(id).await
    }

    pub async fn update_invoice_status(
        &self,
        id: &str,
        status: InvoiceStatus,
    ) -> StoreResult<Invoice> {
        self.modify(id, |invoice: &mut Invoice| invoice.status = status)
            .await
    }

    /// Saves a draft copy of an invoice under a fresh id and number.
    pub async fn duplicate_invoice(
        &self,
        id: &str,
        seller: &SellerProfile,
        date: NaiveDate,
    ) -> StoreResult<Invoice> {
        let copy = self.get_invoice(id).await?.duplicate(seller, date);
        self.upsert(&copy).await?;
        Ok(copy)
    }

    // -------------------------------------------------------------------------
    // Quotations
    // -------------------------------------------------------------------------

    /// All quotations, newest first.
    pub async fn list_quotations(&self) -> StoreResult<Vec<Quotation>> {
        self.list().await
    }

    pub async fn get_quotation(&self, id: &str) -> StoreResult<Quotation> {
        self.get(id).await
    }

    pub async fn save_quotation(&self, quotation: &Quotation) -> StoreResult<()> {
        self.upsert(quotation).await
    }

    pub async fn delete_quotation(&self, id: &str) -> StoreResult<bool> {
        self.delete::<Quotation>(id).await
    }

    pub async fn update_quotation_status(
        &self,
        id: &str,
        status: QuotationStatus,
    ) -> StoreResult<Quotation> {
        self.modify(id, |quotation: &mut Quotation| quotation.status = status)
            .await
    }

    pub async fn duplicate_quotation(
        &self,
        id: &str,
        seller: &SellerProfile,
        date: NaiveDate,
    ) -> StoreResult<Quotation> {
        let copy = self.get_quotation(id).await?.duplicate(seller, date);
        self.upsert(&copy).await?;
        Ok(copy)
    }

    /// Turns a quotation into a new draft invoice.
    ///
    /// ## What This Does
    /// 1. Marks the quotation accepted
    /// 2. Prepends the new invoice to the invoice list
    /// 3. Writes both lists in one transaction
    pub async fn convert_quotation(
        &self,
        id: &str,
        seller: &SellerProfile,
        date: NaiveDate,
    ) -> StoreResult<Invoice> {
        let _guard = self.write_lock.lock().await;

        let mut quotations: Vec<Quotation> = self.blobs.load_or_default(Quotation::KEY).await?;
        let quotation = quotations
            .iter_mut()
            .find(|q| q.base.id == id)
            .ok_or_else(|| StoreError::not_found(Quotation::ENTITY, id))?;

        let invoice = quotation.convert_to_invoice(seller, date);

        let mut invoices: Vec<Invoice> = self.blobs.load_or_default(Invoice::KEY).await?;
        invoices.insert(0, invoice.clone());

        self.blobs
            .save_all(&[
                (Invoice::KEY, serde_json::to_string(&invoices)?),
                (Quotation::KEY, serde_json::to_string(&quotations)?),
            ])
            .await?;

        info!(
            quotation_id = %id,
            invoice_id = %invoice.base.id,
            number = %invoice.base.number,
            "Quotation converted to invoice"
        );

        Ok(invoice)
    }

    // -------------------------------------------------------------------------
    // Dashboard
    // -------------------------------------------------------------------------

    /// Stored leads, as far as the dashboard reads them.
    pub async fn list_leads(&self) -> StoreResult<Vec<Lead>> {
        let leads: Vec<Lead> = self.blobs.load_or_default(StorageKey::Leads).await?;
        debug!(count = leads.len(), "Listed leads");
        Ok(leads)
    }

    /// Revenue and outstanding totals over every stored invoice, plus the
    /// sales pipeline over every stored lead.
    pub async fn summary(&self) -> StoreResult<DashboardSummary> {
        let invoices = self.list_invoices().await?;
        let leads = self.list_leads().await?;
        Ok(summarize_dashboard(&invoices, &leads))
    }

    // -------------------------------------------------------------------------
    // Shared collection operations
    // -------------------------------------------------------------------------

    async fn list<T: StoredDocument>(&self) -> StoreResult<Vec<T>> {
        let docs: Vec<T> = self.blobs.load_or_default(T::KEY).await?;
        debug!(entity = T::ENTITY, count = docs.len(), "Listed documents");
        Ok(docs)
    }

    async fn get<T: StoredDocument>(&self, id: &str) -> StoreResult<T> {
        self.list::<T>()
            .await?
            .into_iter()
            .find(|doc| doc.id() == id)
            .ok_or_else(|| StoreError::not_found(T::ENTITY, id))
    }

    async fn upsert<T: StoredDocument>(&self, doc: &T) -> StoreResult<()> {
        validate_document(doc.base())?;

        let _guard = self.write_lock.lock().await;
        let mut docs: Vec<T> = self.blobs.load_or_default(T::KEY).await?;

        match docs.iter_mut().find(|existing| existing.id() == doc.id()) {
            Some(existing) => {
                debug!(entity = T::ENTITY, id = %doc.id(), "Replacing document");
                *existing = doc.clone();
            }
            None => {
                debug!(entity = T::ENTITY, id = %doc.id(), "Inserting document");
                docs.insert(0, doc.clone());
            }
        }

        self.blobs.save(T::KEY, &docs).await
    }

    async fn delete<T: StoredDocument>(&self, id: &str) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut docs: Vec<T> = self.blobs.load_or_default(T::KEY).await?;

        let before = docs.len();
        docs.retain(|doc| doc.id() != id);
        if docs.len() == before {
            debug!(entity = T::ENTITY, id = %id, "Nothing to delete");
            return Ok(false);
        }

        debug!(entity = T::ENTITY, id = %id, "Deleting document");
        self.blobs.save(T::KEY, &docs).await?;
        Ok(true)
    }

    async fn modify<T, F>(&self, id: &str, change: F) -> StoreResult<T>
    where
        T: StoredDocument,
        F: FnOnce(&mut T),
    {
        let _guard = self.write_lock.lock().await;
        let mut docs: Vec<T> = self.blobs.load_or_default(T::KEY).await?;

        let doc = docs
            .iter_mut()
            .find(|doc| doc.id() == id)
            .ok_or_else(|| StoreError::not_found(T::ENTITY, id))?;
        change(doc);
        let updated = doc.clone();

        debug!(entity = T::ENTITY, id = %id, "Updating document");
        self.blobs.save(T::KEY, &docs).await?;
        Ok(updated)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
