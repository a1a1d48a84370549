//! # Repository Module
//!
//! Storage access for gstbook.
//!
//! ## Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Caller                                                                 │
//! │       │  store.documents().save_invoice(&invoice)                       │
//! │       ▼                                                                 │
//! │  DocumentRepository   typed lists, upsert/delete/status/convert        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BlobRepository       one JSON blob per StorageKey                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite (user_data)                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`BlobRepository`](blob::BlobRepository) - Raw JSON per storage key
//! - [`DocumentRepository`](document::DocumentRepository) - Invoices and quotations

pub mod blob;
pub mod document;
