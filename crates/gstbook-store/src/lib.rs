//! # gstbook-store: Local Persistence for gstbook
//!
//! Stores invoices, quotations and other collections as JSON blobs in a
//! local SQLite database, and loads the application configuration.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        gstbook Data Flow                                │
//! │                                                                         │
//! │  Frontend / gstbook-summary CLI                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   gstbook-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │    Store      │    │  Repositories  │   │  AppConfig   │  │   │
//! │  │   │   (pool.rs)   │◄───│  BlobRepo      │   │  seller +    │  │   │
//! │  │   │  SqlitePool   │    │  DocumentRepo  │   │  storage     │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  │                              │                                  │   │
//! │  │                              ▼                                  │   │
//! │  │                     gstbook-core (totals, validation)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite: <data dir>/gstbook.db  (user_data table)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - TOML configuration with environment overrides
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - Blob and document repositories
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gstbook_store::{AppConfig, Store};
//!
//! let config = AppConfig::load(None)?;
//! let store = Store::new(config.store_config()).await?;
//!
//! let summary = store.documents().summary().await?;
//! println!("Revenue: {}", summary.revenue);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{AppConfig, StorageSettings};
pub use error::{StoreError, StoreResult};
pub use pool::{Store, StoreConfig};

pub use repository::blob::{BlobRepository, StorageKey};
pub use repository::document::DocumentRepository;
