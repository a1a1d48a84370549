//! # Application Configuration
//!
//! Seller profile and storage settings, loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     GSTBOOK_DB_PATH=/data/gstbook.db                                   │
//! │     GSTBOOK_SELLER_STATE_CODE=29                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/gstbook/gstbook.toml (Linux)                             │
//! │     ~/Library/Application Support/com.gstbook.gstbook/ (macOS)         │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # gstbook.toml
//! [seller]
//! name = "Acme Studio"
//! gstin = "29ABCDE1234F1Z5"
//! state = "Karnataka"
//! state_code = "29"
//! invoice_prefix = "INV"
//! quotation_prefix = "QT"
//!
//! [storage]
//! database_path = "/var/lib/gstbook/gstbook.db"
//! max_connections = 5
//! ```

use gstbook_core::validation::validate_seller_profile;
use gstbook_core::SellerProfile;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::pool::StoreConfig;

const CONFIG_FILE_NAME: &str = "gstbook.toml";
const DATABASE_FILE_NAME: &str = "gstbook.db";

// =============================================================================
// Storage Settings
// =============================================================================

/// Where and how the local database is opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Explicit database file. Falls back to the platform data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: None,
            max_connections: default_max_connections(),
        }
    }
}

impl StorageSettings {
    /// Resolves the database file: explicit path, else the platform data
    /// directory, else the working directory.
    pub fn resolved_database_path(&self) -> PathBuf {
        if let Some(path) = &self.database_path {
            return path.clone();
        }

        directories::ProjectDirs::from("com", "gstbook", "gstbook")
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// The business issuing documents. Drives the inter-state decision.
    #[serde(default)]
    pub seller: SellerProfile,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl AppConfig {
    /// Loads configuration from file, then applies environment overrides.
    ///
    /// ## Arguments
    /// * `config_path` - Explicit file, or `None` for the platform default
    ///
    /// A missing file is not an error; defaults are used instead. The
    /// result is always validated.
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads configuration, falling back to defaults on any error.
    ///
    /// The returned config is not validated.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            Self::default()
        })
    }

    /// Writes the configuration as pretty TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the seller profile and storage settings.
    pub fn validate(&self) -> StoreResult<()> {
        validate_seller_profile(&self.seller)?;

        if self.storage.max_connections == 0 {
            return Err(StoreError::Config(
                "storage.max_connections must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Builds the pool configuration for [`crate::Store::new`].
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.storage.resolved_database_path())
            .max_connections(self.storage.max_connections)
    }

    /// Applies `GSTBOOK_*` overrides read through `lookup`.
    ///
    /// `load` passes the process environment; tests pass a map.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("GSTBOOK_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(name) = lookup("GSTBOOK_SELLER_NAME") {
            self.seller.name = name;
        }

        if let Some(state) = lookup("GSTBOOK_SELLER_STATE") {
            self.seller.state = state;
        }

        if let Some(code) = lookup("GSTBOOK_SELLER_STATE_CODE") {
            debug!(state_code = %code, "Overriding seller state code from environment");
            self.seller.state_code = code;
        }

        if let Some(gstin) = lookup("GSTBOOK_SELLER_GSTIN") {
            self.seller.gstin = gstin;
        }

        if let Some(max) = lookup("GSTBOOK_MAX_CONNECTIONS") {
            match max.parse::<u32>() {
                Ok(n) => self.storage.max_connections = n,
                Err(_) => warn!(value = %max, "Ignoring non-numeric GSTBOOK_MAX_CONNECTIONS"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "gstbook", "gstbook")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
