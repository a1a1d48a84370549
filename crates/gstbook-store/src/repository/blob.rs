//! # Blob Repository
//!
//! Key-value persistence: one JSON document per [`StorageKey`].
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  user_data                                                              │
//! │  ┌──────────────────────┬──────────────────────────┬─────────────────┐ │
//! │  │ key_id               │ content                  │ updated_at      │ │
//! │  ├──────────────────────┼──────────────────────────┼─────────────────┤ │
//! │  │ bos_cloud_invoices   │ [{"id":"inv-…",…}, …]    │ 2026-10-19T…    │ │
//! │  │ bos_cloud_quotations │ [{"id":"qt-…",…}, …]     │ 2026-10-19T…    │ │
//! │  │ bos_cloud_leads      │ opaque                   │ …               │ │
//! │  │ bos_cloud_clients    │ opaque                   │ …               │ │
//! │  └──────────────────────┴──────────────────────────┴─────────────────┘ │
//! │                                                                         │
//! │  save  = INSERT … ON CONFLICT(key_id) DO UPDATE (whole blob replaced)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Storage Keys
// =============================================================================

/// The fixed set of storage identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Invoices,
    Quotations,
    Leads,
    Clients,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        StorageKey::Invoices,
        StorageKey::Quotations,
        StorageKey::Leads,
        StorageKey::Clients,
    ];

    /// The persisted identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Invoices => "bos_cloud_invoices",
            StorageKey::Quotations => "bos_cloud_quotations",
            StorageKey::Leads => "bos_cloud_leads",
            StorageKey::Clients => "bos_cloud_clients",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StorageKey {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| StoreError::not_found("Storage key", s))
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for raw JSON blobs.
#[derive(Debug, Clone)]
pub struct BlobRepository {
    pool: SqlitePool,
}

impl BlobRepository {
    pub fn new(pool: SqlitePool) -> Self {
        BlobRepository { pool }
    }

    /// Serializes `value` and replaces whatever was stored under `key`.
    pub async fn save<T>(&self, key: StorageKey, value: &T) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        let content = serde_json::to_string(value)?;
        debug!(key = %key, bytes = content.len(), "Saving blob");

        sqlx::query(
            r#"
            INSERT INTO user_data (key_id, content, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key_id) DO UPDATE SET
                content = excluded.content,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key.as_str())
        .bind(content)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Saves several blobs in one transaction: all or nothing.
    pub async fn save_all(&self, entries: &[(StorageKey, String)]) -> StoreResult<()> {
        debug!(count = entries.len(), "Saving blobs in one transaction");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for (key, content) in entries {
            sqlx::query(
                r#"
                INSERT INTO user_data (key_id, content, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key_id) DO UPDATE SET
                    content = excluded.content,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(key.as_str())
            .bind(content.as_str())
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Loads and decodes the blob under `key`.
    ///
    /// ## Returns
    /// * `Ok(Some(value))` - Blob present and decodable
    /// * `Ok(None)` - Nothing stored yet
    /// * `Err(StoreError::Serialization)` - Stored JSON doesn't match `T`
    pub async fn load<T>(&self, key: StorageKey) -> StoreResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        debug!(key = %key, "Loading blob");

        let row: Option<(String,)> =
            sqlx::query_as("SELECT content FROM user_data WHERE key_id = ?1")
                .bind(key.as_str())
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((content,)) => Ok(Some(serde_json::from_str(&content)?)),
            None => Ok(None),
        }
    }

    /// Like [`load`](Self::load), but an absent key yields `T::default()`.
    pub async fn load_or_default<T>(&self, key: StorageKey) -> StoreResult<T>
    where
        T: DeserializeOwned + Default,
    {
        Ok(self.load(key).await?.unwrap_or_default())
    }

    /// When the blob was last written, if ever.
    pub async fn updated_at(&self, key: StorageKey) -> StoreResult<Option<DateTime<Utc>>> {
        let row: Option<(DateTime<Utc>,)> =
            sqlx::query_as("SELECT updated_at FROM user_data WHERE key_id = ?1")
                .bind(key.as_str())
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(at,)| at))
    }

    /// Removes the blob. Returns `false` if nothing was stored.
    pub async fn delete(&self, key: StorageKey) -> StoreResult<bool> {
        debug!(key = %key, "Deleting blob");

        let result = sqlx::query("DELETE FROM user_data WHERE key_id = ?1")
            .bind(key.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};
    use serde_json::{json, Value};

    async fn blobs() -> BlobRepository {
        Store::new(StoreConfig::in_memory()).await.unwrap().blobs()
    }

    #[test]
    fn test_storage_key_names() {
        assert_eq!(StorageKey::Invoices.as_str(), "bos_cloud_invoices");
        assert_eq!(StorageKey::Clients.to_string(), "bos_cloud_clients");
        assert_eq!(
            "bos_cloud_leads".parse::<StorageKey>().unwrap(),
            StorageKey::Leads
        );
        assert!("bos_cloud_products".parse::<StorageKey>().is_err());
    }

    #[tokio::test]
    async fn test_missing_key() {
        let repo = blobs().await;

        let loaded: Option<Value> = repo.load(StorageKey::Leads).await.unwrap();
        assert!(loaded.is_none());

        let list: Vec<Value> = repo.load_or_default(StorageKey::Leads).await.unwrap();
        assert!(list.is_empty());
        assert!(repo.updated_at(StorageKey::Leads).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_whole_blob() {
        let repo = blobs().await;
        let clients = json!([{ "id": "c1", "name": "Globex" }]);

        repo.save(StorageKey::Clients, &clients).await.unwrap();
        repo.save(StorageKey::Clients, &json!([])).await.unwrap();

        let loaded: Value = repo.load(StorageKey::Clients).await.unwrap().unwrap();
        assert_eq!(loaded, json!([]));
        assert!(repo.updated_at(StorageKey::Clients).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_mismatched_blob_is_serialization_error() {
        let repo = blobs().await;
        repo.save(StorageKey::Leads, &json!({ "not": "a list" }))
            .await
            .unwrap();

        let result: StoreResult<Option<Vec<String>>> = repo.load(StorageKey::Leads).await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_save_all_and_delete() {
        let repo = blobs().await;
        repo.save_all(&[
            (StorageKey::Leads, "[1]".to_string()),
            (StorageKey::Clients, "[2]".to_string()),
        ])
        .await
        .unwrap();

        let leads: Vec<i64> = repo.load_or_default(StorageKey::Leads).await.unwrap();
        assert_eq!(leads, vec![1]);

        assert!(repo.delete(StorageKey::Leads).await.unwrap());
        assert!(!repo.delete(StorageKey::Leads).await.unwrap());

        let clients: Vec<i64> = repo.load_or_default(StorageKey::Clients).await.unwrap();
        assert_eq!(clients, vec![2]);
    }
}
