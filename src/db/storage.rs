//! Storage gateway over the key-value table.
//!
//! The raw item operations report faults. The collection and record helpers built on
//! them never do: a fault is logged and reads fall back to empty.

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;

/// Storage keys, shared with the browser front end.
pub mod keys {
    pub const USERS: &str = "alumni_portal_users";
    pub const ALUMNI_PROFILES: &str = "alumni_portal_alumni_profiles";
    pub const STUDENT_PROFILES: &str = "alumni_portal_student_profiles";
    pub const EVENTS: &str = "alumni_portal_events";
    pub const MENTORSHIP_REQUESTS: &str = "alumni_portal_mentorship_requests";
    pub const DONATIONS: &str = "alumni_portal_donations";
    pub const CURRENT_USER: &str = "alumni_portal_current_user";
}

/// Handle to the durable key-value store. Cheap to clone.
#[derive(Clone)]
pub struct LocalStorage {
    pool: SqlitePool,
}

impl LocalStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Raw value stored under `key`, if any.
    pub async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        let row = sqlx::query("SELECT value FROM local_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("value")))
    }

    /// Store `value` under `key`, replacing any previous value.
    pub async fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?, ?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Serialize `value` as JSON and store it under `key`.
    pub async fn set_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), AppError> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw).await
    }

    /// Delete `key`. Removing an absent key is not an error.
    pub async fn remove_item(&self, key: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM local_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Collection stored under `key`. Absent, malformed or unreadable data yields an
    /// empty collection.
    pub async fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.get_item(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!(key, error = %e, "Error reading collection from storage");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(key, error = %e, "Error parsing stored collection");
                Vec::new()
            }
        }
    }

    /// Replace the whole collection under `key`. Faults are logged and dropped.
    pub async fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) {
        if let Err(e) = self.set_json(key, items).await {
            tracing::error!(key, error = %e, "Error saving collection to storage");
        }
    }

    /// Single record stored under `key`, `None` when absent or unreadable.
    pub async fn read_record<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.get_item(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(key, error = %e, "Ignoring malformed stored record");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::error!(key, error = %e, "Error reading record from storage");
                None
            }
        }
    }

    /// Store a single record under `key`. Faults are logged and dropped.
    pub async fn write_record<T: Serialize>(&self, key: &str, record: &T) {
        if let Err(e) = self.set_json(key, record).await {
            tracing::error!(key, error = %e, "Error saving record to storage");
        }
    }

    /// Remove the record under `key`. Faults are logged and dropped.
    pub async fn clear_record(&self, key: &str) {
        if let Err(e) = self.remove_item(key).await {
            tracing::error!(key, error = %e, "Error removing record from storage");
        }
    }

    #[cfg(test)]
    pub(crate) async fn close(&self) {
        self.pool.close().await;
    }
}
