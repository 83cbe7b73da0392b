//! Remote document collection abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::StoreError;

/// Upper bound appended to a prefix to turn it into a range query.
pub const RANGE_SENTINEL: char = '\u{f8ff}';

/// One document of the remote collection: its key and its body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteDocument {
    pub id: String,
    pub data: serde_json::Value,
}

/// Externally hosted key-value collection of university documents.
///
/// Implementations are opaque document stores; the facade only needs range
/// reads on `location`, merge writes, full writes, and deletes.
#[async_trait]
pub trait RemoteCollection: Send + Sync + std::fmt::Debug {
    /// Collection name, used in logs and status reports.
    fn name(&self) -> &str;

    /// Reads every document, or only those whose `location` lies in
    /// `[prefix, prefix + U+F8FF]` when a prefix is given.
    ///
    /// # Errors
    /// - `StoreError::Remote` - Collection unreachable or response unreadable
    async fn query(&self, location_prefix: Option<&str>) -> Result<Vec<RemoteDocument>, StoreError>;

    /// Merges `data` into the document at `id`, creating it if missing.
    ///
    /// # Errors
    /// - `StoreError::Remote` - Collection rejected the write
    async fn merge(&self, id: &str, data: serde_json::Value) -> Result<(), StoreError>;

    /// Replaces the document at `id` with `data`.
    ///
    /// # Errors
    /// - `StoreError::Remote` - Collection rejected the write
    async fn put(&self, id: &str, data: serde_json::Value) -> Result<(), StoreError>;

    /// Deletes the document at `id`. Deleting a missing document succeeds.
    ///
    /// # Errors
    /// - `StoreError::Remote` - Collection rejected the delete
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Returns the inclusive `(lower, upper)` bounds for a location prefix.
pub fn location_range(prefix: &str) -> (String, String) {
    (prefix.to_string(), format!("{prefix}{RANGE_SENTINEL}"))
}
