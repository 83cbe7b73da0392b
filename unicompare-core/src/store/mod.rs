//! University record storage.
//!
//! [`UniversityStore`] presents one read/write interface over an optional
//! remote document collection and an in-process fallback list. Callers
//! depend on the [`UniversityRepository`] trait so tests and alternative
//! deployments can substitute their own implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::filter::FilterSpec;
use crate::model::{Program, University};

pub mod facade;
pub mod http;
pub mod memory;
pub mod remote;

pub use facade::UniversityStore;
pub use http::HttpCollection;
pub use memory::MemoryCollection;
pub use remote::{RemoteCollection, RemoteDocument};

/// Errors raised by store writes and remote collections.
///
/// Reads never surface these to callers; they degrade to the fallback list.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Remote collection error: {reason}")]
    Remote { reason: String },

    #[error("Failed to write university '{id}': {reason}")]
    WriteFailed { id: String, reason: String },

    #[error("Failed to delete university '{id}': {reason}")]
    DeleteFailed { id: String, reason: String },

    #[error("Failed to seed remote collection: {reason}")]
    SeedFailed { reason: String },

    #[error("Failed to encode university '{id}': {reason}")]
    Encoding { id: String, reason: String },
}

/// Which backend served the most recent read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BackendStatus {
    /// No remote collection configured; the fallback list is authoritative.
    Local,
    /// Remote collection configured and answering.
    Remote { collection: String },
    /// Remote collection configured but failing; reads use the fallback list.
    Degraded {
        collection: String,
        reason: String,
        since: DateTime<Utc>,
    },
}

impl BackendStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, BackendStatus::Degraded { .. })
    }
}

/// Result of a seed request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedOutcome {
    /// False when a populated remote collection made the seed a no-op.
    pub seeded: bool,
    /// Records the store holds locally after the request.
    pub universities: Vec<University>,
}

/// Read/write capability over the university catalog.
#[async_trait]
pub trait UniversityRepository: Send + Sync {
    /// Lists universities matching `filter`, in store order.
    async fn list(&self, filter: &FilterSpec) -> Vec<University>;

    /// Looks up one university. Absence is `None`, not an error.
    async fn get(&self, id: &str) -> Option<University> {
        self.list(&FilterSpec::default())
            .await
            .into_iter()
            .find(|university| university.id == id)
    }

    /// Looks up a program together with its owning university.
    async fn program(&self, university_id: &str, program_id: &str) -> Option<(University, Program)> {
        let university = self.get(university_id).await?;
        let program = university.program(program_id)?.clone();
        Some((university, program))
    }

    /// Creates or replaces a record, assigning an id when it has none.
    ///
    /// # Errors
    /// - `StoreError::WriteFailed` - Remote collection rejected the write
    /// - `StoreError::Encoding` - Record could not be encoded as a document
    async fn upsert(&self, record: University) -> Result<University, StoreError>;

    /// Removes a record. Removing an absent id is a no-op.
    ///
    /// # Errors
    /// - `StoreError::DeleteFailed` - Remote collection rejected the delete
    async fn remove(&self, id: &str) -> Result<(), StoreError>;

    /// Loads the built-in sample dataset into an empty store.
    ///
    /// A populated remote collection is left alone and reported with
    /// `seeded: false`.
    ///
    /// # Errors
    /// - `StoreError::SeedFailed` - Remote collection could not be read or written
    async fn seed(&self) -> Result<SeedOutcome, StoreError>;

    /// Reports which backend is serving reads.
    fn status(&self) -> BackendStatus;
}
