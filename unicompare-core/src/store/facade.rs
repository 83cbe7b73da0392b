//! Dual-backend store facade.
//!
//! When a remote collection is configured it is the source of truth for
//! reads; the fallback list is a cold-start seed and offline mirror that is
//! not kept in sync with writes made by other clients. Remote read failures
//! degrade to the fallback list and are reported through [`BackendStatus`].
//! Remote write failures propagate and leave the fallback list untouched.
//!
//! Overlapping writes to the same id are not coordinated; the last write wins.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    BackendStatus, HttpCollection, RemoteCollection, RemoteDocument, SeedOutcome, StoreError,
    UniversityRepository,
};
use crate::config::StoreConfig;
use crate::filter::{FilterSpec, apply_filter};
use crate::model::University;
use crate::sample::sample_universities;

/// University store over an optional remote collection and a fallback list.
#[derive(Debug)]
pub struct UniversityStore {
    remote: Option<Arc<dyn RemoteCollection>>,
    fallback: RwLock<Vec<University>>,
    status: parking_lot::RwLock<BackendStatus>,
}

impl UniversityStore {
    /// Creates a store with no remote collection, preloaded with the sample catalog.
    pub fn local() -> Self {
        Self::with_fallback(None, sample_universities())
    }

    /// Creates a store backed by `remote`, preloaded with the sample catalog.
    pub fn remote(remote: Arc<dyn RemoteCollection>) -> Self {
        Self::with_fallback(Some(remote), sample_universities())
    }

    /// Creates the store described by `config`.
    pub fn from_config(config: &StoreConfig) -> Self {
        match &config.remote_url {
            Some(url) => {
                info!(url = %url, collection = %config.collection, "Using remote university collection");
                Self::remote(Arc::new(HttpCollection::new(
                    url.clone(),
                    config.collection.clone(),
                    config.api_token.clone(),
                )))
            }
            None => {
                info!("No remote collection configured, using built-in catalog");
                Self::local()
            }
        }
    }

    /// Creates a store with an explicit fallback list.
    pub fn with_fallback(
        remote: Option<Arc<dyn RemoteCollection>>,
        fallback: Vec<University>,
    ) -> Self {
        let status = match &remote {
            Some(collection) => BackendStatus::Remote {
                collection: collection.name().to_string(),
            },
            None => BackendStatus::Local,
        };

        Self {
            remote,
            fallback: RwLock::new(fallback),
            status: parking_lot::RwLock::new(status),
        }
    }

    /// Snapshot of the fallback list.
    pub async fn fallback_snapshot(&self) -> Vec<University> {
        self.fallback.read().await.clone()
    }

    async fn list_fallback(&self, filter: &FilterSpec) -> Vec<University> {
        let fallback = self.fallback.read().await;
        apply_filter(&fallback, filter)
    }

    fn mark_remote_healthy(&self, collection: &str) {
        let mut status = self.status.write();
        if status.is_degraded() {
            info!(collection, "Remote collection recovered");
        }
        *status = BackendStatus::Remote {
            collection: collection.to_string(),
        };
    }

    fn mark_remote_degraded(&self, collection: &str, reason: &str) {
        let mut status = self.status.write();
        let since = match &*status {
            BackendStatus::Degraded { since, .. } => *since,
            _ => Utc::now(),
        };
        *status = BackendStatus::Degraded {
            collection: collection.to_string(),
            reason: reason.to_string(),
            since,
        };
    }

    async fn mirror_upsert(&self, record: &University) {
        let mut fallback = self.fallback.write().await;
        match fallback.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => fallback.push(record.clone()),
        }
    }
}

#[async_trait]
impl UniversityRepository for UniversityStore {
    async fn list(&self, filter: &FilterSpec) -> Vec<University> {
        let Some(remote) = &self.remote else {
            return self.list_fallback(filter).await;
        };

        match remote.query(filter.city_constraint()).await {
            Ok(documents) => {
                self.mark_remote_healthy(remote.name());
                let items: Vec<University> =
                    documents.into_iter().filter_map(decode_document).collect();
                debug!(
                    collection = remote.name(),
                    fetched = items.len(),
                    "Fetched universities from remote collection"
                );
                apply_filter(&items, filter)
            }
            Err(e) => {
                warn!(
                    collection = remote.name(),
                    error = %e,
                    "Remote read failed, serving fallback list"
                );
                self.mark_remote_degraded(remote.name(), &e.to_string());
                self.list_fallback(filter).await
            }
        }
    }

    async fn upsert(&self, record: University) -> Result<University, StoreError> {
        let mut record = record.normalized();
        if record.id.is_empty() {
            record.id = synthesize_id();
            debug!(id = %record.id, "Synthesized university id");
        }

        if let Some(remote) = &self.remote {
            let patch = encode_document(&record)?;
            remote
                .merge(&record.id, patch)
                .await
                .map_err(|e| StoreError::WriteFailed {
                    id: record.id.clone(),
                    reason: e.to_string(),
                })?;
        }

        self.mirror_upsert(&record).await;
        info!(id = %record.id, name = %record.name, "Saved university");
        Ok(record)
    }

    async fn remove(&self, id: &str) -> Result<(), StoreError> {
        if let Some(remote) = &self.remote {
            remote
                .delete(id)
                .await
                .map_err(|e| StoreError::DeleteFailed {
                    id: id.to_string(),
                    reason: e.to_string(),
                })?;
        }

        let mut fallback = self.fallback.write().await;
        let before = fallback.len();
        fallback.retain(|university| university.id != id);
        if fallback.len() < before {
            info!(id, "Removed university");
        } else {
            debug!(id, "Remove requested for unknown university");
        }
        Ok(())
    }

    async fn seed(&self) -> Result<SeedOutcome, StoreError> {
        let dataset = sample_universities();

        if let Some(remote) = &self.remote {
            let existing = remote
                .query(None)
                .await
                .map_err(|e| StoreError::SeedFailed {
                    reason: e.to_string(),
                })?;

            if !existing.is_empty() {
                warn!(
                    collection = remote.name(),
                    documents = existing.len(),
                    "Remote collection already populated, seed skipped"
                );
                return Ok(SeedOutcome {
                    seeded: false,
                    universities: self.fallback_snapshot().await,
                });
            }

            for university in &dataset {
                let document = encode_document(university)?;
                remote
                    .put(&university.id, document)
                    .await
                    .map_err(|e| StoreError::SeedFailed {
                        reason: e.to_string(),
                    })?;
            }
        }

        *self.fallback.write().await = dataset.clone();
        info!(count = dataset.len(), "Seeded sample universities");
        Ok(SeedOutcome {
            seeded: true,
            universities: dataset,
        })
    }

    fn status(&self) -> BackendStatus {
        self.status.read().clone()
    }
}

/// Timestamp-prefixed id; the random suffix keeps ids minted in the same
/// millisecond apart.
fn synthesize_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("uni-{}-{}", Utc::now().timestamp_millis(), &suffix[..8])
}

/// Document body for a record: every field except the id, which is the key.
fn encode_document(record: &University) -> Result<serde_json::Value, StoreError> {
    let mut value = serde_json::to_value(record).map_err(|e| StoreError::Encoding {
        id: record.id.clone(),
        reason: e.to_string(),
    })?;
    if let Some(object) = value.as_object_mut() {
        object.remove("id");
    }
    Ok(value)
}

/// Decodes a remote document, taking the id from the document key.
fn decode_document(document: RemoteDocument) -> Option<University> {
    match serde_json::from_value::<University>(document.data) {
        Ok(mut university) => {
            university.id = document.id;
            Some(university)
        }
        Err(e) => {
            warn!(id = %document.id, error = %e, "Skipping malformed remote document");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Program;
    use crate::store::MemoryCollection;

    fn draft(name: &str) -> University {
        University {
            name: name.to_string(),
            location: "Shymkent, Kazakhstan".to_string(),
            ..University::default()
        }
    }

    fn names(items: &[University]) -> Vec<&str> {
        items.iter().map(|u| u.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_local_list_applies_filter() {
        let store = UniversityStore::local();

        let results = store.list(&FilterSpec::default().with_city("Almaty")).await;
        assert_eq!(names(&results), ["Kazakh-British Technical University"]);

        let results = store.list(&FilterSpec::default().with_program("Cyber")).await;
        assert_eq!(names(&results), ["Astana IT University"]);

        assert_eq!(store.status(), BackendStatus::Local);
    }

    #[tokio::test]
    async fn test_get_returns_none_for_unknown_id() {
        let store = UniversityStore::local();
        assert!(store.get("missing").await.is_none());
        assert_eq!(store.get("nu").await.unwrap().name, "Nazarbayev University");
    }

    #[tokio::test]
    async fn test_program_lookup() {
        let store = UniversityStore::local();
        let (university, program) = store.program("aitu", "cyber-bsc").await.unwrap();
        assert_eq!(university.id, "aitu");
        assert_eq!(program.title, "Cybersecurity BSc");
        assert!(store.program("aitu", "missing").await.is_none());
        assert!(store.program("missing", "cyber-bsc").await.is_none());
    }

    #[tokio::test]
    async fn test_upsert_synthesizes_stable_id() {
        let store = UniversityStore::local();
        let saved = store.upsert(draft("South Kazakhstan University")).await.unwrap();

        assert!(saved.id.starts_with("uni-"));
        let reread = store.get(&saved.id).await.unwrap();
        assert_eq!(reread.id, saved.id);
        assert_eq!(reread.name, "South Kazakhstan University");
        assert_eq!(store.list(&FilterSpec::default()).await.len(), 4);
    }

    #[tokio::test]
    async fn test_back_to_back_drafts_get_distinct_ids() {
        let store = UniversityStore::with_fallback(None, Vec::new());
        let first = store.upsert(draft("First")).await.unwrap();
        let second = store.upsert(draft("Second")).await.unwrap();

        assert_ne!(first.id, second.id);
        let all = store.list(&FilterSpec::default()).await;
        assert_eq!(names(&all), ["First", "Second"]);
        assert_eq!(store.get(&first.id).await.unwrap().name, "First");
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_record_in_place() {
        let store = UniversityStore::local();
        let mut updated = store.get("kbtuw").await.unwrap();
        updated.name = "KBTU".to_string();
        store.upsert(updated).await.unwrap();

        let all = store.list(&FilterSpec::default()).await;
        assert_eq!(
            names(&all),
            ["Nazarbayev University", "KBTU", "Astana IT University"]
        );
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_noop() {
        let store = UniversityStore::local();
        let before = store.list(&FilterSpec::default()).await;
        store.remove("missing").await.unwrap();
        assert_eq!(store.list(&FilterSpec::default()).await, before);

        store.remove("nu").await.unwrap();
        assert_eq!(store.list(&FilterSpec::default()).await.len(), 2);
    }

    #[tokio::test]
    async fn test_local_seed_restores_sample_catalog() {
        let store = UniversityStore::with_fallback(None, Vec::new());
        assert!(store.list(&FilterSpec::default()).await.is_empty());

        let outcome = store.seed().await.unwrap();
        assert!(outcome.seeded);
        assert_eq!(outcome.universities.len(), 3);
        assert_eq!(store.list(&FilterSpec::default()).await, sample_universities());
    }

    #[tokio::test]
    async fn test_remote_read_takes_id_from_document_key() {
        let remote = Arc::new(MemoryCollection::new("universities"));
        remote
            .put(
                "key-1",
                serde_json::json!({ "id": "stale", "name": "Keyed", "location": "Turkistan" }),
            )
            .await
            .unwrap();
        let store = UniversityStore::with_fallback(Some(remote), Vec::new());

        let results = store.list(&FilterSpec::default()).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "key-1");
    }

    #[tokio::test]
    async fn test_remote_read_failure_degrades_to_fallback() {
        let remote = Arc::new(MemoryCollection::new("universities"));
        remote.set_fail_reads(true);
        let store = UniversityStore::remote(remote.clone());

        let results = store.list(&FilterSpec::default().with_city("Almaty")).await;
        assert_eq!(names(&results), ["Kazakh-British Technical University"]);
        assert!(store.status().is_degraded());

        remote.set_fail_reads(false);
        assert!(store.list(&FilterSpec::default()).await.is_empty());
        assert_eq!(
            store.status(),
            BackendStatus::Remote {
                collection: "universities".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_degraded_since_is_kept_across_failures() {
        let remote = Arc::new(MemoryCollection::new("universities"));
        remote.set_fail_reads(true);
        let store = UniversityStore::remote(remote);

        store.list(&FilterSpec::default()).await;
        let BackendStatus::Degraded { since: first, .. } = store.status() else {
            panic!("expected degraded status");
        };
        store.list(&FilterSpec::default()).await;
        let BackendStatus::Degraded { since: second, .. } = store.status() else {
            panic!("expected degraded status");
        };
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_remote_upsert_writes_normalized_merge_patch() {
        let remote = Arc::new(MemoryCollection::new("universities"));
        let store = UniversityStore::with_fallback(Some(remote.clone()), Vec::new());

        let mut record = draft("Merge University");
        record.id = "merge".to_string();
        record.programs.push(Program {
            id: "p".to_string(),
            title: "Physics".to_string(),
            ..Program::default()
        });
        store.upsert(record).await.unwrap();

        let document = remote.document("merge").unwrap();
        assert!(document.get("id").is_none());
        assert_eq!(document["name"], "Merge University");
        assert_eq!(document["missionHistory"], "");
        assert_eq!(document["tour3dUrl"], "");
        assert_eq!(document["programs"][0]["faculty"], "");
        assert_eq!(store.fallback_snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn test_remote_write_failure_skips_fallback_mirror() {
        let remote = Arc::new(MemoryCollection::new("universities"));
        remote.set_fail_writes(true);
        let store = UniversityStore::remote(remote);

        let result = store.upsert(draft("Unsaved University")).await;
        assert!(matches!(result, Err(StoreError::WriteFailed { .. })));
        assert_eq!(store.fallback_snapshot().await, sample_universities());

        let result = store.remove("nu").await;
        assert!(matches!(result, Err(StoreError::DeleteFailed { .. })));
        assert_eq!(store.fallback_snapshot().await.len(), 3);
    }

    #[tokio::test]
    async fn test_remote_seed_writes_sample_when_empty() {
        let remote = Arc::new(MemoryCollection::new("universities"));
        let store = UniversityStore::with_fallback(Some(remote.clone()), Vec::new());

        let outcome = store.seed().await.unwrap();
        assert!(outcome.seeded);
        assert_eq!(outcome.universities.len(), 3);
        assert_eq!(remote.len(), 3);
        assert_eq!(remote.document("nu").unwrap()["name"], "Nazarbayev University");
        assert_eq!(store.fallback_snapshot().await.len(), 3);
    }

    #[tokio::test]
    async fn test_remote_seed_on_populated_collection_reports_skip() {
        let remote = Arc::new(MemoryCollection::new("universities"));
        remote
            .put("only", serde_json::json!({ "name": "Only Remote" }))
            .await
            .unwrap();
        let store = UniversityStore::remote(remote.clone());

        let outcome = store.seed().await.unwrap();
        assert!(!outcome.seeded);
        assert_eq!(outcome.universities, sample_universities());
        assert_eq!(remote.len(), 1);
    }
}
