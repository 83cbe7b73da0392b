//! In-process remote collection.
//!
//! Behaves like the hosted collection (range reads on `location`, merge
//! writes) without leaving the process. Used for local development and as a
//! test double; reads and writes can be made to fail on demand.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::remote::location_range;
use super::{RemoteCollection, RemoteDocument, StoreError};

#[derive(Debug)]
pub struct MemoryCollection {
    name: String,
    documents: Mutex<BTreeMap<String, serde_json::Value>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: Mutex::new(BTreeMap::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent query fail until reset.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent merge, put and delete fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn document(&self, id: &str) -> Option<serde_json::Value> {
        self.documents.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.lock().is_empty()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Remote {
                reason: format!("collection '{}' rejected the write", self.name),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteCollection for MemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn query(&self, location_prefix: Option<&str>) -> Result<Vec<RemoteDocument>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Remote {
                reason: format!("collection '{}' is unreachable", self.name),
            });
        }

        let bounds = location_prefix.map(location_range);
        let documents = self.documents.lock();
        Ok(documents
            .iter()
            .filter(|(_, data)| match &bounds {
                Some((lower, upper)) => data
                    .get("location")
                    .and_then(serde_json::Value::as_str)
                    .is_some_and(|location| location >= lower.as_str() && location <= upper.as_str()),
                None => true,
            })
            .map(|(id, data)| RemoteDocument {
                id: id.clone(),
                data: data.clone(),
            })
            .collect())
    }

    async fn merge(&self, id: &str, data: serde_json::Value) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut documents = self.documents.lock();
        match documents.get_mut(id) {
            Some(existing) => merge_value(existing, data),
            None => {
                documents.insert(id.to_string(), data);
            }
        }
        Ok(())
    }

    async fn put(&self, id: &str, data: serde_json::Value) -> Result<(), StoreError> {
        self.check_writable()?;
        self.documents.lock().insert(id.to_string(), data);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.documents.lock().remove(id);
        Ok(())
    }
}

/// Recursively merges object `patch` into `target`; other values replace.
fn merge_value(target: &mut serde_json::Value, patch: serde_json::Value) {
    match (target, patch) {
        (serde_json::Value::Object(target), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(&key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_location_prefix_is_a_range() {
        let collection = MemoryCollection::new("universities");
        collection.put("a", json!({ "location": "Almaty, Kazakhstan" })).await.unwrap();
        collection.put("b", json!({ "location": "Astana, Kazakhstan" })).await.unwrap();
        collection.put("c", json!({ "location": "almaty" })).await.unwrap();
        collection.put("d", json!({ "name": "No location" })).await.unwrap();

        let found = collection.query(Some("Almaty")).await.unwrap();
        let ids: Vec<&str> = found.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["a"]);

        assert_eq!(collection.query(None).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_merge_keeps_untouched_fields() {
        let collection = MemoryCollection::new("universities");
        collection
            .put("u", json!({ "name": "Old", "location": "Astana", "cooperation": { "partners": ["A"], "foreignStudentInfo": "x" } }))
            .await
            .unwrap();
        collection
            .merge("u", json!({ "name": "New", "cooperation": { "partners": [] } }))
            .await
            .unwrap();

        let document = collection.document("u").unwrap();
        assert_eq!(document["name"], "New");
        assert_eq!(document["location"], "Astana");
        assert_eq!(document["cooperation"]["partners"], json!([]));
        assert_eq!(document["cooperation"]["foreignStudentInfo"], "x");
    }

    #[tokio::test]
    async fn test_fault_injection() {
        let collection = MemoryCollection::new("universities");
        collection.set_fail_writes(true);
        assert!(collection.put("u", json!({})).await.is_err());
        assert!(collection.delete("u").await.is_err());
        assert!(collection.is_empty());

        collection.set_fail_reads(true);
        assert!(collection.query(None).await.is_err());
    }
}
