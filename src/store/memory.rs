//! In-process [`DocumentStore`] used by the task tests.

use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;

use super::{DocumentStore, UpdateSummary};
use crate::error::{MaintenanceError, Result};

pub struct MemoryStore {
    name: String,
    docs: Mutex<Vec<Document>>,
    fail_on: Option<&'static str>,
    /// When set, `delete_many` reports success but leaves documents behind.
    sticky_deletes: bool,
}

impl MemoryStore {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            docs: Mutex::new(Vec::new()),
            fail_on: None,
            sticky_deletes: false,
        }
    }

    pub fn with_docs(name: &str, docs: Vec<Document>) -> Self {
        let store = Self::new(name);
        *store.docs.lock().unwrap() = docs.into_iter().map(with_id).collect();
        store
    }

    /// Makes the named operation fail the way a dropped connection would.
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    pub fn with_sticky_deletes(mut self) -> Self {
        self.sticky_deletes = true;
        self
    }

    pub fn snapshot(&self) -> Vec<Document> {
        self.docs.lock().unwrap().clone()
    }

    fn check(&self, operation: &'static str) -> Result<()> {
        if self.fail_on == Some(operation) {
            return Err(MaintenanceError::operation(
                operation,
                self.name.clone(),
                std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "connection reset by peer",
                ),
            ));
        }
        Ok(())
    }
}

fn with_id(mut doc: Document) -> Document {
    if !doc.contains_key("_id") {
        doc.insert("_id", ObjectId::new());
    }
    doc
}

fn matches(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, value)| doc.get(key) == Some(value))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn collection_name(&self) -> &str {
        &self.name
    }

    async fn count(&self, filter: Document) -> Result<u64> {
        self.check("count_documents")?;
        let docs = self.docs.lock().unwrap();
        Ok(docs.iter().filter(|d| matches(d, &filter)).count() as u64)
    }

    async fn find(&self, filter: Document) -> Result<Vec<Document>> {
        self.check("find")?;
        let docs = self.docs.lock().unwrap();
        Ok(docs.iter().filter(|d| matches(d, &filter)).cloned().collect())
    }

    async fn insert_many(&self, new_docs: Vec<Document>) -> Result<u64> {
        self.check("insert_many")?;
        let inserted = new_docs.len() as u64;
        self.docs
            .lock()
            .unwrap()
            .extend(new_docs.into_iter().map(with_id));
        Ok(inserted)
    }

    async fn set_many(&self, filter: Document, fields: Document) -> Result<UpdateSummary> {
        self.check("update_many")?;
        let mut summary = UpdateSummary::default();
        for doc in self.docs.lock().unwrap().iter_mut() {
            if !matches(doc, &filter) {
                continue;
            }
            summary.matched += 1;
            let mut changed = false;
            for (key, value) in fields.iter() {
                if doc.get(key) != Some(value) {
                    doc.insert(key.clone(), value.clone());
                    changed = true;
                }
            }
            if changed {
                summary.modified += 1;
            }
        }
        Ok(summary)
    }

    async fn delete_many(&self, filter: Document) -> Result<u64> {
        self.check("delete_many")?;
        let mut docs = self.docs.lock().unwrap();
        let before = docs.len();
        if self.sticky_deletes {
            return Ok(docs.iter().filter(|d| matches(d, &filter)).count() as u64);
        }
        docs.retain(|d| !matches(d, &filter));
        Ok((before - docs.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_set_many_counts_matched_and_modified_separately() {
        let store = MemoryStore::with_docs(
            "programs",
            vec![
                doc! {"name": "a", "status": "draft", "isActive": true},
                doc! {"name": "b", "status": "draft", "isActive": false},
                doc! {"name": "c", "status": "published", "isActive": true},
            ],
        );
        let summary = store
            .set_many(doc! {"status": "draft"}, doc! {"isActive": true})
            .await
            .unwrap();
        assert_eq!(summary, UpdateSummary { matched: 2, modified: 1 });
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_delete_filters() {
        let store = MemoryStore::new("categories");
        store
            .insert_many(vec![doc! {"name": "x"}, doc! {"name": "y"}])
            .await
            .unwrap();
        assert!(store.snapshot().iter().all(|d| d.get_object_id("_id").is_ok()));
        assert_eq!(store.delete_many(doc! {"name": "x"}).await.unwrap(), 1);
        assert_eq!(store.count(doc! {}).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let store = MemoryStore::new("categories").failing_on("find");
        assert!(store.count(doc! {}).await.is_ok());
        let err = store.find(doc! {}).await.unwrap_err();
        assert!(err.to_string().starts_with("find on `categories` failed"));
    }
}
