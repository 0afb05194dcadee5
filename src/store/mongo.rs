use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Collection, Database};

use super::{DocumentStore, UpdateSummary};
use crate::error::{MaintenanceError, Result};
use crate::metrics::time_db_operation;

/// [`DocumentStore`] backed by a MongoDB collection of raw BSON documents.
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    pub fn new(db: &Database, collection: &str) -> Self {
        Self {
            collection: db.collection::<Document>(collection),
        }
    }

    fn fail(
        &self,
        operation: &'static str,
    ) -> impl FnOnce(mongodb::error::Error) -> MaintenanceError + '_ {
        move |e| MaintenanceError::operation(operation, self.collection.name(), e)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn collection_name(&self) -> &str {
        self.collection.name()
    }

    async fn count(&self, filter: Document) -> Result<u64> {
        time_db_operation("count_documents", self.collection.name(), async {
            self.collection.count_documents(filter, None).await
        })
        .await
        .map_err(self.fail("count_documents"))
    }

    async fn find(&self, filter: Document) -> Result<Vec<Document>> {
        time_db_operation("find", self.collection.name(), async {
            let cursor = self.collection.find(filter, None).await?;
            cursor.try_collect::<Vec<Document>>().await
        })
        .await
        .map_err(self.fail("find"))
    }

    async fn insert_many(&self, docs: Vec<Document>) -> Result<u64> {
        // The driver rejects an empty batch outright.
        if docs.is_empty() {
            return Ok(0);
        }
        let result = time_db_operation("insert_many", self.collection.name(), async {
            self.collection.insert_many(docs, None).await
        })
        .await
        .map_err(self.fail("insert_many"))?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn set_many(&self, filter: Document, fields: Document) -> Result<UpdateSummary> {
        let result = time_db_operation("update_many", self.collection.name(), async {
            self.collection
                .update_many(filter, doc! {"$set": fields}, None)
                .await
        })
        .await
        .map_err(self.fail("update_many"))?;
        Ok(UpdateSummary {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_many(&self, filter: Document) -> Result<u64> {
        let result = time_db_operation("delete_many", self.collection.name(), async {
            self.collection.delete_many(filter, None).await
        })
        .await
        .map_err(self.fail("delete_many"))?;
        Ok(result.deleted_count)
    }
}
