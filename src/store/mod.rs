//! Storage seam for the maintenance tasks.
//!
//! Tasks talk to a single collection through [`DocumentStore`]. Filters are
//! equality matches on top-level fields and updates are `$set` field lists,
//! which is all the maintenance operations need.

use async_trait::async_trait;
use mongodb::bson::Document;

use crate::error::Result;

pub mod mongo;
#[cfg(test)]
pub(crate) mod memory;

pub use mongo::MongoStore;

/// Outcome of a `set_many` call, mirroring the driver's update result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub matched: u64,
    pub modified: u64,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn collection_name(&self) -> &str;

    async fn count(&self, filter: Document) -> Result<u64>;

    async fn find(&self, filter: Document) -> Result<Vec<Document>>;

    /// Inserts every document in one bulk write; returns the inserted count.
    async fn insert_many(&self, docs: Vec<Document>) -> Result<u64>;

    /// Applies `$set: fields` to every document matching `filter`.
    async fn set_many(&self, filter: Document, fields: Document) -> Result<UpdateSummary>;

    async fn delete_many(&self, filter: Document) -> Result<u64>;
}
