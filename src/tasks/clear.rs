//! Full wipe of one collection, verified by a second count.
//!
//! Documents are only summarized for the log, never decoded into a model, so
//! no stored shape can keep the wipe from happening.

use std::fmt;

use async_trait::async_trait;
use mongodb::bson::doc;
use tracing::{info, warn};

use super::MaintenanceTask;
use crate::error::{MaintenanceError, Result};
use crate::models::{summarize, CATEGORIES};
use crate::store::DocumentStore;

pub struct ClearCollection {
    collection: String,
}

impl ClearCollection {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
        }
    }

    pub fn categories() -> Self {
        Self::new(CATEGORIES)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClearReport {
    pub collection: String,
    pub found: u64,
    /// Summary line of every document present before the delete.
    pub removed: Vec<String>,
    pub deleted: u64,
    pub remaining: u64,
}

impl fmt::Display for ClearReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Found {} documents in `{}`", self.found, self.collection)?;
        for line in &self.removed {
            writeln!(f, "  - {}", line)?;
        }
        writeln!(f, "Deleted {} documents", self.deleted)?;
        write!(f, "Remaining documents: {}", self.remaining)
    }
}

#[async_trait]
impl MaintenanceTask for ClearCollection {
    type Report = ClearReport;

    fn name(&self) -> &'static str {
        "clear_collection"
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    async fn run(&self, store: &dyn DocumentStore) -> Result<ClearReport> {
        let collection = store.collection_name().to_string();
        let found = store.count(doc! {}).await?;
        info!(collection = %collection, found, "Clearing collection");

        let removed: Vec<String> = summarize(&store.find(doc! {}).await?)
            .iter()
            .map(ToString::to_string)
            .collect();
        for line in &removed {
            info!(collection = %collection, document = %line, "Removing document");
        }

        let deleted = store.delete_many(doc! {}).await?;
        let remaining = store.count(doc! {}).await?;
        if remaining != 0 {
            warn!(collection = %collection, remaining, "Documents survived delete_many");
            return Err(MaintenanceError::NotCleared {
                collection,
                remaining,
            });
        }
        info!(collection = %collection, deleted, "Collection cleared");

        Ok(ClearReport {
            collection,
            found,
            removed,
            deleted,
            remaining,
        })
    }
}
