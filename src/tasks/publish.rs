//! Publishes every draft program in one `update_many`.

use std::fmt;

use async_trait::async_trait;
use mongodb::bson::doc;
use tracing::info;

use super::MaintenanceTask;
use crate::error::Result;
use crate::models::{status, summarize, DocumentSummary, PROGRAMS};
use crate::store::DocumentStore;

pub struct PublishDrafts {
    collection: String,
}

impl Default for PublishDrafts {
    fn default() -> Self {
        Self::new(PROGRAMS)
    }
}

impl PublishDrafts {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishReport {
    pub matched: u64,
    pub modified: u64,
    /// Every program after the update, for audit.
    pub programs: Vec<DocumentSummary>,
}

impl fmt::Display for PublishReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Updated {} programs", self.modified)?;
        if self.matched != self.modified {
            write!(f, " ({} matched)", self.matched)?;
        }
        write!(f, "\nAll programs ({}):", self.programs.len())?;
        for program in &self.programs {
            write!(f, "\n  - {}", program)?;
        }
        Ok(())
    }
}

#[async_trait]
impl MaintenanceTask for PublishDrafts {
    type Report = PublishReport;

    fn name(&self) -> &'static str {
        "publish_drafts"
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    async fn run(&self, store: &dyn DocumentStore) -> Result<PublishReport> {
        let collection = store.collection_name().to_string();
        let summary = store
            .set_many(
                doc! {"status": status::DRAFT},
                doc! {"status": status::PUBLISHED, "isActive": true},
            )
            .await?;
        info!(
            collection = %collection,
            matched = summary.matched,
            modified = summary.modified,
            "Published draft programs"
        );

        // Runs after the committed write, so it must accept any stored shape.
        let programs = summarize(&store.find(doc! {}).await?);
        Ok(PublishReport {
            matched: summary.matched,
            modified: summary.modified,
            programs,
        })
    }
}
