//! Seeds the static category list into an empty `categories` collection.
//!
//! The guard is collection-wide: if any category exists the whole batch is
//! skipped, so a partially edited collection is never topped up.

use std::fmt;

use async_trait::async_trait;
use mongodb::bson::{self, doc};
use tracing::info;

use super::MaintenanceTask;
use crate::error::Result;
use crate::models::{summarize, CategoryDoc, DocumentSummary, CATEGORIES};
use crate::store::DocumentStore;

pub const SEED_CATEGORY_NAMES: [&str; 10] = [
    "Web Development",
    "Data Science",
    "Mobile Development",
    "UI/UX Design",
    "Business & Entrepreneurship",
    "Digital Marketing",
    "Photography & Video",
    "Music & Audio",
    "Health & Fitness",
    "Personal Development",
];

pub struct SeedCategories {
    collection: String,
    names: Vec<String>,
}

impl Default for SeedCategories {
    fn default() -> Self {
        Self::with_names(CATEGORIES, SEED_CATEGORY_NAMES)
    }
}

impl SeedCategories {
    pub fn with_names<I, S>(collection: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            collection: collection.into(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeedReport {
    Skipped { existing: u64 },
    Seeded {
        inserted: u64,
        categories: Vec<DocumentSummary>,
    },
}

impl SeedReport {
    pub fn inserted(&self) -> u64 {
        match self {
            SeedReport::Skipped { .. } => 0,
            SeedReport::Seeded { inserted, .. } => *inserted,
        }
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedReport::Skipped { existing } => write!(
                f,
                "Categories already exist ({} found), skipping seed",
                existing
            ),
            SeedReport::Seeded {
                inserted,
                categories,
            } => {
                write!(f, "Inserted {} categories", inserted)?;
                for category in categories {
                    write!(f, "\n  - {}", category)?;
                }
                Ok(())
            }
        }
    }
}

#[async_trait]
impl MaintenanceTask for SeedCategories {
    type Report = SeedReport;

    fn name(&self) -> &'static str {
        "seed_categories"
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    async fn run(&self, store: &dyn DocumentStore) -> Result<SeedReport> {
        let collection = store.collection_name().to_string();
        let existing = store.count(doc! {}).await?;
        if existing > 0 {
            info!(
                collection = %collection,
                existing,
                "Categories already present, skipping seed"
            );
            return Ok(SeedReport::Skipped { existing });
        }

        let docs = self
            .names
            .iter()
            .map(|name| bson::to_document(&CategoryDoc::active(name.as_str())))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let inserted = store.insert_many(docs).await?;
        info!(collection = %collection, inserted, "Seeded categories");

        let categories = summarize(&store.find(doc! {}).await?);
        Ok(SeedReport::Seeded {
            inserted,
            categories,
        })
    }
}
