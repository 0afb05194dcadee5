// Maintenance task trait and the shipped tasks
use std::fmt;

use async_trait::async_trait;

use crate::error::Result;
use crate::store::DocumentStore;

pub mod clear;
pub mod publish;
pub mod runner;
pub mod seed;

pub use clear::{ClearCollection, ClearReport};
pub use publish::{PublishDrafts, PublishReport};
pub use seed::{SeedCategories, SeedReport, SEED_CATEGORY_NAMES};

#[async_trait]
pub trait MaintenanceTask: Send + Sync {
    /// Printed to stdout once the task succeeds.
    type Report: fmt::Display + Send;

    fn name(&self) -> &'static str;

    /// Collection the runner opens for this task.
    fn collection(&self) -> &str;

    async fn run(&self, store: &dyn DocumentStore) -> Result<Self::Report>;
}
