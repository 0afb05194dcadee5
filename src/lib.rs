//! Maintenance tasks for the marketplace's MongoDB collections: clearing a
//! collection, seeding the category list and publishing draft programs.
//!
//! Each task implements [`tasks::MaintenanceTask`] and ships as its own
//! binary under `src/bin/`, all of which delegate to
//! [`tasks::runner::main_for`].

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod store;
pub mod tasks;

pub use error::{MaintenanceError, Result};
