//! Inserts the static category list, unless `categories` already has documents.
//!
//! Usage: MONGODB_URI=... cargo run --bin seed_categories

use std::process::ExitCode;

use catalog_maintenance::tasks::{runner, SeedCategories};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    runner::main_for(SeedCategories::default()).await
}
