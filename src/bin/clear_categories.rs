//! Deletes every document in `categories` and verifies the collection is empty.
//!
//! Usage: MONGODB_URI=... cargo run --bin clear_categories

use std::process::ExitCode;

use catalog_maintenance::tasks::{runner, ClearCollection};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    runner::main_for(ClearCollection::categories()).await
}
