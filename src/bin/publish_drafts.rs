//! Moves every `draft` program to `published` and marks it active.
//!
//! Usage: MONGODB_URI=... cargo run --bin publish_drafts

use std::process::ExitCode;

use catalog_maintenance::tasks::{runner, PublishDrafts};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    runner::main_for(PublishDrafts::default()).await
}
