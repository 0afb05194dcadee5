use std::fmt;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::config::MaintenanceConfig;
use crate::db;
use crate::logging;
use crate::store::{DocumentStore, MongoStore};
use crate::tasks::MaintenanceTask;

/// What a finished run prints and which status the process exits with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Report text for stdout; exit status 0.
    Succeeded(String),
    /// `Error: ...` line for stderr; exit status 1.
    Failed(String),
}

impl RunOutcome {
    pub fn conclude<R: fmt::Display>(result: Result<R>) -> Self {
        match result {
            Ok(report) => RunOutcome::Succeeded(report.to_string()),
            Err(e) => RunOutcome::Failed(format!("Error: {:#}", e)),
        }
    }

    pub fn exit_status(&self) -> u8 {
        match self {
            RunOutcome::Succeeded(_) => 0,
            RunOutcome::Failed(_) => 1,
        }
    }

    /// Writes the outcome to stdout or stderr.
    pub fn emit(&self) -> ExitCode {
        match self {
            RunOutcome::Succeeded(report) => println!("{}", report),
            RunOutcome::Failed(line) => eprintln!("{}", line),
        }
        ExitCode::from(self.exit_status())
    }
}

/// Entry point shared by the maintenance binaries: sets up logging, runs the
/// task against MongoDB, prints its report and maps the outcome to an exit
/// status.
pub async fn main_for<T: MaintenanceTask>(task: T) -> ExitCode {
    logging::set_panic_hook();
    logging::init_logging_with_fallback();

    let span = info_span!("maintenance", run_id = %Uuid::new_v4(), task = task.name());
    let outcome = RunOutcome::conclude(
        run_configured(&task, MaintenanceConfig::from_env())
            .instrument(span)
            .await,
    );
    debug!(task = task.name(), status = outcome.exit_status(), "Maintenance run finished");
    outcome.emit()
}

/// Connects with an already loaded configuration and runs the task.
pub async fn run_configured<T: MaintenanceTask>(
    task: &T,
    config: crate::Result<MaintenanceConfig>,
) -> Result<T::Report> {
    let config = config.context("loading configuration")?;
    let database = db::connect(&config)
        .await
        .context("connecting to MongoDB")?;
    let store = MongoStore::new(&database, task.collection());
    run_task(task, &store).await
}

/// Runs one task against an already opened store.
pub async fn run_task<T: MaintenanceTask>(
    task: &T,
    store: &dyn DocumentStore,
) -> Result<T::Report> {
    info!(task = task.name(), collection = store.collection_name(), "Running maintenance task");
    let report = task
        .run(store)
        .await
        .with_context(|| format!("running {} on `{}`", task.name(), store.collection_name()))?;
    info!(task = task.name(), "Maintenance task finished");
    Ok(report)
}
