use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::{debug, info};

use crate::config::MaintenanceConfig;
use crate::error::{MaintenanceError, Result};

/// Database used when neither `MONGODB_DATABASE` nor the URI names one.
pub const FALLBACK_DATABASE: &str = "test";

pub const APP_NAME: &str = "catalog-maintenance";

/// Builds a single-connection client and pings the server so that an
/// unreachable deployment fails here rather than on the first query.
pub async fn connect(config: &MaintenanceConfig) -> Result<Database> {
    let mut client_options = ClientOptions::parse(&config.mongodb_uri)
        .await
        .map_err(MaintenanceError::Connection)?;
    apply_options(&mut client_options, config);

    let db_name = database_name(config, client_options.default_database.as_deref());
    let client = Client::with_options(client_options).map_err(MaintenanceError::Connection)?;

    debug!(database = %db_name, "Pinging MongoDB");
    client
        .database("admin")
        .run_command(doc! {"ping": 1}, None)
        .await
        .map_err(MaintenanceError::Connection)?;
    info!(database = %db_name, "Connected to MongoDB");

    Ok(client.database(&db_name))
}

/// No stable server API version is requested, so pre-5.0 deployments work.
fn apply_options(client_options: &mut ClientOptions, config: &MaintenanceConfig) {
    client_options.app_name = Some(APP_NAME.to_string());
    client_options.max_pool_size = Some(1);
    client_options.min_pool_size = Some(0);
    client_options.connect_timeout = Some(config.connect_timeout);
    client_options.server_selection_timeout = Some(config.server_selection_timeout);
}

fn database_name(config: &MaintenanceConfig, from_uri: Option<&str>) -> String {
    config
        .database
        .as_deref()
        .or(from_uri)
        .unwrap_or(FALLBACK_DATABASE)
        .to_string()
}
