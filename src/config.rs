//! Environment-driven configuration shared by every maintenance binary.

use std::env;
use std::time::Duration;

use crate::error::{MaintenanceError, Result};

const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_SERVER_SELECTION_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceConfig {
    pub mongodb_uri: String,
    /// Explicit database name; `None` means "whatever the URI names".
    pub database: Option<String>,
    pub connect_timeout: Duration,
    pub server_selection_timeout: Duration,
}

impl MaintenanceConfig {
    /// Loads `.env` (if present) and reads the `MONGODB_*` variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mongodb_uri = lookup("MONGODB_URI")
            .filter(|v| !v.trim().is_empty())
            .ok_or(MaintenanceError::MissingEnv("MONGODB_URI"))?;
        let database = lookup("MONGODB_DATABASE").filter(|v| !v.trim().is_empty());
        let connect_timeout = millis(
            &lookup,
            "MONGODB_CONNECT_TIMEOUT_MS",
            DEFAULT_CONNECT_TIMEOUT_MS,
        )?;
        let server_selection_timeout = millis(
            &lookup,
            "MONGODB_SERVER_SELECTION_TIMEOUT_MS",
            DEFAULT_SERVER_SELECTION_TIMEOUT_MS,
        )?;
        Ok(Self {
            mongodb_uri,
            database,
            connect_timeout,
            server_selection_timeout,
        })
    }
}

fn millis<F>(lookup: &F, name: &'static str, default: u64) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(Duration::from_millis(default)),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| MaintenanceError::InvalidEnv { name, value: raw }),
    }
}
