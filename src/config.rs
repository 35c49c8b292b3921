//! Application configuration loading from config.toml plus the per-run
//! session context.
//!
//! The config file carries the API origin and the report screen's default
//! filters. The bearer token is never stored in the file; it comes from the
//! `BILLING_DESK_TOKEN` environment variable (a `.env` file works through
//! `dotenvy`, loaded by the binary).

use serde::Deserialize;
use std::env;
use std::path::Path;

use crate::api::OutstandingQuery;
use crate::errors::{Error, Result};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Panel API endpoint settings
    pub api: ApiConfig,
    /// Default filters for the outstanding report
    #[serde(default)]
    pub report: ReportDefaults,
}

/// Panel API endpoint settings
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// Origin of the panel API, without a trailing slash
    pub base_url: String,
}

/// Default filters for the outstanding report
#[derive(Debug, Default, Deserialize)]
pub struct ReportDefaults {
    /// Start of the date range (YYYY-MM-DD)
    #[serde(default)]
    pub from_date: String,
    /// End of the date range (YYYY-MM-DD)
    #[serde(default)]
    pub to_date: String,
    /// Buyer id filter; empty selects all buyers
    #[serde(default)]
    pub billing_from_id: String,
    /// Vendor id filter; empty selects all vendors
    #[serde(default)]
    pub billing_to_id: String,
}

/// Loads application configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or required fields are missing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads application configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<AppConfig> {
    load_config("config.toml")
}

/// Everything one run needs to talk to the panel: origin, credential, and the
/// report filters in effect.
#[derive(Clone, Debug)]
pub struct SessionContext {
    pub base_url: String,
    pub token: String,
    pub from_date: String,
    pub to_date: String,
    pub billing_from_id: String,
    pub billing_to_id: String,
}

impl SessionContext {
    /// Builds the session from the loaded config and the environment.
    /// `BILLING_DESK_TOKEN` is read here, directly before use, and is not
    /// part of [`AppConfig`].
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let token = env::var("BILLING_DESK_TOKEN")?;
        Ok(SessionContext {
            base_url: config.api.base_url.clone(),
            token,
            from_date: config.report.from_date.clone(),
            to_date: config.report.to_date.clone(),
            billing_from_id: config.report.billing_from_id.clone(),
            billing_to_id: config.report.billing_to_id.clone(),
        })
    }

    /// The outstanding-report request body for this session's filters.
    pub fn outstanding_query(&self) -> OutstandingQuery {
        OutstandingQuery {
            from_date: self.from_date.clone(),
            to_date: self.to_date.clone(),
            billing_from_id: self.billing_from_id.clone(),
            billing_to_id: self.billing_to_id.clone(),
        }
    }
}
