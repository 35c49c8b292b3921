//! Report viewer - fetches the buyer outstanding report for the configured
//! session, groups it, and prints the text rendering. An optional first
//! argument names a CSV file to write alongside.

use std::env;
use std::fs::File;

use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use billing_desk::api::{PanelClient, ReportStore};
use billing_desk::config::{SessionContext, load_default_config};
use billing_desk::core::report;
use billing_desk::errors::Result;
use billing_desk::export;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Load configuration and build the session
    let app_config = load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {e}"))?;
    let session = SessionContext::from_config(&app_config)
        .inspect_err(|e| error!("BILLING_DESK_TOKEN not found: {e}"))?;
    info!("Session ready for {}", session.base_url);

    // 4. Fetch, group, render
    let client = PanelClient::new(session.base_url.clone(), session.token.clone());
    let rows = client.fetch_outstanding(&session.outstanding_query()).await?;
    info!("Fetched {} outstanding rows", rows.len());

    let grouped = report::group(&rows);
    print!("{}", export::render_text(&grouped));

    // 5. Optional CSV artifact
    if let Some(path) = env::args().nth(1) {
        let file = File::create(&path)?;
        export::write_csv(&grouped, file)?;
        info!("Wrote CSV export to {path}");
    }

    Ok(())
}
