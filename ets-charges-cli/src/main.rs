//! Run-to-completion publisher for the ETS transportation charges report.

mod config;

use std::io;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use ets_charges_core::{ChargePort, EntryId, Locale, ReportService, TokenPort, TranslationPort};
use ets_charges_provider_contentful::ContentfulProvider;
use ets_charges_provider_dataverse::DataverseProvider;
use reqwest::Client;
use tracing::{error, info};

use crate::config::Config;

/// Locales the report is rendered in.
const REPORT_LOCALES: [Locale; 3] = [Locale::En, Locale::DaDk, Locale::DeDe];

/// Entry holding the published report, fixed per deployment.
const REPORT_ENTRY_ID: &str = "6jtTX4jD5oQ4jPn0Y6c5Wb";

/// Bound on every external call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(error) = run().await {
        error!("Report update failed: {error:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::from_env();

    // HTTP + service setup
    let client = Client::builder()
        .user_agent("ets-charges/0.1")
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let dataverse = Arc::new(DataverseProvider::new(client.clone(), config.dataverse));
    let contentful = Arc::new(ContentfulProvider::new(client, config.contentful));

    let service = ReportService::new(
        Arc::clone(&dataverse) as Arc<dyn TokenPort>,
        Arc::clone(&dataverse) as Arc<dyn ChargePort>,
        dataverse as Arc<dyn TranslationPort>,
        contentful,
    );

    let entry = EntryId(REPORT_ENTRY_ID.to_owned());
    let today = Local::now().date_naive();

    let updated = service.publish(&entry, &REPORT_LOCALES, today).await?;
    info!("Entry {updated} updated successfully");

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(io::stderr),
        )
        .init();
}
