//! Request Portal - Main Entry Point
//!
//! Role-based internal request tracking portal

use request_portal::app::application::run_app;
use request_portal::domain::config::PortalConfig;
use request_portal::helpers::logging::init_logging;
use request_portal::utils::config_store::load_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, load_error) = match load_config() {
        Ok(config) => (config, None),
        Err(e) => (PortalConfig::default(), Some(e)),
    };

    // Held until exit so buffered file logs are flushed
    let _guard = init_logging(&config.logging)?;
    if let Some(e) = load_error {
        tracing::warn!(error = %e, "failed to load config, using defaults");
    }

    tracing::info!("Starting request portal...");
    run_app(config).await?;
    Ok(())
}
