use madlib_service::config::MadlibConfig;
use madlib_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = MadlibConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing("madlib-service", &config.common.log_level);

    let app = Application::build(config).await?;

    tracing::info!("Starting madlib-service on port {}", app.port());
    app.run_until_stopped().await?;

    Ok(())
}
