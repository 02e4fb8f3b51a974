use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use burnwatch::config::Config;
use burnwatch::pipeline::{run_refresh_loop, BurnPipeline};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path)?;

    // Initialize structured logging (set RUST_LOG=debug for more output)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    tracing::info!(
        token = %config.token.symbol,
        contract = %config.token.contract_address,
        "Burnwatch starting, configuration loaded from {}",
        config_path
    );

    let pipeline = Arc::new(BurnPipeline::init(&config)?);

    // Nothing long-running configured: refresh once and print the report
    if !config.api.enabled && !config.watch.enabled {
        let report = pipeline.refresh().await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    let mut handles = Vec::new();

    if config.api.enabled {
        let api_pipeline = pipeline.clone();
        let host = config.api.host.clone();
        let port = config.api.port;
        let api_shutdown = shutdown.clone();
        handles.push(tokio::spawn(async move {
            tokio::select! {
                result = burnwatch::api::serve(api_pipeline, &host, port) => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "API server failed");
                    }
                }
                _ = api_shutdown.cancelled() => {}
            }
        }));
    }

    if config.watch.enabled {
        let interval = Duration::from_secs(config.watch.poll_interval_secs);
        let watch_pipeline = pipeline.clone();
        let watch_shutdown = shutdown.clone();
        handles.push(tokio::spawn(async move {
            run_refresh_loop(watch_pipeline, interval, watch_shutdown).await;
        }));
    }

    tracing::info!("Burnwatch running. Press Ctrl+C to stop.");

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, stopping...");
    shutdown.cancel();

    for handle in handles {
        let _ = handle.await;
    }

    tracing::info!("Burnwatch stopped gracefully");
    Ok(())
}
