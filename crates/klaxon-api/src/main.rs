//! Klaxon REST API entry point.
//!
//! Binary name: `klaxon`
//!
//! Parses CLI arguments, loads configuration and workflow definitions, then
//! starts the REST API server.

mod http;
mod state;

use std::path::PathBuf;

use clap::Parser;

use klaxon_infra::config::load_config;
use klaxon_observe::tracing_setup::{init_tracing, LogFormat};
use state::AppState;

/// Alert ingestion, enrichment, and workflow relevance API.
#[derive(Debug, Parser)]
#[command(name = "klaxon", version, about)]
struct Cli {
    /// Directory holding config.toml and the workflow definition directory.
    #[arg(long, default_value = ".", env = "KLAXON_DATA_DIR")]
    data_dir: PathBuf,

    /// Override the bind host from config.toml.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port from config.toml.
    #[arg(long)]
    port: Option<u16>,

    /// Emit logs as newline-delimited JSON.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_tracing(format).map_err(|err| anyhow::anyhow!("tracing init failed: {err}"))?;

    let mut config = load_config(&cli.data_dir).await;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    // The workflow dir is relative to the data dir unless absolute.
    let workflow_dir = cli.data_dir.join(&config.workflow_dir);
    config.workflow_dir = workflow_dir.display().to_string();

    let state = AppState::init(&config).await?;

    // Pull-based ingestion: poll the Prometheus API when configured.
    if let Some(prometheus) = &config.prometheus {
        spawn_prometheus_poller(&state, prometheus.poll_interval_secs);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "klaxon API listening");

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Periodically pull current alerts from Prometheus into the alert store.
///
/// Fetch failures are logged and the loop keeps running; a provider outage
/// must not take the API down with it.
fn spawn_prometheus_poller(state: &AppState, interval_secs: u64) {
    use klaxon_core::provider::AlertProvider;
    use klaxon_core::repository::AlertRepository;

    let provider = state.prometheus.clone();
    let alerts = state.alerts.clone();

    tokio::spawn(async move {
        let mut ticker =
            tokio::time::interval(std::time::Duration::from_secs(interval_secs.max(1)));
        loop {
            ticker.tick().await;
            match provider.fetch_alerts().await {
                Ok(fetched) => {
                    for alert in &fetched {
                        if let Err(err) = alerts.save_alert(alert).await {
                            tracing::error!(
                                fingerprint = %alert.fingerprint,
                                error = %err,
                                "failed to store pulled alert"
                            );
                        }
                    }
                    tracing::debug!(count = fetched.len(), "pulled alerts from prometheus");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "prometheus poll failed");
                }
            }
        }
    });
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
