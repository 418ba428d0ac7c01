//! Forecast ingest server
//!
//! Polls the Met.no forecast for one position, writes the leading horizon to
//! InfluxDB and serves health endpoints until shut down.

use std::sync::Arc;

use anyhow::Context;
use application::{ForecastPipeline, PollingScheduler, TimeSeriesWriter};
use infrastructure::{AppConfig, InfluxSinkAdapter, YrForecastAdapter, init_tracing};
use presentation_http::{AppState, TaskSupervisor, routes};
use tokio::{net::TcpListener, signal};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.telemetry)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        position = %config.position,
        interval_secs = config.scheduler.interval_secs,
        horizon = config.scheduler.horizon,
        bucket = %config.influx.bucket,
        "Forecast ingest starting"
    );

    let forecasts = YrForecastAdapter::with_config(config.yr.clone())
        .context("Failed to initialize forecast client")?;
    let sink = InfluxSinkAdapter::with_config(config.influx.clone())
        .context("Failed to initialize InfluxDB client")?;

    let writer = TimeSeriesWriter::with_horizon(Arc::new(sink), config.scheduler.horizon);
    let pipeline = Arc::new(ForecastPipeline::new(
        Arc::new(forecasts),
        writer,
        config.position,
    ));

    let scheduler = PollingScheduler::new(Arc::clone(&pipeline), config.scheduler.interval())?
        .with_policy(config.scheduler.failure_policy.into_policy());

    let addr = config.server.socket_addr().with_context(|| {
        format!(
            "Invalid listen address {}:{}",
            config.server.host, config.server.port
        )
    })?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "HTTP listener bound");

    let app = routes::create_app(AppState::new(pipeline), config.server.request_timeout());

    let mut supervisor = TaskSupervisor::new(config.server.shutdown_timeout());

    let token = supervisor.token();
    supervisor.spawn("scheduler", async move { scheduler.run(token).await });

    let token = supervisor.token();
    supervisor.spawn("http", async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(token.cancelled_owned())
            .await
    });

    supervisor.run_until(shutdown_signal()).await?;

    info!("Shutdown complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
