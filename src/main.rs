//! weatherglass - weather-driven palette and shader parameter service
//!
//! This is the main entry point for the weatherglass application.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use weatherglass::handlers::router;
use weatherglass::{
    init_tracing, log_error, AppState, Config, HttpWeatherSource, LatestFrame, Result, Sampler,
    Visualization, WeatherglassError,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config.log_level);

    info!("Starting weatherglass v{}", env!("CARGO_PKG_VERSION"));

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    if config.weather.api_key.is_none() {
        info!("No weather API key configured; requests are sent without `appid`");
    }

    // Sampler, poll task and the single visualization instance
    let sampler = Sampler::new();
    let source = HttpWeatherSource::new(&config.weather)?;
    let poll = sampler.start(source, config.poll_interval());

    let frames = LatestFrame::new();
    let mut visualization = Visualization::new(poll, frames.clone());
    visualization.start_frames(config.frame_interval());

    let state = Arc::new(
        AppState::new(config.clone(), sampler, frames).with_started(visualization.started()),
    );
    let app = router(state);

    // Create the server address
    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| WeatherglassError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| WeatherglassError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    info!("Server listening on http://{}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WeatherglassError::Server {
            message: format!("Server error: {}", e),
        });

    visualization.teardown();

    if let Err(e) = &served {
        log_error(e, "server");
    }
    served?;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
