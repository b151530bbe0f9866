use std::net::SocketAddr;

use adforge_core::vendor::ALL_VENDORS;
use adforge_vendors::PredictionVendor;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adforge_api::config::ServerConfig;
use adforge_api::router::build_app_router;
use adforge_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "adforge_api=debug,adforge_vendors=debug,tower_http=debug".into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Vendor clients ---
    let state = AppState::from_config(&config).expect("Failed to build HTTP client");
    for &vendor in ALL_VENDORS {
        if state.video_vendor(vendor).is_configured() {
            tracing::info!(vendor = %vendor, "Vendor credential loaded");
        } else {
            tracing::warn!(
                vendor = %vendor,
                env_var = vendor.credential_env_var(),
                "Vendor credential not set; its endpoints will return configuration errors",
            );
        }
    }

    // --- Router ---
    let app = build_app_router(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable, waiting for Ctrl-C only");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    let signal = tokio::select! {
        _ = tokio::signal::ctrl_c() => "SIGINT",
        () = sigterm => "SIGTERM",
    };
    tracing::info!(signal, "Shutting down, draining in-flight vendor calls");
}
