use domain::SupabaseService;
use log::{error, info, warn};
use service::{config::Config, logging::Logger};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use web::AppState;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    info!(
        "Starting auth gateway [{}] on {}:{}",
        config.runtime_env(),
        config.interface.as_deref().unwrap_or("127.0.0.1"),
        config.port
    );

    let supabase = match SupabaseService::new(&config) {
        Ok(supabase) => Arc::new(supabase),
        Err(e) => {
            error!("Failed to create Supabase client: {e}");
            std::process::exit(1);
        }
    };

    if supabase.is_enabled() {
        info!("Supabase authentication is enabled");
    } else {
        info!("Supabase authentication is disabled; reporting native auth only");
    }

    let listen_addr = format!(
        "{}:{}",
        config.interface.as_deref().unwrap_or("127.0.0.1"),
        config.port
    );

    let app_state = AppState::new(config, &supabase);
    let router = web::define_routes(app_state);

    let listener = match TcpListener::bind(&listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {listen_addr}: {e}");
            std::process::exit(1);
        }
    };

    // Connect-info is what keys the rate limiter for direct (non-proxied)
    // clients
    if let Err(e) = axum::serve(
        listener,
        router.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
        warn!("Received ctrl-c, shutting down the server...");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
        warn!("Received SIGTERM, shutting down the server...");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
