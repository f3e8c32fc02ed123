use axum::{Router, routing::{any, get}};
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

mod cache;
mod clock;
mod config;
mod count_source;
mod error;
mod handlers;
mod logging;
mod metrics;
mod models;
mod rate_limit;
mod state;

use clock::SystemClock;
use config::Args;
use count_source::PostgrestCountSource;
use handlers::{count_handler, health_handler, metrics_handler};
use state::AppState;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    logging::init_logging();
    logging::load_dotenv();

    let args = Args::parse();

    let count_source = PostgrestCountSource::new(
        reqwest::Client::new(),
        &args.supabase_url,
        args.supabase_key.clone(),
    );
    let state = Arc::new(AppState::new(
        Arc::new(SystemClock),
        Arc::new(count_source),
        args.collection.clone(),
    ));

    let app = router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Count endpoint running on http://localhost:{}", args.port);
    info!("Counting rows of '{}' at {}", args.collection, args.supabase_url);
    info!(
        "Cache TTL: {}s, rate limit: {} requests per {}s",
        cache::CACHE_TTL.as_secs(),
        rate_limit::RATE_LIMIT_MAX,
        rate_limit::RATE_LIMIT_WINDOW.as_secs()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", any(count_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
