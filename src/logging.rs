use tracing::info;
use tracing_subscriber::EnvFilter;

pub fn init_logging() {
    // Writes to stderr, RUST_LOG filters and defaults to "info"
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

// Loads a .env file if there is one, before the CLI reads its env fallbacks
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => info!("Read dotenv file from: {}", path.display()),
        Err(e) if e.not_found() => info!("No dotenv file found"),
        Err(e) => tracing::warn!("Ignoring unreadable dotenv file: {e}"),
    }
}
