//! hr-server: serves the HR record core over HTTP.
//!
//! Reads configuration from `HR_CONFIG_DIR` (default `./config/hr_pro`)
//! and log filters from `RUST_LOG`.

use hr_core::api::{AppState, Clock, create_router};
use hr_core::config::ConfigLoader;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_CONFIG_DIR: &str = "./config/hr_pro";

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hr_core=info,hr_server=info".into()),
        )
        .init();

    let config_dir =
        std::env::var("HR_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    let state = AppState::from_config(&config, Clock::System)?;

    let bind = config.settings().server.bind.clone();
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("hr-server listening on {bind}");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
