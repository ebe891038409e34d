//! Timetable engine HTTP server.
//!
//! # Environment Variables
//!
//! - `TIMETABLE_CONFIG`: configuration directory (default: ./config/default)
//! - `RUST_LOG`: log filter, e.g. `info` or `timetable_engine=debug`

use std::env;

use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use timetable_engine::api::{AppState, create_router};
use timetable_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config_dir =
        env::var("TIMETABLE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        institution = %config.institution().name,
        seeded = config.seed().is_some(),
        "Configuration loaded"
    );

    let bind_address = config.engine().server.bind_address.clone();
    let app = create_router(AppState::in_memory(config));

    let listener = tokio::net::TcpListener::bind(bind_address.as_str()).await?;
    info!("Server listening on http://{}", bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
