#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use dotenvy::dotenv;
use memo_server::errors::ApplicationError;
use memo_server::router::setup_router;
use memo_server::state::AppState;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApplicationError> {
    if let Err(e) = run().await {
        // Print the error using Display
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run() -> Result<(), ApplicationError> {
    setup_tracing();

    let (host, port, data_dir) = setup_env();

    std::fs::create_dir_all(&data_dir).map_err(|e| {
        ApplicationError::Internal(format!("Failed to create data directory: {}", e))
    })?;

    let db_path = data_dir.join("notes.db");
    let db = memo_core::open_db(&db_path)?;
    info!("Notes database ready at {:?}", db_path);

    let app = setup_router(AppState::new(db));

    let address = format!("{}:{}", host, port);
    info!("Starting server on {}", address);

    let listener = TcpListener::bind(address)
        .await
        .map_err(ApplicationError::from)?;

    info!(
        "Listening on: {}",
        listener.local_addr().map_err(ApplicationError::from)?
    );

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(ApplicationError::from)?;

    Ok(())
}

fn setup_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{crate_name}=debug,tower_http=debug",
                    crate_name = env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn setup_env() -> (String, String, PathBuf) {
    dotenv().ok();

    let host = std::env::var("MEMO_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("MEMO_PORT").unwrap_or_else(|_| "5000".to_string());
    let data_dir = std::env::var("MEMO_DATA_DIR").unwrap_or_else(|_| "./data".to_string());

    (host, port, PathBuf::from(data_dir))
}
