use std::sync::Arc;

use notepad_mcp::{build_app, config::Config, logging, open_file_store, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;

    // NOTES_BACKEND only applies to the stdio binary; this server owns the document.
    let store = open_file_store(&config).await?;

    let bind_socket = config.bind_socket()?;
    let state = AppState::new(Arc::new(store));
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        db_path = %config.db_path.display(),
        "notes api starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
