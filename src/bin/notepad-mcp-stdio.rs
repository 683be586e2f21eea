//! MCP server on stdin/stdout.
//!
//! `NOTES_BACKEND=file` (default) opens the note document directly;
//! `NOTES_BACKEND=rest` forwards every call to the REST API at `NOTES_API_URL`.

use notepad_mcp::{
    backend_from_config,
    config::{BackendKind, Config},
    logging,
    mcp::stdio::serve_stdio,
    AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let notes = backend_from_config(&config).await?;

    match config.backend {
        BackendKind::File => {
            info!(db_path = %config.db_path.display(), "mcp server using note document")
        }
        BackendKind::Rest => info!(api_url = %config.api_url, "mcp server using notes api"),
    }

    serve_stdio(AppState::new(notes)).await?;
    Ok(())
}
