use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod mcp;
pub mod note_store;
pub mod rest_client;

use config::{BackendKind, Config};
use note_store::{JsonFileStore, NoteBackend};
use rest_client::RestNoteClient;

#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteBackend>,
}

impl AppState {
    pub fn new(notes: Arc<dyn NoteBackend>) -> Self {
        Self { notes }
    }
}

/// Opens the note document at `config.db_path`, creating it when absent.
pub async fn open_file_store(config: &Config) -> Result<JsonFileStore, errors::AppError> {
    let store = JsonFileStore::new(&config.db_path);
    store.initialize().await?;
    Ok(store)
}

/// Builds the backend named by `config.backend`.
pub async fn backend_from_config(
    config: &Config,
) -> Result<Arc<dyn NoteBackend>, errors::AppError> {
    match config.backend {
        BackendKind::File => Ok(Arc::new(open_file_store(config).await?)),
        BackendKind::Rest => Ok(Arc::new(RestNoteClient::new(&config.api_url))),
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(http::handlers::health))
        .route("/.well-known/mcp", get(http::handlers::discovery))
        .route("/mcp", post(http::handlers::mcp_endpoint))
        .route(
            "/notes",
            get(http::notes::list_notes).post(http::notes::create_note),
        )
        .route(
            "/notes/{id}",
            get(http::notes::get_note)
                .put(http::notes::update_note)
                .delete(http::notes::delete_note),
        )
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
