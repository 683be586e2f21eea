//! REST routes over the note backend
//!
//! `GET /notes`, `GET /notes/{id}`, `POST /notes`, `PUT /notes/{id}` and
//! `DELETE /notes/{id}`. Errors are returned as `{"error": "..."}`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::{errors::AppError, note_store::Note, AppState};

#[derive(Debug, Deserialize)]
pub struct NotePayload {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

fn note_not_found() -> AppError {
    AppError::not_found("note_not_found", "Note not found")
}

fn validate_payload(
    payload: Result<Json<NotePayload>, JsonRejection>,
) -> Result<(String, String), AppError> {
    let missing = || AppError::bad_request("missing_fields", "Title and content are required");

    let Json(payload) = payload.map_err(|rejection| {
        debug!(error = %rejection, "rejected note payload");
        missing()
    })?;

    match (payload.title, payload.content) {
        (Some(title), Some(content)) if !title.is_empty() && !content.is_empty() => {
            Ok((title, content))
        }
        _ => Err(missing()),
    }
}

fn store_failure(message: &'static str) -> impl FnOnce(AppError) -> AppError {
    move |err| {
        error!(error = %err, "{message}");
        AppError::internal(message)
    }
}

pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, AppError> {
    let notes = state
        .notes
        .list_notes()
        .await
        .map_err(store_failure("Failed to list notes"))?;
    Ok(Json(notes))
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, AppError> {
    state
        .notes
        .get_note(&id)
        .await
        .map_err(store_failure("Failed to fetch note"))?
        .map(Json)
        .ok_or_else(note_not_found)
}

pub async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<NotePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    let (title, content) = validate_payload(payload)?;

    let note = state
        .notes
        .create_note(&title, &content)
        .await
        .map_err(store_failure("Failed to create note"))?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NotePayload>, JsonRejection>,
) -> Result<Json<Note>, AppError> {
    let (title, content) = validate_payload(payload)?;

    state
        .notes
        .update_note(&id, &title, &content)
        .await
        .map_err(store_failure("Failed to update note"))?
        .map(Json)
        .ok_or_else(note_not_found)
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = state
        .notes
        .delete_note(&id)
        .await
        .map_err(store_failure("Failed to delete note"))?;

    if !deleted {
        return Err(note_not_found());
    }

    Ok(Json(MessageResponse {
        message: "Note deleted successfully",
    }))
}
