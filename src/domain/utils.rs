//! Shared argument validation and note formatting

use serde::Serialize;

use crate::errors::AppError;

pub const NOTES_LIST_URI: &str = "notes://list";
pub const NOTE_BY_ID_URI_PREFIX: &str = "notes://id/";
pub const NOTE_BY_ID_URI_TEMPLATE: &str = "notes://id/{id}";

/// Rejects absent and empty values. Whitespace counts as content, and accepted
/// values are returned untouched.
pub fn require_text(
    value: Option<String>,
    code: &'static str,
    message: &'static str,
) -> Result<String, AppError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::bad_request(code, message)),
    }
}

pub fn require_id(id: Option<String>) -> Result<String, AppError> {
    require_text(id, "missing_id", "Note ID is required")
}

pub fn require_title(title: Option<String>) -> Result<String, AppError> {
    require_text(title, "missing_title", "Title is required")
}

pub fn require_content(content: Option<String>) -> Result<String, AppError> {
    require_text(content, "missing_content", "Content is required")
}

pub fn pretty_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn note_id_from_uri(uri: &str) -> Option<&str> {
    uri.strip_prefix(NOTE_BY_ID_URI_PREFIX)
}

pub fn not_found_text(id: &str) -> String {
    format!("Note with ID {id} not found.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_keeps_surrounding_whitespace() {
        let title = require_title(Some("  Shopping ".to_string())).expect("valid title");
        assert_eq!(title, "  Shopping ");

        let blank = require_id(Some(" ".to_string())).expect("whitespace id is non-empty");
        assert_eq!(blank, " ");
    }

    #[test]
    fn require_text_rejects_empty_and_missing() {
        for value in [None, Some(String::new())] {
            let error = require_content(value).expect_err("expected missing content");
            assert_eq!(error.detail(), "Content is required");
        }
    }

    #[test]
    fn note_id_is_taken_from_uri_suffix() {
        assert_eq!(note_id_from_uri("notes://id/abc-123"), Some("abc-123"));
        assert_eq!(note_id_from_uri("notes://id/"), Some(""));
        assert_eq!(note_id_from_uri("notes://list"), None);
    }
}
