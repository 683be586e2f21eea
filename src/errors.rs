use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {message}")]
    BadRequest {
        code: &'static str,
        message: &'static str,
    },
    #[error("not found: {message}")]
    NotFound {
        code: &'static str,
        message: &'static str,
    },
    #[error("note document i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("note document is not valid json: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("notes api request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("notes api returned {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("internal error: {message}")]
    Internal { code: &'static str, message: String },
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: &'static str) -> Self {
        Self::BadRequest { code, message }
    }

    pub fn not_found(code: &'static str, message: &'static str) -> Self {
        Self::NotFound { code, message }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            code: "internal_error",
            message: message.into(),
        }
    }

    /// Human readable detail without the variant prefix, used for in-band MCP errors.
    pub fn detail(&self) -> String {
        match self {
            Self::BadRequest { message, .. } | Self::NotFound { message, .. } => {
                (*message).to_string()
            }
            Self::Io(err) => err.to_string(),
            Self::Serialization(err) => err.to_string(),
            Self::Http(err) => err.to_string(),
            Self::Upstream { message, .. } | Self::Internal { message, .. } => message.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest { message, .. } => (StatusCode::BAD_REQUEST, message.to_string()),
            Self::NotFound { message, .. } => (StatusCode::NOT_FOUND, message.to_string()),
            Self::Internal { code, message } => {
                tracing::error!(code, error = %message, "request failed with internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            other => {
                tracing::error!(error = %other, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn detail_strips_variant_prefix() {
        let err = AppError::Upstream {
            status: 500,
            message: "Failed to create note".to_string(),
        };

        assert_eq!(err.detail(), "Failed to create note");
        assert!(err.to_string().starts_with("notes api returned 500"));
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn read(path: &std::path::Path) -> Result<Vec<u8>, AppError> {
            Ok(std::fs::read(path)?)
        }

        let dir = tempfile::tempdir().expect("temp dir");
        let err = read(&dir.path().join("missing.json")).expect_err("io error must propagate");
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().starts_with("note document i/o failed"));
    }
}
