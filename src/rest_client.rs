//! Typed HTTP client for the notes REST routes.
//!
//! Lets the MCP adapter run against a separately deployed `notepad-mcp` server
//! instead of opening the note document itself.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    errors::AppError,
    note_store::{Note, NoteBackend},
};

pub struct RestNoteClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct NoteBody<'a> {
    title: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl RestNoteClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `None` for `.` and `..`: URL normalization removes dot segments in every
    /// spelling (`%2e` included), so no `/notes/{id}` route can address them.
    fn note_url(&self, id: &str) -> Result<Option<reqwest::Url>, AppError> {
        if id == "." || id == ".." {
            return Ok(None);
        }

        let mut url = reqwest::Url::parse(&format!("{}/notes", self.base_url))
            .map_err(|err| AppError::internal(format!("invalid notes api url: {err}")))?;
        url.path_segments_mut()
            .map_err(|_| AppError::internal("notes api url cannot be a base"))?
            .push(id);
        Ok(Some(url))
    }
}

async fn upstream_error(response: Response) -> AppError {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_else(|| "Unknown error".to_string());
    AppError::Upstream { status, message }
}

#[async_trait]
impl NoteBackend for RestNoteClient {
    async fn list_notes(&self) -> Result<Vec<Note>, AppError> {
        let response = self
            .client
            .get(format!("{}/notes", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        Ok(response.json().await?)
    }

    async fn get_note(&self, id: &str) -> Result<Option<Note>, AppError> {
        let Some(url) = self.note_url(id)? else {
            return Ok(None);
        };
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            _ => Err(upstream_error(response).await),
        }
    }

    async fn create_note(&self, title: &str, content: &str) -> Result<Note, AppError> {
        let response = self
            .client
            .post(format!("{}/notes", self.base_url))
            .json(&NoteBody { title, content })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        Ok(response.json().await?)
    }

    async fn update_note(
        &self,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<Option<Note>, AppError> {
        let Some(url) = self.note_url(id)? else {
            return Ok(None);
        };
        let response = self
            .client
            .put(url)
            .json(&NoteBody { title, content })
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            _ => Err(upstream_error(response).await),
        }
    }

    async fn delete_note(&self, id: &str) -> Result<bool, AppError> {
        let Some(url) = self.note_url(id)? else {
            return Ok(false);
        };
        let response = self.client.delete(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            _ => Err(upstream_error(response).await),
        }
    }
}
