use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

/// On-disk layout of the whole store: `{ "notes": [...] }`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NotesDocument {
    pub notes: Vec<Note>,
}

/// Capability set shared by every adapter. Implemented directly over the JSON
/// document and indirectly over the REST routes.
#[async_trait]
pub trait NoteBackend: Send + Sync {
    async fn list_notes(&self) -> Result<Vec<Note>, AppError>;
    async fn get_note(&self, id: &str) -> Result<Option<Note>, AppError>;
    async fn create_note(&self, title: &str, content: &str) -> Result<Note, AppError>;
    async fn update_note(
        &self,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<Option<Note>, AppError>;
    async fn delete_note(&self, id: &str) -> Result<bool, AppError>;
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the document with an empty collection unless it already exists.
    pub async fn initialize(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
        {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => return Ok(()),
            Err(err) => return Err(err.into()),
        };

        let rendered = serde_json::to_string_pretty(&NotesDocument::default())?;
        file.write_all(rendered.as_bytes()).await?;
        file.flush().await?;
        debug!(path = %self.path.display(), "created empty notes document");
        Ok(())
    }

    /// Every stored note in document order. Read or parse failures yield an
    /// empty list.
    pub async fn list_all(&self) -> Vec<Note> {
        match self.read_document().await {
            Ok(document) => document.notes,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read notes document");
                Vec::new()
            }
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Option<Note> {
        self.list_all().await.into_iter().find(|note| note.id == id)
    }

    pub async fn create(&self, title: &str, content: &str) -> Result<Note, AppError> {
        let mut document = self.load_for_write().await?;

        let now = utc_timestamp();
        let note = Note {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: now.clone(),
            updated_at: now,
        };
        document.notes.push(note.clone());

        self.write_document(&document).await?;
        Ok(note)
    }

    pub async fn update(
        &self,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<Option<Note>, AppError> {
        let mut document = self.load_for_write().await?;

        let Some(note) = document.notes.iter_mut().find(|note| note.id == id) else {
            return Ok(None);
        };
        note.title = title.to_string();
        note.content = content.to_string();
        note.updated_at = utc_timestamp();
        let updated = note.clone();

        self.write_document(&document).await?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut document = self.load_for_write().await?;

        let before = document.notes.len();
        document.notes.retain(|note| note.id != id);
        if document.notes.len() == before {
            return Ok(false);
        }

        self.write_document(&document).await?;
        Ok(true)
    }

    async fn read_document(&self) -> Result<NotesDocument, AppError> {
        let raw = fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    // A missing document counts as empty; a corrupt one must not be overwritten.
    async fn load_for_write(&self) -> Result<NotesDocument, AppError> {
        match self.read_document().await {
            Ok(document) => Ok(document),
            Err(AppError::Io(err)) if err.kind() == ErrorKind::NotFound => {
                Ok(NotesDocument::default())
            }
            Err(err) => Err(err),
        }
    }

    async fn write_document(&self, document: &NotesDocument) -> Result<(), AppError> {
        let rendered = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, rendered).await?;
        Ok(())
    }
}

#[async_trait]
impl NoteBackend for JsonFileStore {
    async fn list_notes(&self) -> Result<Vec<Note>, AppError> {
        Ok(self.list_all().await)
    }

    async fn get_note(&self, id: &str) -> Result<Option<Note>, AppError> {
        Ok(self.get_by_id(id).await)
    }

    async fn create_note(&self, title: &str, content: &str) -> Result<Note, AppError> {
        self.create(title, content).await
    }

    async fn update_note(
        &self,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<Option<Note>, AppError> {
        self.update(id, title, content).await
    }

    async fn delete_note(&self, id: &str) -> Result<bool, AppError> {
        self.delete(id).await
    }
}

pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use tempfile::TempDir;

    use super::*;

    async fn store() -> (TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::new(dir.path().join("data").join("notes.json"));
        store.initialize().await.expect("initialize store");
        (dir, store)
    }

    #[tokio::test]
    async fn initialize_creates_empty_document() {
        let (_dir, store) = store().await;

        let raw = std::fs::read_to_string(store.path()).expect("document exists");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(value, serde_json::json!({ "notes": [] }));
    }

    #[tokio::test]
    async fn initialize_is_idempotent_and_keeps_existing_notes() {
        let (_dir, store) = store().await;
        store.create("Keep", "me").await.expect("create");

        let (first, second) = tokio::join!(store.initialize(), store.initialize());
        first.expect("first initialize");
        second.expect("second initialize");

        assert_eq!(store.list_all().await.len(), 1);
    }

    #[tokio::test]
    async fn create_then_get_returns_same_note() {
        let (_dir, store) = store().await;

        let created = store.create("Shopping", "Milk, eggs").await.expect("create");
        let fetched = store.get_by_id(&created.id).await.expect("note exists");

        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "Shopping");
        assert_eq!(fetched.content, "Milk, eggs");
        assert_eq!(fetched.created_at, fetched.updated_at);
        assert!(fetched.created_at.ends_with('Z'));
    }

    #[tokio::test]
    async fn created_ids_are_unique() {
        let (_dir, store) = store().await;

        let first = store.create("a", "1").await.expect("create");
        let second = store.create("b", "2").await.expect("create");

        assert_ne!(first.id, second.id);
        let ids = store
            .list_all()
            .await
            .into_iter()
            .map(|note| note.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn update_preserves_identity_and_refreshes_timestamp() {
        let (_dir, store) = store().await;
        let created = store.create("Shopping", "Milk, eggs").await.expect("create");

        let updated = store
            .update(&created.id, "Groceries", "Milk, eggs, bread")
            .await
            .expect("update")
            .expect("note exists");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.title, "Groceries");
        assert_eq!(updated.content, "Milk, eggs, bread");

        let created_at = DateTime::parse_from_rfc3339(&updated.created_at).expect("rfc3339");
        let updated_at = DateTime::parse_from_rfc3339(&updated.updated_at).expect("rfc3339");
        assert!(updated_at >= created_at);

        assert_eq!(store.get_by_id(&created.id).await, Some(updated));
    }

    #[tokio::test]
    async fn update_unknown_id_leaves_document_untouched() {
        let (_dir, store) = store().await;
        store.create("Shopping", "Milk").await.expect("create");
        let before = std::fs::read_to_string(store.path()).expect("read");

        let result = store.update("missing", "x", "y").await.expect("update");

        assert!(result.is_none());
        let after = std::fs::read_to_string(store.path()).expect("read");
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_note() {
        let (_dir, store) = store().await;
        let keep = store.create("Keep", "1").await.expect("create");
        let drop = store.create("Drop", "2").await.expect("create");

        assert!(store.delete(&drop.id).await.expect("delete"));

        let notes = store.list_all().await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, keep.id);
        assert!(store.get_by_id(&drop.id).await.is_none());
    }

    #[tokio::test]
    async fn delete_unknown_id_returns_false() {
        let (_dir, store) = store().await;
        store.create("Keep", "1").await.expect("create");

        assert!(!store.delete("missing").await.expect("delete"));
        assert_eq!(store.list_all().await.len(), 1);
    }

    #[tokio::test]
    async fn corrupt_document_reads_as_empty_but_rejects_writes() {
        let (_dir, store) = store().await;
        std::fs::write(store.path(), "{ not json").expect("corrupt document");

        assert!(store.list_all().await.is_empty());
        assert!(store.get_by_id("anything").await.is_none());

        let err = store.create("a", "b").await.expect_err("write must fail");
        assert!(matches!(err, AppError::Serialization(_)));
        let raw = std::fs::read_to_string(store.path()).expect("read");
        assert_eq!(raw, "{ not json");
    }

    #[tokio::test]
    async fn missing_document_lists_empty_and_create_recreates_it() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::new(dir.path().join("notes.json"));

        assert!(store.list_all().await.is_empty());
        let note = store.create("Fresh", "start").await.expect("create");
        assert_eq!(store.list_all().await, vec![note]);
    }

    #[tokio::test]
    async fn document_uses_camel_case_fields() {
        let (_dir, store) = store().await;
        store.create("Shopping", "Milk").await.expect("create");

        let raw = std::fs::read_to_string(store.path()).expect("read");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        let note = &value["notes"][0];
        assert!(note["createdAt"].is_string());
        assert!(note["updatedAt"].is_string());
        assert!(note.get("created_at").is_none());
    }
}
