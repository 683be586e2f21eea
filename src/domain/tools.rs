//! Note tools exposed via Model Context Protocol
//!
//! `notes-list`, `note-by-id`, `add-note`, `update-note` and `delete-note` all
//! delegate to the configured `NoteBackend`. Tool failures are reported in-band
//! through `isError` results; only malformed requests become JSON-RPC errors.

use rust_mcp_sdk::{
    macros,
    schema::{CallToolRequestParams, CallToolResult, ContentBlock, TextContent, Tool},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::utils::{
    not_found_text, pretty_json, require_content, require_id, require_title,
};
use crate::mcp::rpc::{json_rpc_error, json_rpc_error_with_data, json_rpc_result};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NoteArguments {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[macros::mcp_tool(name = "notes-list", description = "List all notes")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct NotesListTool {}

#[macros::mcp_tool(name = "note-by-id", description = "Get a specific note by its ID")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct NoteByIdTool {
    /// ID of the note to fetch
    pub id: String,
}

#[macros::mcp_tool(name = "add-note", description = "Add a new note")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct AddNoteTool {
    /// Title of the note
    pub title: String,
    /// Body text of the note
    pub content: String,
}

#[macros::mcp_tool(name = "update-note", description = "Update an existing note")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct UpdateNoteTool {
    /// ID of the note to update
    pub id: String,
    /// New title
    pub title: String,
    /// New body text
    pub content: String,
}

#[macros::mcp_tool(name = "delete-note", description = "Delete a note")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct DeleteNoteTool {
    /// ID of the note to delete
    pub id: String,
}

pub fn build_tools_list() -> Vec<Tool> {
    vec![
        NotesListTool::tool(),
        NoteByIdTool::tool(),
        AddNoteTool::tool(),
        UpdateNoteTool::tool(),
        DeleteNoteTool::tool(),
    ]
}

pub async fn handle_tools_call(
    state: &AppState,
    id: Option<Value>,
    params: Option<Value>,
) -> Value {
    let Some(raw_params) = params else {
        return json_rpc_error(id, -32602, "Invalid params");
    };

    let tool_call: CallToolRequestParams = match serde_json::from_value(raw_params) {
        Ok(value) => value,
        Err(_) => return json_rpc_error(id, -32602, "Invalid params"),
    };

    let arguments: NoteArguments =
        match serde_json::from_value(json!(tool_call.arguments.unwrap_or_default())) {
            Ok(value) => value,
            Err(_) => return json_rpc_error(id, -32602, "Invalid params"),
        };

    let result = match tool_call.name.as_str() {
        "notes-list" => notes_list(state).await,
        "note-by-id" => note_by_id(state, arguments).await,
        "add-note" => add_note(state, arguments).await,
        "update-note" => update_note(state, arguments).await,
        "delete-note" => delete_note(state, arguments).await,
        _ => {
            return json_rpc_error_with_data(
                id,
                -32601,
                "Method not found",
                Some(json!({
                    "code": "tool_not_found",
                    "message": "unknown tool name",
                    "details": {
                        "name": tool_call.name,
                    },
                })),
            )
        }
    };

    json_rpc_result(
        id,
        serde_json::to_value(result).expect("tool result serialization"),
    )
}

pub async fn notes_list(state: &AppState) -> CallToolResult {
    let notes = match state.notes.list_notes().await {
        Ok(notes) => notes,
        Err(err) => return tool_error(format!("Error fetching notes: {}", err.detail())),
    };

    match pretty_json(&notes) {
        Ok(text) => tool_success(text, json!({ "notes": notes })),
        Err(err) => tool_error(format!("Error fetching notes: {}", err.detail())),
    }
}

pub async fn note_by_id(state: &AppState, arguments: NoteArguments) -> CallToolResult {
    let id = match require_id(arguments.id) {
        Ok(id) => id,
        Err(err) => return tool_error(err.detail()),
    };

    match state.notes.get_note(&id).await {
        Ok(Some(note)) => match pretty_json(&note) {
            Ok(text) => tool_success(text, json!({ "note": note })),
            Err(err) => tool_error(format!("Error fetching note: {}", err.detail())),
        },
        Ok(None) => tool_error(not_found_text(&id)),
        Err(err) => tool_error(format!("Error fetching note: {}", err.detail())),
    }
}

pub async fn add_note(state: &AppState, arguments: NoteArguments) -> CallToolResult {
    let (title, content) = match require_title(arguments.title)
        .and_then(|title| Ok((title, require_content(arguments.content)?)))
    {
        Ok(values) => values,
        Err(err) => return tool_error(err.detail()),
    };

    match state.notes.create_note(&title, &content).await {
        Ok(note) => match pretty_json(&note) {
            Ok(text) => tool_success(
                format!("Note added successfully: {text}"),
                json!({ "note": note }),
            ),
            Err(err) => tool_error(format!("Error adding note: {}", err.detail())),
        },
        Err(err) => tool_error(format!("Error adding note: {}", err.detail())),
    }
}

pub async fn update_note(state: &AppState, arguments: NoteArguments) -> CallToolResult {
    let validated = require_id(arguments.id).and_then(|id| {
        let title = require_title(arguments.title)?;
        let content = require_content(arguments.content)?;
        Ok((id, title, content))
    });
    let (id, title, content) = match validated {
        Ok(values) => values,
        Err(err) => return tool_error(err.detail()),
    };

    match state.notes.update_note(&id, &title, &content).await {
        Ok(Some(note)) => match pretty_json(&note) {
            Ok(text) => tool_success(
                format!("Note updated successfully: {text}"),
                json!({ "note": note }),
            ),
            Err(err) => tool_error(format!("Error updating note: {}", err.detail())),
        },
        Ok(None) => tool_error(not_found_text(&id)),
        Err(err) => tool_error(format!("Error updating note: {}", err.detail())),
    }
}

pub async fn delete_note(state: &AppState, arguments: NoteArguments) -> CallToolResult {
    let id = match require_id(arguments.id) {
        Ok(id) => id,
        Err(err) => return tool_error(err.detail()),
    };

    match state.notes.delete_note(&id).await {
        Ok(true) => tool_success(
            format!("Note with ID {id} deleted successfully."),
            json!({ "deleted": true, "id": id }),
        ),
        Ok(false) => tool_error(not_found_text(&id)),
        Err(err) => tool_error(format!("Error deleting note: {}", err.detail())),
    }
}

fn tool_success(text: String, structured_content: Value) -> CallToolResult {
    CallToolResult {
        content: vec![ContentBlock::from(TextContent::new(text, None, None))],
        is_error: None,
        meta: None,
        structured_content: structured_content.as_object().cloned(),
    }
}

fn tool_error(text: String) -> CallToolResult {
    CallToolResult {
        content: vec![ContentBlock::from(TextContent::new(text, None, None))],
        is_error: Some(true),
        meta: None,
        structured_content: None,
    }
}
