//! Read-only note resources
//!
//! `notes://list` returns the whole collection; `notes://id/{id}` addresses a
//! single note and is advertised as a resource template.

use rust_mcp_sdk::schema::{
    ReadResourceContent, ReadResourceRequestParams, ReadResourceResult, Resource,
    TextResourceContents,
};
use serde_json::{json, Value};

use crate::domain::utils::{
    not_found_text, note_id_from_uri, pretty_json, NOTES_LIST_URI, NOTE_BY_ID_URI_TEMPLATE,
};
use crate::mcp::rpc::{
    app_error_to_json_rpc, json_rpc_error, json_rpc_error_with_data, json_rpc_result,
};
use crate::AppState;

pub fn build_resources_list() -> Vec<Resource> {
    vec![Resource {
        annotations: None,
        description: Some("All stored notes".to_string()),
        icons: vec![],
        meta: None,
        mime_type: Some("application/json".to_string()),
        name: "notes-list".to_string(),
        size: None,
        title: None,
        uri: NOTES_LIST_URI.to_string(),
    }]
}

pub fn build_resource_templates_list() -> Value {
    json!([
        {
            "uriTemplate": NOTE_BY_ID_URI_TEMPLATE,
            "name": "note-by-id",
            "description": "A single note addressed by its ID",
            "mimeType": "application/json"
        }
    ])
}

pub async fn handle_resources_read(
    state: &AppState,
    id: Option<Value>,
    params: Option<Value>,
) -> Value {
    let Some(raw_params) = params else {
        return json_rpc_error(id, -32602, "Invalid params");
    };

    let resource_read: ReadResourceRequestParams = match serde_json::from_value(raw_params) {
        Ok(value) => value,
        Err(_) => return json_rpc_error(id, -32602, "Invalid params"),
    };
    let uri = resource_read.uri;

    if uri == NOTES_LIST_URI {
        let rendered = match state.notes.list_notes().await {
            Ok(notes) => pretty_json(&notes),
            Err(err) => Err(err),
        };
        return match rendered {
            Ok(text) => json_rpc_result(id, text_contents(&uri, text)),
            Err(err) => app_error_to_json_rpc(id, err),
        };
    }

    let Some(note_id) = note_id_from_uri(&uri) else {
        return json_rpc_error_with_data(
            id,
            -32601,
            "Method not found",
            Some(json!({
                "code": "resource_not_found",
                "message": "unknown resource uri",
                "details": {
                    "uri": uri,
                },
            })),
        );
    };

    if note_id.is_empty() {
        return json_rpc_error(id, -32602, "Invalid params");
    }

    match state.notes.get_note(note_id).await {
        Ok(Some(note)) => match pretty_json(&note) {
            Ok(text) => json_rpc_result(id, text_contents(&uri, text)),
            Err(err) => app_error_to_json_rpc(id, err),
        },
        Ok(None) => json_rpc_error_with_data(
            id,
            -32601,
            "Method not found",
            Some(json!({
                "code": "note_not_found",
                "message": not_found_text(note_id),
                "details": {
                    "uri": uri,
                },
            })),
        ),
        Err(err) => app_error_to_json_rpc(id, err),
    }
}

fn text_contents(uri: &str, text: String) -> Value {
    serde_json::to_value(ReadResourceResult {
        contents: vec![ReadResourceContent::from(TextResourceContents {
            meta: None,
            mime_type: Some("application/json".to_string()),
            text,
            uri: uri.to_string(),
        })],
        meta: None,
    })
    .expect("read note resource result serialization")
}
