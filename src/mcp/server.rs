//! The central Model Context Protocol engine
//!
//! Decodes JSON-RPC payloads (single messages and batches), negotiates the protocol
//! version on `initialize`, and routes tool and resource calls to the note domain.
//! Transports (HTTP `/mcp` and stdio) only move bytes in and out of this module.

use rust_mcp_sdk::schema::{
    CallToolRequest, Implementation, InitializeRequest, InitializeResult, JsonrpcMessage,
    JsonrpcRequest, ListResourcesRequest, ListResourcesResult, ListToolsRequest, ListToolsResult,
    PingRequest, ProtocolVersion, ReadResourceRequest, ServerCapabilities,
    ServerCapabilitiesResources, ServerCapabilitiesTools,
};
use serde_json::{json, Value};
use tracing::info;

use crate::domain::{
    resources::{build_resource_templates_list, build_resources_list, handle_resources_read},
    tools::{build_tools_list, handle_tools_call},
};
use crate::mcp::rpc::{
    app_error_to_json_rpc, is_json_rpc_error, json_rpc_error, json_rpc_result, request_id_to_value,
};
use crate::{errors::AppError, AppState};

/// Newest first; the first entry is offered when the client asks for an unknown version.
pub const SUPPORTED_PROTOCOL_VERSIONS: [&str; 3] = ["2025-06-18", "2025-03-26", "2024-11-05"];

const SERVER_INSTRUCTIONS: &str =
    "Notepad: create, read, update and delete short text notes. Note IDs are returned by add-note and notes-list.";

/// Handles a decoded JSON payload, which may be a single message or a batch.
/// Returns `None` when nothing should be sent back (notifications only).
pub async fn handle_json_rpc_payload(state: &AppState, payload: Value) -> Option<Value> {
    let Some(batch) = payload.as_array() else {
        return handle_json_rpc_value(state, payload).await;
    };

    if batch.is_empty() {
        return Some(Value::Array(vec![json_rpc_error(
            None,
            -32600,
            "Invalid Request",
        )]));
    }

    let mut responses = Vec::new();
    for item in batch {
        if let Some(response) = handle_json_rpc_value(state, item.clone()).await {
            responses.push(response);
        }
    }

    if responses.is_empty() {
        None
    } else {
        Some(Value::Array(responses))
    }
}

pub async fn handle_json_rpc_value(state: &AppState, payload: Value) -> Option<Value> {
    if !payload.is_object() {
        return Some(json_rpc_error(None, -32600, "Invalid Request"));
    }

    let request_id = payload.get("id").cloned();
    let parsed: JsonrpcMessage = match serde_json::from_value(payload) {
        Ok(message) => message,
        Err(_) => return Some(json_rpc_error(request_id, -32600, "Invalid Request")),
    };

    match parsed {
        JsonrpcMessage::Request(request) => {
            if let Err(error_response) = validate_request_shape(&request) {
                return Some(error_response);
            }

            let request_id = request_id_to_value(request.id);
            if request.method.trim().is_empty() {
                return Some(json_rpc_error(Some(request_id), -32600, "Invalid Request"));
            }

            Some(
                handle_json_rpc_request(
                    state,
                    Some(request_id),
                    request.method,
                    request.params.map(Value::Object),
                )
                .await,
            )
        }
        JsonrpcMessage::Notification(notification) => {
            if notification.method.trim().is_empty() {
                return None;
            }

            let _ = handle_json_rpc_request(
                state,
                None,
                notification.method,
                notification.params.map(Value::Object),
            )
            .await;
            None
        }
        JsonrpcMessage::ResultResponse(_) | JsonrpcMessage::ErrorResponse(_) => {
            Some(json_rpc_error(request_id, -32600, "Invalid Request"))
        }
    }
}

pub fn validate_request_shape(request: &JsonrpcRequest) -> Result<(), Value> {
    let request_id = Some(request_id_to_value(request.id.clone()));
    let Ok(payload) = serde_json::to_value(request) else {
        return Err(json_rpc_error(request_id, -32600, "Invalid Request"));
    };

    let valid = match request.method.as_str() {
        "tools/call" => serde_json::from_value::<CallToolRequest>(payload).is_ok(),
        "resources/read" => serde_json::from_value::<ReadResourceRequest>(payload).is_ok(),
        "tools/list" => serde_json::from_value::<ListToolsRequest>(payload).is_ok(),
        "resources/list" => serde_json::from_value::<ListResourcesRequest>(payload).is_ok(),
        "ping" => serde_json::from_value::<PingRequest>(payload).is_ok(),
        "initialize" => serde_json::from_value::<InitializeRequest>(payload).is_ok(),
        _ => true,
    };

    if valid {
        Ok(())
    } else {
        Err(json_rpc_error(request_id, -32602, "Invalid params"))
    }
}

pub async fn handle_json_rpc_request(
    state: &AppState,
    id: Option<Value>,
    method: String,
    params: Option<Value>,
) -> Value {
    let audit_target = audit_target(params.as_ref());

    let response = match method.as_str() {
        "initialize" => match negotiate_protocol_version(params.as_ref()) {
            Ok(version) => json_rpc_result(id, initialize_result(version)),
            Err(err) => app_error_to_json_rpc(id, err),
        },
        "ping" => json_rpc_result(id, json!({})),
        "tools/list" => json_rpc_result(
            id,
            serde_json::to_value(ListToolsResult {
                meta: None,
                next_cursor: None,
                tools: build_tools_list(),
            })
            .expect("tools list result serialization"),
        ),
        "tools/call" => handle_tools_call(state, id, params).await,
        "resources/list" => json_rpc_result(
            id,
            serde_json::to_value(ListResourcesResult {
                meta: None,
                next_cursor: None,
                resources: build_resources_list(),
            })
            .expect("resources list result serialization"),
        ),
        "resources/templates/list" => json_rpc_result(
            id,
            json!({ "resourceTemplates": build_resource_templates_list() }),
        ),
        "resources/read" => handle_resources_read(state, id, params).await,
        notification if notification.starts_with("notifications/") => {
            json_rpc_result(id, json!({}))
        }
        _ => json_rpc_error(id, -32601, "Method not found"),
    };

    info!(
        method = %method,
        target = %audit_target,
        outcome = if is_json_rpc_error(&response) { "failure" } else { "success" },
        "mcp action audited"
    );

    response
}

fn initialize_result(protocol_version: &'static str) -> Value {
    let initialize_result = InitializeResult {
        server_info: Implementation {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            title: Some("Notepad".to_string()),
            description: None,
            icons: vec![],
            website_url: None,
        },
        capabilities: ServerCapabilities {
            tools: Some(ServerCapabilitiesTools {
                list_changed: Some(false),
            }),
            resources: Some(ServerCapabilitiesResources {
                subscribe: Some(false),
                list_changed: Some(false),
            }),
            prompts: None,
            ..Default::default()
        },
        protocol_version: ProtocolVersion::V2024_11_05.into(),
        instructions: Some(SERVER_INSTRUCTIONS.to_string()),
        meta: None,
    };

    let mut result =
        serde_json::to_value(initialize_result).expect("initialize result serialization");
    result["protocolVersion"] = Value::String(protocol_version.to_string());
    result
}

/// Picks the version to answer `initialize` with: the client's offer when it is
/// supported, otherwise the newest supported version.
pub fn negotiate_protocol_version(params: Option<&Value>) -> Result<&'static str, AppError> {
    let offered_version = params
        .and_then(Value::as_object)
        .and_then(|object| object.get("protocolVersion"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|version| !version.is_empty())
        .ok_or_else(|| {
            AppError::bad_request(
                "invalid_protocol_version",
                "initialize params.protocolVersion is required",
            )
        })?;

    Ok(SUPPORTED_PROTOCOL_VERSIONS
        .iter()
        .copied()
        .find(|supported| *supported == offered_version)
        .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0]))
}

/// Tool name or resource URI of a call. Arguments are left out of the audit
/// trail since they carry note text.
pub fn audit_target(params: Option<&Value>) -> String {
    let Some(object) = params.and_then(Value::as_object) else {
        return String::new();
    };

    ["name", "uri"]
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{audit_target, negotiate_protocol_version, SUPPORTED_PROTOCOL_VERSIONS};
    use serde_json::json;

    #[test]
    fn audit_target_omits_note_text() {
        let params = json!({
            "name": "add-note",
            "arguments": {
                "title": "Private",
                "content": "should-not-appear"
            }
        });

        assert_eq!(audit_target(Some(&params)), "add-note");
        assert_eq!(
            audit_target(Some(&json!({"uri": "notes://list"}))),
            "notes://list"
        );
        assert_eq!(audit_target(None), "");
    }

    #[test]
    fn negotiate_protocol_version_accepts_supported_version() {
        let params = json!({
            "protocolVersion": "2024-11-05"
        });

        let version = negotiate_protocol_version(Some(&params)).expect("supported version");
        assert_eq!(version, "2024-11-05");
    }

    #[test]
    fn negotiate_protocol_version_falls_back_to_latest() {
        let params = json!({
            "protocolVersion": "2031-01-01"
        });

        let version = negotiate_protocol_version(Some(&params)).expect("fallback version");
        assert_eq!(version, SUPPORTED_PROTOCOL_VERSIONS[0]);
    }

    #[test]
    fn negotiate_protocol_version_requires_a_version() {
        let error = negotiate_protocol_version(Some(&json!({}))).expect_err("missing version");
        assert!(error.to_string().contains("bad request"));
    }
}
