//! Stdio transport: one JSON-RPC message (or batch) per line.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::{
    errors::AppError,
    mcp::{rpc::json_rpc_error, server::handle_json_rpc_payload},
    AppState,
};

pub async fn serve_stdio(state: AppState) -> Result<(), AppError> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();
    serve_lines(&state, reader, writer).await
}

/// Runs until `reader` reaches EOF. Write failures end the loop with an error.
pub async fn serve_lines<R, W>(state: &AppState, reader: R, mut writer: W) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("mcp stdio transport ready");
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(line) {
            Ok(payload) => handle_json_rpc_payload(state, payload).await,
            Err(err) => {
                debug!(error = %err, "discarding unparseable stdio message");
                Some(json_rpc_error(None, -32700, "Parse error"))
            }
        };

        if let Some(response) = response {
            let mut rendered = serde_json::to_string(&response)?;
            rendered.push('\n');
            writer.write_all(rendered.as_bytes()).await?;
            writer.flush().await?;
        }
    }

    info!("mcp stdio input closed, shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::Value;

    use super::serve_lines;
    use crate::{note_store::JsonFileStore, AppState};

    async fn run(input: &str) -> Vec<Value> {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::new(dir.path().join("notes.json"));
        store.initialize().await.expect("initialize store");
        let state = AppState::new(Arc::new(store));

        let mut output = Vec::new();
        serve_lines(&state, input.as_bytes(), &mut output)
            .await
            .expect("serve lines");

        String::from_utf8(output)
            .expect("utf8 output")
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect()
    }

    #[tokio::test]
    async fn answers_each_request_line() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"add-note","arguments":{"title":"Test Note","content":"Created over stdio"}}}"#,
            "\n",
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"resources/read","params":{"uri":"notes://list"}}"#,
            "\n",
        );

        let responses = run(input).await;

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], 1);
        assert!(responses[0]["result"]["content"][0]["text"]
            .as_str()
            .expect("text")
            .starts_with("Note added successfully"));
        assert_eq!(responses[1]["id"], 2);
        let listed: Value = serde_json::from_str(
            responses[1]["result"]["contents"][0]["text"]
                .as_str()
                .expect("text"),
        )
        .expect("notes json");
        assert_eq!(listed[0]["title"], "Test Note");
    }

    #[tokio::test]
    async fn invalid_json_line_gets_parse_error() {
        let responses = run("{ nope\n").await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["error"]["code"], -32700);
    }
}
