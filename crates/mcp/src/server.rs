//! MCP server loop: newline-delimited JSON-RPC 2.0 over stdio.
//!
//! One request, one reply. Malformed lines, unknown methods, and
//! failed tool calls all resolve to normal JSON-RPC replies; the loop
//! only ends when stdin closes.

use crate::dispatch::Dispatcher;
use crate::protocol::{
    CallToolParams, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    ListResourcesResult,
};
use anyhow::Result;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio_stream::StreamExt;
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing::{debug, info, warn};

pub struct McpServer {
    dispatcher: Dispatcher,
}

impl McpServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Serve requests from stdin until it closes.
    pub async fn run(&self) -> Result<()> {
        let mut lines = FramedRead::new(tokio::io::stdin(), LinesCodec::new());
        let mut stdout = tokio::io::stdout();

        info!("serving MCP over stdio");

        while let Some(line) = lines.next().await {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                let mut payload = serde_json::to_string(&response)?;
                payload.push('\n');
                stdout.write_all(payload.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw input line. `None` means no reply is owed
    /// (notifications).
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "unparseable request line");
                return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()));
            }
        };

        if request.is_notification() {
            debug!(method = %request.method, "notification");
            return None;
        }

        Some(self.handle_request(request).await)
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.unwrap_or(Value::Null);
        debug!(method = %request.method, "request");

        match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, InitializeResult::current()),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => JsonRpcResponse::success(id, self.dispatcher.list_tools()),
            "tools/call" => {
                let params: CallToolParams =
                    match serde_json::from_value(request.params.unwrap_or(Value::Null)) {
                        Ok(params) => params,
                        Err(err) => {
                            return JsonRpcResponse::error(
                                id,
                                JsonRpcError::invalid_params(format!(
                                    "Invalid tools/call params: {err}"
                                )),
                            )
                        }
                    };
                let result = self.dispatcher.dispatch(params).await;
                JsonRpcResponse::success(id, result)
            }
            "resources/list" => JsonRpcResponse::success(
                id,
                ListResourcesResult {
                    resources: Vec::new(),
                },
            ),
            other => JsonRpcResponse::error(id, JsonRpcError::method_not_found(other)),
        }
    }
}
