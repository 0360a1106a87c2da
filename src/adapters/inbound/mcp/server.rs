use super::protocol::{
    CallToolParams, CallToolResult, RpcRequest, RpcResponse, INTERNAL_ERROR, INVALID_PARAMS,
    INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION,
};
use super::tools::Tool;
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const SERVER_NAME: &str = "sbom-orchestrator";

/// Executes one tool call and returns the text shown to the client
#[async_trait]
pub trait ToolBackend: Send + Sync {
    async fn call(&self, tool: Tool, arguments: Value) -> Result<String>;
}

/// McpServer - JSON-RPC dispatcher for the tool server
///
/// Requests are handled one at a time in arrival order; a tool call runs to
/// completion before the next line is read.
pub struct McpServer<B> {
    backend: B,
}

impl<B: ToolBackend> McpServer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Serves newline-delimited requests until the reader reaches end of input
    ///
    /// # Errors
    /// Returns an error only when reading or writing the transport fails
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if let Some(response) = self.handle_line(&line).await {
                let mut payload = serde_json::to_string(&response)?;
                payload.push('\n');
                writer.write_all(payload.as_bytes()).await?;
                writer.flush().await?;
            }
        }
        tracing::info!("mcp client closed the connection");
        Ok(())
    }

    /// Handles one input line; `None` for blank lines and notifications
    pub async fn handle_line(&self, line: &str) -> Option<RpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                return Some(RpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ))
            }
        };
        let id = message.get("id").cloned().unwrap_or(Value::Null);
        let request: RpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                return Some(RpcResponse::failure(
                    id,
                    INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                ))
            }
        };

        tracing::debug!(method = %request.method, id = ?request.id, "mcp request");
        if request.is_notification() {
            self.notify(&request);
            return None;
        }
        Some(self.dispatch(request).await)
    }

    fn notify(&self, request: &RpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => tracing::info!("mcp client initialized"),
            other => tracing::debug!(method = other, "ignoring notification"),
        }
    }

    async fn dispatch(&self, request: RpcRequest) -> RpcResponse {
        let id = request.id.unwrap_or(Value::Null);
        match request.method.as_str() {
            "initialize" => RpcResponse::success(id, initialize_result()),
            "ping" => RpcResponse::success(id, json!({})),
            "tools/list" => {
                let tools: Vec<_> = Tool::ALL.iter().map(Tool::definition).collect();
                RpcResponse::success(id, json!({ "tools": tools }))
            }
            "tools/call" => match serde_json::from_value::<CallToolParams>(request.params) {
                Ok(params) => {
                    let result = self.call_tool(params).await;
                    match serde_json::to_value(result) {
                        Ok(value) => RpcResponse::success(id, value),
                        Err(e) => RpcResponse::failure(id, INTERNAL_ERROR, e.to_string()),
                    }
                }
                Err(e) => {
                    RpcResponse::failure(id, INVALID_PARAMS, format!("Invalid params: {}", e))
                }
            },
            other => {
                RpcResponse::failure(id, METHOD_NOT_FOUND, format!("Method not found: {}", other))
            }
        }
    }

    async fn call_tool(&self, params: CallToolParams) -> CallToolResult {
        let Some(tool) = Tool::from_name(&params.name) else {
            return CallToolResult::error(format!("❌ Unknown tool: {}", params.name));
        };
        let arguments = params.arguments.unwrap_or_else(|| json!({}));

        tracing::info!(tool = %tool, "tool call started");
        match self.backend.call(tool, arguments).await {
            Ok(text) => CallToolResult::text(text),
            Err(e) => {
                tracing::warn!(tool = %tool, error = %e, "tool call failed");
                CallToolResult::error(format!("❌ {} failed: {:#}", tool, e))
            }
        }
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}
