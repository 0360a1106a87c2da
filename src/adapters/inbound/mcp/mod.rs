/// MCP tool server over stdio
///
/// Speaks newline-delimited JSON-RPC 2.0: one request per input line, one
/// response per output line. Each pipeline step is published as a tool so
/// an assistant can run clone, detect, SBOM, components, frameworks and
/// dependency trees one at a time.
mod pipeline_tools;
mod protocol;
mod server;
mod tools;

pub use pipeline_tools::{PipelineTools, ReportOpener, ToolDefaults};
pub use protocol::{
    CallToolResult, RpcError, RpcRequest, RpcResponse, TextContent, ToolDefinition,
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
    PROTOCOL_VERSION,
};
pub use server::{McpServer, ToolBackend, SERVER_NAME};
pub use tools::Tool;
