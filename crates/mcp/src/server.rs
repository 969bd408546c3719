//! MCP server implementation.
//!
//! Wraps a [`ToolRegistry`] and exposes its tools over the MCP protocol.
//! [`McpServer::handle_message`] turns one raw JSON-RPC line into at most one
//! response; the stdio loop and the HTTP endpoint both go through it.

use std::sync::Arc;

use serde_json::Value;

use artpark_tool_runtime::{ToolContext, ToolError, ToolRegistry};

use crate::error::McpError;
use crate::transport::McpTransport;
use crate::types::*;

/// MCP server that bridges a `ToolRegistry` to MCP clients.
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    context: ToolContext,
    server_name: String,
    server_version: String,
    instructions: Option<String>,
}

impl McpServer {
    /// Create a new MCP server wrapping the given tool registry.
    pub fn new(registry: impl Into<Arc<ToolRegistry>>) -> Self {
        Self {
            registry: registry.into(),
            context: ToolContext::default(),
            server_name: "artpark".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: None,
        }
    }

    /// Set the server name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    /// Set the usage guidance returned from `initialize`.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Set the context handed to every tool call.
    pub fn with_context(mut self, context: ToolContext) -> Self {
        self.context = context;
        self
    }

    pub fn name(&self) -> &str {
        &self.server_name
    }

    pub fn tool_count(&self) -> usize {
        self.registry.len()
    }

    /// Run the server loop, reading from and writing to the transport.
    ///
    /// Processes messages until the transport is closed.
    pub async fn run<T: McpTransport>(&self, transport: &mut T) -> Result<(), McpError> {
        tracing::info!(server = %self.server_name, tools = self.tool_count(), "MCP server starting");

        while let Some(line) = transport.receive().await? {
            tracing::debug!(message = %line, "Received message");
            if let Some(response) = self.handle_message(&line).await {
                let json = serde_json::to_string(&response)?;
                tracing::debug!(response = %json, "Sending response");
                transport.send(&json).await?;
            }
        }

        tracing::info!("Transport closed, shutting down");
        Ok(())
    }

    /// Handle one raw message. Notifications produce no response.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let raw: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse JSON");
                return Some(rpc_error(RpcId::Null, McpError::JsonParse(e)));
            }
        };

        if raw.get("id").is_none() {
            match serde_json::from_value::<JsonRpcNotification>(raw) {
                Ok(notif) => self.handle_notification(&notif),
                Err(e) => tracing::debug!(error = %e, "Ignoring malformed notification"),
            }
            return None;
        }

        let id = raw
            .get("id")
            .and_then(|v| serde_json::from_value::<RpcId>(v.clone()).ok())
            .unwrap_or(RpcId::Null);
        match serde_json::from_value::<JsonRpcRequest>(raw) {
            Ok(request) => Some(self.handle_request(&request).await),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse JSON-RPC request");
                Some(rpc_error(id, McpError::InvalidRequest(e.to_string())))
            }
        }
    }

    /// Handle a single JSON-RPC request and produce a response.
    pub async fn handle_request(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params.as_ref()),
            "ping" => JsonRpcResponse::success(id, Value::Object(Default::default())),
            "tools/list" => self.handle_list_tools(id),
            "tools/call" => self.handle_call_tool(id, request.params.as_ref()).await,
            method => {
                tracing::warn!(method = %method, "Unknown method");
                rpc_error(id, McpError::MethodNotFound(method.to_string()))
            }
        }
    }

    fn handle_notification(&self, notif: &JsonRpcNotification) {
        match notif.method.as_str() {
            "notifications/initialized" => {
                tracing::info!("Client confirmed initialization");
            }
            "notifications/cancelled" => {
                tracing::debug!("Client cancelled a request");
            }
            method => {
                tracing::debug!(method = %method, "Unknown notification, ignoring");
            }
        }
    }

    fn handle_initialize(&self, id: RpcId, params: Option<&Value>) -> JsonRpcResponse {
        let params = match params.map(|p| serde_json::from_value::<InitializeParams>(p.clone())) {
            None => None,
            Some(Ok(params)) => Some(params),
            Some(Err(e)) => return rpc_error(id, McpError::InvalidParams(e.to_string())),
        };
        let requested = params.as_ref().map(|p| p.protocol_version.as_str());
        let version = negotiate_version(requested);
        tracing::info!(
            client = params.as_ref().and_then(|p| p.client_info.as_ref()).map(|c| c.name.as_str()),
            requested = ?requested,
            negotiated = version,
            "Handling initialize"
        );

        let result = InitializeResult {
            protocol_version: version.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: self.server_name.clone(),
                version: Some(self.server_version.clone()),
            },
            instructions: self.instructions.clone(),
        };
        to_response(id, &result)
    }

    fn handle_list_tools(&self, id: RpcId) -> JsonRpcResponse {
        tracing::debug!("Handling tools/list");

        let tools: Vec<ToolInfo> = self.registry.list().into_iter().map(ToolInfo::from).collect();
        to_response(id, &ListToolsResult { tools })
    }

    async fn handle_call_tool(&self, id: RpcId, params: Option<&Value>) -> JsonRpcResponse {
        let Some(params) = params else {
            return rpc_error(id, McpError::InvalidParams("missing params".to_string()));
        };

        let call_params: CallToolParams = match serde_json::from_value(params.clone()) {
            Ok(p) => p,
            Err(e) => return rpc_error(id, McpError::InvalidParams(e.to_string())),
        };
        let arguments = match call_params.arguments {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        tracing::debug!(tool = %call_params.name, "Handling tools/call");

        let result = match self
            .registry
            .call(&call_params.name, arguments, &self.context)
            .await
        {
            Ok(tool_result) => CallToolResult::from(tool_result),
            Err(ToolError::UnknownTool(name)) => {
                return rpc_error(id, McpError::ToolNotFound(name));
            }
            Err(e) => {
                tracing::warn!(tool = %call_params.name, error = %e, "Tool call failed");
                CallToolResult::error_text(e.to_string())
            }
        };
        to_response(id, &result)
    }
}

fn rpc_error(id: RpcId, err: McpError) -> JsonRpcResponse {
    let rpc = err.to_rpc_error();
    JsonRpcResponse::error(id, rpc.code, rpc.message)
}

fn to_response<T: serde::Serialize>(id: RpcId, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(val) => JsonRpcResponse::success(id, val),
        Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
    }
}
