//! MCP Gateway implementation
//!
//! Dispatches one JSON-RPC envelope per call. Every failure is folded into a
//! JSON-RPC error response; nothing here escapes as a Rust error.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::airtable::client::AirtableClient;
use crate::config::Config;
use crate::error::{AirtableMcpError, McpError, Result};
use crate::mcp::tools::ToolHandler;
use crate::mcp::types::*;

/// MCP Server info
const SERVER_NAME: &str = "airtable";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gateway translating MCP calls into Airtable reads
pub struct Gateway {
    /// Tool handler
    tool_handler: ToolHandler,
}

impl Gateway {
    /// Create a new gateway from the startup configuration
    pub fn new(config: &Config) -> Self {
        let airtable_client = Arc::new(AirtableClient::new(config));
        Self {
            tool_handler: ToolHandler::new(airtable_client),
        }
    }

    /// Handle a raw request body
    pub async fn handle(&self, body: &[u8]) -> JsonRpcResponse {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "malformed request body");
                return error_response(None, &AirtableMcpError::Json(e));
            }
        };

        let id = RequestId::from_envelope(&value);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                let err = AirtableMcpError::Mcp(McpError::InvalidRequest {
                    message: e.to_string(),
                });
                return error_response(id, &err);
            }
        };

        self.handle_request(request).await
    }

    /// Answer a body that could not be read off the wire
    pub fn reject_body(&self, reason: &str) -> JsonRpcResponse {
        tracing::warn!(reason = %reason, "unreadable request body");
        let err = AirtableMcpError::Mcp(McpError::InvalidRequest {
            message: reason.to_string(),
        });
        error_response(None, &err)
    }

    /// Handle an already parsed request
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        tracing::debug!(method = %request.method, "dispatching request");

        match self.dispatch(&request).await {
            Ok(result) => JsonRpcResponse::success(request.id, result),
            Err(e) => {
                if e.code() == crate::error::SERVER_ERROR {
                    tracing::warn!(method = %request.method, error = %e, "request failed");
                }
                error_response(request.id, &e)
            }
        }
    }

    async fn dispatch(&self, request: &JsonRpcRequest) -> Result<Value> {
        match request.method.as_str() {
            methods::INITIALIZE => self.handle_initialize(),
            methods::PING => Ok(json!({})),
            methods::LIST_RESOURCES => self.handle_list_resources(),
            methods::LIST_PROMPTS => self.handle_list_prompts(),
            methods::LIST_TOOLS => self.handle_list_tools(),
            methods::CALL_TOOL => self.handle_call_tool(request).await,
            _ => Err(AirtableMcpError::Mcp(McpError::MethodNotFound {
                method: request.method.clone(),
            })),
        }
    }

    /// Handle initialize request
    fn handle_initialize(&self) -> Result<Value> {
        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {}),
                resources: Some(ResourcesCapability::default()),
                prompts: Some(PromptsCapability::default()),
            },
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Handle list resources request
    fn handle_list_resources(&self) -> Result<Value> {
        let result = ListResourcesResult {
            resources: vec![Resource {
                id: "airtable_tables".to_string(),
                name: "Airtable Tables".to_string(),
                description: "Tables in your Airtable base".to_string(),
            }],
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Handle list prompts request
    fn handle_list_prompts(&self) -> Result<Value> {
        let result = ListPromptsResult {
            prompts: vec![Prompt {
                id: "tables_prompt".to_string(),
                name: "List Tables".to_string(),
                description: "List all tables".to_string(),
            }],
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Handle list tools request
    fn handle_list_tools(&self) -> Result<Value> {
        let result = ListToolsResult {
            tools: self.tool_handler.list_tools(),
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Handle call tool request
    async fn handle_call_tool(&self, request: &JsonRpcRequest) -> Result<Value> {
        let params = request.params.clone().ok_or_else(|| {
            AirtableMcpError::Mcp(McpError::InvalidParams {
                message: "missing params".to_string(),
            })
        })?;
        let params: CallToolParams = serde_json::from_value(params).map_err(|e| {
            AirtableMcpError::Mcp(McpError::InvalidParams {
                message: e.to_string(),
            })
        })?;

        let result = self.tool_handler.call_tool(&params.name, params.arguments).await?;
        Ok(serde_json::to_value(result)?)
    }
}

fn error_response(id: Option<RequestId>, err: &AirtableMcpError) -> JsonRpcResponse {
    JsonRpcResponse::error(id, JsonRpcError::from(err))
}
