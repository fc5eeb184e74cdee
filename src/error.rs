//! Error types for the Airtable MCP Gateway
//!
//! This module defines the error hierarchy for all operations in the gateway,
//! and how each error surfaces as a JSON-RPC error code.

use std::time::Duration;

use thiserror::Error;

/// JSON-RPC code for unknown methods and tools
pub const METHOD_NOT_FOUND: i32 = -32601;

/// JSON-RPC code for every per-request failure that is not a protocol miss
pub const SERVER_ERROR: i32 = -32000;

/// Main error type for the Airtable MCP Gateway
#[derive(Error, Debug)]
pub enum AirtableMcpError {
    /// Airtable API errors
    #[error("{0}")]
    Airtable(#[from] AirtableApiError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// MCP protocol errors
    #[error("{0}")]
    Mcp(#[from] McpError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl AirtableMcpError {
    /// JSON-RPC error code this failure is reported with
    pub fn code(&self) -> i32 {
        match self {
            AirtableMcpError::Mcp(McpError::MethodNotFound { .. })
            | AirtableMcpError::Mcp(McpError::ToolNotFound { .. }) => METHOD_NOT_FOUND,
            _ => SERVER_ERROR,
        }
    }
}

/// Airtable API errors
#[derive(Error, Debug)]
pub enum AirtableApiError {
    #[error("Airtable API request failed: {message}")]
    RequestFailed { message: String },

    #[error("Airtable API request timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("Airtable API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse Airtable response: {message}")]
    InvalidResponse { message: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting: {name}")]
    Missing { name: String },
}

/// MCP protocol errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Method {method} not found")]
    MethodNotFound { method: String },

    #[error("Tool {name} not found")]
    ToolNotFound { name: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Invalid tool parameters: {message}")]
    InvalidParams { message: String },

    #[error("Missing required argument: {name}")]
    MissingArgument { name: String },

    #[error("Invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },
}

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, AirtableMcpError>;
