//! MCP (Model Context Protocol) module
//!
//! Implements the JSON-RPC dispatch and its HTTP transport.

pub mod http;
pub mod server;
pub mod tools;
pub mod types;
