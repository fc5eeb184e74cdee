//! Airtable MCP Gateway Library
//!
//! A local HTTP gateway exposing a small Model Context Protocol (MCP) surface
//! over the Airtable REST API: list the tables of a base and the records of a table.

pub mod airtable;
pub mod config;
pub mod error;
pub mod mcp;

pub use config::Config;
pub use error::{AirtableMcpError, Result};
pub use mcp::http::router;
pub use mcp::server::Gateway;
