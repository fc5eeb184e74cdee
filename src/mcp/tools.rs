//! MCP Tool definitions and handlers
//!
//! Defines the read-only Airtable tools and their implementations.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::airtable::client::AirtableClient;
use crate::airtable::types::ListRecordsQuery;
use crate::airtable::utils::{format_bases, format_record, format_records, format_tables};
use crate::config::airtable::DEFAULT_MAX_RECORDS;
use crate::error::{AirtableMcpError, McpError, Result};
use crate::mcp::types::{CallToolResult, Tool};

/// Tool names
pub const LIST_BASES: &str = "list_bases";
pub const LIST_TABLES: &str = "list_tables";
pub const LIST_RECORDS: &str = "list_records";
pub const GET_RECORD: &str = "get_record";

/// Tool handler
pub struct ToolHandler {
    airtable_client: Arc<AirtableClient>,
}

impl ToolHandler {
    /// Create a new tool handler
    pub fn new(airtable_client: Arc<AirtableClient>) -> Self {
        Self { airtable_client }
    }

    /// List all available tools
    pub fn list_tools(&self) -> Vec<Tool> {
        vec![
            tool_def(LIST_BASES, "List all Airtable bases the token can access", no_args_schema()),
            tool_def(LIST_TABLES, "List all tables in the Airtable base", no_args_schema()),
            tool_def(LIST_RECORDS, "List records from a table in the Airtable base", list_records_schema()),
            tool_def(GET_RECORD, "Get a specific record from a table", get_record_schema()),
        ]
    }

    /// Call a tool by name
    pub async fn call_tool(&self, name: &str, args: Value) -> Result<CallToolResult> {
        match name {
            LIST_BASES => self.handle_list_bases().await,
            LIST_TABLES => self.handle_list_tables().await,
            LIST_RECORDS => self.handle_list_records(args).await,
            GET_RECORD => self.handle_get_record(args).await,
            _ => Err(AirtableMcpError::Mcp(McpError::ToolNotFound {
                name: name.to_string(),
            })),
        }
    }

    // ==================== Tool Handlers ====================

    async fn handle_list_bases(&self) -> Result<CallToolResult> {
        let bases = self.airtable_client.list_bases().await?;
        tracing::debug!(count = bases.len(), "listed bases");
        Ok(CallToolResult::text(format_bases(&bases)))
    }

    async fn handle_list_tables(&self) -> Result<CallToolResult> {
        let tables = self.airtable_client.list_tables().await?;
        tracing::debug!(base = %self.airtable_client.base_id(), count = tables.len(), "listed tables");
        Ok(CallToolResult::text(format_tables(&tables)))
    }

    async fn handle_list_records(&self, args: Value) -> Result<CallToolResult> {
        let query = parse_list_records_args(args)?;
        let page = self.airtable_client.list_records(&query).await?;
        tracing::debug!(table = %query.table, count = page.records.len(), "listed records");
        Ok(CallToolResult::text(format_records(&page.records)))
    }

    async fn handle_get_record(&self, args: Value) -> Result<CallToolResult> {
        #[derive(Deserialize)]
        struct Args {
            table_name: Option<String>,
            record_id: Option<String>,
        }

        let args: Args = parse_args(args)?;
        let table = required(args.table_name, "table_name")?;
        let record_id = required(args.record_id, "record_id")?;

        let record = self.airtable_client.get_record(&table, &record_id).await?;
        Ok(CallToolResult::text(format_record(&record)))
    }
}

/// Deserialize tool arguments, treating absent arguments as an empty object
fn parse_args<T: serde::de::DeserializeOwned>(args: Value) -> Result<T> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| {
        AirtableMcpError::Mcp(McpError::InvalidParams {
            message: e.to_string(),
        })
    })
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    value.filter(|v| !v.is_empty()).ok_or_else(|| {
        AirtableMcpError::Mcp(McpError::MissingArgument {
            name: name.to_string(),
        })
    })
}

/// Turn `list_records` arguments into an upstream query
pub fn parse_list_records_args(args: Value) -> Result<ListRecordsQuery> {
    #[derive(Deserialize)]
    struct Args {
        table_name: Option<String>,
        #[serde(default)]
        max_records: Value,
        filter_formula: Option<String>,
    }

    let args: Args = parse_args(args)?;
    let table = required(args.table_name, "table_name")?;

    Ok(ListRecordsQuery {
        table,
        max_records: parse_max_records(&args.max_records)?,
        filter_formula: args.filter_formula.filter(|f| !f.is_empty()),
    })
}

/// Absent, null and zero fall back to the default; other values pass through unclamped
fn parse_max_records(value: &Value) -> Result<u64> {
    let parsed = match value {
        Value::Null => Some(0),
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    match parsed {
        Some(0) => Ok(DEFAULT_MAX_RECORDS),
        Some(n) => Ok(n),
        None => Err(AirtableMcpError::Mcp(McpError::InvalidArgument {
            name: "max_records".to_string(),
            message: format!("expected a non-negative integer, got {}", value),
        })),
    }
}

// ==================== Tool Schemas ====================

fn tool_def(name: &str, description: &str, schema: Value) -> Tool {
    Tool {
        name: name.to_string(),
        description: Some(description.to_string()),
        input_schema: schema,
    }
}

fn no_args_schema() -> Value {
    json!({"type": "object", "properties": {}})
}

fn list_records_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "table_name": {
                "type": "string",
                "description": "Name or ID of the table"
            },
            "max_records": {
                "type": "number",
                "description": "Maximum number of records to return (default: 100)"
            },
            "filter_formula": {
                "type": "string",
                "description": "Airtable formula records must satisfy"
            }
        },
        "required": ["table_name"]
    })
}

fn get_record_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "table_name": {
                "type": "string",
                "description": "Name or ID of the table"
            },
            "record_id": {
                "type": "string",
                "description": "ID of the record to retrieve"
            }
        },
        "required": ["table_name", "record_id"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn handler() -> ToolHandler {
        let config = Config::new("patABCDEFGHIJKLMNOP", "appBase123")
            .unwrap()
            .with_api_base_url("http://127.0.0.1:9/v0");
        ToolHandler::new(Arc::new(AirtableClient::new(&config)))
    }

    #[test]
    fn test_list_tools() {
        let tools = handler().list_tools();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["list_bases", "list_tables", "list_records", "get_record"]);
        assert_eq!(tools[2].input_schema["required"][0], "table_name");
        assert_eq!(tools[3].input_schema["required"], json!(["table_name", "record_id"]));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let err = handler().call_tool("delete_base", json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), "Tool delete_base not found");
        assert_eq!(err.code(), -32601);
    }

    #[test]
    fn test_max_records_default() {
        let query = parse_list_records_args(json!({"table_name": "Tasks"})).unwrap();
        assert_eq!(query.table, "Tasks");
        assert_eq!(query.max_records, 100);
        assert!(query.filter_formula.is_none());

        let query = parse_list_records_args(json!({"table_name": "Tasks", "max_records": 0})).unwrap();
        assert_eq!(query.max_records, 100);
    }

    #[test]
    fn test_max_records_pass_through() {
        let query = parse_list_records_args(json!({"table_name": "Tasks", "max_records": 5})).unwrap();
        assert_eq!(query.max_records, 5);

        let query = parse_list_records_args(json!({"table_name": "Tasks", "max_records": "250"})).unwrap();
        assert_eq!(query.max_records, 250);

        let query = parse_list_records_args(json!({"table_name": "Tasks", "max_records": 7.0})).unwrap();
        assert_eq!(query.max_records, 7);
    }

    #[test]
    fn test_max_records_rejects_garbage() {
        let err = parse_list_records_args(json!({"table_name": "Tasks", "max_records": "lots"})).unwrap_err();
        assert!(err.to_string().contains("max_records"));
        assert_eq!(err.code(), -32000);

        assert!(parse_list_records_args(json!({"table_name": "Tasks", "max_records": -3})).is_err());
    }

    #[tokio::test]
    async fn test_get_record_requires_record_id() {
        let err = handler()
            .call_tool("get_record", json!({"table_name": "Tasks"}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing required argument: record_id");
        assert_eq!(err.code(), -32000);
    }

    #[test]
    fn test_missing_table_name() {
        let err = parse_list_records_args(Value::Null).unwrap_err();
        assert_eq!(err.to_string(), "Missing required argument: table_name");
    }

    #[test]
    fn test_filter_formula() {
        let query = parse_list_records_args(json!({
            "table_name": "Tasks",
            "filter_formula": "{Status} = 'Active'"
        }))
        .unwrap();
        assert_eq!(query.filter_formula.as_deref(), Some("{Status} = 'Active'"));
    }
}
