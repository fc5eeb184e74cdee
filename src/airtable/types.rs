//! Airtable API type definitions
//!
//! These types mirror the Airtable API responses the gateway reads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A base the token can read
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Base {
    /// Base ID
    pub id: String,

    /// Base name
    pub name: String,

    /// Access level granted to the token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_level: Option<String>,
}

/// Response of the base listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BaseList {
    /// Bases visible to the token
    #[serde(default)]
    pub bases: Vec<Base>,
}

/// A table in an Airtable base
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Table ID
    pub id: String,

    /// Table name
    pub name: String,
}

/// Response of the base schema endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TableList {
    /// Tables in the base
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// A row within an Airtable table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Record ID
    pub id: String,

    /// Field name to value, in upstream order
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// One page of records
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RecordList {
    /// Records on this page
    #[serde(default)]
    pub records: Vec<Record>,

    /// Cursor for the next page (never followed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}

/// Query for a single page of records
#[derive(Debug, Clone)]
pub struct ListRecordsQuery {
    /// Table name or ID
    pub table: String,

    /// Upstream `maxRecords`
    pub max_records: u64,

    /// Upstream `filterByFormula`
    pub filter_formula: Option<String>,
}
