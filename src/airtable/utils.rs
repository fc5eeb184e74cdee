//! Airtable utility functions
//!
//! Plain-text rendering of tables and records for tool results.

use serde_json::{Number, Value};

use crate::airtable::types::{Base, Record, Table};

/// Text returned when a base has no tables
pub const NO_TABLES: &str = "No tables found in this base.";

/// Text returned when a table has no records
pub const NO_RECORDS: &str = "No records found in this table.";

/// Text returned when the token sees no bases
pub const NO_BASES: &str = "No bases found accessible with your token.";

/// Render a base listing, numbered from 1 in upstream order
pub fn format_bases(bases: &[Base]) -> String {
    if bases.is_empty() {
        return NO_BASES.to_string();
    }

    let lines: Vec<String> = bases
        .iter()
        .enumerate()
        .map(|(i, base)| format!("{}. {} (ID: {})", i + 1, base.name, base.id))
        .collect();

    format!("Available bases:\n{}", lines.join("\n"))
}

/// Render a table listing, numbered from 1 in upstream order
pub fn format_tables(tables: &[Table]) -> String {
    if tables.is_empty() {
        return NO_TABLES.to_string();
    }

    let lines: Vec<String> = tables
        .iter()
        .enumerate()
        .map(|(i, table)| format!("{}. {} (ID: {})", i + 1, table.name, table.id))
        .collect();

    format!("Tables in this base:\n{}", lines.join("\n"))
}

/// Render a record listing, numbered from 1 in upstream order
pub fn format_records(records: &[Record]) -> String {
    if records.is_empty() {
        return NO_RECORDS.to_string();
    }

    let lines: Vec<String> = records
        .iter()
        .enumerate()
        .map(|(i, record)| format!("{}. ID: {} - {}", i + 1, record.id, format_fields(record)))
        .collect();

    format!("Records:\n{}", lines.join("\n"))
}

/// Render a single record, one field per line
pub fn format_record(record: &Record) -> String {
    if record.fields.is_empty() {
        return format!("Record {} found but contains no fields.", record.id);
    }

    let lines: Vec<String> = record
        .fields
        .iter()
        .map(|(name, value)| format!("{}: {}", name, render_value(value)))
        .collect();

    format!("Record ID: {}\n{}", record.id, lines.join("\n"))
}

/// Render all fields of a record as `name: value` pairs
pub fn format_fields(record: &Record) -> String {
    record
        .fields
        .iter()
        .map(|(name, value)| format!("{}: {}", name, render_value(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a single field value as display text
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => render_number(n),
        // Arrays flatten to comma-separated items, nested ones included
        Value::Array(items) => items.iter().map(render_item).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

/// Null array items render empty
fn render_item(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => render_value(other),
    }
}

/// Integral floats drop their fraction: `3.0` renders as `3`
fn render_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{:.0}", f)
            }
        }
        _ => n.to_string(),
    }
}
