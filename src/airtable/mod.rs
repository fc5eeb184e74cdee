//! Airtable API module
//!
//! Contains types, the read-only client, and text rendering for the Airtable API.

pub mod client;
pub mod types;
pub mod utils;
