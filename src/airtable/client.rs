//! Airtable API client
//!
//! Read-only client issuing at most one GET per gateway request.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::airtable::types::{
    Base, BaseList, ListRecordsQuery, Record, RecordList, Table, TableList,
};
use crate::config::Config;
use crate::error::{AirtableApiError, AirtableMcpError, Result};

/// Airtable API client
pub struct AirtableClient {
    /// HTTP client
    http_client: reqwest::Client,

    /// Personal access token
    api_token: String,

    /// Base all requests are scoped to
    base_id: String,

    /// API root, without trailing slash
    api_base_url: String,

    /// Bound on each call
    timeout: Duration,
}

impl AirtableClient {
    /// Create a new Airtable client from the startup configuration
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_token: config.api_token.clone(),
            base_id: config.base_id.clone(),
            api_base_url: config.api_base_url.clone(),
            timeout: config.upstream_timeout,
        }
    }

    /// Base this client reads from
    pub fn base_id(&self) -> &str {
        &self.base_id
    }

    /// URL of the base listing endpoint
    fn bases_url(&self) -> String {
        format!("{}/meta/bases", self.api_base_url)
    }

    /// URL of the base schema endpoint
    fn tables_url(&self) -> String {
        format!("{}/meta/bases/{}/tables", self.api_base_url, self.base_id)
    }

    /// URL of a table's records endpoint
    fn records_url(&self, table: &str) -> String {
        format!(
            "{}/{}/{}",
            self.api_base_url,
            self.base_id,
            urlencoding::encode(table)
        )
    }

    /// URL of a single record
    fn record_url(&self, table: &str, record_id: &str) -> String {
        format!(
            "{}/{}",
            self.records_url(table),
            urlencoding::encode(record_id)
        )
    }

    // ==================== Read Operations ====================

    /// List the bases the token can read
    pub async fn list_bases(&self) -> Result<Vec<Base>> {
        let list: BaseList = self.get(self.bases_url(), &[]).await?;
        Ok(list.bases)
    }

    /// List the tables of the configured base
    pub async fn list_tables(&self) -> Result<Vec<Table>> {
        let list: TableList = self.get(self.tables_url(), &[]).await?;
        Ok(list.tables)
    }

    /// Fetch a single page of records from a table
    pub async fn list_records(&self, query: &ListRecordsQuery) -> Result<RecordList> {
        let mut params = vec![("maxRecords", query.max_records.to_string())];
        if let Some(formula) = &query.filter_formula {
            params.push(("filterByFormula", formula.clone()));
        }

        self.get(self.records_url(&query.table), &params).await
    }

    /// Fetch one record by ID
    pub async fn get_record(&self, table: &str, record_id: &str) -> Result<Record> {
        self.get(self.record_url(table, record_id), &[]).await
    }

    /// Issue a GET bounded by the configured timeout
    async fn get<T: DeserializeOwned>(&self, url: String, params: &[(&str, String)]) -> Result<T> {
        tracing::debug!(url = %url, "calling Airtable API");

        match tokio::time::timeout(self.timeout, self.fetch(&url, params)).await {
            Ok(result) => result,
            Err(_) => Err(AirtableMcpError::Airtable(AirtableApiError::Timeout {
                after: self.timeout,
            })),
        }
    }

    /// Issue a GET and decode the JSON body
    async fn fetch<T: DeserializeOwned>(&self, url: &str, params: &[(&str, String)]) -> Result<T> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.api_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .query(params)
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        let text = response.text().await.map_err(request_failed)?;

        if !status.is_success() {
            return Err(AirtableMcpError::Airtable(AirtableApiError::Status {
                status: status.as_u16(),
                body: text,
            }));
        }

        serde_json::from_str(&text).map_err(|e| {
            AirtableMcpError::Airtable(AirtableApiError::InvalidResponse {
                message: e.to_string(),
            })
        })
    }
}

fn request_failed(err: reqwest::Error) -> AirtableMcpError {
    AirtableMcpError::Airtable(AirtableApiError::RequestFailed {
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AirtableClient {
        let config = Config::new("patABCDEFGHIJKLMNOP", "appBase123")
            .unwrap()
            .with_api_base_url("http://127.0.0.1:9/v0/");
        AirtableClient::new(&config)
    }

    #[test]
    fn test_tables_url() {
        assert_eq!(
            client().tables_url(),
            "http://127.0.0.1:9/v0/meta/bases/appBase123/tables"
        );
    }

    #[test]
    fn test_records_url_encodes_table() {
        assert_eq!(
            client().records_url("My Projects"),
            "http://127.0.0.1:9/v0/appBase123/My%20Projects"
        );
    }

    #[test]
    fn test_bases_and_record_urls() {
        let client = client();
        assert_eq!(client.bases_url(), "http://127.0.0.1:9/v0/meta/bases");
        assert_eq!(
            client.record_url("Open Tasks", "rec123"),
            "http://127.0.0.1:9/v0/appBase123/Open%20Tasks/rec123"
        );
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_request_failure() {
        let err = client().list_tables().await.unwrap_err();
        assert!(matches!(
            err,
            AirtableMcpError::Airtable(AirtableApiError::RequestFailed { .. })
        ));
        assert!(err.to_string().starts_with("Airtable API request failed"));
    }
}
