//! Configuration for the Airtable MCP Gateway
//!
//! Holds the values captured at startup. They are immutable for the life of
//! the process and handed to the gateway explicitly.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::error::{AirtableMcpError, ConfigError, Result};

/// Configuration for the Airtable MCP Gateway
#[derive(Clone)]
pub struct Config {
    /// Airtable personal access token
    pub api_token: String,

    /// Airtable base ID
    pub base_id: String,

    /// Address the MCP endpoint listens on
    pub host: IpAddr,

    /// Port the MCP endpoint listens on
    pub port: u16,

    /// Bound on every outbound Airtable call
    pub upstream_timeout: Duration,

    /// Airtable REST API root
    pub api_base_url: String,
}

impl Config {
    /// Create a configuration with default host, port, timeout and API root
    pub fn new(api_token: impl Into<String>, base_id: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        let base_id = base_id.into();

        if api_token.trim().is_empty() {
            return Err(AirtableMcpError::Config(ConfigError::Missing {
                name: "token".to_string(),
            }));
        }
        if base_id.trim().is_empty() {
            return Err(AirtableMcpError::Config(ConfigError::Missing {
                name: "base".to_string(),
            }));
        }

        Ok(Self {
            api_token,
            base_id,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: airtable::DEFAULT_PORT,
            upstream_timeout: Duration::from_secs(airtable::DEFAULT_TIMEOUT_SECS),
            api_base_url: airtable::API_BASE_URL.to_string(),
        })
    }

    /// Override the Airtable API root (trailing slashes are dropped)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the upstream timeout
    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    /// Override the listen address
    pub fn with_listen_addr(mut self, host: IpAddr, port: u16) -> Self {
        self.host = host;
        self.port = port;
        self
    }

    /// Socket address for the listener
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Token reduced to its first and last five characters, for diagnostics
    pub fn redacted_token(&self) -> String {
        let chars: Vec<char> = self.api_token.chars().collect();
        if chars.len() <= 10 {
            return "*****".to_string();
        }
        let head: String = chars[..5].iter().collect();
        let tail: String = chars[chars.len() - 5..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &self.redacted_token())
            .field("base_id", &self.base_id)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Airtable API constants
pub mod airtable {
    /// Base URL for the Airtable REST API
    pub const API_BASE_URL: &str = "https://api.airtable.com/v0";

    /// Page size used when a caller does not ask for one
    pub const DEFAULT_MAX_RECORDS: u64 = 100;

    /// Seconds an upstream call may take before it is abandoned
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Port the MCP endpoint listens on
    pub const DEFAULT_PORT: u16 = 8010;
}
