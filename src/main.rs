//! Airtable MCP Gateway - Rust Implementation
//!
//! Serves MCP JSON-RPC over HTTP and answers it from the Airtable REST API.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use airtable_mcp_gateway::config::{airtable, Config};
use airtable_mcp_gateway::error::Result;
use airtable_mcp_gateway::mcp::http::run_http;
use airtable_mcp_gateway::mcp::server::Gateway;

/// Airtable MCP Gateway
#[derive(Parser)]
#[command(name = "airtable-mcp-gateway")]
#[command(author, version, about = "Airtable MCP Gateway - A Model Context Protocol server for Airtable")]
struct Cli {
    /// Airtable personal access token
    #[arg(long, env = "AIRTABLE_PERSONAL_ACCESS_TOKEN", hide_env_values = true)]
    token: String,

    /// Airtable base ID
    #[arg(long = "base", env = "AIRTABLE_BASE_ID")]
    base_id: String,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, default_value_t = airtable::DEFAULT_PORT)]
    port: u16,

    /// Seconds to wait for each Airtable API call
    #[arg(
        long,
        default_value_t = airtable::DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::new(cli.token, cli.base_id) {
        Ok(config) => config
            .with_listen_addr(cli.host, cli.port)
            .with_upstream_timeout(Duration::from_secs(cli.timeout_secs)),
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Usage: airtable-mcp-gateway --token YOUR_TOKEN --base YOUR_BASE_ID");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Starting Airtable MCP server with token {} and base {}",
        config.redacted_token(),
        config.base_id
    );

    let gateway = Arc::new(Gateway::new(&config));
    run_http(gateway, config.listen_addr()).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_rejected() {
        let args = ["airtable-mcp-gateway", "--token", "pat123", "--base", "app123"];
        let cli = Cli::try_parse_from(args.iter().chain(["--timeout-secs", "0"].iter()));
        assert!(cli.is_err());

        let cli = Cli::try_parse_from(args.iter().chain(["--timeout-secs", "5"].iter())).unwrap();
        assert_eq!(cli.timeout_secs, 5);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["airtable-mcp-gateway", "--token", "pat123", "--base", "app123"]).unwrap();
        assert_eq!(cli.port, 8010);
        assert_eq!(cli.timeout_secs, 30);
        assert_eq!(cli.base_id, "app123");
    }
}
