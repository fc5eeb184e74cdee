//! HTTP transport: POST /mcp → gateway → JSON-RPC response.
//!
//! Every response carries permissive CORS headers. JSON-RPC failures are
//! reported inside the envelope with transport status 200; only unknown
//! routes get a 404.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tokio::net::TcpListener;

use crate::error::Result;
use crate::mcp::server::Gateway;

/// Path the MCP endpoint is served on
pub const MCP_PATH: &str = "/mcp";

/// Build the gateway router
pub fn router(gateway: Arc<Gateway>) -> Router {
    Router::new()
        .route(
            MCP_PATH,
            post(handle_mcp).options(handle_preflight).fallback(not_found),
        )
        .fallback(fallback)
        .layer(middleware::map_response(add_cors_headers))
        .with_state(gateway)
}

/// Serve the router on `addr` until Ctrl+C
pub async fn run_http(gateway: Arc<Gateway>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Airtable MCP server running at http://{}{}", addr, MCP_PATH);

    axum::serve(listener, router(gateway))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Airtable MCP server stopped");
    Ok(())
}

async fn handle_mcp(
    State(gateway): State<Arc<Gateway>>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let response = match body {
        Ok(body) => gateway.handle(&body).await,
        Err(rejection) => gateway.reject_body(&rejection.body_text()),
    };
    Json(response).into_response()
}

async fn handle_preflight() -> StatusCode {
    StatusCode::OK
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn fallback(method: Method) -> StatusCode {
    if method == Method::OPTIONS {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn add_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
