//! CORS-enabled pass-through routes for browser frontends.
//!
//! ## Endpoints
//! - GET /health - liveness check
//! - GET /api/versions - current Roblox client versions
//! - GET /api/exploits - exploit status listing

use crate::error::Error;
use axum::extract::State;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use config::Upstream;
use orchestrator::source::{get_json, upstream_client};
use serde_json::json;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use url::Url;

/// Shared by every handler.
#[derive(Debug, Clone)]
pub struct ProxyState {
    client: reqwest::Client,
    listing_url: Url,
    versions_url: Url,
}

impl ProxyState {
    pub fn new(upstream: &Upstream) -> Result<Self, Error> {
        Ok(Self {
            client: upstream_client(upstream)?,
            listing_url: upstream.listing_url()?,
            versions_url: upstream.versions_url()?,
        })
    }
}

pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/versions", get(versions))
        .route("/api/exploits", get(exploits))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until `cancel` fires.
pub async fn serve(
    addr: SocketAddr,
    state: ProxyState,
    cancel: CancellationToken,
) -> Result<(), Error> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind { addr, source })?;
    serve_on(listener, state, cancel).await
}

/// Serve on an already bound listener until `cancel` fires.
pub async fn serve_on(
    listener: TcpListener,
    state: ProxyState,
    cancel: CancellationToken,
) -> Result<(), Error> {
    let addr = listener.local_addr().map_err(Error::Serve)?;
    info!(%addr, "proxy listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(Error::Serve)?;
    info!("proxy stopped");
    Ok(())
}

async fn health() -> &'static str {
    "OK"
}

async fn versions(State(state): State<ProxyState>) -> Response {
    forward(&state.client, &state.versions_url, "versions").await
}

async fn exploits(State(state): State<ProxyState>) -> Response {
    forward(&state.client, &state.listing_url, "exploits").await
}

/// Relay the upstream JSON body. Any failure collapses into a fixed 500.
async fn forward(client: &reqwest::Client, url: &Url, what: &'static str) -> Response {
    match get_json(client, url).await {
        Ok(body) => Json(body).into_response(),
        Err(err) => {
            error!(%err, %url, "proxy fetch failed");
            let body = json!({ "error": format!("Failed to fetch {what} data") });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
