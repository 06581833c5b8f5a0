// src/server/proxy.rs

//! Reverse proxy to the upstream dev site.
//!
//! Every request that is not the reload WebSocket endpoint is replayed
//! against the configured upstream URL with method, headers and body intact,
//! and the upstream response is relayed back. Proxy errors surface to the
//! browser as 502 responses rather than crashing the dev session.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

use super::AppState;

/// Headers that describe the connection rather than the payload; copying
/// them through a proxy corrupts the exchange.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
    "content-length",
];

fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP.iter().any(|h| name.eq_ignore_ascii_case(h))
}

/// Join the upstream base URL with the incoming request's path and query.
fn upstream_url(base: &str, req: &Request) -> String {
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    format!("{}{}", base.trim_end_matches('/'), path_and_query)
}

/// Fallback handler: forward the request to the upstream dev site.
pub(crate) async fn proxy_handler(State(state): State<AppState>, req: Request) -> Response {
    let url = upstream_url(&state.upstream, &req);
    debug!(%url, method = %req.method(), "proxying request");

    let method = match reqwest::Method::from_bytes(req.method().as_str().as_bytes()) {
        Ok(method) => method,
        Err(err) => return bad_gateway(&url, &err.to_string()),
    };

    let mut outgoing = state.client.request(method, &url);
    for (name, value) in req.headers() {
        if !is_hop_by_hop(name.as_str()) {
            outgoing = outgoing.header(name.as_str(), value.as_bytes());
        }
    }

    let body = match axum::body::to_bytes(req.into_body(), usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => return bad_gateway(&url, &err.to_string()),
    };

    let upstream_resp = match outgoing.body(body.to_vec()).send().await {
        Ok(resp) => resp,
        Err(err) => return bad_gateway(&url, &err.to_string()),
    };

    let status = StatusCode::from_u16(upstream_resp.status().as_u16())
        .unwrap_or(StatusCode::BAD_GATEWAY);

    let mut builder = Response::builder().status(status);
    for (name, value) in upstream_resp.headers() {
        if !is_hop_by_hop(name.as_str()) {
            builder = builder.header(name.as_str(), value.as_bytes());
        }
    }

    let bytes = match upstream_resp.bytes().await {
        Ok(bytes) => bytes,
        Err(err) => return bad_gateway(&url, &err.to_string()),
    };

    builder
        .body(Body::from(bytes))
        .unwrap_or_else(|err| bad_gateway(&url, &err.to_string()))
}

fn bad_gateway(url: &str, err: &str) -> Response {
    warn!(%url, error = %err, "proxy request failed");
    (
        StatusCode::BAD_GATEWAY,
        format!("plugsync proxy error for {url}: {err}"),
    )
        .into_response()
}
