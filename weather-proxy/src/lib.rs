//! Forwarding proxy for the weather dashboard.
//!
//! Browsers cannot call the upstream weather API directly because it sends no
//! CORS headers. This crate relays any request under a local path prefix to
//! the upstream host, rewriting the prefix and forcing a permissive
//! `Access-Control-Allow-Origin` on the way back.
//!
//! The rewrite + CORS rule is defined once as [`ProxyRule`] and consumed by
//! both the standalone binary and any server that mounts [`proxy_router`].

use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::Response,
    routing::{any, get},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use weather_core::config::DEFAULT_UPSTREAM;

/// Largest inbound request body the proxy will buffer before forwarding.
/// Weather queries carry no body at all; this only bounds abuse.
pub const MAX_INBOUND_BODY_BYTES: usize = 2 * 1024 * 1024;

/// A single forwarding rule: requests under `prefix` go to `upstream` with
/// the prefix replaced by `rewrite`.
#[derive(Debug, Clone)]
pub struct ProxyRule {
    prefix: String,
    rewrite: String,
    upstream: String,
}

impl ProxyRule {
    /// The weather rule: `/weather` → `{upstream}/weather/v1`, query string
    /// preserved verbatim.
    pub fn weather(upstream: impl Into<String>) -> Self {
        Self {
            prefix: "/weather".to_string(),
            rewrite: "/weather/v1".to_string(),
            upstream: upstream.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    /// Rewrite an inbound path-and-query into the full upstream URL.
    fn target_url(&self, path_and_query: &str) -> String {
        let rest = path_and_query.strip_prefix(&self.prefix).unwrap_or(path_and_query);
        format!("{}{}{}", self.upstream, self.rewrite, rest)
    }
}

impl Default for ProxyRule {
    fn default() -> Self {
        Self::weather(DEFAULT_UPSTREAM)
    }
}

struct ProxyState {
    rule: ProxyRule,
    http: reqwest::Client,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Build the proxy router for a rule. Mount this directly in the standalone
/// binary or inside a larger development server; both get identical
/// rewrite and CORS behavior.
pub fn proxy_router(rule: ProxyRule) -> Router {
    let prefix = rule.prefix.clone();
    let state = Arc::new(ProxyState {
        rule,
        http: reqwest::Client::new(),
    });

    Router::new()
        .route("/health", get(health_check))
        .route(&prefix, any(forward))
        .route(&format!("{prefix}/"), any(forward))
        .route(&format!("{prefix}/{{*rest}}"), any(forward))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Relay one request to the upstream and hand the response back with the
/// CORS header forced to `*`.
async fn forward(State(state): State<Arc<ProxyState>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path().to_string(), |pq| pq.as_str().to_string());

    // Diagnostic only, mirrors nothing back to the caller.
    tracing::info!("Proxying request to: {path_and_query}");

    let body_bytes = match axum::body::to_bytes(body, MAX_INBOUND_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!("Failed to read inbound request body: {err}");
            return error_response(StatusCode::BAD_REQUEST, "failed to read request body");
        }
    };

    // Origin-changing forward: drop the inbound Host header so the transport
    // derives it from the upstream URL.
    let mut outbound_headers = HeaderMap::new();
    for (name, value) in &parts.headers {
        if name != &header::HOST {
            outbound_headers.insert(name.clone(), value.clone());
        }
    }

    let target = state.rule.target_url(&path_and_query);

    let upstream_response = match state
        .http
        .request(parts.method.clone(), &target)
        .headers(outbound_headers)
        .body(body_bytes)
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            tracing::error!("Upstream request to {target} failed: {err}");
            return error_response(StatusCode::BAD_GATEWAY, "upstream unreachable");
        }
    };

    // Non-2xx statuses and bodies pass through unmodified; the proxy never
    // reshapes an upstream error.
    let status = upstream_response.status();
    let response_headers = upstream_response.headers().clone();

    let response_body = match upstream_response.bytes().await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!("Failed to read upstream response body: {err}");
            return error_response(StatusCode::BAD_GATEWAY, "failed to read upstream response");
        }
    };

    let mut response = Response::new(Body::from(response_body));
    *response.status_mut() = status;

    for (name, value) in &response_headers {
        // Skipped headers describe the original transport framing, which a
        // buffered relay invalidates.
        if name == &header::TRANSFER_ENCODING
            || name == &header::CONNECTION
            || name == &header::CONTENT_LENGTH
        {
            continue;
        }
        response.headers_mut().insert(name.clone(), value.clone());
    }

    // Unconditional overwrite, even when the upstream set its own value.
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );

    response
}

fn error_response(status: StatusCode, message: &'static str) -> Response {
    let mut response = Response::new(Body::from(message));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}
