//! Upstream request forwarding
//!
//! The proxied prefixes (`/api/`, `/admin/`) are relayed to the application
//! server with the original `Host` header preserved, the client IP appended
//! to `X-Forwarded-For`, and `X-Real-IP` set. Hop-by-hop headers are
//! stripped in both directions. Response bodies are streamed back without
//! buffering.

use crate::error::GatewayError;
use crate::state::GatewayState;
use axum::body::Body;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::Response;
use std::net::{IpAddr, SocketAddr};

/// Request bodies are buffered before forwarding; cap what we accept
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Headers that are connection-scoped and must not be forwarded
const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Forward a request to the configured upstream and relay the response
pub async fn proxy_handler(
    State(state): State<GatewayState>,
    ConnectInfo(client): ConnectInfo<SocketAddr>,
    request: Request,
) -> Result<Response, GatewayError> {
    let (parts, body) = request.into_parts();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let upstream_url = format!(
        "{}{}",
        state.config.upstream.url.trim_end_matches('/'),
        path_and_query
    );

    let method = reqwest::Method::from_bytes(parts.method.as_str().as_bytes())
        .map_err(|e| GatewayError::Internal(anyhow::Error::new(e)))?;
    let headers = build_upstream_headers(&parts.headers, client.ip());

    let body_bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|_| GatewayError::BodyTooLarge)?;

    let upstream_response = state
        .http
        .request(method, upstream_url)
        .headers(headers)
        .body(body_bytes)
        .send()
        .await?;

    relay_response(upstream_response)
}

/// Translate the client's headers into the upstream request's headers
fn build_upstream_headers(original: &HeaderMap, client_ip: IpAddr) -> reqwest::header::HeaderMap {
    let mut headers = reqwest::header::HeaderMap::new();

    for (name, value) in original {
        let name_str = name.as_str();
        if is_hop_by_hop(name_str)
            || name_str == "host"
            || name_str == "x-forwarded-for"
            || name_str == "x-real-ip"
        {
            continue;
        }
        if let (Ok(upstream_name), Ok(upstream_value)) = (
            reqwest::header::HeaderName::from_bytes(name_str.as_bytes()),
            reqwest::header::HeaderValue::from_bytes(value.as_bytes()),
        ) {
            headers.append(upstream_name, upstream_value);
        }
    }

    // Preserve the original Host header, as `proxy_set_header Host $host`
    if let Some(host) = original.get("host") {
        if let Ok(value) = reqwest::header::HeaderValue::from_bytes(host.as_bytes()) {
            headers.insert(reqwest::header::HOST, value);
        }
    }

    // Append the client address to any forwarding chain we received
    let forwarded = match original
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        Some(existing) => format!("{existing}, {client_ip}"),
        None => client_ip.to_string(),
    };
    if let Ok(value) = reqwest::header::HeaderValue::from_str(&forwarded) {
        headers.insert("x-forwarded-for", value);
    }
    if let Ok(value) = reqwest::header::HeaderValue::from_str(&client_ip.to_string()) {
        headers.insert("x-real-ip", value);
    }

    headers
}

/// Convert the upstream response into the client response, streaming the body
fn relay_response(upstream: reqwest::Response) -> Result<Response, GatewayError> {
    let status = StatusCode::from_u16(upstream.status().as_u16())
        .map_err(|e| GatewayError::Internal(anyhow::Error::new(e)))?;

    let mut builder = Response::builder().status(status);
    for (name, value) in upstream.headers() {
        if is_hop_by_hop(name.as_str()) {
            continue;
        }
        if let (Ok(client_name), Ok(client_value)) = (
            HeaderName::from_bytes(name.as_str().as_bytes()),
            HeaderValue::from_bytes(value.as_bytes()),
        ) {
            builder = builder.header(client_name, client_value);
        }
    }

    builder
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| GatewayError::Internal(anyhow::Error::new(e)))
}

fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP_HEADERS.contains(&name)
}
