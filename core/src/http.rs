//! HTTP transport types and the blocking `ureq` transport.
//!
//! # Design
//! Requests and responses are plain data. `ApiClient` builds an `HttpRequest`
//! and parses an `HttpResponse`; the `Transport` in between is the only piece
//! that touches the network. Tests swap in a canned transport, production
//! uses `UreqTransport`.
//!
//! A transport returns every HTTP status as data. Deciding whether a 500 with
//! an `"OK"` envelope is a failure is the envelope check's job, not ours.

use std::fmt;

use ureq::typestate::{WithBody, WithoutBody};
use ureq::{Agent, RequestBuilder};

use crate::config::EndpointConfig;
use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Case-insensitive match against the four supported verbs.
    pub fn from_keyword(word: &str) -> Option<Self> {
        [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete,
        ]
        .into_iter()
        .find(|m| m.as_str().eq_ignore_ascii_case(word))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data. `url` is absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data. The body is kept as raw bytes;
/// decoding it is part of envelope parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Executes one request and hands back whatever the server said.
///
/// Implementations must not retry and must map network failures to
/// `ApiError::Transport`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
    max_response_size: u64,
}

impl UreqTransport {
    pub fn new(config: &EndpointConfig) -> Self {
        if config.insecure {
            tracing::warn!("TLS certificate verification is disabled");
        }
        let tls = ureq::tls::TlsConfig::builder()
            .disable_verification(config.insecure)
            .build();
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .timeout_connect(Some(config.connect_timeout))
            .tls_config(tls)
            .build()
            .new_agent();
        Self {
            agent,
            max_response_size: config.max_response_size,
        }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;
        tracing::debug!(%method, %url, has_body = body.is_some(), "sending request");

        let result = match method {
            HttpMethod::Get => send_without_body(self.agent.get(&url), &headers, body),
            HttpMethod::Delete => send_without_body(self.agent.delete(&url), &headers, body),
            HttpMethod::Post => send_with_body(self.agent.post(&url), &headers, body),
            HttpMethod::Put => send_with_body(self.agent.put(&url), &headers, body),
        };
        let mut response = result.map_err(|e| ApiError::Transport(format!("{method} {url}: {e}")))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(self.max_response_size)
            .read_to_vec()
            .map_err(|e| ApiError::Transport(format!("reading response body from {url}: {e}")))?;
        tracing::debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

type UreqResult = Result<ureq::http::Response<ureq::Body>, ureq::Error>;

// GET and DELETE carry a body only when the caller attached one.
fn send_without_body(
    builder: RequestBuilder<WithoutBody>,
    headers: &[(String, String)],
    body: Option<String>,
) -> UreqResult {
    let builder = headers
        .iter()
        .fold(builder, |b, (name, value)| b.header(name.as_str(), value.as_str()));
    match body {
        Some(body) => builder.force_send_body().send(body.as_bytes()),
        None => builder.call(),
    }
}

fn send_with_body(
    builder: RequestBuilder<WithBody>,
    headers: &[(String, String)],
    body: Option<String>,
) -> UreqResult {
    let builder = headers
        .iter()
        .fold(builder, |b, (name, value)| b.header(name.as_str(), value.as_str()));
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}
