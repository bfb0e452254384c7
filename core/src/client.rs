//! Request client for the NGB REST API.
//!
//! # Design
//! `ApiClient` owns an immutable `EndpointConfig` and a `Transport`. A call is
//! split into `build_request` (pure), one `Transport::execute`, and
//! `parse_envelope` (pure), so verb selection and envelope validation are
//! testable without a server. There is no retry: one call, one request.

use serde::Serialize;
use serde_json::Value;

use crate::config::EndpointConfig;
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};

/// Prefix for protocol errors when the caller gives no context of its own.
pub const DEFAULT_ERROR_CONTEXT: &str = "Failed to fetch data from server";

/// One API invocation: what to call, with what, and how to word a failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiCall {
    pub method_path: String,
    pub body: Option<Value>,
    pub verb: Option<HttpMethod>,
    pub error_context: Option<String>,
}

impl ApiCall {
    pub fn new(method_path: impl Into<String>) -> Self {
        Self {
            method_path: method_path.into(),
            ..Self::default()
        }
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach any serializable value as the JSON body.
    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, ApiError> {
        let value =
            serde_json::to_value(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.body(value))
    }

    pub fn verb(mut self, verb: HttpMethod) -> Self {
        self.verb = Some(verb);
        self
    }

    pub fn error_context(mut self, context: impl Into<String>) -> Self {
        self.error_context = Some(context.into());
        self
    }

    /// The body, unless it is `null` or an empty object, list or string.
    fn effective_body(&self) -> Option<&Value> {
        self.body.as_ref().filter(|body| match body {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::String(s) => !s.is_empty(),
            Value::Bool(_) | Value::Number(_) => true,
        })
    }
}

/// Pick the HTTP verb for a call.
///
/// An explicit verb wins. Otherwise a method path that is itself a verb
/// keyword (`get`, `POST`, ...) selects that verb. Otherwise POST when a body
/// is supplied and GET when it is not.
pub fn resolve_method(method_path: &str, has_body: bool, explicit: Option<HttpMethod>) -> HttpMethod {
    if let Some(verb) = explicit {
        return verb;
    }
    if let Some(verb) = HttpMethod::from_keyword(method_path.trim_matches('/')) {
        return verb;
    }
    if has_body {
        HttpMethod::Post
    } else {
        HttpMethod::Get
    }
}

/// Synchronous client bound to one endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient<T = UreqTransport> {
    config: EndpointConfig,
    transport: T,
}

impl ApiClient<UreqTransport> {
    /// Client that talks to the network through `ureq`.
    pub fn new(config: EndpointConfig) -> Self {
        let transport = UreqTransport::new(&config);
        Self { config, transport }
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(config: EndpointConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn build_request(&self, call: &ApiCall) -> Result<HttpRequest, ApiError> {
        if call.method_path.trim_matches('/').is_empty() {
            return Err(ApiError::InvalidRequest("method path must not be empty".to_string()));
        }
        let body = call
            .effective_body()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: resolve_method(&call.method_path, body.is_some(), call.verb),
            url: self.config.url_for(&call.method_path),
            headers: self.config.headers.clone(),
            body,
        })
    }

    /// Parse a raw response and check its status envelope.
    pub fn parse_envelope(
        &self,
        response: HttpResponse,
        error_context: Option<&str>,
    ) -> Result<Envelope, ApiError> {
        let context = error_context.unwrap_or(DEFAULT_ERROR_CONTEXT);
        let unparsable = |reason: String| {
            ApiError::Protocol(format!(
                "{context}. Server response could not be parsed (HTTP {}): {reason}",
                response.status
            ))
        };

        let value: Value =
            serde_json::from_slice(&response.body).map_err(|e| unparsable(e.to_string()))?;
        let Value::Object(mut fields) = value else {
            return Err(unparsable("expected a JSON object".to_string()));
        };

        let status = match fields.remove("status") {
            None => {
                return Err(ApiError::Protocol(format!(
                    "{context}. Server responded with status: {}.",
                    response.status
                )))
            }
            Some(Value::String(status)) => status,
            Some(other) => other.to_string(),
        };
        let message = fields.remove("message").and_then(|m| match m {
            Value::Null => None,
            Value::String(m) => Some(m),
            other => Some(other.to_string()),
        });
        let payload = fields.remove("payload").filter(|p| !p.is_null());

        let envelope = Envelope {
            status,
            message,
            payload,
        };
        if !envelope.is_ok() {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("status {}", envelope.status));
            return Err(ApiError::Protocol(format!(
                "{context}. Server responded with message: {message}"
            )));
        }
        Ok(envelope)
    }

    /// Send one request and return the validated envelope.
    pub fn call(&self, call: &ApiCall) -> Result<Envelope, ApiError> {
        let request = self.build_request(call)?;
        let response = self.transport.execute(request)?;
        self.parse_envelope(response, call.error_context.as_deref())
    }
}
