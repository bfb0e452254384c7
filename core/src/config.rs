//! Endpoint configuration for the NGB REST API.
//!
//! An `EndpointConfig` is built once (usually from CLI flags) and moved into
//! the client and transport that use it. Nothing mutates it afterwards.

use std::time::Duration;

/// Base address of a locally deployed catgenome server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/catgenome/restapi/";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Response bodies are read in full. `u64::MAX` means no cap.
pub const DEFAULT_MAX_RESPONSE_SIZE: u64 = u64::MAX;

/// Where and how to reach the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub base_url: String,
    /// Sent with every request.
    pub headers: Vec<(String, String)>,
    /// Upper bound for a whole request/response exchange.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Skip TLS certificate verification. Off unless asked for.
    pub insecure: bool,
    /// Largest response body accepted, in bytes.
    pub max_response_size: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl EndpointConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            insecure: false,
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    pub fn with_max_response_size(mut self, bytes: u64) -> Self {
        self.max_response_size = bytes;
        self
    }

    /// Add a header, replacing any existing one with the same name
    /// (compared case-insensitively).
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Join the base address and a method path with exactly one `/`.
    pub fn url_for(&self, method_path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            method_path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_deployment() {
        let config = EndpointConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(
            config.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(!config.insecure);
        assert_eq!(config.max_response_size, u64::MAX);
    }

    #[test]
    fn url_for_strips_duplicate_slashes() {
        let config = EndpointConfig::new("http://host/restapi/");
        assert_eq!(config.url_for("reference/loadAll"), "http://host/restapi/reference/loadAll");
        assert_eq!(config.url_for("/reference/loadAll"), "http://host/restapi/reference/loadAll");
    }

    #[test]
    fn url_for_without_trailing_slash() {
        let config = EndpointConfig::new("http://host/restapi");
        assert_eq!(config.url_for("echo"), "http://host/restapi/echo");
    }

    #[test]
    fn with_header_replaces_same_name() {
        let config = EndpointConfig::default().with_header("content-type", "text/plain");
        assert_eq!(
            config.headers,
            vec![("content-type".to_string(), "text/plain".to_string())]
        );
    }

    #[test]
    fn builder_methods_set_fields() {
        let config = EndpointConfig::new("https://ngb.example.org")
            .with_timeout(Duration::from_secs(30))
            .with_connect_timeout(Duration::from_secs(2))
            .with_insecure(true)
            .with_max_response_size(1024);
        assert_eq!(config.max_response_size, 1024);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert!(config.insecure);
    }
}
