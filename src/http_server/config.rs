//! HTTP Server Configuration
//!
//! Configuration for the HTTP server including host, port, and CORS settings.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5080
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configured origins that cannot be used in an allow list
    pub fn invalid_origins(&self) -> Vec<&str> {
        self.cors_origins
            .iter()
            .map(String::as_str)
            .filter(|origin| parse_origin(origin).is_none())
            .collect()
    }

    /// Origins as header values, invalid entries skipped
    pub fn origin_headers(&self) -> Vec<HeaderValue> {
        self.cors_origins
            .iter()
            .filter_map(|origin| parse_origin(origin))
            .collect()
    }
}

/// `scheme://host[:port]` with an http(s) scheme and no path
fn parse_origin(origin: &str) -> Option<HeaderValue> {
    let authority = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))?;

    if authority.is_empty()
        || authority.contains('/')
        || authority.chars().any(|c| c.is_whitespace() || c == '*')
    {
        return None;
    }

    origin.parse().ok()
}
