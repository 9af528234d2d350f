//! HTTP transport for the storage client
//!
//! The client talks to the storage service (and to import sources) through the
//! `HttpTransport` trait. `ReqwestTransport` is the production implementation;
//! tests swap in scripted fakes or point it at a mock server.

mod http_client;

pub use http_client::ReqwestTransport;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Transport-level failures (connection refused, timeout, DNS, bad URL)
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

/// A single outbound request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub content_type: Option<String>,
    pub body: Option<Bytes>,
}

impl TransportRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            content_type: None,
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Bytes, content_type: &str) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            content_type: Some(content_type.to_string()),
            body: Some(body),
        }
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            url: url.into(),
            content_type: None,
            body: None,
        }
    }
}

/// The parts of a response the client cares about
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub location: Option<String>,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            location: None,
            body: Bytes::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Canonical reason phrase, e.g. "Internal Server Error"
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown")
    }
}

/// Executes one HTTP request and returns the raw response.
///
/// Implementations must not follow redirects: a 3xx is returned as-is so the
/// caller can bound the number of hops itself.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_request_carries_body_and_type() {
        let req = TransportRequest::post("http://h/p", Bytes::from_static(b"abc"), "image/png");
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.content_type.as_deref(), Some("image/png"));
        assert_eq!(req.body.as_deref(), Some(&b"abc"[..]));
    }

    #[test]
    fn test_response_reason() {
        let resp = TransportResponse::new(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!resp.is_success());
        assert_eq!(resp.reason(), "Internal Server Error");
    }
}
