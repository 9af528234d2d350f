//! reqwest-backed transport
//!
//! Wraps a `reqwest::Client` with timeouts and a user agent taken from
//! `HttpSettings`. Redirects are never followed here.

use async_trait::async_trait;
use reqwest::{header, redirect, Client};
use std::time::Duration;
use tracing::debug;

use crate::config::HttpSettings;
use crate::transport::{HttpTransport, TransportError, TransportRequest, TransportResponse};

/// HTTP transport over reqwest
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    /// Inner HTTP client
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport from HTTP settings
    pub fn new(settings: &HttpSettings) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(ReqwestTransport { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        debug!(method = %request.method, url = %request.url, "Executing request");

        let mut builder = self.client.request(request.method, &request.url);
        if let Some(content_type) = request.content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;

        let status = response.status();
        let headers = response.headers();
        let content_type = header_string(headers, header::CONTENT_TYPE);
        let location = header_string(headers, header::LOCATION);
        let body = response.bytes().await?;

        debug!(status = status.as_u16(), size = body.len(), "Received response");

        Ok(TransportResponse {
            status,
            content_type,
            location,
            body,
        })
    }
}

fn header_string(headers: &header::HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
