//! HSS storage client
//!
//! Three operations against the storage service:
//! - `save`: POST a payload to `api_url + app_path`, returns the public URL
//! - `delete`: DELETE `api_url + path(locator)`
//! - `import`: GET a source URI, following at most `max_redirects` hops, then `save`

use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::Settings;
use crate::transport::{HttpTransport, ReqwestTransport, TransportRequest};

use super::client_config::ClientConfig;
use super::error::{HssError, HssResult};
use super::locator::Locator;
use super::outcome::ResponseOutcome;

/// Redirect bound used by `import_default`
pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

/// Content type stored when an import source does not send one
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Client for the HTTP Storage Service
#[derive(Clone)]
pub struct StorageClient {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
}

impl StorageClient {
    /// Create a client with the default reqwest transport
    pub fn new(config: ClientConfig) -> HssResult<Self> {
        let transport = ReqwestTransport::new(&Default::default())
            .map_err(|e| HssError::Validation(e.to_string()))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over a specific transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        StorageClient { config, transport }
    }

    /// Create a client from loaded settings
    pub fn from_settings(settings: &Settings) -> HssResult<Self> {
        let config = settings.storage.client_config()?;
        let transport = ReqwestTransport::new(&settings.http)
            .map_err(|e| HssError::Validation(e.to_string()))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Upload `payload` and return its public URL.
    ///
    /// The response body of a successful POST is the object identifier.
    #[instrument(skip(self, payload), fields(app_path = %self.config.app_path()))]
    pub async fn save(&self, payload: impl Into<Bytes>, content_type: &str) -> HssResult<String> {
        let payload = payload.into();
        let endpoint = self.config.write_target();

        debug!(endpoint = %endpoint, size = payload.len(), "Saving to HSS");

        let response = self
            .transport
            .execute(TransportRequest::post(endpoint.as_str(), payload, content_type))
            .await
            .map_err(|e| HssError::Storage {
                endpoint: self.config.api_url().to_string(),
                status: None,
                message: e.to_string(),
            })?;

        if !response.is_success() {
            warn!(endpoint = %endpoint, status = response.status.as_u16(), "HSS save rejected");
            return Err(HssError::Storage {
                endpoint: self.config.api_url().to_string(),
                status: Some(response.status.as_u16()),
                message: format!("{} - {}", response.status.as_u16(), response.reason()),
            });
        }

        let identifier = String::from_utf8_lossy(&response.body);
        let stored = self.config.stored_url(&identifier);

        info!(url = %stored, "Saved to HSS");
        Ok(stored)
    }

    /// Delete the object identified by `locator`.
    ///
    /// Only the locator's path is used; the request always targets the
    /// configured API endpoint, whatever host the locator names.
    #[instrument(skip(self, locator), fields(locator = %locator))]
    pub async fn delete(&self, locator: &Locator) -> HssResult<()> {
        let endpoint = self.config.delete_target(locator);

        debug!(endpoint = %endpoint, "Deleting from HSS");

        let response = self
            .transport
            .execute(TransportRequest::delete(endpoint.as_str()))
            .await
            .map_err(|e| HssError::Storage {
                endpoint: endpoint.clone(),
                status: None,
                message: e.to_string(),
            })?;

        if !response.is_success() {
            warn!(endpoint = %endpoint, status = response.status.as_u16(), "HSS delete rejected");
            return Err(HssError::Storage {
                endpoint,
                status: Some(response.status.as_u16()),
                message: format!(
                    "Error trying to delete: {} - {}",
                    response.status.as_u16(),
                    response.reason()
                ),
            });
        }

        info!(endpoint = %endpoint, "Deleted from HSS");
        Ok(())
    }

    /// Fetch `source_uri` and store its body, following at most
    /// `max_redirects` redirects.
    ///
    /// `max_redirects == 0` fails before any request is made.
    #[instrument(skip(self))]
    pub async fn import(&self, source_uri: &str, max_redirects: u32) -> HssResult<String> {
        let mut current = source_uri.to_string();
        let mut remaining = max_redirects;

        loop {
            if remaining == 0 {
                warn!(uri = %source_uri, max_redirects, "Max redirects reached");
                return Err(HssError::RedirectLimit {
                    uri: source_uri.to_string(),
                    max_redirects,
                });
            }

            let url = Url::parse(&current)
                .map_err(|e| HssError::Argument(format!("Invalid source URI {}: {}", current, e)))?;

            debug!(uri = %url, remaining, "Fetching import source");

            let response = self
                .transport
                .execute(TransportRequest::get(url.as_str()))
                .await
                .map_err(|e| HssError::Import {
                    uri: current.clone(),
                    status: None,
                    message: format!("could not be fetched: {}", e),
                })?;

            match ResponseOutcome::classify(&url, &response) {
                ResponseOutcome::Success => {
                    let content_type = response
                        .content_type
                        .as_deref()
                        .unwrap_or(FALLBACK_CONTENT_TYPE);
                    return self.save(response.body, content_type).await;
                }
                ResponseOutcome::Redirect { location } => {
                    debug!(from = %url, to = %location, "Following redirect");
                    current = location.into();
                    remaining -= 1;
                }
                ResponseOutcome::Failure { status } => {
                    warn!(uri = %url, status = status.as_u16(), "Import source failed");
                    return Err(HssError::Import {
                        uri: current,
                        status: Some(status.as_u16()),
                        message: format!("returned a {}", status.as_u16()),
                    });
                }
            }
        }
    }

    /// `import` with the default redirect bound
    pub async fn import_default(&self, source_uri: &str) -> HssResult<String> {
        self.import(source_uri, DEFAULT_MAX_REDIRECTS).await
    }
}


#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::config::HttpSettings;
    use wiremock::matchers::{body_bytes, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const APP_PATH: &str = "/some/random/path";

    fn create_client(api_url: &str) -> StorageClient {
        let config = ClientConfig::new(api_url, APP_PATH, Some("http://www.read.com")).unwrap();
        let transport = ReqwestTransport::new(&HttpSettings::default()).unwrap();
        StorageClient::with_transport(config, Arc::new(transport))
    }

    #[tokio::test]
    async fn test_save_posts_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(APP_PATH))
            .and(header("content-type", "image/jpg"))
            .and(body_bytes(b"jpeg bytes".to_vec()))
            .respond_with(ResponseTemplate::new(200).set_body_string("abcdef123456"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_client(&mock_server.uri());
        let url = client.save(&b"jpeg bytes"[..], "image/jpg").await.unwrap();

        assert_eq!(url, "http://www.read.com/some/random/path/abcdef123456");
    }

    #[tokio::test]
    async fn test_save_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(APP_PATH))
            .respond_with(ResponseTemplate::new(404).set_body_string("abcdef123456"))
            .mount(&mock_server)
            .await;

        let client = create_client(&mock_server.uri());
        let err = client.save(&b"x"[..], "image/jpg").await.unwrap_err();

        assert!(matches!(err, HssError::Storage { status: Some(404), .. }));
    }

    #[tokio::test]
    async fn test_save_connection_refused() {
        let client = create_client("http://127.0.0.1:1");
        let err = client.save(&b"x"[..], "image/jpg").await.unwrap_err();

        assert!(matches!(err, HssError::Storage { status: None, .. }));
    }

    #[tokio::test]
    async fn test_delete_targets_api_server() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/some/random/path/abcdef123456"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_client(&mock_server.uri());
        let locator: Locator = "http://www.read.com/some/random/path/abcdef123456".parse().unwrap();

        client.delete(&locator).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = create_client(&mock_server.uri());
        let locator: Locator = "http://www.read.com/some/random/path/abcdef123456".parse().unwrap();

        let err = client.delete(&locator).await.unwrap_err();
        assert!(matches!(err, HssError::Storage { status: Some(500), .. }));
    }

    #[tokio::test]
    async fn test_import_after_four_redirects() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photo.jpg"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", "/photo.jpg"))
            .up_to_n_times(4)
            .with_priority(1)
            .expect(4)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/photo.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(b"not a photo".to_vec(), "image/jpg"))
            .with_priority(2)
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path(APP_PATH))
            .and(header("content-type", "image/jpg"))
            .and(body_bytes(b"not a photo".to_vec()))
            .respond_with(ResponseTemplate::new(200).set_body_string("hss123"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_client(&mock_server.uri());
        let url = client
            .import(&format!("{}/photo.jpg", mock_server.uri()), 5)
            .await
            .unwrap();

        assert_eq!(url, "http://www.read.com/some/random/path/hss123");
    }

    #[tokio::test]
    async fn test_import_redirect_loop() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", format!("{}/loop", mock_server.uri()).as_str()),
            )
            .expect(5)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("never"))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = create_client(&mock_server.uri());
        let err = client
            .import(&format!("{}/photo.jpg", mock_server.uri()), 5)
            .await
            .unwrap_err();

        assert!(err.is_redirect_limit());
    }

    #[tokio::test]
    async fn test_import_zero_redirects_sends_nothing() {
        let mock_server = MockServer::start().await;

        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = create_client(&mock_server.uri());
        let err = client
            .import(&format!("{}/photo.jpg", mock_server.uri()), 0)
            .await
            .unwrap_err();

        assert!(err.is_redirect_limit());
    }

    #[tokio::test]
    async fn test_import_source_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = create_client(&mock_server.uri());
        let err = client
            .import(&format!("{}/missing.jpg", mock_server.uri()), 5)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert!(!err.is_redirect_limit());
    }
}
