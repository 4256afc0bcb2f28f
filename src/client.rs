//! HTTP client for the local RemoteHWInfo server.

use std::time::Duration;

use crate::config::hwinfo_url_for_port;
use crate::error::Error;
use crate::json::JsonValue;
use crate::{DEFAULT_HWINFO_PORT, DEFAULT_TIMEOUT_SECS};

/// Fetches the combined Afterburner / HWiNFO sensor document.
///
/// # Example
///
/// ```rust,no_run
/// use hwpanel::Client;
/// use hwpanel::sensors::Afterburner;
///
/// # async fn example() -> Result<(), hwpanel::Error> {
/// let client = Client::for_port(27008);
///
/// let document = client.fetch_document().await?;
/// if let Some(afterburner) = Afterburner::from_document(&document) {
///     println!("GPU: {}°C", afterburner.value("GPU temperature"));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    url: String,
}

impl Client {
    /// Create a client for the document at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_timeout(url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            url: url.into(),
        }
    }

    /// Create a client for RemoteHWInfo on `localhost:<port>`.
    pub fn for_port(port: u16) -> Self {
        Self::new(hwinfo_url_for_port(port))
    }

    /// Set a custom HTTP client.
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Get the document URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the raw sensor document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP request fails or times out
    /// - The server returns a non-success status
    pub async fn fetch(&self) -> Result<String, Error> {
        let response = self.http.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }

        let body = response.text().await?;
        tracing::debug!("Fetched {} bytes from {}", body.len(), self.url);
        Ok(body)
    }

    /// Fetch and parse the sensor document.
    pub async fn fetch_document(&self) -> Result<JsonValue, Error> {
        let body = self.fetch().await?;
        JsonValue::parse(&body)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::for_port(DEFAULT_HWINFO_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::{routing::get, Router};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/json.json", addr)
    }

    #[test]
    fn test_client_creation() {
        let client = Client::for_port(27008);
        assert_eq!(client.url(), "http://localhost:27008/json.json");
        assert_eq!(Client::default().url(), client.url());
    }

    #[test]
    fn test_builder_pattern() {
        let client = Client::new("http://127.0.0.1:9/json.json").with_http_client(reqwest::Client::new());
        assert_eq!(client.url(), "http://127.0.0.1:9/json.json");
    }

    #[tokio::test]
    async fn test_fetch_document() {
        let router = Router::new().route(
            "/json.json",
            get(|| async { r#"{"afterburner": {"entries": []}}"# }),
        );
        let client = Client::new(serve(router).await);

        let document = client.fetch_document().await.unwrap();
        assert!(crate::sensors::Afterburner::from_document(&document).is_some());
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let router = Router::new().route(
            "/json.json",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "HWiNFO not running") }),
        );
        let client = Client::new(serve(router).await);

        match client.fetch().await {
            Err(Error::Api { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "HWiNFO not running");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let router = Router::new().route("/json.json", get(|| async { "{\"hwinfo\": " }));
        let client = Client::new(serve(router).await);

        assert!(matches!(
            client.fetch_document().await,
            Err(Error::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::with_timeout(format!("http://{}/json.json", addr), Duration::from_secs(1));
        assert!(matches!(client.fetch().await, Err(Error::Request(_))));
    }
}
