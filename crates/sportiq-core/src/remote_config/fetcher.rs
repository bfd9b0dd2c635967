//! Remote config transport.

use std::time::Duration;

use async_trait::async_trait;

use super::response::RemoteConfigResponse;
use crate::error::FetchError;

/// Source of remote config responses. Swapped out in tests.
#[async_trait]
pub trait ConfigFetcher: Send + Sync {
    async fn fetch(&self) -> Result<RemoteConfigResponse, FetchError>;
}

/// Plain HTTP GET against a configured endpoint.
pub struct HttpFetcher {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpFetcher {
    /// # Errors
    /// Returns `FetchError::Request` if the endpoint is not a URL or the
    /// client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let endpoint = endpoint.into();
        url::Url::parse(&endpoint)
            .map_err(|e| FetchError::Request(format!("invalid endpoint {endpoint}: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| FetchError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ConfigFetcher for HttpFetcher {
    async fn fetch(&self) -> Result<RemoteConfigResponse, FetchError> {
        tracing::info!(url = %self.endpoint, "fetching remote config");

        let response = self
            .client
            .get(&self.endpoint)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout {
                        timeout_ms: self.timeout.as_millis() as u64,
                    }
                } else {
                    FetchError::from(e)
                }
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        RemoteConfigResponse::parse(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_endpoint() {
        assert!(HttpFetcher::new("not-a-valid-url", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn parses_success_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/config")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true, "quiz": "https://example.com/start"}"#)
            .create_async()
            .await;

        let fetcher =
            HttpFetcher::new(format!("{}/config", server.url()), Duration::from_secs(5)).unwrap();
        let resp = fetcher.fetch().await.unwrap();

        mock.assert_async().await;
        assert!(resp.success);
        assert_eq!(resp.destination, "https://example.com/start");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/config")
            .with_status(503)
            .create_async()
            .await;

        let fetcher =
            HttpFetcher::new(format!("{}/config", server.url()), Duration::from_secs(5)).unwrap();
        assert!(matches!(fetcher.fetch().await, Err(FetchError::Status(503))));
    }

    #[tokio::test]
    async fn html_body_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/config")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let fetcher =
            HttpFetcher::new(format!("{}/config", server.url()), Duration::from_secs(5)).unwrap();
        assert!(matches!(fetcher.fetch().await, Err(FetchError::Malformed(_))));
    }
}
