// crates/network/src/client.rs
//! HTTP client for fetching feeds

use crate::error::{NetworkError, NetworkResult};
use podfeed_extractor::{PartialOptions, Podcast};
use podfeed_feed_parser::FeedParser;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as ReqwestClient, StatusCode};
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Time allowed for the whole fetch, body included
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Extra headers sent with every request
    pub headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("podfeed/{}", env!("CARGO_PKG_VERSION")),
            headers: Vec::new(),
        }
    }
}

impl ClientConfig {
    /// Sets the fetch timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Feed fetching client
#[derive(Debug, Clone)]
pub struct Client {
    inner: ReqwestClient,
    config: ClientConfig,
}

impl Client {
    /// Creates a new client with default configuration
    pub fn new() -> NetworkResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> NetworkResult<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| NetworkError::InvalidHeader(name.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| NetworkError::InvalidHeader(format!("{}: {}", name, value)))?;
            headers.append(header_name, header_value);
        }

        let client = ReqwestClient::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(NetworkError::Http)?;

        Ok(Self {
            inner: client,
            config,
        })
    }

    /// Returns the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Downloads a feed body
    ///
    /// The request is abandoned once the configured timeout elapses.
    pub async fn fetch_feed(&self, url: &str) -> NetworkResult<String> {
        let timeout = self.config.timeout;
        let body = tokio::time::timeout(timeout, self.request(url))
            .await
            .map_err(|_| NetworkError::Timeout(timeout))??;

        log::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }

    /// Downloads a feed and extracts the podcast from it
    pub async fn fetch_podcast(
        &self,
        url: &str,
        options: Option<&PartialOptions>,
    ) -> NetworkResult<Podcast> {
        let body = self.fetch_feed(url).await?;
        Ok(FeedParser::parse_podcast(&body, options)?)
    }

    async fn request(&self, url: &str) -> NetworkResult<String> {
        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(NetworkError::Unauthorized {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            log::warn!("Feed request to {} failed with HTTP {}", url, status.as_u16());
            return Err(NetworkError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(|e| self.map_reqwest_error(e))
    }

    fn map_reqwest_error(&self, err: reqwest::Error) -> NetworkError {
        if err.is_timeout() {
            NetworkError::Timeout(self.config.timeout)
        } else {
            NetworkError::Http(err)
        }
    }
}

/// Fetches a feed with the default client and extracts the podcast
pub async fn get_podcast_from_url(
    url: &str,
    options: Option<&PartialOptions>,
) -> NetworkResult<Podcast> {
    Client::new()?.fetch_podcast(url, options).await
}
