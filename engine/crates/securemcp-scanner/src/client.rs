//! HTTP probe client shared by every check module

use crate::ScanConfig;
use reqwest::{header, Client, Method};
use std::collections::HashMap;
use std::error::Error as _;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// HTTP client errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Connection refused by {0}")]
    ConnectionRefused(String),

    #[error("Timeout requesting {url} after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("SSL/TLS error: {0}")]
    Tls(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

impl From<ClientError> for securemcp_core::Error {
    fn from(err: ClientError) -> Self {
        use securemcp_core::Error;
        match err {
            ClientError::ConnectionRefused(target) => Error::TargetUnreachable { target },
            ClientError::Timeout { url, seconds } => Error::ConnectionTimeout {
                target: url,
                seconds,
            },
            ClientError::InvalidUrl(url) => Error::InvalidTarget(url),
            ClientError::Tls(msg) => Error::Tls(msg),
            ClientError::Build(msg) => Error::Configuration(msg),
            ClientError::Request(e) => Error::Transport(e.to_string()),
        }
    }
}

/// HTTP response wrapper
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Response headers (names lowercased)
    pub headers: HashMap<String, String>,
    /// Response body
    pub body: String,
    /// Final URL (after redirects)
    pub final_url: String,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl HttpResponse {
    /// Check if response is 401 Unauthorized
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Get header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&String> {
        let name_lower = name.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == name_lower)
            .map(|(_, v)| v)
    }

    /// Check whether a header is present with a non-empty value
    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).map(|v| !v.is_empty()).unwrap_or(false)
    }
}

/// Timeout-bound HTTP client.
///
/// Constructed once per scan and cloned into each check module; clones share
/// the underlying connection pool.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: &ScanConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout_duration())
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            client,
            timeout: config.timeout_duration(),
        })
    }

    /// The request timeout applied when a probe does not override it
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform a GET request
    pub async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, ClientError> {
        self.request(Method::GET, url, &[], None, timeout).await
    }

    /// Perform a GET request carrying an `Authorization` header
    pub async fn get_with_authorization(
        &self,
        url: &str,
        authorization: &str,
        timeout: Duration,
    ) -> Result<HttpResponse, ClientError> {
        self.request(
            Method::GET,
            url,
            &[(header::AUTHORIZATION.as_str(), authorization)],
            None,
            timeout,
        )
        .await
    }

    /// Perform a POST request with JSON body
    pub async fn post_json(
        &self,
        url: &str,
        body: &str,
        timeout: Duration,
    ) -> Result<HttpResponse, ClientError> {
        self.request(Method::POST, url, &[], Some(body), timeout).await
    }

    /// Perform a HEAD request
    pub async fn head(&self, url: &str, timeout: Duration) -> Result<HttpResponse, ClientError> {
        self.request(Method::HEAD, url, &[], None, timeout).await
    }

    /// Perform a custom request
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&str>,
        timeout: Duration,
    ) -> Result<HttpResponse, ClientError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", url, e)))?;

        debug!("{} {}", method, parsed);
        let start = Instant::now();

        let mut request = self.client.request(method, parsed).timeout(timeout);

        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        if let Some(json_body) = body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(json_body.to_string());
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_send_error(e, url, timeout))?;

        let response_time_ms = start.elapsed().as_millis() as u64;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();

        debug!(
            "{} answered {} in {}ms (final url {})",
            url, status, response_time_ms, final_url
        );

        // Non-ASCII values still count as present
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        // Body is only informational; a truncated body is not a transport failure
        let body = response.text().await.unwrap_or_default();

        Ok(HttpResponse {
            status,
            headers,
            body,
            final_url,
            response_time_ms,
        })
    }
}

fn classify_send_error(err: reqwest::Error, url: &str, timeout: Duration) -> ClientError {
    if err.is_timeout() {
        return ClientError::Timeout {
            url: url.to_string(),
            seconds: timeout.as_secs(),
        };
    }

    // The top-level message embeds the URL, so only the causes are inspected
    let causes = err.source().map(error_chain).unwrap_or_default();
    if causes.contains("certificate") || causes.contains("handshake") || causes.contains("ssl") {
        ClientError::Tls(error_chain(&err.without_url()))
    } else if err.is_connect() {
        ClientError::ConnectionRefused(url.to_string())
    } else {
        ClientError::Request(err)
    }
}

/// Flatten an error and its sources into one lowercase string
pub(crate) fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ").to_lowercase()
}
