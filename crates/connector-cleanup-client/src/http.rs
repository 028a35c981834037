// crates/connector-cleanup-client/src/http.rs
// ============================================================================
// Module: HTTP Management Client
// Description: Blocking reqwest transport for management API requests.
// Purpose: Send requests with fixed headers and limits and normalize responses.
// Dependencies: connector-cleanup-core, reqwest, serde_json, tracing
// ============================================================================

//! ## Overview
//! [`HttpManagementClient`] resolves each request against
//! `<base url><management prefix>/<segments>`, percent-encoding every
//! segment, and authenticates with the `X-API-Key` header. Network errors,
//! oversized bodies, and read failures become
//! [`Outcome::TransportException`]; every received response is classified by
//! [`Outcome::from_response`].
//!
//! ## Invariants
//! - Exactly one network call per [`ManagementApi::send`].
//! - Redirects are not followed.
//! - Response bodies never exceed `max_response_bytes` in memory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::io::Read;
use std::time::Duration;

use connector_cleanup_core::ApiRequest;
use connector_cleanup_core::HttpMethod;
use connector_cleanup_core::ManagementApi;
use connector_cleanup_core::Outcome;
use reqwest::Method;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::redirect::Policy;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Header carrying the management API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Media type of every request and expected response.
const JSON_MEDIA_TYPE: &str = "application/json";

/// Returns the user agent sent with every request.
#[must_use]
pub fn default_user_agent() -> String {
    format!("connector-cleanup/{}", env!("CARGO_PKG_VERSION"))
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the HTTP management client.
///
/// # Invariants
/// - `base_url` must be a hierarchical `http` or `https` URL.
/// - `max_response_bytes` is a hard upper bound on response bodies.
/// - `timeout` applies to the full request lifecycle.
#[derive(Clone, PartialEq, Eq)]
pub struct ManagementClientConfig {
    /// Connector base URL.
    pub base_url: Url,
    /// Management API path prefix such as `/data`.
    pub management_prefix: String,
    /// Management API key.
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// User agent for outbound requests.
    pub user_agent: String,
}

impl fmt::Debug for ManagementClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagementClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("management_prefix", &self.management_prefix)
            .field("api_key", &"[redacted]")
            .field("timeout", &self.timeout)
            .field("max_response_bytes", &self.max_response_bytes)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while constructing the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL cannot carry path segments.
    #[error("base url cannot be used as a management endpoint: {0}")]
    InvalidBaseUrl(String),
    /// The API key is not a valid header value.
    #[error("api key is not a valid header value")]
    InvalidApiKey,
    /// The underlying HTTP client could not be built.
    #[error("http client build failed: {0}")]
    Build(String),
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking management API client.
pub struct HttpManagementClient {
    /// Base URL with the management prefix segments applied.
    endpoint: Url,
    /// HTTP client with default headers and timeout.
    client: Client,
    /// Maximum response size allowed, in bytes.
    max_response_bytes: usize,
}

impl HttpManagementClient {
    /// Builds a client from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the base URL or API key is unusable or
    /// the HTTP client cannot be created.
    pub fn new(config: ManagementClientConfig) -> Result<Self, ClientError> {
        let prefix: Vec<&str> =
            config.management_prefix.split('/').filter(|segment| !segment.is_empty()).collect();
        let endpoint = append_segments(&config.base_url, &prefix)
            .ok_or_else(|| ClientError::InvalidBaseUrl(config.base_url.to_string()))?;

        let mut api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| ClientError::InvalidApiKey)?;
        api_key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MEDIA_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MEDIA_TYPE));

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .redirect(Policy::none())
            .build()
            .map_err(|err| ClientError::Build(err.to_string()))?;
        Ok(Self {
            endpoint,
            client,
            max_response_bytes: config.max_response_bytes,
        })
    }

    /// Returns the absolute URL a request is sent to.
    #[must_use]
    pub fn url_for(&self, request: &ApiRequest) -> Option<Url> {
        let segments: Vec<&str> = request.path.segments().iter().map(String::as_str).collect();
        let mut url = append_segments(&self.endpoint, &segments)?;
        if !request.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(request.query.iter().map(|(key, value)| (key.as_str(), value.as_str())));
        }
        Some(url)
    }
}

impl ManagementApi for HttpManagementClient {
    fn send(&self, request: &ApiRequest) -> Outcome {
        let Some(url) = self.url_for(request) else {
            return Outcome::transport("request url could not be built");
        };
        tracing::debug!(
            operation = %request.operation,
            method = request.method.as_str(),
            url = %url,
            payload = %request.body.as_ref().map_or_else(|| "N/A".to_string(), ToString::to_string),
            "sending management request"
        );

        let mut builder = self.client.request(method_for(request.method), url);
        if let Some(body) = &request.body {
            match serde_json::to_vec(body) {
                Ok(bytes) => builder = builder.body(bytes),
                Err(err) => return Outcome::transport(format!("request body encoding failed: {err}")),
            }
        }

        let mut response = match builder.send() {
            Ok(response) => response,
            Err(err) => {
                let message = if err.is_timeout() {
                    "request timed out".to_string()
                } else {
                    format!("request failed: {err}")
                };
                tracing::debug!(operation = %request.operation, error = %message, "management request failed");
                return Outcome::transport(message);
            }
        };
        let status = response.status().as_u16();
        tracing::debug!(operation = %request.operation, status, "management response received");
        match read_response_limited(&mut response, self.max_response_bytes) {
            Ok(body) => Outcome::from_response(status, &body),
            Err(message) => Outcome::transport(message),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Maps a core verb onto the reqwest method.
fn method_for(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Appends percent-encoded path segments, replacing a trailing empty segment.
fn append_segments(base: &Url, segments: &[&str]) -> Option<Url> {
    let mut url = base.clone();
    url.path_segments_mut().ok()?.pop_if_empty().extend(segments);
    Some(url)
}

/// Reads a response body while enforcing a maximum size.
fn read_response_limited(response: &mut Response, max_bytes: usize) -> Result<Vec<u8>, String> {
    let max_bytes_u64 =
        u64::try_from(max_bytes).map_err(|_| "response size limit exceeds u64".to_string())?;
    let expected_len = response.content_length();
    if let Some(expected) = expected_len
        && expected > max_bytes_u64
    {
        return Err(format!("response exceeds size limit of {max_bytes} bytes"));
    }
    let mut buf = Vec::new();
    response
        .take(max_bytes_u64.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|err| format!("failed to read response: {err}"))?;
    if buf.len() > max_bytes {
        return Err(format!("response exceeds size limit of {max_bytes} bytes"));
    }
    if let Some(expected) = expected_len {
        let expected =
            usize::try_from(expected).map_err(|_| "invalid response length".to_string())?;
        if buf.len() < expected {
            return Err(format!("response truncated: {} of {expected} bytes", buf.len()));
        }
    }
    Ok(buf)
}
