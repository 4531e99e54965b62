//! HTTP client for the posts API.
//!
//! A [`RequestSpec`] holds the settings every request shares: the base
//! address, the content type, default headers and transport options. A
//! [`PostsClient`] applies it to each GET it issues and returns the complete
//! [`ApiResponse`].
//!
//! Requests are synchronous. One call issues exactly one unauthenticated GET;
//! there is no retry.

pub mod error;
pub mod logging;

pub use error::RequestError;

use crate::config::{ApiClientConfig, DEFAULT_BASE_URL};
use crate::models::{ApiResponse, PostFilter};
use reqwest::redirect::Policy;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use url::Url;
use uuid::Uuid;

/// Path of the posts collection, relative to the base address.
pub const POSTS_PATH: &str = "posts";

/// Base request specification shared by every request.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    base_url: Url,
    content_type: String,
    headers: HashMap<String, String>,
    timeout: Duration,
    follow_redirects: bool,
    max_redirects: u32,
    validate_ssl: bool,
    log_exchanges: bool,
}

impl RequestSpec {
    pub fn builder() -> RequestSpecBuilder {
        RequestSpecBuilder::default()
    }

    /// Builds the specification from configuration.
    pub fn from_config(config: &ApiClientConfig) -> Result<Self, RequestError> {
        let mut builder = RequestSpec::builder()
            .base_url(&config.base_url)
            .content_type(&config.content_type)
            .timeout(config.timeout_duration())
            .follow_redirects(config.follow_redirects)
            .max_redirects(config.max_redirects)
            .validate_ssl(config.validate_ssl)
            .log_exchanges(config.log_exchanges);

        for (name, value) in &config.default_headers {
            builder = builder.header(name, value);
        }

        builder.build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn log_exchanges(&self) -> bool {
        self.log_exchanges
    }

    /// Resolves `path` against the base address and appends `query` in order.
    ///
    /// The base address path is treated as a directory, so `posts/1` on
    /// `https://host/api` resolves to `https://host/api/posts/1`.
    pub fn resolve(&self, path: &str, query: &[(&str, String)]) -> Result<Url, RequestError> {
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// Headers sent with every request, the content type included.
    fn request_headers(&self) -> HashMap<String, String> {
        let mut headers: HashMap<String, String> = self
            .headers
            .iter()
            .filter(|(name, _)| !name.eq_ignore_ascii_case("content-type"))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        headers.insert("Content-Type".to_string(), self.content_type.clone());
        headers
    }
}

/// Builder for [`RequestSpec`].
#[derive(Debug, Clone)]
pub struct RequestSpecBuilder {
    base_url: String,
    content_type: String,
    headers: HashMap<String, String>,
    timeout: Duration,
    follow_redirects: bool,
    max_redirects: u32,
    validate_ssl: bool,
    log_exchanges: bool,
}

impl Default for RequestSpecBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            content_type: "application/json".to_string(),
            headers: HashMap::new(),
            timeout: Duration::from_secs(30),
            follow_redirects: true,
            max_redirects: 10,
            validate_ssl: true,
            log_exchanges: true,
        }
    }
}

impl RequestSpecBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    pub fn max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn validate_ssl(mut self, validate: bool) -> Self {
        self.validate_ssl = validate;
        self
    }

    pub fn log_exchanges(mut self, enabled: bool) -> Self {
        self.log_exchanges = enabled;
        self
    }

    /// Validates the base address and produces the specification.
    pub fn build(self) -> Result<RequestSpec, RequestError> {
        if self.timeout.is_zero() {
            return Err(RequestError::BuildError(
                "timeout must be greater than 0".to_string(),
            ));
        }

        Ok(RequestSpec {
            base_url: parse_base_url(&self.base_url)?,
            content_type: self.content_type,
            headers: self.headers,
            timeout: self.timeout,
            follow_redirects: self.follow_redirects,
            max_redirects: self.max_redirects,
            validate_ssl: self.validate_ssl,
            log_exchanges: self.log_exchanges,
        })
    }
}

/// Parses the base address, checks its protocol and makes its path a
/// directory so relative paths join below it.
fn parse_base_url(raw: &str) -> Result<Url, RequestError> {
    let mut url = Url::parse(raw.trim())?;

    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(RequestError::UnsupportedProtocol(format!(
            "Only HTTP and HTTPS are supported, got: {}",
            scheme
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

/// Blocking client for the posts collection.
#[derive(Debug, Clone)]
pub struct PostsClient {
    spec: RequestSpec,
    http: reqwest::blocking::Client,
}

impl PostsClient {
    /// Creates a client applying `spec` to every request.
    pub fn new(spec: RequestSpec) -> Result<Self, RequestError> {
        let redirect = if spec.follow_redirects {
            Policy::limited(spec.max_redirects as usize)
        } else {
            Policy::none()
        };

        let http = reqwest::blocking::Client::builder()
            .timeout(spec.timeout)
            .redirect(redirect)
            .danger_accept_invalid_certs(!spec.validate_ssl)
            .build()
            .map_err(|e| RequestError::BuildError(e.to_string()))?;

        Ok(Self { spec, http })
    }

    pub fn from_config(config: &ApiClientConfig) -> Result<Self, RequestError> {
        Self::new(RequestSpec::from_config(config)?)
    }

    pub fn spec(&self) -> &RequestSpec {
        &self.spec
    }

    /// Issues a GET for `path` with the given query parameters.
    ///
    /// Any status code is a successful exchange; only transport failures are
    /// errors.
    pub fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse, RequestError> {
        let url = self.spec.resolve(path, query)?;
        let request_id = Uuid::new_v4().to_string();
        let headers = self.spec.request_headers();

        if self.spec.log_exchanges {
            logging::log_request(&request_id, "GET", &url, &headers);
        }

        let mut builder = self.http.get(url.clone());
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let started = Instant::now();
        let response = builder.send()?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();

        let mut response_headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                response_headers.insert(name.as_str().to_ascii_lowercase(), value.to_string());
            }
        }

        let body = response.bytes()?.to_vec();

        let api_response = ApiResponse {
            request_id,
            url: url.to_string(),
            status_code: status.as_u16(),
            status_text,
            headers: response_headers,
            body,
            duration: started.elapsed(),
        };

        if self.spec.log_exchanges {
            logging::log_response(&api_response);
        }

        Ok(api_response)
    }

    /// GET `posts/{id}`.
    pub fn get_post(&self, id: i64) -> Result<ApiResponse, RequestError> {
        self.get(&format!("{}/{}", POSTS_PATH, id), &[])
    }

    /// GET `posts` with the filter's query parameters.
    pub fn list_posts(&self, filter: &PostFilter) -> Result<ApiResponse, RequestError> {
        self.get(POSTS_PATH, &filter.query_pairs())
    }

    /// GET `posts` without parameters.
    pub fn list_all(&self) -> Result<ApiResponse, RequestError> {
        self.get(POSTS_PATH, &[])
    }
}
