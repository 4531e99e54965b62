//! HTTP request error types.
//!
//! Errors that can occur while building or sending a request, as opposed to
//! assertion failures on a response that did arrive.

use thiserror::Error;

/// Errors that can occur during request execution.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Connection failures, DNS resolution errors and other network-level
    /// issues.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The request took longer than the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The base address or a resolved URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Certificate validation or handshake failure.
    #[error("TLS/SSL error: {0}")]
    TlsError(String),

    /// Constructing the request or the client failed.
    #[error("Request build error: {0}")]
    BuildError(String),

    /// Only HTTP and HTTPS are supported.
    #[error("Unsupported protocol: {0}")]
    UnsupportedProtocol(String),
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RequestError::Timeout
        } else if err.is_builder() {
            RequestError::BuildError(err.to_string())
        } else if err.is_connect() || err.is_request() {
            if mentions_tls(&err) {
                RequestError::TlsError(err.to_string())
            } else {
                RequestError::NetworkError(err.to_string())
            }
        } else if mentions_tls(&err) {
            RequestError::TlsError(err.to_string())
        } else {
            RequestError::NetworkError(err.to_string())
        }
    }
}

/// Whether the causes of `err` point at certificate or handshake trouble.
///
/// Only the source chain is inspected: the top-level message embeds the
/// request URL, query values included.
fn mentions_tls(err: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let message = cause.to_string();
        if message.contains("certificate") || message.contains("TLS") || message.contains("SSL")
        {
            return true;
        }
        source = cause.source();
    }
    false
}

impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        RequestError::InvalidUrl(err.to_string())
    }
}
