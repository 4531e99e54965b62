//! HTTP response data model.
//!
//! An [`ApiResponse`] is what every GET issued by the client resolves to: the
//! status line, the headers, the raw body and how long the exchange took.

use super::post::Post;
use crate::assertions::ValidatableResponse;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Represents an HTTP response received from the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Identifier of the request this response answers, used in log lines.
    pub request_id: String,

    /// The fully resolved URL that was requested.
    pub url: String,

    /// HTTP status code (e.g., 200, 404).
    pub status_code: u16,

    /// HTTP status text (e.g., "OK", "Not Found").
    pub status_text: String,

    /// Response headers. Names are stored lower-cased.
    pub headers: HashMap<String, String>,

    /// Response body as raw bytes.
    pub body: Vec<u8>,

    /// Time from sending the request to receiving the full body.
    pub duration: Duration,
}

impl ApiResponse {
    /// Creates a new ApiResponse with the given status code and text.
    pub fn new(status_code: u16, status_text: impl Into<String>) -> Self {
        Self {
            request_id: String::new(),
            url: String::new(),
            status_code,
            status_text: status_text.into(),
            headers: HashMap::new(),
            body: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Checks if the response status indicates a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    /// Looks up a header, ignoring the case of `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Adds a header to the response. The name is lower-cased.
    pub fn add_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Sets the response body.
    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
    }

    /// Returns the body as a UTF-8 string, replacing invalid sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Checks whether the body carries no content.
    ///
    /// A zero-length or whitespace-only body is empty, and so is a body that
    /// is an empty JSON object or array.
    pub fn is_body_empty(&self) -> bool {
        let text = self.body_text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return true;
        }

        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(map)) => map.is_empty(),
            Ok(Value::Array(items)) => items.is_empty(),
            _ => false,
        }
    }

    /// Decodes the body into any deserializable type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Decodes the body as a generic JSON value.
    pub fn json_value(&self) -> Result<Value, serde_json::Error> {
        self.json()
    }

    /// Decodes the body as a single post.
    pub fn post(&self) -> Result<Post, serde_json::Error> {
        self.json()
    }

    /// Decodes the body as an ordered list of posts.
    pub fn posts(&self) -> Result<Vec<Post>, serde_json::Error> {
        self.json()
    }

    /// Starts an assertion chain over this response.
    pub fn then(&self) -> ValidatableResponse<'_> {
        ValidatableResponse::new(self)
    }
}
