//! Assertions over API responses.
//!
//! A response is checked by chaining assertions on the [`ValidatableResponse`]
//! returned by [`ApiResponse::then`]. Each assertion either passes and hands
//! the chain back, or stops it with an [`AssertionError`]:
//!
//! ```no_run
//! use posts_api_check::assertions::{JsonSchema, ResponseSpec};
//! use posts_api_check::client::{PostsClient, RequestSpec};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PostsClient::new(RequestSpec::builder().build()?)?;
//! let common = ResponseSpec::new().content_type("application/json; charset=utf-8");
//!
//! let response = client.get_post(1)?;
//! response
//!     .then()
//!     .status(200)?
//!     .spec(&common)?
//!     .matches_schema(&JsonSchema::post()?)?
//!     .field_equals("id", 1)?;
//! # Ok(())
//! # }
//! ```

pub mod matchers;
pub mod response_spec;
pub mod schema;

pub use matchers::{assert_all, assert_all_match, assert_at_most, assert_empty, assert_not_empty};
pub use response_spec::ResponseSpec;
pub use schema::{JsonSchema, SchemaError};

use crate::models::filter::abbreviate;
use crate::models::{ApiResponse, Post};
use serde_json::Value;
use thiserror::Error;

/// Longest body excerpt carried in an error message.
const BODY_EXCERPT_CHARS: usize = 200;

/// A failed expectation about a response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssertionError {
    #[error("expected status {expected}, got {actual} (body: {body})")]
    StatusMismatch {
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error(
        "expected content type {expected:?}, got {}",
        .actual.as_deref().map(|a| format!("{:?}", a)).unwrap_or_else(|| "none".to_string())
    )]
    ContentTypeMismatch {
        expected: String,
        actual: Option<String>,
    },

    #[error("body does not match {schema}: {}", .violations.join("; "))]
    SchemaMismatch {
        schema: String,
        violations: Vec<String>,
    },

    #[error(
        "expected {pointer} to be {expected}, got {}",
        .actual.as_ref().map(Value::to_string).unwrap_or_else(|| "nothing".to_string())
    )]
    FieldMismatch {
        pointer: String,
        expected: Value,
        actual: Option<Value>,
    },

    #[error("record #{index} (id {id}) {reason}")]
    RecordMismatch { index: usize, id: i64, reason: String },

    #[error("expected at least one record, got none")]
    UnexpectedEmpty,

    #[error("expected {expected} records, got {actual}")]
    UnexpectedCount { expected: String, actual: usize },

    #[error("expected an empty body, got: {body}")]
    BodyNotEmpty { body: String },

    #[error("body is not a valid {target}: {message}")]
    Decode {
        target: &'static str,
        message: String,
    },
}

impl AssertionError {
    pub(crate) fn status(expected: u16, response: &ApiResponse) -> Self {
        AssertionError::StatusMismatch {
            expected,
            actual: response.status_code,
            body: excerpt(response),
        }
    }

    fn decode(target: &'static str, err: serde_json::Error) -> Self {
        AssertionError::Decode {
            target,
            message: err.to_string(),
        }
    }
}

fn excerpt(response: &ApiResponse) -> String {
    let text = response.body_text();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        "<empty>".to_string()
    } else {
        abbreviate(trimmed, BODY_EXCERPT_CHARS)
    }
}

/// Assertion chain over one response.
#[derive(Debug, Clone, Copy)]
pub struct ValidatableResponse<'a> {
    response: &'a ApiResponse,
}

impl<'a> ValidatableResponse<'a> {
    pub fn new(response: &'a ApiResponse) -> Self {
        Self { response }
    }

    pub fn response(&self) -> &'a ApiResponse {
        self.response
    }

    /// The status code equals `expected`.
    pub fn status(&self, expected: u16) -> Result<&Self, AssertionError> {
        if self.response.status_code != expected {
            return Err(AssertionError::status(expected, self.response));
        }
        Ok(self)
    }

    /// The response satisfies the common response specification.
    pub fn spec(&self, spec: &ResponseSpec) -> Result<&Self, AssertionError> {
        spec.verify(self.response)?;
        Ok(self)
    }

    /// The body is JSON matching `schema`.
    pub fn matches_schema(&self, schema: &JsonSchema) -> Result<&Self, AssertionError> {
        let value = self.json_value()?;
        schema
            .validate(&value)
            .map_err(|violations| AssertionError::SchemaMismatch {
                schema: schema.name().to_string(),
                violations,
            })?;
        Ok(self)
    }

    /// The JSON value at `pointer` equals `expected`.
    ///
    /// `pointer` is a JSON pointer; a bare field name such as `id` is read as
    /// `/id`.
    pub fn field_equals(
        &self,
        pointer: &str,
        expected: impl Into<Value>,
    ) -> Result<&Self, AssertionError> {
        let expected = expected.into();
        let pointer = if pointer.starts_with('/') || pointer.is_empty() {
            pointer.to_string()
        } else {
            format!("/{}", pointer)
        };

        let value = self.json_value()?;
        let actual = value.pointer(&pointer);
        if actual != Some(&expected) {
            return Err(AssertionError::FieldMismatch {
                pointer,
                expected,
                actual: actual.cloned(),
            });
        }
        Ok(self)
    }

    /// The body carries no content (see [`ApiResponse::is_body_empty`]).
    pub fn body_is_empty(&self) -> Result<&Self, AssertionError> {
        if !self.response.is_body_empty() {
            return Err(AssertionError::BodyNotEmpty {
                body: excerpt(self.response),
            });
        }
        Ok(self)
    }

    /// The body is a JSON array of exactly `expected` elements.
    pub fn list_size(&self, expected: usize) -> Result<&Self, AssertionError> {
        let actual = self.array_len()?;
        if actual != expected {
            return Err(AssertionError::UnexpectedCount {
                expected: expected.to_string(),
                actual,
            });
        }
        Ok(self)
    }

    /// The body is a JSON array with at least one element.
    pub fn list_not_empty(&self) -> Result<&Self, AssertionError> {
        if self.array_len()? == 0 {
            return Err(AssertionError::UnexpectedEmpty);
        }
        Ok(self)
    }

    /// Decodes the body as one post.
    pub fn extract_post(&self) -> Result<Post, AssertionError> {
        self.response
            .post()
            .map_err(|e| AssertionError::decode("post", e))
    }

    /// Decodes the body as a list of posts.
    pub fn extract_posts(&self) -> Result<Vec<Post>, AssertionError> {
        self.response
            .posts()
            .map_err(|e| AssertionError::decode("post list", e))
    }

    fn json_value(&self) -> Result<Value, AssertionError> {
        self.response
            .json_value()
            .map_err(|e| AssertionError::decode("JSON document", e))
    }

    fn array_len(&self) -> Result<usize, AssertionError> {
        match self.json_value()? {
            Value::Array(items) => Ok(items.len()),
            other => Err(AssertionError::Decode {
                target: "JSON array",
                message: format!("found {}", json_kind(&other)),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
