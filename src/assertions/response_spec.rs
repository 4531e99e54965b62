//! Expectations shared by every response.

use super::AssertionError;
use crate::config::ApiClientConfig;
use crate::models::ApiResponse;

/// The common response specification: checks applied to every response in
/// addition to its case-specific assertions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseSpec {
    expected_content_type: Option<String>,
    expected_status: Option<u16>,
}

impl ResponseSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the specification the suite applies, from configuration.
    pub fn from_config(config: &ApiClientConfig) -> Self {
        Self::new().content_type(&config.expected_content_type)
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.expected_content_type = Some(content_type.into());
        self
    }

    pub fn status(mut self, status: u16) -> Self {
        self.expected_status = Some(status);
        self
    }

    pub fn expected_content_type(&self) -> Option<&str> {
        self.expected_content_type.as_deref()
    }

    /// Checks `response` against every expectation that is set.
    pub fn verify(&self, response: &ApiResponse) -> Result<(), AssertionError> {
        if let Some(expected) = self.expected_status {
            if response.status_code != expected {
                return Err(AssertionError::status(expected, response));
            }
        }

        if let Some(expected) = &self.expected_content_type {
            let actual = response.content_type();
            let matches = actual.map_or(false, |actual| {
                normalize_media_type(actual) == normalize_media_type(expected)
            });
            if !matches {
                return Err(AssertionError::ContentTypeMismatch {
                    expected: expected.clone(),
                    actual: actual.map(str::to_string),
                });
            }
        }

        Ok(())
    }
}

/// Lower-cases a media type and drops the whitespace around its parameters,
/// so `Application/JSON;charset=UTF-8` equals `application/json; charset=utf-8`.
fn normalize_media_type(value: &str) -> String {
    value
        .split(';')
        .map(|part| part.trim().to_ascii_lowercase())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(";")
}
