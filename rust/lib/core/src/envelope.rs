//! Uniform outcome of every API call: `{success, data, error}`.

use serde::{Deserialize, Serialize};

use crate::ApiError;

/// Outcome of a single API call.
///
/// `success` with `data: None` is legal: DELETE and empty 2xx bodies carry
/// no payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: Option<T>) -> Self {
        Self { success: true, data, error: None }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(error.into()) }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Transform the payload, keeping success/error untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
        }
    }

    /// Convert into a `Result` for `?`-style callers.
    ///
    /// A failure without a message becomes `"unknown error"`.
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.error.unwrap_or_else(|| "unknown error".to_string()))
        }
    }
}

impl<T> From<Result<Option<T>, ApiError>> for Envelope<T> {
    fn from(result: Result<Option<T>, ApiError>) -> Self {
        match result {
            Ok(data) => Envelope::ok(data),
            Err(e) => Envelope::fail(e.to_string()),
        }
    }
}
