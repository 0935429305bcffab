//! Login wire types and the in-memory session user.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

/// Both fields are nullable on the wire; a login only counts when both
/// are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Error body of a non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

impl ProblemDetails {
    /// First non-empty message, if any.
    pub fn first(&self) -> Option<&str> {
        self.errors
            .as_ref()
            .and_then(|e| e.first())
            .map(String::as_str)
            .filter(|m| !m.is_empty())
    }
}

/// The logged-in operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub user_name: String,
}
