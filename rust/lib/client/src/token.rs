//! Pluggable bearer-token providers.

use crate::ApiError;

/// Pluggable token provider. Called before every API request.
///
/// Returns `Ok(None)` when no session exists; protected endpoints are then
/// rejected before anything is sent.
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync + 'static {
    async fn token(&self) -> Result<Option<String>, ApiError>;
}

/// No token: only login and health requests can succeed.
pub struct NoAuth;

#[async_trait::async_trait]
impl TokenSource for NoAuth {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(None)
    }
}

/// Static bearer token (already obtained externally).
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait::async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(Some(self.0.clone()))
    }
}

/// Token slot that a login fills and a logout empties.
///
/// Shared between the [`AuthSession`](crate::AuthSession) that writes it and
/// the [`ApiClient`](crate::ApiClient) that reads it.
#[derive(Default)]
pub struct SharedToken {
    slot: tokio::sync::RwLock<Option<String>>,
}

impl SharedToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, token: Option<String>) {
        *self.slot.write().await = token.filter(|t| !t.is_empty());
    }

    pub async fn get(&self) -> Option<String> {
        self.slot.read().await.clone()
    }
}

#[async_trait::async_trait]
impl TokenSource for SharedToken {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(self.get().await)
    }
}
