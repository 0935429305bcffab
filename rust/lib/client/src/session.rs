//! Logged-in operator and token, kept in memory and persisted.

use std::sync::{Arc, Mutex, PoisonError};

use malha_core::{ApiConfig, ApiError};
use malha_model::{LoginRequest, SessionUser};
use tracing::{debug, info};

use crate::{ApiClient, SharedToken};

/// Error returned by a persistence backend.
pub type PersistError = Box<dyn std::error::Error + Send + Sync>;

/// Where the session survives between runs.
pub trait SessionPersistence: Send + Sync + 'static {
    /// Stored user and token, if both exist.
    fn load(&self) -> Option<(SessionUser, String)>;
    fn save(&self, user: &SessionUser, token: &str) -> Result<(), PersistError>;
    fn clear(&self) -> Result<(), PersistError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The server refused the credentials or answered without a token.
    #[error("{0}")]
    Rejected(String),

    #[error("failed to persist session: {0}")]
    Persist(#[source] PersistError),
}

/// Process-local persistence, used by tests and one-shot tools.
#[derive(Default)]
pub struct MemoryPersistence {
    slot: Mutex<Option<(SessionUser, String)>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a stored session, as if a previous run had logged in.
    pub fn with_session(user: SessionUser, token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some((user, token.into()))),
        }
    }
}

impl SessionPersistence for MemoryPersistence {
    fn load(&self) -> Option<(SessionUser, String)> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn save(&self, user: &SessionUser, token: &str) -> Result<(), PersistError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) =
            Some((user.clone(), token.to_string()));
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Authentication context: the current user plus the token every request
/// of [`AuthSession::client`] carries.
pub struct AuthSession {
    api: ApiClient,
    token: Arc<SharedToken>,
    user: tokio::sync::RwLock<Option<SessionUser>>,
    persistence: Arc<dyn SessionPersistence>,
}

impl AuthSession {
    pub fn new(config: ApiConfig, persistence: Arc<dyn SessionPersistence>) -> Result<Self, ApiError> {
        let token = Arc::new(SharedToken::new());
        let api = ApiClient::new(config, token.clone())?;
        Ok(Self {
            api,
            token,
            user: tokio::sync::RwLock::new(None),
            persistence,
        })
    }

    /// Client bound to this session's token.
    pub fn client(&self) -> &ApiClient {
        &self.api
    }

    /// Reload a persisted session. Only a stored user *and* token count.
    pub async fn restore(&self) -> bool {
        match self.persistence.load() {
            Some((user, token)) if !token.is_empty() && !user.user_name.is_empty() => {
                debug!(user = %user.user_name, "session restored");
                self.token.set(Some(token)).await;
                *self.user.write().await = Some(user);
                true
            }
            _ => false,
        }
    }

    /// Log in; on success the token is installed and persisted.
    pub async fn login(&self, user_name: &str, password: &str) -> Result<SessionUser, SessionError> {
        let credentials = LoginRequest {
            user_name: user_name.to_string(),
            password: password.to_string(),
        };
        let envelope = self.api.login(&credentials).await;

        let granted = envelope
            .data
            .as_ref()
            .filter(|_| envelope.success)
            .and_then(|r| match (&r.user_name, &r.token) {
                (Some(u), Some(t)) if !u.is_empty() && !t.is_empty() => Some((u.clone(), t.clone())),
                _ => None,
            });

        let Some((name, token)) = granted else {
            let reason = envelope
                .error
                .unwrap_or_else(|| "invalid credentials".to_string());
            return Err(SessionError::Rejected(reason));
        };

        let user = SessionUser { user_name: name };
        self.token.set(Some(token.clone())).await;
        *self.user.write().await = Some(user.clone());
        self.persistence
            .save(&user, &token)
            .map_err(SessionError::Persist)?;

        info!(user = %user.user_name, "logged in");
        Ok(user)
    }

    /// Forget the user and token, in memory and in persistence.
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.token.set(None).await;
        *self.user.write().await = None;
        self.persistence.clear().map_err(SessionError::Persist)
    }

    pub async fn user(&self) -> Option<SessionUser> {
        self.user.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(persistence: Arc<dyn SessionPersistence>) -> AuthSession {
        AuthSession::new(ApiConfig::new("http://127.0.0.1:9"), persistence).unwrap()
    }

    #[tokio::test]
    async fn restore_requires_user_and_token() {
        let empty = session(Arc::new(MemoryPersistence::new()));
        assert!(!empty.restore().await);
        assert!(!empty.is_authenticated().await);

        let no_token = session(Arc::new(MemoryPersistence::with_session(
            SessionUser { user_name: "ana".into() },
            "",
        )));
        assert!(!no_token.restore().await);

        let full = session(Arc::new(MemoryPersistence::with_session(
            SessionUser { user_name: "ana".into() },
            "tok",
        )));
        assert!(full.restore().await);
        assert_eq!(full.user().await.unwrap().user_name, "ana");
    }

    #[tokio::test]
    async fn logout_clears_persistence() {
        let store = Arc::new(MemoryPersistence::with_session(
            SessionUser { user_name: "ana".into() },
            "tok",
        ));
        let s = session(store.clone());
        assert!(s.restore().await);

        s.logout().await.unwrap();
        assert!(!s.is_authenticated().await);
        assert!(store.load().is_none());
    }

    #[tokio::test]
    async fn login_without_server_is_rejected() {
        let s = session(Arc::new(MemoryPersistence::new()));
        let err = s.login("ana", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), "connection error: could not reach the server");
        assert!(!s.is_authenticated().await);
    }
}
