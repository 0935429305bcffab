//! HTTP client for the malha ERP API.
//!
//! One configurable [`ApiClient`] serves every collection. Authentication
//! is handled by pluggable [`TokenSource`] implementations; the
//! [`AuthSession`] owns the login flow and token persistence.
//!
//! # Usage
//!
//! ```ignore
//! use malha_client::{AuthSession, MemoryPersistence};
//!
//! let session = AuthSession::new(ApiConfig::new(url), Arc::new(MemoryPersistence::new()))?;
//! session.login("admin", "secret").await?;
//! let colors = session.client().resource::<Color>().list().await;
//! ```

mod client;
mod resource;
mod session;
mod token;

pub use client::{ApiClient, HealthStatus};
pub use resource::ResourceClient;
pub use session::{AuthSession, MemoryPersistence, PersistError, SessionError, SessionPersistence};
pub use token::{NoAuth, SharedToken, StaticToken, TokenSource};

pub use malha_core::{ApiConfig, ApiError, Envelope};
