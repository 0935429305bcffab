//! Shared building blocks for the malha ERP client: the response envelope,
//! the client error type, API connection settings and cell formatting.

pub mod config;
pub mod envelope;
pub mod error;
pub mod format;

pub use config::{ApiConfig, HEALTH_PATH, LOGIN_PATH};
pub use envelope::Envelope;
pub use error::{ApiError, MISSING_TOKEN};
