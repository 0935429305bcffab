use thiserror::Error;

/// Message reported when a protected endpoint is called without a session.
pub const MISSING_TOKEN: &str = "authentication token not found; log in again";

// ── ApiError ────────────────────────────────────────────────────────

/// Client-side API error.
///
/// Every variant renders as the message shown to the operator. Callers do
/// not branch on variants; they are folded into an [`Envelope`] failure.
///
/// [`Envelope`]: crate::Envelope
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx response. `message` is already normalized from the error body.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Transport failure (DNS, refused connection, timeout). The detail is
    /// logged, never shown.
    #[error("connection error: could not reach the server")]
    Network(String),

    /// Missing or rejected credentials.
    #[error("{0}")]
    Auth(String),

    /// 2xx response whose JSON body could not be decoded.
    #[error("invalid response from the server")]
    Decode(String),

    /// Operation the remote resource does not offer.
    #[error("{0}")]
    Unsupported(String),
}

impl ApiError {
    /// Error for a request attempted without a bearer token.
    pub fn missing_token() -> Self {
        ApiError::Auth(MISSING_TOKEN.to_string())
    }

    /// Error for a non-2xx response without a usable error body.
    pub fn http_status(status: u16) -> Self {
        ApiError::Server {
            status,
            message: format!("HTTP {}", status),
        }
    }

    /// HTTP status code, when the error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_operator_message() {
        let err = ApiError::Server { status: 400, message: "Nome é obrigatório".into() };
        assert_eq!(err.to_string(), "Nome é obrigatório");
        assert_eq!(ApiError::missing_token().to_string(), MISSING_TOKEN);
        assert_eq!(ApiError::Unsupported("no delete".into()).to_string(), "no delete");
    }

    #[test]
    fn network_and_decode_hide_detail() {
        let net = ApiError::Network("tcp connect error: refused".into());
        assert_eq!(net.to_string(), "connection error: could not reach the server");

        let dec = ApiError::Decode("expected value at line 1".into());
        assert_eq!(dec.to_string(), "invalid response from the server");
    }

    #[test]
    fn http_status_fallback() {
        let err = ApiError::http_status(502);
        assert_eq!(err.to_string(), "HTTP 502");
        assert_eq!(err.status(), Some(502));
        assert_eq!(ApiError::missing_token().status(), None);
    }
}
