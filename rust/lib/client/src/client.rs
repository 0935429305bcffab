//! The HTTP client shared by every resource.

use std::sync::Arc;
use std::time::Duration;

use malha_core::{ApiConfig, ApiError, Envelope, HEALTH_PATH, LOGIN_PATH};
use malha_model::{LoginRequest, LoginResponse, ProblemDetails, Resource};
use reqwest::header::{ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{ResourceClient, TokenSource};

/// Result of probing [`HEALTH_PATH`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Connected,
    /// The server answered with a non-2xx status.
    Error(u16),
    /// The request never got a response.
    Disconnected(String),
}

/// JSON client for the ERP API.
///
/// Attaches `Content-Type`, `Accept-Language` and the bearer token, and
/// folds every failure (transport, HTTP status, body decoding) into an
/// [`ApiError`]. No retries are attempted.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<ApiConfig>,
    token_source: Arc<dyn TokenSource>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, token_source: Arc<dyn TokenSource>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            http,
            config: Arc::new(config),
            token_source,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Typed CRUD client for one collection.
    pub fn resource<R: Resource>(&self) -> ResourceClient<R> {
        ResourceClient::new(self.clone())
    }

    /// Send a request and decode the JSON body, if any.
    ///
    /// Endpoints other than login and health require a token; without one
    /// the call fails here and nothing goes over the network.
    pub async fn request<B, R>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<Option<R>, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let token = self.token_source.token().await?;
        if token.is_none() && requires_token(endpoint) {
            warn!(%method, endpoint, "no authentication token available");
            return Err(ApiError::missing_token());
        }

        let url = self.config.url(endpoint);
        debug!(%method, %url, "api request");

        let mut req = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT_LANGUAGE, self.config.accept_language.as_str());
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            warn!(%method, %url, error = %e, "api request failed");
            ApiError::Network(e.to_string())
        })?;

        let result = Self::parse(resp).await;
        if let Err(ref e) = result {
            warn!(%method, %url, error = %e, "api request unsuccessful");
        }
        result
    }

    /// Map an HTTP response to decoded data or an [`ApiError`].
    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<Option<R>, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(error_from_body(status.as_u16(), &text));
        }

        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));
        if !is_json {
            return Ok(None);
        }

        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| ApiError::Decode(format!("response body: {}", e)))
    }

    pub async fn get<R: DeserializeOwned>(&self, endpoint: &str) -> Envelope<R> {
        self.request::<(), R>(Method::GET, endpoint, None).await.into()
    }

    pub async fn post<B, R>(&self, endpoint: &str, body: &B) -> Envelope<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::POST, endpoint, Some(body)).await.into()
    }

    pub async fn put<B, R>(&self, endpoint: &str, body: &B) -> Envelope<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::PUT, endpoint, Some(body)).await.into()
    }

    /// `DELETE`; any response body is discarded.
    pub async fn delete(&self, endpoint: &str) -> Envelope<()> {
        self.request::<(), serde::de::IgnoredAny>(Method::DELETE, endpoint, None)
            .await
            .map(|_| None::<()>)
            .into()
    }

    /// Exchange credentials for a session token.
    pub async fn login(&self, credentials: &LoginRequest) -> Envelope<LoginResponse> {
        self.post(LOGIN_PATH, credentials).await
    }

    /// Probe the health endpoint. Never requires a token.
    pub async fn health(&self) -> HealthStatus {
        let url = self.config.url(HEALTH_PATH);
        match self.http.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => HealthStatus::Connected,
            Ok(resp) => HealthStatus::Error(resp.status().as_u16()),
            Err(e) => {
                debug!(%url, error = %e, "health check failed");
                HealthStatus::Disconnected(e.to_string())
            }
        }
    }
}

/// Whether `endpoint` needs a bearer token.
fn requires_token(endpoint: &str) -> bool {
    let path = endpoint.split('?').next().unwrap_or(endpoint);
    path != LOGIN_PATH && path != HEALTH_PATH
}

/// Build the error for a non-2xx response.
///
/// The body is read as `{"errors": [...]}`; a non-JSON body counts as a
/// single message. Without a usable message the error is `HTTP {status}`.
pub(crate) fn error_from_body(status: u16, text: &str) -> ApiError {
    let trimmed = text.trim();
    let problem = match serde_json::from_str::<ProblemDetails>(trimmed) {
        Ok(p) => p,
        Err(_) if !trimmed.is_empty() => ProblemDetails {
            errors: Some(vec![trimmed.to_string()]),
        },
        Err(_) => ProblemDetails::default(),
    };
    match problem.first() {
        Some(message) => ApiError::Server {
            status,
            message: message.to_string(),
        },
        None => ApiError::http_status(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_exemptions() {
        assert!(!requires_token("/Login"));
        assert!(!requires_token("/api/v1/health"));
        assert!(requires_token("/Color"));
        assert!(requires_token("/Login/extra"));
        assert!(requires_token("/User/joao"));
    }

    #[test]
    fn error_body_first_message() {
        let err = error_from_body(400, r#"{"errors": ["Cor já cadastrada", "outro"]}"#);
        assert_eq!(
            err,
            ApiError::Server { status: 400, message: "Cor já cadastrada".into() }
        );
    }

    #[test]
    fn error_body_plain_text() {
        let err = error_from_body(401, "Unauthorized\n");
        assert_eq!(err.to_string(), "Unauthorized");
    }

    #[test]
    fn error_body_without_messages() {
        assert_eq!(error_from_body(404, "").to_string(), "HTTP 404");
        assert_eq!(error_from_body(500, r#"{"errors": null}"#).to_string(), "HTTP 500");
        assert_eq!(error_from_body(500, r#"{"errors": []}"#).to_string(), "HTTP 500");
        assert_eq!(error_from_body(500, r#"{"title": "boom"}"#).to_string(), "HTTP 500");
    }
}
