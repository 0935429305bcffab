/// Endpoint that accepts anonymous requests and issues session tokens.
pub const LOGIN_PATH: &str = "/Login";

/// Health check endpoint, reachable without a token.
pub const HEALTH_PATH: &str = "/api/v1/health";

/// Connection settings for the remote ERP API.
///
/// Built from a context's server URL, then optionally overridden by
/// environment variables:
/// - `MALHA_API_URL`
/// - `MALHA_ACCEPT_LANGUAGE`
/// - `MALHA_TIMEOUT_SECS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without trailing slash, e.g. `https://erp.example.com`.
    pub base_url: String,

    /// Sent as `Accept-Language`; the backend localizes its error messages.
    pub accept_language: String,

    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            accept_language: "pt-BR".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Apply overrides from `(key, value)` pairs.
    ///
    /// Unknown keys are ignored, as are timeouts that do not parse.
    pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                "MALHA_API_URL" if !value.is_empty() => {
                    self.base_url = value.trim_end_matches('/').to_string();
                }
                "MALHA_ACCEPT_LANGUAGE" if !value.is_empty() => {
                    self.accept_language = value.to_string();
                }
                "MALHA_TIMEOUT_SECS" => {
                    if let Ok(secs) = value.parse() {
                        self.timeout_secs = secs;
                    }
                }
                _ => {}
            }
        }
        self
    }

    /// Apply overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_vars(std::env::vars())
    }

    /// Absolute URL for an endpoint path such as `/Color/42`.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_trailing_slash() {
        let config = ApiConfig::new("http://localhost:5000/");
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.url("/Color"), "http://localhost:5000/Color");
        assert_eq!(config.accept_language, "pt-BR");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn overrides_from_vars() {
        let config = ApiConfig::new("http://a").with_vars([
            ("MALHA_API_URL", "http://b/"),
            ("MALHA_ACCEPT_LANGUAGE", "en-US"),
            ("MALHA_TIMEOUT_SECS", "30"),
            ("PATH", "/usr/bin"),
        ]);
        assert_eq!(config.base_url, "http://b");
        assert_eq!(config.accept_language, "en-US");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn bad_or_empty_overrides_are_ignored() {
        let config = ApiConfig::new("http://a").with_vars([
            ("MALHA_API_URL", ""),
            ("MALHA_TIMEOUT_SECS", "soon"),
        ]);
        assert_eq!(config, ApiConfig::new("http://a"));
    }
}
