use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 3600;

/// Main configuration for the DMVIC client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DmvicConfig {
    /// Base URL of the upstream API
    pub base_url: String,
    /// Client identity sent as the `ClientID` header
    pub client_id: Option<String>,
    /// What to do when issuance is held back by a coverage gap
    #[serde(default)]
    pub coverage_gap_policy: CoverageGapPolicy,
    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Token lifetime used when the login response carries no usable expiry
    pub token_ttl_seconds: Option<u64>,
    /// Extra headers applied to every request
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub endpoints: EndpointPaths,
}

/// Login credentials
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Paths of the endpoints the client calls on its own behalf
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointPaths {
    #[serde(default = "default_login_path")]
    pub login: String,
    #[serde(default = "default_confirm_issuance_path")]
    pub confirm_issuance: String,
}

fn default_login_path() -> String {
    "/api/V1/Account/Login".to_string()
}

fn default_confirm_issuance_path() -> String {
    "/api/V5/IntermediaryIntegration/ConfirmCertificateIssuance".to_string()
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            login: default_login_path(),
            confirm_issuance: default_confirm_issuance_path(),
        }
    }
}

/// Handling of coverage-gap advisories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageGapPolicy {
    /// Leave the advisory to a human
    #[default]
    Strict,
    /// Confirm issuance automatically
    Bypass,
}

impl CoverageGapPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Bypass => "bypass",
        }
    }
}

impl DmvicConfig {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            client_id: None,
            coverage_gap_policy: CoverageGapPolicy::default(),
            timeout_seconds: None,
            token_ttl_seconds: None,
            headers: None,
            auth: AuthConfig::default(),
            endpoints: EndpointPaths::default(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_seconds.unwrap_or(DEFAULT_TOKEN_TTL_SECONDS))
    }

    /// Override fields from a key lookup, typically the process environment
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("DMVIC_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(client_id) = lookup("DMVIC_CLIENT_ID") {
            self.client_id = Some(client_id);
        }
        if let Some(username) = lookup("DMVIC_USERNAME") {
            self.auth.username = Some(username);
        }
        if let Some(password) = lookup("DMVIC_PASSWORD") {
            self.auth.password = Some(password);
        }
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok().filter(|v| !v.is_empty()));
    }
}
