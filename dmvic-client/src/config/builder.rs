use crate::config::types::{CoverageGapPolicy, DmvicConfig};
use crate::config::validator::ConfigValidatorImpl;
use crate::error::Result;
use crate::traits::ConfigValidator;
use std::collections::HashMap;

/// Builder for DmvicConfig
pub struct DmvicConfigBuilder {
    config: DmvicConfig,
}

impl DmvicConfigBuilder {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            config: DmvicConfig::new(base_url),
        }
    }

    #[must_use]
    pub fn client_id<S: Into<String>>(mut self, client_id: S) -> Self {
        self.config.client_id = Some(client_id.into());
        self
    }

    #[must_use]
    pub fn credentials<S: Into<String>>(mut self, username: S, password: S) -> Self {
        self.config.auth.username = Some(username.into());
        self.config.auth.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn coverage_gap_policy(mut self, policy: CoverageGapPolicy) -> Self {
        self.config.coverage_gap_policy = policy;
        self
    }

    /// Set timeout in seconds
    #[must_use]
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.config.timeout_seconds = Some(seconds);
        self
    }

    /// Set the fallback token lifetime in seconds
    #[must_use]
    pub fn token_ttl(mut self, seconds: u64) -> Self {
        self.config.token_ttl_seconds = Some(seconds);
        self
    }

    /// Add a header sent with every request
    #[must_use]
    pub fn header<S: Into<String>>(mut self, key: S, value: S) -> Self {
        self.config
            .headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn login_path<S: Into<String>>(mut self, path: S) -> Self {
        self.config.endpoints.login = path.into();
        self
    }

    #[must_use]
    pub fn confirm_issuance_path<S: Into<String>>(mut self, path: S) -> Self {
        self.config.endpoints.confirm_issuance = path.into();
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid
    pub fn build(self) -> Result<DmvicConfig> {
        ConfigValidatorImpl.validate(&self.config)?;
        Ok(self.config)
    }
}
