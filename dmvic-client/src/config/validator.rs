use crate::config::types::DmvicConfig;
use crate::error::{DmvicError, Result};
use crate::traits::ConfigValidator;
use std::path::Path;

/// Configuration validator implementation
pub struct ConfigValidatorImpl;

impl ConfigValidator for ConfigValidatorImpl {
    type Config = DmvicConfig;

    fn validate(&self, config: &DmvicConfig) -> Result<()> {
        self.validate_with_context(config, "configuration")
    }
}

impl ConfigValidatorImpl {
    pub fn new() -> Self {
        Self
    }

    /// Validation with the config source named in error messages
    pub fn validate_with_context<P: AsRef<Path>>(
        &self,
        config: &DmvicConfig,
        config_path: P,
    ) -> Result<()> {
        let config_path_str = config_path.as_ref().to_string_lossy();

        match url::Url::parse(&config.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(DmvicError::invalid_config(format!(
                    "Invalid base_url '{}' in {}. Must be an http(s) URL.",
                    config.base_url, config_path_str
                )));
            }
        }

        for (name, path) in [
            ("endpoints.login", &config.endpoints.login),
            ("endpoints.confirm_issuance", &config.endpoints.confirm_issuance),
        ] {
            if !path.starts_with('/') {
                return Err(DmvicError::invalid_config(format!(
                    "{} in {} must be an absolute path starting with '/', got '{}'",
                    name, config_path_str, path
                )));
            }
        }

        if let Some(timeout) = config.timeout_seconds {
            if timeout == 0 || timeout > 300 {
                return Err(DmvicError::invalid_config(
                    "timeout_seconds must be between 1 and 300 seconds".to_string(),
                ));
            }
        }

        if config.token_ttl_seconds == Some(0) {
            return Err(DmvicError::invalid_config(
                "token_ttl_seconds must be greater than zero".to_string(),
            ));
        }

        if let Some(headers) = &config.headers {
            if headers.keys().any(|k| k.eq_ignore_ascii_case("authorization")) {
                return Err(DmvicError::invalid_config(format!(
                    "The Authorization header in {} is managed by the client and cannot be configured",
                    config_path_str
                )));
            }
        }

        Ok(())
    }
}

impl Default for ConfigValidatorImpl {
    fn default() -> Self {
        Self::new()
    }
}
