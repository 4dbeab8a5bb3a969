use crate::config::types::DmvicConfig;
use crate::config::validator::ConfigValidatorImpl;
use crate::error::{DmvicError, Result};
use std::path::Path;

/// Configuration loader trait
pub trait ConfigLoader {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<DmvicConfig>;
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<DmvicConfig>;
}

/// Default configuration loader implementation
pub struct DefaultConfigLoader;

impl ConfigLoader for DefaultConfigLoader {
    /// Load configuration from a dmvic.toml file
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<DmvicConfig> {
        let content = std::fs::read_to_string(&path).map_err(|_| DmvicError::ConfigNotFound {
            path: path.as_ref().to_path_buf(),
        })?;

        let config: DmvicConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, apply environment overrides and validate
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<DmvicConfig> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(DmvicError::ConfigNotFound {
                path: path_ref.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path_ref).map_err(DmvicError::Io)?;

        let mut config: DmvicConfig = toml::from_str(&content).map_err(|e| {
            DmvicError::invalid_config(format!(
                "Failed to parse TOML in {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        config.apply_env_overrides();
        ConfigValidatorImpl::new().validate_with_context(&config, path_ref)?;

        Ok(config)
    }
}

impl DmvicConfig {
    /// Create a new config builder
    pub fn builder<S: Into<String>>(base_url: S) -> crate::config::builder::DmvicConfigBuilder {
        crate::config::builder::DmvicConfigBuilder::new(base_url)
    }

    /// Load configuration from a dmvic.toml file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_from_file(path)
    }

    /// Load configuration with environment overrides and validation
    pub fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_with_validation(path)
    }
}
