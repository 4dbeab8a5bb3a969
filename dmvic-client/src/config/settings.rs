use crate::config::types::DmvicConfig;
use crate::traits::Settings;
use std::collections::HashMap;

/// Setting keys understood by the client
pub mod keys {
    pub const COVERAGE_GAP_POLICY: &str = "coverage_gap_policy";
    pub const CLIENT_ID: &str = "client_id";
    pub const BASE_URL: &str = "base_url";
}

impl Settings for DmvicConfig {
    fn get_setting(&self, key: &str) -> Option<String> {
        match key {
            keys::COVERAGE_GAP_POLICY => Some(self.coverage_gap_policy.as_str().to_string()),
            keys::CLIENT_ID => self.client_id.clone(),
            keys::BASE_URL => Some(self.base_url.clone()),
            _ => None,
        }
    }
}

/// Fixed key/value settings
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    values: HashMap<String, String>,
}

impl StaticSettings {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl Settings for StaticSettings {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
