//! DMVIC client - response pipeline for the DMVIC motor insurance API
//!
//! Every upstream exchange is turned into one canonical [`NormalizedResult`]:
//! error prose is classified into stable codes, the upstream's inconsistent
//! response shapes are normalized, and a short recovery chain retries with a
//! fresh token or confirms an issuance held back by a coverage gap.

// Core modules
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Pipeline
pub mod classifier;
pub mod dispatcher;
pub mod normalizer;
pub mod recovery;

// Upstream collaborators
pub mod auth;
pub mod credentials;
pub mod http;
pub mod issuance;

#[cfg(test)]
pub mod testing;

pub use classifier::{classify, ErrorClassifier, SdkErrorCode};
pub use config::{CoverageGapPolicy, DmvicConfig, DmvicConfigBuilder};
pub use credentials::InMemoryCredentialStore;
pub use dispatcher::{DefaultDispatcher, Dispatcher};
pub use error::{DmvicError, Result, TRANSPORT_FAILURE_PREFIX};
pub use normalizer::{normalize, ResponseNormalizer};
pub use traits::{Authenticator, ConfirmIssuance, CredentialStore, Settings, Transport};
pub use reqwest::Method;
pub use types::{ApiCall, NormalizedError, NormalizedResult, RawUpstreamResponse};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_module_imports() {
        let config = DmvicConfig::builder("https://uat-api.dmvic.com").build().unwrap();
        assert_eq!(config.coverage_gap_policy, CoverageGapPolicy::Strict);

        assert_eq!(classify("No Records Found"), SdkErrorCode::NotFound);
    }

    #[test]
    fn test_normalize_round_trip_through_public_api() {
        let raw = RawUpstreamResponse::new(
            200,
            json!({"success": false, "Error": [{"errorCode": "ER0016", "errorText": "No Records Found"}]}),
        );
        let result = normalize(&raw);

        assert!(!result.is_success());
        assert_eq!(result.to_json()["errors"][0]["sdkErrorCode"], json!("NOT_FOUND"));
    }
}
