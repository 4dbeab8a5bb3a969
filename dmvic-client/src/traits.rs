use crate::error::Result;
use crate::types::{NormalizedResult, OutboundRequest, RawUpstreamResponse};
use std::future::Future;
use std::time::Duration;

/// Trait for the wire exchange with the upstream
pub trait Transport: Send + Sync {
    /// Send one request. Network and TLS failures are returned as errors.
    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<RawUpstreamResponse>> + Send;
}

/// Trait for the token cache shared between calls
pub trait CredentialStore: Send + Sync {
    /// Cached token, if one is present and still valid
    fn get_token(&self) -> impl Future<Output = Option<String>> + Send;

    /// Cache a token for `ttl`
    fn set_token(&self, token: String, ttl: Duration) -> impl Future<Output = ()> + Send;
}

/// Trait for obtaining a fresh token from the upstream
pub trait Authenticator: Send + Sync {
    /// Log in; a successful result carries `responseData.token`
    fn authenticate(&self) -> impl Future<Output = Result<NormalizedResult>> + Send;
}

/// Trait for confirming an issuance the upstream put on hold
pub trait ConfirmIssuance: Send + Sync {
    fn confirm(
        &self,
        auth_token: &str,
        issuance_request_id: &str,
    ) -> impl Future<Output = Result<NormalizedResult>> + Send;
}

/// Trait for reading externally supplied settings
pub trait Settings: Send + Sync {
    fn get_setting(&self, key: &str) -> Option<String>;
}

/// Trait for validating configuration
pub trait ConfigValidator {
    type Config;

    fn validate(&self, config: &Self::Config) -> Result<()>;
}
