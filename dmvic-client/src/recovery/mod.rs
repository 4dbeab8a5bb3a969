//! Recovery policies applied to a normalized result
//!
//! Policies run in a fixed order after normalization: reauthenticate-and-retry
//! first, then the coverage-gap bypass. A policy never fails. It returns the
//! result it was given, or a replacement.

pub mod coverage_gap;
pub mod reauthenticate;

pub use coverage_gap::CoverageGapBypassPolicy;
pub use reauthenticate::ReauthenticatePolicy;

use crate::error::Result;
use crate::types::NormalizedResult;
use futures::future::BoxFuture;
use std::future::Future;

/// Reauthentications allowed per logical call
pub const MAX_REAUTHENTICATIONS: u32 = 1;

/// Re-issues the original request with a replacement token
pub type RetryRequest<'a> =
    Box<dyn Fn(String) -> BoxFuture<'a, Result<NormalizedResult>> + Send + Sync + 'a>;

/// Per-call state visible to the policies
pub struct RecoveryContext<'a> {
    pub auth_token: Option<String>,
    pub retry_count: u32,
    retry_request: RetryRequest<'a>,
}

impl<'a> RecoveryContext<'a> {
    pub fn new(auth_token: Option<String>, retry_count: u32, retry_request: RetryRequest<'a>) -> Self {
        Self {
            auth_token,
            retry_count,
            retry_request,
        }
    }

    /// Send the original request again with `token`
    pub fn retry_request(&self, token: String) -> BoxFuture<'a, Result<NormalizedResult>> {
        (self.retry_request)(token)
    }

    pub fn has_retry_budget(&self) -> bool {
        self.retry_count < MAX_REAUTHENTICATIONS
    }
}

/// Trait for response-side recovery steps
pub trait RecoveryPolicy: Send + Sync {
    /// Name used in log output
    fn name(&self) -> &'static str;

    /// Return `result` unchanged or a replacement for it
    fn apply(
        &self,
        result: NormalizedResult,
        context: &RecoveryContext<'_>,
    ) -> impl Future<Output = NormalizedResult> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::SdkErrorCode;
    use crate::testing::test_helpers::{failure_with, noop_retry, retry_returning};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_retry_request_forwards_token() {
        let calls = Arc::new(AtomicUsize::new(0));
        let replacement = failure_with(200, SdkErrorCode::NotFound, "No Records Found");
        let context = RecoveryContext::new(None, 0, retry_returning(calls.clone(), replacement.clone()));

        let retried = context.retry_request("fresh".to_string()).await.unwrap();
        assert_eq!(retried, replacement);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_policies_have_distinct_log_names() {
        use crate::config::StaticSettings;
        use crate::testing::test_helpers::success_with;
        use crate::testing::{MockAuthenticator, MockConfirmIssuance};

        let reauthenticate = ReauthenticatePolicy::new(Arc::new(MockAuthenticator::succeeding("t")));
        let bypass = CoverageGapBypassPolicy::new(
            MockConfirmIssuance::returning(success_with(serde_json::json!({}))),
            Arc::new(StaticSettings::new()),
        );

        assert_eq!(reauthenticate.name(), "reauthenticate");
        assert_eq!(bypass.name(), "coverage-gap-bypass");
    }

    #[test]
    fn test_retry_budget_is_one() {
        assert!(RecoveryContext::new(None, 0, noop_retry()).has_retry_budget());
        assert!(!RecoveryContext::new(None, 1, noop_retry()).has_retry_budget());
    }
}
