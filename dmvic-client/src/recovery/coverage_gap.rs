use crate::classifier::SdkErrorCode;
use crate::config::keys;
use crate::recovery::{RecoveryContext, RecoveryPolicy};
use crate::traits::{ConfirmIssuance, Settings};
use crate::types::NormalizedResult;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Setting value that enables the bypass; anything else keeps the strict default
pub const BYPASS: &str = "bypass";

/// Confirm issuance automatically when the only obstacle is a coverage gap advisory
pub struct CoverageGapBypassPolicy<C> {
    confirm: C,
    settings: Arc<dyn Settings>,
}

impl<C: ConfirmIssuance> CoverageGapBypassPolicy<C> {
    pub fn new(confirm: C, settings: Arc<dyn Settings>) -> Self {
        Self { confirm, settings }
    }

    pub fn is_enabled(&self) -> bool {
        self.settings
            .get_setting(keys::COVERAGE_GAP_POLICY)
            .is_some_and(|value| value.trim().eq_ignore_ascii_case(BYPASS))
    }
}

impl<C: ConfirmIssuance> RecoveryPolicy for CoverageGapBypassPolicy<C> {
    fn name(&self) -> &'static str {
        "coverage-gap-bypass"
    }

    async fn apply(&self, result: NormalizedResult, context: &RecoveryContext<'_>) -> NormalizedResult {
        if result.is_success() || !result.has_error_code(SdkErrorCode::CoverageGap) {
            return result;
        }
        if !self.is_enabled() {
            debug!("Coverage gap left for manual confirmation");
            return result;
        }

        let issuance_request_id = match &result {
            NormalizedResult::Failure(failure) => failure.issuance_request_id.clone(),
            NormalizedResult::Success(_) => None,
        };
        let Some(issuance_request_id) = issuance_request_id else {
            warn!("Coverage gap reported without an issuance request id");
            return result;
        };
        let Some(auth_token) = context.auth_token.as_deref() else {
            warn!(%issuance_request_id, "No token available to confirm issuance");
            return result;
        };

        info!(%issuance_request_id, "Confirming issuance over coverage gap");
        match self.confirm.confirm(auth_token, &issuance_request_id).await {
            Ok(confirmed) => confirmed.with_recovery(result.recovery().clone()),
            Err(err) => {
                warn!(%issuance_request_id, error = %err, "Issuance confirmation failed");
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticSettings;
    use crate::testing::test_helpers::{coverage_gap_failure, failure_with, noop_retry, success_with};
    use crate::testing::MockConfirmIssuance;
    use crate::types::RecoveryMarker;
    use serde_json::json;

    fn settings(policy: &str) -> Arc<dyn Settings> {
        Arc::new(StaticSettings::new().with(keys::COVERAGE_GAP_POLICY, policy))
    }

    fn context() -> RecoveryContext<'static> {
        RecoveryContext::new(Some("session-token".to_string()), 0, noop_retry())
    }

    #[tokio::test]
    async fn test_bypass_confirms_once_and_returns_confirmation() {
        let confirm = MockConfirmIssuance::returning(success_with(json!({"TransactionNo": "T-77"})));
        let policy = CoverageGapBypassPolicy::new(confirm.clone(), settings("bypass"));

        let result = policy.apply(coverage_gap_failure("IR-2024-0042"), &context()).await;

        assert!(result.is_success());
        assert_eq!(
            confirm.calls(),
            vec![("session-token".to_string(), "IR-2024-0042".to_string())]
        );
    }

    #[tokio::test]
    async fn test_strict_leaves_failure_untouched() {
        let confirm = MockConfirmIssuance::returning(success_with(json!({"TransactionNo": "T-77"})));
        let policy = CoverageGapBypassPolicy::new(confirm.clone(), settings("strict"));

        let original = coverage_gap_failure("IR-2024-0042");
        let result = policy.apply(original.clone(), &context()).await;

        assert_eq!(result, original);
        assert!(confirm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_setting_defaults_to_strict() {
        let confirm = MockConfirmIssuance::returning(success_with(json!({})));
        let policy = CoverageGapBypassPolicy::new(confirm.clone(), Arc::new(StaticSettings::new()));

        assert!(!policy.is_enabled());
        let original = coverage_gap_failure("IR-1");
        assert_eq!(policy.apply(original.clone(), &context()).await, original);
        assert!(confirm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_other_errors_are_not_bypassed() {
        let confirm = MockConfirmIssuance::returning(success_with(json!({})));
        let policy = CoverageGapBypassPolicy::new(confirm.clone(), settings("BYPASS"));

        let original = failure_with(
            200,
            SdkErrorCode::DoubleInsurance,
            "Vehicle KBZ 001Z already has an active cover with another insurer",
        );
        assert_eq!(policy.apply(original.clone(), &context()).await, original);
        assert!(confirm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_confirm_error_keeps_original_failure() {
        let confirm = MockConfirmIssuance::erroring("connection refused");
        let policy = CoverageGapBypassPolicy::new(confirm.clone(), settings("bypass"));

        let original = coverage_gap_failure("IR-9");
        assert_eq!(policy.apply(original.clone(), &context()).await, original);
        assert_eq!(confirm.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_recovery_annotation_survives_replacement() {
        let confirm = MockConfirmIssuance::returning(success_with(json!({"TransactionNo": "T-1"})));
        let policy = CoverageGapBypassPolicy::new(confirm, settings("bypass"));

        let refreshed = coverage_gap_failure("IR-5").with_recovery(RecoveryMarker {
            token_refreshed: Some(true),
            new_token: Some("fresh".to_string()),
        });
        let result = policy.apply(refreshed, &context()).await;

        assert!(result.is_success());
        assert_eq!(result.token_refreshed(), Some(true));
        assert_eq!(result.new_token(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_missing_issuance_id_or_token_is_a_no_op() {
        let confirm = MockConfirmIssuance::returning(success_with(json!({})));
        let policy = CoverageGapBypassPolicy::new(confirm.clone(), settings("bypass"));

        let without_id = failure_with(
            200,
            SdkErrorCode::CoverageGap,
            "Coverage gap of 1 day found for vehicle KBX 100X",
        );
        assert_eq!(policy.apply(without_id.clone(), &context()).await, without_id);

        let tokenless = RecoveryContext::new(None, 0, noop_retry());
        let original = coverage_gap_failure("IR-3");
        assert_eq!(policy.apply(original.clone(), &tokenless).await, original);
        assert!(confirm.calls().is_empty());
    }
}
