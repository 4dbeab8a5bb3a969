use crate::classifier::SdkErrorCode;
use crate::recovery::{RecoveryContext, RecoveryPolicy};
use crate::traits::Authenticator;
use crate::types::{NormalizedResult, RecoveryMarker};
use std::sync::Arc;
use tracing::{debug, info, warn};

const UNAUTHORIZED: u16 = 401;

/// Reauthenticate once and replay the request when the token was rejected
pub struct ReauthenticatePolicy<A> {
    authenticator: Arc<A>,
}

impl<A: Authenticator> ReauthenticatePolicy<A> {
    pub fn new(authenticator: Arc<A>) -> Self {
        Self { authenticator }
    }

    /// Failure caused by a missing, invalid or expired token
    pub fn is_triggered(result: &NormalizedResult) -> bool {
        !result.is_success()
            && (result.http_status_code() == UNAUTHORIZED
                || result.first_error_code() == Some(SdkErrorCode::TokenInvalid))
    }

    /// Mark `result` as seen by this policy without a retry
    pub fn not_retried(result: NormalizedResult) -> NormalizedResult {
        let marker = RecoveryMarker {
            token_refreshed: Some(false),
            ..result.recovery().clone()
        };
        result.with_recovery(marker)
    }
}

impl<A: Authenticator> RecoveryPolicy for ReauthenticatePolicy<A> {
    fn name(&self) -> &'static str {
        "reauthenticate"
    }

    async fn apply(&self, result: NormalizedResult, context: &RecoveryContext<'_>) -> NormalizedResult {
        if !Self::is_triggered(&result) {
            return Self::not_retried(result);
        }
        if !context.has_retry_budget() {
            debug!(
                retry_count = context.retry_count,
                "Token rejected again, reauthentication budget exhausted"
            );
            return Self::not_retried(result);
        }

        let token = match self.authenticator.authenticate().await {
            Ok(auth) => match auth.auth_token() {
                Some(token) => token.to_string(),
                None => {
                    warn!(
                        status = auth.http_status_code(),
                        code = ?auth.first_error_code(),
                        "Reauthentication did not return a token"
                    );
                    return result;
                }
            },
            Err(err) => {
                warn!(error = %err, "Reauthentication failed");
                return result;
            }
        };

        info!("Token refreshed, replaying request");
        match context.retry_request(token.clone()).await {
            Ok(retried) => retried.with_recovery(RecoveryMarker {
                token_refreshed: Some(true),
                new_token: Some(token),
            }),
            Err(err) => {
                warn!(error = %err, "Replay after reauthentication failed");
                result
            }
        }
    }
}
