use crate::error::{DmvicError, Result};
use crate::traits::{Authenticator, ConfirmIssuance, Transport};
use crate::types::{NormalizedResult, OutboundRequest, RawUpstreamResponse};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum MockReply {
    Response(RawUpstreamResponse),
    Fault(String),
}

/// Mock transport replaying queued replies and recording every request
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<OutboundRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, status: u16, body: Value) -> Self {
        self.push(MockReply::Response(RawUpstreamResponse::new(status, body)));
        self
    }

    pub fn with_fault(self, message: &str) -> Self {
        self.push(MockReply::Fault(message.to_string()));
        self
    }

    /// Requests sent so far, oldest first
    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn push(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: OutboundRequest) -> Result<RawUpstreamResponse> {
        self.requests.lock().unwrap().push(request);

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Response(raw)) => Ok(raw),
            Some(MockReply::Fault(message)) => Err(DmvicError::transport(message)),
            None => Err(DmvicError::transport("no mock reply queued")),
        }
    }
}

/// Mock authenticator with a fixed outcome
pub struct MockAuthenticator {
    outcome: std::result::Result<NormalizedResult, String>,
    calls: AtomicUsize,
}

impl MockAuthenticator {
    /// Logs in successfully and hands out `token`
    pub fn succeeding(token: &str) -> Self {
        Self {
            outcome: Ok(test_helpers::success_with(json!({ "token": token }))),
            calls: AtomicUsize::new(0),
        }
    }

    /// Upstream refuses the credentials
    pub fn rejecting(message: &str) -> Self {
        Self {
            outcome: Ok(test_helpers::failure_with(
                200,
                crate::classifier::classify(message),
                message,
            )),
            calls: AtomicUsize::new(0),
        }
    }

    /// Login never reaches the upstream
    pub fn erroring(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Authenticator for MockAuthenticator {
    async fn authenticate(&self) -> Result<NormalizedResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map_err(DmvicError::transport)
    }
}

/// Mock issuance confirmation recording `(token, issuance id)` pairs
#[derive(Clone)]
pub struct MockConfirmIssuance {
    outcome: std::result::Result<NormalizedResult, String>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockConfirmIssuance {
    pub fn returning(result: NormalizedResult) -> Self {
        Self {
            outcome: Ok(result),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn erroring(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ConfirmIssuance for MockConfirmIssuance {
    async fn confirm(&self, auth_token: &str, issuance_request_id: &str) -> Result<NormalizedResult> {
        self.calls
            .lock()
            .unwrap()
            .push((auth_token.to_string(), issuance_request_id.to_string()));
        self.outcome.clone().map_err(DmvicError::transport)
    }
}

/// Helper functions for creating test data
pub mod test_helpers {
    use super::*;
    use crate::classifier::SdkErrorCode;
    use crate::recovery::RetryRequest;
    use crate::types::{FailureResult, NormalizedError, RecoveryMarker, SuccessResult};
    use futures::FutureExt;

    pub fn success_with(response_data: Value) -> NormalizedResult {
        NormalizedResult::Success(SuccessResult {
            request_id: None,
            reference_number: None,
            response_data,
            request_echo: None,
            http_status_code: 200,
            recovery: RecoveryMarker::default(),
        })
    }

    pub fn failure_with(status: u16, code: SdkErrorCode, text: &str) -> NormalizedResult {
        NormalizedResult::Failure(FailureResult {
            request_id: None,
            reference_number: None,
            ntsa_response: None,
            issuance_request_id: None,
            issuance_message: None,
            errors: vec![NormalizedError {
                error_code: Some(code.as_str().to_string()),
                error_text: text.to_string(),
                sdk_error_code: code,
            }],
            http_status_code: status,
            recovery: RecoveryMarker::default(),
        })
    }

    pub fn coverage_gap_failure(issuance_request_id: &str) -> NormalizedResult {
        match failure_with(
            200,
            SdkErrorCode::CoverageGap,
            "There is a gap of 12 days between the previous cover and the requested cover for vehicle KCB 456B",
        ) {
            NormalizedResult::Failure(mut failure) => {
                failure.issuance_request_id = Some(issuance_request_id.to_string());
                failure.issuance_message =
                    Some("Issuance pending confirmation due to coverage gap".to_string());
                NormalizedResult::Failure(failure)
            }
            success => success,
        }
    }

    /// Retry that must never be invoked
    pub fn noop_retry() -> RetryRequest<'static> {
        Box::new(|_token: String| {
            async { Err::<NormalizedResult, DmvicError>(DmvicError::transport("retry not expected")) }
                .boxed()
        })
    }

    /// Retry that counts invocations and answers with `result`
    pub fn retry_returning(calls: Arc<AtomicUsize>, result: NormalizedResult) -> RetryRequest<'static> {
        Box::new(move |_token: String| {
            calls.fetch_add(1, Ordering::SeqCst);
            let result = result.clone();
            async move { Ok::<NormalizedResult, DmvicError>(result) }.boxed()
        })
    }

    /// Retry that counts invocations and fails in transport
    pub fn failing_retry(calls: Arc<AtomicUsize>) -> RetryRequest<'static> {
        Box::new(move |_token: String| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<NormalizedResult, DmvicError>(DmvicError::transport("connection reset")) }
                .boxed()
        })
    }
}
