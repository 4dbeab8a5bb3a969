use crate::error::Result;
use crate::http::RequestBuilderImpl;
use crate::normalizer::ResponseNormalizer;
use crate::traits::{ConfirmIssuance, Transport};
use crate::types::{ApiCall, NormalizedResult};
use serde_json::json;
use tracing::debug;

/// Approves an issuance the upstream held back for confirmation
pub struct UpstreamConfirmIssuance<T> {
    transport: T,
    request_builder: RequestBuilderImpl,
    normalizer: ResponseNormalizer,
    confirm_path: String,
}

impl<T: Transport> UpstreamConfirmIssuance<T> {
    pub fn new<S: Into<String>>(transport: T, request_builder: RequestBuilderImpl, confirm_path: S) -> Self {
        Self {
            transport,
            request_builder,
            normalizer: ResponseNormalizer::default(),
            confirm_path: confirm_path.into(),
        }
    }
}

impl<T: Transport> ConfirmIssuance for UpstreamConfirmIssuance<T> {
    async fn confirm(&self, auth_token: &str, issuance_request_id: &str) -> Result<NormalizedResult> {
        let call = ApiCall::post(
            self.confirm_path.clone(),
            json!({ "IssuanceRequestID": issuance_request_id, "IsApproved": true }),
        );
        let request = self.request_builder.build(&call, Some(auth_token))?;

        debug!(%issuance_request_id, "Confirming issuance");
        let raw = self.transport.send(request).await?;
        Ok(self.normalizer.normalize(&raw))
    }
}
