use crate::auth::{token_ttl, UpstreamAuthenticator};
use crate::classifier::{ErrorClassifier, LABELED_MESSAGES};
use crate::config::types::DEFAULT_TOKEN_TTL_SECONDS;
use crate::config::DmvicConfig;
use crate::credentials::InMemoryCredentialStore;
use crate::error::{DmvicError, Result};
use crate::http::{ReqwestTransport, RequestBuilderImpl};
use crate::issuance::UpstreamConfirmIssuance;
use crate::normalizer::ResponseNormalizer;
use crate::recovery::{
    CoverageGapBypassPolicy, ReauthenticatePolicy, RecoveryContext, RecoveryPolicy, RetryRequest,
};
use crate::traits::{Authenticator, ConfirmIssuance, CredentialStore, Settings, Transport};
use crate::types::{ApiCall, NormalizedResult};
use futures::FutureExt;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Runs one logical call through request building, transport, normalization
/// and the recovery chain.
///
/// Upstream domain errors come back as a failed [`NormalizedResult`]. Only
/// transport faults and invalid input are returned as `Err`.
pub struct Dispatcher<T, S, A, C> {
    transport: T,
    store: S,
    authenticator: Arc<A>,
    request_builder: RequestBuilderImpl,
    normalizer: ResponseNormalizer,
    reauthenticate: ReauthenticatePolicy<A>,
    coverage_gap: CoverageGapBypassPolicy<C>,
    token_ttl: Duration,
}

/// Dispatcher over reqwest with an in-memory token cache
pub type DefaultDispatcher = Dispatcher<
    ReqwestTransport,
    InMemoryCredentialStore,
    UpstreamAuthenticator<ReqwestTransport>,
    UpstreamConfirmIssuance<ReqwestTransport>,
>;

impl<T, S, A, C> Dispatcher<T, S, A, C>
where
    T: Transport,
    S: CredentialStore,
    A: Authenticator,
    C: ConfirmIssuance,
{
    /// Assemble a dispatcher. Fails if the built-in error patterns overlap on
    /// any known upstream message.
    pub fn new(
        transport: T,
        store: S,
        authenticator: Arc<A>,
        confirm: C,
        settings: Arc<dyn Settings>,
    ) -> Result<Self> {
        let classifier = ErrorClassifier::shared_handle();
        classifier.verify_exclusive(LABELED_MESSAGES)?;

        Ok(Self {
            transport,
            store,
            reauthenticate: ReauthenticatePolicy::new(authenticator.clone()),
            authenticator,
            request_builder: RequestBuilderImpl::new(settings.clone()),
            normalizer: ResponseNormalizer::new(classifier),
            coverage_gap: CoverageGapBypassPolicy::new(confirm, settings),
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECONDS),
        })
    }

    /// Headers sent with every request
    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.request_builder = self.request_builder.with_headers(headers);
        self
    }

    /// Lifetime of cached tokens when the login response has no expiry
    #[must_use]
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn dispatch(&self, call: &ApiCall) -> Result<NormalizedResult> {
        if call.path.trim().is_empty() {
            return Err(DmvicError::missing_input("path"));
        }

        let call_id = Uuid::new_v4();
        info!(%call_id, method = %call.method, path = %call.path, "Dispatching call");

        let mut auth_token = None;
        if call.protected {
            match self.store.get_token().await {
                Some(token) => auth_token = Some(token),
                None => {
                    debug!(%call_id, "No cached token, authenticating first");
                    let auth = self.authenticator.authenticate().await?;
                    let Some(token) = auth.auth_token().map(str::to_string) else {
                        warn!(%call_id, status = auth.http_status_code(), "Authentication failed");
                        return Ok(auth);
                    };
                    self.store
                        .set_token(token.clone(), token_ttl(&auth, self.token_ttl))
                        .await;
                    auth_token = Some(token);
                }
            }
        }

        let result = self.exchange(call, auth_token.as_deref()).await?;

        let result = if call.protected {
            debug!(%call_id, policy = self.reauthenticate.name(), "Applying recovery policy");
            let context = RecoveryContext::new(auth_token.clone(), 0, self.retry_for(call));
            self.reauthenticate.apply(result, &context).await
        } else {
            debug!(%call_id, policy = self.reauthenticate.name(), "Public call, no token to refresh");
            ReauthenticatePolicy::<A>::not_retried(result)
        };

        if let Some(token) = result.new_token() {
            self.store.set_token(token.to_string(), self.token_ttl).await;
            auth_token = Some(token.to_string());
        }

        debug!(%call_id, policy = self.coverage_gap.name(), "Applying recovery policy");
        let context = RecoveryContext::new(auth_token, 0, self.retry_for(call));
        let result = self.coverage_gap.apply(result, &context).await;

        debug!(
            %call_id,
            success = result.is_success(),
            status = result.http_status_code(),
            code = ?result.first_error_code(),
            "Call finished"
        );
        Ok(result)
    }

    /// Build, send and normalize; no recovery
    async fn exchange(&self, call: &ApiCall, auth_token: Option<&str>) -> Result<NormalizedResult> {
        let request = self.request_builder.build(call, auth_token)?;
        let raw = self.transport.send(request).await?;
        Ok(self.normalizer.normalize(&raw))
    }

    fn retry_for<'a>(&'a self, call: &'a ApiCall) -> RetryRequest<'a> {
        Box::new(move |token: String| {
            async move { self.exchange(call, Some(token.as_str())).await }.boxed()
        })
    }
}

impl<T: Transport + Clone>
    Dispatcher<T, InMemoryCredentialStore, UpstreamAuthenticator<T>, UpstreamConfirmIssuance<T>>
{
    /// Wire the upstream collaborators from configuration over `transport`
    pub fn with_transport(config: &DmvicConfig, transport: T) -> Result<Self> {
        let settings: Arc<dyn Settings> = Arc::new(config.clone());
        let headers = config.headers.clone().unwrap_or_default();
        let request_builder = RequestBuilderImpl::new(settings.clone()).with_headers(headers.clone());

        let authenticator = Arc::new(UpstreamAuthenticator::new(
            transport.clone(),
            request_builder.clone(),
            config.endpoints.login.clone(),
            config.auth.clone(),
        ));
        let confirm = UpstreamConfirmIssuance::new(
            transport.clone(),
            request_builder,
            config.endpoints.confirm_issuance.clone(),
        );

        Ok(Self::new(
            transport,
            InMemoryCredentialStore::new(),
            authenticator,
            confirm,
            settings,
        )?
        .with_headers(headers)
        .with_token_ttl(config.token_ttl()))
    }
}

impl DefaultDispatcher {
    pub fn from_config(config: &DmvicConfig) -> Result<Self> {
        Self::with_transport(config, ReqwestTransport::from_config(config)?)
    }
}
