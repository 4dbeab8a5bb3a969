use crate::config::AuthConfig;
use crate::error::{DmvicError, Result};
use crate::http::RequestBuilderImpl;
use crate::normalizer::ResponseNormalizer;
use crate::traits::{Authenticator, Transport};
use crate::types::{ApiCall, NormalizedResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// Logs in against the upstream login endpoint
pub struct UpstreamAuthenticator<T> {
    transport: T,
    request_builder: RequestBuilderImpl,
    normalizer: ResponseNormalizer,
    login_path: String,
    credentials: AuthConfig,
}

impl<T: Transport> UpstreamAuthenticator<T> {
    pub fn new<S: Into<String>>(
        transport: T,
        request_builder: RequestBuilderImpl,
        login_path: S,
        credentials: AuthConfig,
    ) -> Self {
        Self {
            transport,
            request_builder,
            normalizer: ResponseNormalizer::default(),
            login_path: login_path.into(),
            credentials,
        }
    }

    fn login_call(&self) -> Result<ApiCall> {
        let username = self
            .credentials
            .username
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| DmvicError::missing_input("auth.username"))?;
        let password = self
            .credentials
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| DmvicError::missing_input("auth.password"))?;

        Ok(ApiCall::post(
            self.login_path.clone(),
            json!({ "username": username, "password": password }),
        )
        .public())
    }
}

impl<T: Transport> Authenticator for UpstreamAuthenticator<T> {
    async fn authenticate(&self) -> Result<NormalizedResult> {
        let call = self.login_call()?;
        let request = self.request_builder.build(&call, None)?;

        debug!(username = ?self.credentials.username, "Authenticating");
        let raw = self.transport.send(request).await?;
        let result = self.normalizer.normalize(&raw);

        if result.auth_token().is_none() {
            warn!(
                status = result.http_status_code(),
                code = ?result.first_error_code(),
                "Login did not return a token"
            );
        }
        Ok(result)
    }
}

/// How long a freshly issued token may be cached
pub fn token_ttl(auth: &NormalizedResult, fallback: Duration) -> Duration {
    token_ttl_at(auth, fallback, Utc::now())
}

fn token_ttl_at(auth: &NormalizedResult, fallback: Duration, now: DateTime<Utc>) -> Duration {
    auth.response_data()
        .and_then(|data| data.get("expiresAt"))
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
        .and_then(|expires_at| (expires_at - now).to_std().ok())
        .filter(|ttl| !ttl.is_zero())
        .unwrap_or(fallback)
}

/// RFC 3339, or a naive ISO-8601 timestamp read as UTC
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{keys, StaticSettings};
    use crate::testing::test_helpers::success_with;
    use crate::testing::MockTransport;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn credentials() -> AuthConfig {
        AuthConfig {
            username: Some("agent@insurer.co.ke".to_string()),
            password: Some("s3cret".to_string()),
        }
    }

    fn builder() -> RequestBuilderImpl {
        RequestBuilderImpl::new(Arc::new(
            StaticSettings::new().with(keys::BASE_URL, "https://uat-api.dmvic.com"),
        ))
    }

    #[tokio::test]
    async fn test_authenticate_posts_credentials_without_bearer() {
        let transport = MockTransport::new().with_response(
            200,
            json!({"code": 1, "token": "tok-1", "LoginUserId": "u-1", "expires": "2030-01-01T00:00:00"}),
        );
        let authenticator =
            UpstreamAuthenticator::new(transport.clone(), builder(), "/api/V1/Account/Login", credentials());

        let result = authenticator.authenticate().await.unwrap();

        assert_eq!(result.auth_token(), Some("tok-1"));
        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "https://uat-api.dmvic.com/api/V1/Account/Login");
        assert_eq!(sent[0].bearer_token(), None);
        assert_eq!(
            sent[0].body,
            Some(json!({"username": "agent@insurer.co.ke", "password": "s3cret"}))
        );
    }

    #[tokio::test]
    async fn test_rejected_login_is_a_failure_result() {
        let transport = MockTransport::new().with_response(
            200,
            json!({"code": 0, "Error": [{"errorCode": "ER0001", "errorText": "Invalid Username or Password"}]}),
        );
        let authenticator =
            UpstreamAuthenticator::new(transport, builder(), "/api/V1/Account/Login", credentials());

        let result = authenticator.authenticate().await.unwrap();
        assert!(!result.is_success());
        assert_eq!(result.auth_token(), None);
    }

    #[tokio::test]
    async fn test_missing_password_is_reported_before_sending() {
        let transport = MockTransport::new();
        let authenticator = UpstreamAuthenticator::new(
            transport.clone(),
            builder(),
            "/api/V1/Account/Login",
            AuthConfig {
                username: Some("agent".to_string()),
                password: None,
            },
        );

        let err = authenticator.authenticate().await.unwrap_err();
        assert!(matches!(err, DmvicError::MissingInput { ref field } if field == "auth.password"));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_token_ttl_from_expiry() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let fallback = Duration::from_secs(3600);

        let rfc = success_with(json!({"token": "t", "expiresAt": "2024-05-01T12:30:00Z"}));
        assert_eq!(token_ttl_at(&rfc, fallback, now), Duration::from_secs(1800));

        let naive = success_with(json!({"token": "t", "expiresAt": "2024-05-01T12:10:00.000"}));
        assert_eq!(token_ttl_at(&naive, fallback, now), Duration::from_secs(600));
    }

    #[test]
    fn test_token_ttl_falls_back() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let fallback = Duration::from_secs(3600);

        let past = success_with(json!({"token": "t", "expiresAt": "2024-05-01T11:00:00Z"}));
        let garbage = success_with(json!({"token": "t", "expiresAt": "tomorrow"}));
        let missing = success_with(json!({"token": "t"}));

        assert_eq!(token_ttl_at(&past, fallback, now), fallback);
        assert_eq!(token_ttl_at(&garbage, fallback, now), fallback);
        assert_eq!(token_ttl_at(&missing, fallback, now), fallback);
    }
}
