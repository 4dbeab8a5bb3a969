use crate::config::keys;
use crate::error::{DmvicError, Result};
use crate::traits::Settings;
use crate::types::{ApiCall, OutboundRequest};
use std::collections::HashMap;
use std::sync::Arc;

pub const CLIENT_ID_HEADER: &str = "ClientID";
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Join a base URL and an endpoint path with exactly one slash between them
pub fn join_url(base_url: &str, path: &str) -> Result<String> {
    if path.trim().is_empty() {
        return Err(DmvicError::missing_input("path"));
    }

    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let url = url::Url::parse(&joined)?;
    Ok(url.to_string())
}

/// Turns an [`ApiCall`] into a fully addressed [`OutboundRequest`]
#[derive(Clone)]
pub struct RequestBuilderImpl {
    settings: Arc<dyn Settings>,
    extra_headers: HashMap<String, String>,
}

impl RequestBuilderImpl {
    pub fn new(settings: Arc<dyn Settings>) -> Self {
        Self {
            settings,
            extra_headers: HashMap::new(),
        }
    }

    /// Headers applied to every request before the identity headers
    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = headers;
        self
    }

    pub fn build(&self, call: &ApiCall, auth_token: Option<&str>) -> Result<OutboundRequest> {
        let base_url = self
            .settings
            .get_setting(keys::BASE_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| DmvicError::missing_input(keys::BASE_URL))?;
        let url = join_url(&base_url, &call.path)?;

        let mut headers = self.extra_headers.clone();
        if let Some(client_id) = self.settings.get_setting(keys::CLIENT_ID) {
            headers.insert(CLIENT_ID_HEADER.to_string(), client_id);
        }
        if let Some(token) = auth_token.filter(|_| call.protected) {
            headers.insert(AUTHORIZATION_HEADER.to_string(), format!("Bearer {}", token));
        }

        Ok(OutboundRequest {
            method: call.method.clone(),
            url,
            body: call.body.clone(),
            headers,
        })
    }
}
