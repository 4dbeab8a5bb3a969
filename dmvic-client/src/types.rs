use crate::classifier::SdkErrorCode;
use reqwest::Method;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Upstream response as handed back by the transport
#[derive(Debug, Clone, PartialEq)]
pub struct RawUpstreamResponse {
    pub http_status_code: u16,
    pub body: Value,
}

impl RawUpstreamResponse {
    pub fn new(http_status_code: u16, body: Value) -> Self {
        Self {
            http_status_code,
            body,
        }
    }
}

/// Fully built request handed to the transport
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
    pub headers: HashMap<String, String>,
}

impl OutboundRequest {
    /// Bearer token carried by this request, if any
    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
            .and_then(|(_, value)| value.strip_prefix("Bearer "))
    }
}

/// One logical call against the upstream
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    /// Protected calls carry a bearer token
    pub protected: bool,
}

impl ApiCall {
    /// Protected POST with a JSON body
    pub fn post<S: Into<String>>(path: S, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
            protected: true,
        }
    }

    /// Protected GET without a body
    pub fn get<S: Into<String>>(path: S) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
            protected: true,
        }
    }

    /// Mark the call as not requiring a bearer token
    #[must_use]
    pub fn public(mut self) -> Self {
        self.protected = false;
        self
    }
}

/// Error entry with its classified code
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    pub error_text: String,
    pub sdk_error_code: SdkErrorCode,
}

/// Annotation added by the recovery chain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecoveryMarker {
    pub token_refreshed: Option<bool>,
    pub new_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuccessResult {
    pub request_id: Option<String>,
    pub reference_number: Option<String>,
    pub response_data: Value,
    pub request_echo: Option<Value>,
    pub http_status_code: u16,
    pub recovery: RecoveryMarker,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailureResult {
    pub request_id: Option<String>,
    pub reference_number: Option<String>,
    pub ntsa_response: Option<Value>,
    pub issuance_request_id: Option<String>,
    pub issuance_message: Option<String>,
    pub errors: Vec<NormalizedError>,
    pub http_status_code: u16,
    pub recovery: RecoveryMarker,
}

/// Canonical result of one upstream exchange
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedResult {
    Success(SuccessResult),
    Failure(FailureResult),
}

impl NormalizedResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Success(s) => s.http_status_code,
            Self::Failure(f) => f.http_status_code,
        }
    }

    /// Error entries; empty on success
    pub fn errors(&self) -> &[NormalizedError] {
        match self {
            Self::Success(_) => &[],
            Self::Failure(f) => &f.errors,
        }
    }

    pub fn first_error_code(&self) -> Option<SdkErrorCode> {
        self.errors().first().map(|e| e.sdk_error_code)
    }

    pub fn has_error_code(&self, code: SdkErrorCode) -> bool {
        self.errors().iter().any(|e| e.sdk_error_code == code)
    }

    pub fn response_data(&self) -> Option<&Value> {
        match self {
            Self::Success(s) => Some(&s.response_data),
            Self::Failure(_) => None,
        }
    }

    /// Token returned by a successful authentication
    pub fn auth_token(&self) -> Option<&str> {
        self.response_data()
            .and_then(|data| data.get("token"))
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
    }

    pub fn recovery(&self) -> &RecoveryMarker {
        match self {
            Self::Success(s) => &s.recovery,
            Self::Failure(f) => &f.recovery,
        }
    }

    pub fn token_refreshed(&self) -> Option<bool> {
        self.recovery().token_refreshed
    }

    pub fn new_token(&self) -> Option<&str> {
        self.recovery().new_token.as_deref()
    }

    /// Replace the recovery annotation
    #[must_use]
    pub fn with_recovery(mut self, marker: RecoveryMarker) -> Self {
        match &mut self {
            Self::Success(s) => s.recovery = marker,
            Self::Failure(f) => f.recovery = marker,
        }
        self
    }

    /// Sparse JSON rendering: empty top-level fields are dropped, nested values are kept as-is
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("success".to_string(), Value::Bool(self.is_success()));

        match self {
            Self::Success(s) => {
                insert_present(&mut map, "apiRequestNumber", opt_string(&s.request_id));
                insert_present(&mut map, "dmvicRefNumber", opt_string(&s.reference_number));
                insert_present(&mut map, "responseData", s.response_data.clone());
                insert_present(&mut map, "inputs", s.request_echo.clone().unwrap_or(Value::Null));
                insert_present(&mut map, "httpStatusCode", Value::from(s.http_status_code));
            }
            Self::Failure(f) => {
                insert_present(&mut map, "apiRequestNumber", opt_string(&f.request_id));
                insert_present(&mut map, "dmvicRefNumber", opt_string(&f.reference_number));
                insert_present(&mut map, "ntsaResponse", f.ntsa_response.clone().unwrap_or(Value::Null));
                insert_present(&mut map, "issuanceRequestId", opt_string(&f.issuance_request_id));
                insert_present(&mut map, "issuanceMessage", opt_string(&f.issuance_message));
                insert_present(
                    &mut map,
                    "errors",
                    serde_json::to_value(&f.errors).unwrap_or(Value::Null),
                );
                insert_present(&mut map, "httpStatusCode", Value::from(f.http_status_code));
            }
        }

        // `tokenRefreshed: false` is meaningful, so it survives compaction
        let marker = self.recovery();
        if let Some(refreshed) = marker.token_refreshed {
            map.insert("tokenRefreshed".to_string(), Value::Bool(refreshed));
        }
        insert_present(&mut map, "newToken", opt_string(&marker.new_token));

        Value::Object(map)
    }
}

impl Serialize for NormalizedResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

fn opt_string(value: &Option<String>) -> Value {
    value.clone().map(Value::String).unwrap_or(Value::Null)
}

fn insert_present(map: &mut Map<String, Value>, key: &str, value: Value) {
    if !is_blank(&value) {
        map.insert(key.to_string(), value);
    }
}

/// Null, empty string/array/object, zero and false count as blank
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
