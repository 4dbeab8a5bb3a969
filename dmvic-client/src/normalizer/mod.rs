//! Normalization of upstream payloads into [`NormalizedResult`]
//!
//! The upstream answers in two shapes. Authentication endpoints report a
//! numeric `code`, everything else reports a boolean `success` flag next to an
//! error list and a `callbackObj` payload. The shape is decided once, in a
//! fixed order, and the matching field mapping is applied.

pub mod fields;

use crate::classifier::ErrorClassifier;
use crate::types::{
    is_blank, FailureResult, NormalizedError, NormalizedResult, RawUpstreamResponse,
    RecoveryMarker, SuccessResult,
};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Shape of a raw body, decided before any field mapping happens
#[derive(Debug)]
enum Shape<'a> {
    AuthSuccess,
    DomainSuccess { payload: &'a Value },
    Failure { entries: &'a [Value] },
}

/// Stateless normalizer; the same input always yields the same result
#[derive(Debug, Clone)]
pub struct ResponseNormalizer {
    classifier: Arc<ErrorClassifier>,
}

impl ResponseNormalizer {
    pub fn new(classifier: Arc<ErrorClassifier>) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    pub fn normalize(&self, raw: &RawUpstreamResponse) -> NormalizedResult {
        let empty = Map::new();
        let body = raw.body.as_object().unwrap_or(&empty);

        match discriminate(body) {
            Shape::AuthSuccess => NormalizedResult::Success(SuccessResult {
                request_id: text_field(body, fields::REQUEST_ID),
                reference_number: text_field(body, fields::REFERENCE_NUMBER),
                response_data: auth_response_data(body),
                request_echo: None,
                http_status_code: raw.http_status_code,
                recovery: RecoveryMarker::default(),
            }),
            Shape::DomainSuccess { payload } => NormalizedResult::Success(SuccessResult {
                request_id: text_field(body, fields::REQUEST_ID),
                reference_number: text_field(body, fields::REFERENCE_NUMBER),
                response_data: payload.clone(),
                request_echo: body
                    .get(fields::REQUEST_ECHO)
                    .filter(|v| !is_blank(v))
                    .cloned(),
                http_status_code: raw.http_status_code,
                recovery: RecoveryMarker::default(),
            }),
            Shape::Failure { entries } => {
                NormalizedResult::Failure(self.build_failure(body, entries, raw.http_status_code))
            }
        }
    }

    fn build_failure(
        &self,
        body: &Map<String, Value>,
        entries: &[Value],
        http_status_code: u16,
    ) -> FailureResult {
        let errors = if entries.is_empty() {
            vec![self.synthesize_error(body, http_status_code)]
        } else {
            entries.iter().map(|e| self.normalize_entry(e)).collect()
        };

        let registry_data = payload(body);
        let payload_object = registry_data.and_then(Value::as_object);
        let from_payload_or_body = |key: &str| {
            payload_object
                .and_then(|p| text_field(p, key))
                .or_else(|| text_field(body, key))
        };

        FailureResult {
            request_id: text_field(body, fields::REQUEST_ID),
            reference_number: text_field(body, fields::REFERENCE_NUMBER),
            ntsa_response: registry_data.cloned(),
            issuance_request_id: from_payload_or_body(fields::ISSUANCE_REQUEST_ID),
            issuance_message: from_payload_or_body(fields::ISSUANCE_MESSAGE),
            errors,
            http_status_code,
            recovery: RecoveryMarker::default(),
        }
    }

    fn normalize_entry(&self, entry: &Value) -> NormalizedError {
        let (error_code, error_text) = match entry {
            Value::Object(object) => (
                first_text(object, fields::ENTRY_CODE),
                first_text(object, fields::ENTRY_TEXT).unwrap_or_default(),
            ),
            other => (None, scalar_text(other).unwrap_or_default()),
        };

        NormalizedError {
            sdk_error_code: self.classifier.classify(&error_text),
            error_code,
            error_text,
        }
    }

    /// Single entry built from top-level fields when the upstream sent no list
    fn synthesize_error(&self, body: &Map<String, Value>, http_status_code: u16) -> NormalizedError {
        let error_text = first_text(body, fields::TOP_LEVEL_TEXT).unwrap_or_else(|| {
            format!("Request failed with HTTP status {}", http_status_code)
        });

        NormalizedError {
            sdk_error_code: self.classifier.classify(&error_text),
            error_code: first_text(body, fields::TOP_LEVEL_CODE),
            error_text,
        }
    }
}

impl Default for ResponseNormalizer {
    fn default() -> Self {
        Self::new(ErrorClassifier::shared_handle())
    }
}

/// Normalize with the built-in classifier
pub fn normalize(raw: &RawUpstreamResponse) -> NormalizedResult {
    ResponseNormalizer::default().normalize(raw)
}

fn discriminate(body: &Map<String, Value>) -> Shape<'_> {
    let auth_status = body.get(fields::AUTH_STATUS).and_then(Value::as_i64);
    if auth_status == Some(fields::AUTH_SUCCESS_CODE) {
        return Shape::AuthSuccess;
    }

    let entries = error_entries(body);
    let flagged = body.get(fields::SUCCESS_FLAG).and_then(Value::as_bool) == Some(true);
    match payload(body) {
        Some(payload) if flagged && entries.is_empty() => Shape::DomainSuccess { payload },
        _ => Shape::Failure { entries },
    }
}

/// First non-empty error list among the known field names
fn error_entries(body: &Map<String, Value>) -> &[Value] {
    fields::ERROR_LISTS
        .iter()
        .filter_map(|name| body.get(*name).and_then(Value::as_array))
        .find(|list| !list.is_empty())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn payload(body: &Map<String, Value>) -> Option<&Value> {
    body.get(fields::PAYLOAD).filter(|v| !is_blank(v))
}

fn auth_response_data(body: &Map<String, Value>) -> Value {
    let mut data = Map::new();
    for (key, value) in body {
        if key == fields::AUTH_STATUS || value.is_null() {
            continue;
        }
        let name = fields::AUTH_FIELD_RENAMES
            .iter()
            .find(|(upstream, _)| *upstream == key.as_str())
            .map(|(_, canonical)| *canonical)
            .unwrap_or(key.as_str());
        data.insert(name.to_string(), value.clone());
    }
    Value::Object(data)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(scalar_text)
}

fn first_text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| text_field(object, key))
}
