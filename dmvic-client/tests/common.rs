//! Shared helpers for dmvic-client integration tests

#![allow(dead_code)]

use dmvic_client::config::{CoverageGapPolicy, DmvicConfig, DmvicConfigBuilder};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOGIN_PATH: &str = "/api/V1/Account/Login";
pub const CONFIRM_PATH: &str = "/api/V5/IntermediaryIntegration/ConfirmCertificateIssuance";
pub const VALIDATE_PATH: &str = "/api/V5/Integration/ValidateInsurance";
pub const ISSUE_PATH: &str = "/api/V5/IntermediaryIntegration/IssuanceTypeCCertificate";

/// Configuration pointing at a mock server
pub fn config_for(base_url: &str, policy: CoverageGapPolicy) -> DmvicConfig {
    DmvicConfigBuilder::new(base_url)
        .client_id("A1B2C3")
        .credentials("agent@insurer.co.ke", "s3cret")
        .coverage_gap_policy(policy)
        .timeout(5)
        .build()
        .expect("test configuration should be valid")
}

/// Successful login body in the upstream's auth shape
pub fn login_body(token: &str) -> Value {
    json!({
        "code": 1,
        "token": token,
        "LoginUserId": "4a1f1c2e",
        "issueAt": "2024-05-01T08:00:00",
        "expires": "2099-01-01T00:00:00"
    })
}

pub fn validate_success_body() -> Value {
    json!({
        "success": true,
        "APIRequestNumber": "UAT-7F3A-0001",
        "DMVICRefNo": "DMV-0001",
        "Inputs": "{\"vehicleRegistrationnumber\":\"KCB 456B\"}",
        "callbackObj": {
            "ValidateInsurance": {"CertificateNumber": "C1234567", "InsurancePolicyNo": "POL/2024/001"}
        },
        "Error": []
    })
}

pub fn coverage_gap_body(issuance_request_id: &str) -> Value {
    json!({
        "success": false,
        "APIRequestNumber": "UAT-7F3A-0002",
        "callbackObj": {
            "IssuanceRequestID": issuance_request_id,
            "IssuanceMessage": "Certificate issuance is pending confirmation"
        },
        "Error": [{
            "errorCode": "ER0012",
            "errorText": "There is a gap of 12 days between the previous cover and the requested cover for vehicle KCB 456B"
        }]
    })
}

/// Write a dmvic.toml for `base_url` into `dir`
pub fn write_config_file(dir: &Path, base_url: &str) -> std::io::Result<PathBuf> {
    let path = dir.join("dmvic.toml");
    let content = format!(
        r#"base_url = "{base_url}"
client_id = "A1B2C3"
coverage_gap_policy = "strict"
timeout_seconds = 5

[auth]
username = "agent@insurer.co.ke"
password = "s3cret"

[headers]
"X-Channel" = "broker-portal"
"#
    );
    fs::write(&path, content)?;
    Ok(path)
}
