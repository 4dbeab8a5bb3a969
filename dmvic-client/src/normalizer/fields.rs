//! Upstream field names

/// Numeric status field of the authentication family
pub const AUTH_STATUS: &str = "code";
/// Value of [`AUTH_STATUS`] signalling a successful login
pub const AUTH_SUCCESS_CODE: i64 = 1;

/// Upstream auth field renamed to its canonical name; unlisted fields pass through
pub const AUTH_FIELD_RENAMES: &[(&str, &str)] = &[
    ("token", "token"),
    ("LoginUserId", "loginUserId"),
    ("issueAt", "issuedAt"),
    ("expires", "expiresAt"),
];

pub const SUCCESS_FLAG: &str = "success";
/// Error list, under whichever of these names the endpoint family uses
pub const ERROR_LISTS: &[&str] = &["Error", "errors"];
pub const PAYLOAD: &str = "callbackObj";
pub const REQUEST_ECHO: &str = "Inputs";
pub const REQUEST_ID: &str = "APIRequestNumber";
pub const REFERENCE_NUMBER: &str = "DMVICRefNo";
pub const ISSUANCE_REQUEST_ID: &str = "IssuanceRequestID";
pub const ISSUANCE_MESSAGE: &str = "IssuanceMessage";

pub const ENTRY_CODE: &[&str] = &["errorCode", "ErrorCode", "code"];
pub const ENTRY_TEXT: &[&str] = &["errorText", "ErrorText", "message", "Message"];

pub const TOP_LEVEL_CODE: &[&str] = &["errorCode", "code"];
pub const TOP_LEVEL_TEXT: &[&str] = &["message", "Message", "errorText", "error"];
