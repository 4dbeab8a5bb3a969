use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable error codes exposed to callers in place of upstream free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SdkErrorCode {
    TokenInvalid,
    InvalidCredentials,
    NotFound,
    CoverageGap,
    DoubleInsurance,
    CertificateCancelled,
    InsufficientStock,
    DuplicateRequest,
    InvalidCoverPeriod,
    #[serde(rename = "VALIDATION_ERROR")]
    ValidationFailed,
    UpstreamUnavailable,
    /// Sentinel for text that no pattern recognizes
    #[serde(rename = "UNKNOWN_ERROR")]
    Unrecognized,
}

impl SdkErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TokenInvalid => "TOKEN_INVALID",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::NotFound => "NOT_FOUND",
            Self::CoverageGap => "COVERAGE_GAP",
            Self::DoubleInsurance => "DOUBLE_INSURANCE",
            Self::CertificateCancelled => "CERTIFICATE_CANCELLED",
            Self::InsufficientStock => "INSUFFICIENT_STOCK",
            Self::DuplicateRequest => "DUPLICATE_REQUEST",
            Self::InvalidCoverPeriod => "INVALID_COVER_PERIOD",
            Self::ValidationFailed => "VALIDATION_ERROR",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            Self::Unrecognized => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for SdkErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the classification table
#[derive(Debug, Clone, Copy)]
pub struct ErrorPatternEntry {
    pub code: SdkErrorCode,
    pub pattern: &'static str,
}

const fn entry(code: SdkErrorCode, pattern: &'static str) -> ErrorPatternEntry {
    ErrorPatternEntry { code, pattern }
}

/// Built-in table, walked in order. Patterns are matched case-insensitively.
///
/// Each pattern must tolerate the variable parts of the upstream message
/// (registration numbers, certificate numbers, day counts) without reaching
/// into another entry's messages. `LABELED_MESSAGES` in the corpus module is
/// the reference for that.
pub const PATTERN_TABLE: &[ErrorPatternEntry] = &[
    entry(
        SdkErrorCode::TokenInvalid,
        r"\b(invalid|expired)\s+(access\s+|bearer\s+)?token\b|\btoken\b[^.]*\b(invalid|expired)\b|^\s*unauthori[sz]ed\b",
    ),
    entry(
        SdkErrorCode::InvalidCredentials,
        r"\binvalid\s+(username|user\s*name|user\s*id|login|credentials)\b|\b(username|password)\s+(is\s+)?incorrect\b|\baccount\s+(is\s+|has\s+been\s+)?(locked|disabled)\b",
    ),
    entry(
        SdkErrorCode::NotFound,
        r"\bno\s+records?\s+(were\s+)?found\b|\brecord\s+not\s+found\b|\b(certificate|vehicle|policy|member\s+company)\b.*\b(does\s+not|doesn't)\s+exist\b",
    ),
    entry(
        SdkErrorCode::CoverageGap,
        r"\bgap\s+of\s+\d+\s+days?\b|\b(insurance|cover(age)?)\s+gap\b",
    ),
    entry(
        SdkErrorCode::DoubleInsurance,
        r"\bdouble\s+insurance\b|\balready\s+(has|have)\s+an?\s+active\s+(cover|policy|certificate|insurance)\b",
    ),
    entry(
        SdkErrorCode::CertificateCancelled,
        r"\bcertificate\b.*\balready\s+(been\s+)?cancell?ed\b",
    ),
    entry(
        SdkErrorCode::InsufficientStock,
        r"\binsufficient\s+(certificate\s+)?stock\b|\bno\s+(certificate\s+)?stock\s+(is\s+)?available\b|\bstock\s+(is\s+)?(exhausted|depleted)\b",
    ),
    entry(
        SdkErrorCode::DuplicateRequest,
        r"\bduplicate\s+(request|transaction|policy\s+number|submission)\b",
    ),
    entry(
        SdkErrorCode::InvalidCoverPeriod,
        r"\b(commencing|start|expiry|end)\s+date\s+(cannot|can\s+not|should|must)\b",
    ),
    entry(
        SdkErrorCode::ValidationFailed,
        r"\b(is|are)\s+(required|mandatory)\b|\bcannot\s+be\s+(empty|null|blank)\b|\bis\s+not\s+in\s+(a|the)\s+(correct|valid)\s+format\b|\binvalid\s+(vehicle\s+registration|registration|chassis|email|phone|kra\s+pin|national\s+id|input)\b",
    ),
    entry(
        SdkErrorCode::UpstreamUnavailable,
        r"\bunexpected\s+error\b|\binternal\s+server\s+error\b|\bservice\s+(is\s+)?(temporarily\s+)?unavailable\b|\bdatabase\s+(error|timeout)\b",
    ),
];
