//! Classification of upstream free-text error messages
//!
//! The upstream reports errors as prose. This module turns that prose into a
//! small set of stable [`SdkErrorCode`]s using an ordered pattern table whose
//! rows never overlap on a real message.

pub mod corpus;
pub mod patterns;

pub use corpus::{LABELED_MESSAGES, UNRECOGNIZED_MESSAGES};
pub use patterns::{ErrorPatternEntry, SdkErrorCode, PATTERN_TABLE};

use crate::error::{DmvicError, Result};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::sync::Arc;

static SHARED: Lazy<Arc<ErrorClassifier>> = Lazy::new(|| {
    Arc::new(ErrorClassifier::new(PATTERN_TABLE).expect("built-in error pattern table must compile"))
});

#[derive(Debug, Clone)]
struct CompiledPattern {
    code: SdkErrorCode,
    regex: Regex,
}

/// Compiled, ordered pattern table
#[derive(Debug, Clone)]
pub struct ErrorClassifier {
    patterns: Vec<CompiledPattern>,
}

impl ErrorClassifier {
    /// Compile a pattern table. Patterns are matched case-insensitively.
    pub fn new(table: &[ErrorPatternEntry]) -> Result<Self> {
        let patterns = table
            .iter()
            .map(|entry| {
                RegexBuilder::new(entry.pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|regex| CompiledPattern {
                        code: entry.code,
                        regex,
                    })
                    .map_err(|source| DmvicError::InvalidPattern {
                        code: entry.code.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Classifier over the built-in table, compiled once per process
    pub fn shared() -> &'static ErrorClassifier {
        &SHARED
    }

    /// Owned handle to the shared classifier
    pub fn shared_handle() -> Arc<ErrorClassifier> {
        Arc::clone(&*SHARED)
    }

    /// Code of the first matching pattern, or the unrecognized sentinel
    pub fn classify(&self, message: &str) -> SdkErrorCode {
        if message.trim().is_empty() {
            return SdkErrorCode::Unrecognized;
        }

        self.patterns
            .iter()
            .find(|p| p.regex.is_match(message))
            .map(|p| p.code)
            .unwrap_or(SdkErrorCode::Unrecognized)
    }

    /// Every code whose pattern matches, in table order
    pub fn matching_codes(&self, message: &str) -> Vec<SdkErrorCode> {
        self.patterns
            .iter()
            .filter(|p| p.regex.is_match(message))
            .map(|p| p.code)
            .collect()
    }

    /// Check that each labeled message is matched by exactly one pattern and
    /// that it is the expected one.
    pub fn verify_exclusive(&self, corpus: &[(&str, SdkErrorCode)]) -> Result<()> {
        for (message, expected) in corpus {
            let codes = self.matching_codes(message);
            if codes.as_slice() != [*expected] {
                return Err(DmvicError::AmbiguousClassification {
                    message: message.to_string(),
                    codes: if codes.is_empty() {
                        format!("none, expected {}", expected)
                    } else {
                        codes
                            .iter()
                            .map(SdkErrorCode::as_str)
                            .collect::<Vec<_>>()
                            .join(", ")
                    },
                });
            }
        }
        Ok(())
    }
}

/// Classify with the shared built-in table
pub fn classify(message: &str) -> SdkErrorCode {
    ErrorClassifier::shared().classify(message)
}
