use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dmvic-client operations
pub type Result<T> = std::result::Result<T, DmvicError>;

/// Prefix shared by every fault raised before an interpretable upstream response existed
pub const TRANSPORT_FAILURE_PREFIX: &str = "Upstream transport failure";

/// Error types raised by the client.
///
/// Upstream domain errors are never represented here: they travel inside a
/// failed [`crate::types::NormalizedResult`]. Only transport faults, contract
/// violations and configuration problems are raised.
#[derive(Debug, Error)]
pub enum DmvicError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("{}: {message}", TRANSPORT_FAILURE_PREFIX)]
    Transport { message: String },

    #[error(
        "{}: response body from {url} is not valid JSON (HTTP {status}): {source}",
        TRANSPORT_FAILURE_PREFIX
    )]
    InvalidResponseBody {
        url: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing required input: {field}")]
    MissingInput { field: String },

    #[error("Invalid error pattern for {code}: {source}")]
    InvalidPattern {
        code: String,
        #[source]
        source: regex::Error,
    },

    #[error("Ambiguous classification for message '{message}': matched [{codes}]")]
    AmbiguousClassification { message: String, codes: String },
}

impl DmvicError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new missing input error
    pub fn missing_input<S: Into<String>>(field: S) -> Self {
        Self::MissingInput {
            field: field.into(),
        }
    }

    /// Whether the call failed before any interpretable upstream response
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::InvalidResponseBody { .. }
        )
    }
}

impl From<reqwest::Error> for DmvicError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.to_string())
    }
}
