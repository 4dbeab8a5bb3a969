use crate::error::{DmvicError, Result};
use crate::types::RawUpstreamResponse;
use reqwest::Response;
use serde_json::Value;

/// Converts reqwest responses into [`RawUpstreamResponse`]
#[derive(Clone, Default)]
pub struct ResponseConverterImpl;

impl ResponseConverterImpl {
    pub fn new() -> Self {
        Self
    }

    pub async fn convert_response(&self, response: Response) -> Result<RawUpstreamResponse> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let text = response.text().await?;

        let body = Self::parse_body(&url, status, &text)?;
        Ok(RawUpstreamResponse::new(status, body))
    }

    /// An empty body parses as `null`; anything else must be JSON
    pub fn parse_body(url: &str, status: u16, text: &str) -> Result<Value> {
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(text).map_err(|source| DmvicError::InvalidResponseBody {
            url: url.to_string(),
            status,
            source,
        })
    }
}
