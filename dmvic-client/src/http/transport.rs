use crate::config::DmvicConfig;
use crate::error::Result;
use crate::http::ResponseConverterImpl;
use crate::traits::Transport;
use crate::types::{OutboundRequest, RawUpstreamResponse};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// [`Transport`] over a pooled reqwest client
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    response_converter: ResponseConverterImpl,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            response_converter: ResponseConverterImpl::new(),
        })
    }

    pub fn from_config(config: &DmvicConfig) -> Result<Self> {
        Self::new(config.timeout())
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> Result<RawUpstreamResponse> {
        debug!(method = %request.method, url = %request.url, "Sending upstream request");

        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let raw = self.response_converter.convert_response(response).await?;

        debug!(status = raw.http_status_code, url = %request.url, "Upstream responded");
        Ok(raw)
    }
}
