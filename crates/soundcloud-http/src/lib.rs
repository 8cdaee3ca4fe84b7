use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::Client;
use std::time::Duration;
use track_resolver::{Transport, TransportError, TransportResponse};
use tracing::debug;

const USER_AGENT: &str = concat!("track-resolver/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum HttpTransportError {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
}

/// Sends upstream GETs straight from this process with `reqwest`.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn create(
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, HttpTransportError> {
        let client = Client::builder()
            .redirect(Policy::limited(MAX_REDIRECTS))
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|error| TransportError::new(error.without_url()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| TransportError::new(error.without_url()))?;

        debug!(status, "Upstream request completed");

        Ok(TransportResponse { status, body })
    }
}
