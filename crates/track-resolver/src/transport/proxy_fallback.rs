use crate::transport::{Transport, TransportError, TransportResponse};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Sends every request directly first and, only when that attempt produces
/// no response at all, retries it once through a rewriting proxy such as
/// `https://corsproxy.io/?`.
pub struct ProxyFallbackTransport {
    inner: Arc<dyn Transport>,
    proxy_prefix: Option<String>,
}

impl ProxyFallbackTransport {
    pub fn new(inner: Arc<dyn Transport>, proxy_prefix: Option<String>) -> Self {
        let proxy_prefix = proxy_prefix.filter(|prefix| !prefix.trim().is_empty());

        Self {
            inner,
            proxy_prefix,
        }
    }

    fn proxied_url(prefix: &str, url: &str) -> String {
        format!("{}{}", prefix, url)
    }
}

#[async_trait]
impl Transport for ProxyFallbackTransport {
    async fn fetch(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let direct_error = match self.inner.fetch(url).await {
            Ok(response) => return Ok(response),
            Err(error) => error,
        };

        let prefix = match &self.proxy_prefix {
            Some(prefix) => prefix,
            None => return Err(direct_error),
        };

        warn!(error = %direct_error, "Direct request failed, retrying through proxy");

        match self.inner.fetch(&Self::proxied_url(prefix, url)).await {
            Ok(response) => {
                debug!(status = response.status, "Proxied request completed");
                Ok(response)
            }
            Err(proxy_error) => Err(TransportError::new(format!(
                "direct request failed: {}; proxied request failed: {}",
                direct_error, proxy_error
            ))),
        }
    }
}
