//! HTTP implementation of the page fetcher port.

use async_trait::async_trait;
use kvscribe_core::page::ports::PageFetcher;
use kvscribe_domain::config::FetchConfig;
use kvscribe_domain::{Result, ScribeError};
use reqwest::Client as ReqwestClient;
use tracing::debug;

use crate::errors::InfraError;

/// [`PageFetcher`] backed by a reqwest client.
#[derive(Clone)]
pub struct HttpPageFetcher {
    client: ReqwestClient,
}

impl HttpPageFetcher {
    /// Builds a fetcher with the request timeout and user agent from `config`.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .no_proxy()
            .build()
            .map_err(|err| {
                let infra: InfraError = err.into();
                ScribeError::from(infra)
            })?;

        Ok(HttpPageFetcher { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await.map_err(InfraError::from)?;

        let status = response.status();
        debug!(%url, %status, "fetched page");

        // The response body is returned for any status, callers see exactly
        // what the origin served
        let body = response.text().await.map_err(InfraError::from)?;
        Ok(body)
    }
}
