//! Safe Browsing threat lookup client.
//!
//! One lookup is one POST to `threatMatches:find`. Redirects are not
//! followed. Failures are returned as [`CheckResult::Error`] and never retried.

mod result;
mod wire;

use std::future::Future;

use reqwest::header::ACCEPT;

use crate::config::LookupConfig;
use crate::error::{Error, Result};
use crate::url::NormalizedUrl;

pub use result::{classify_response, CheckResult, LookupError};
pub use wire::{
    ClientInfo, Matches, ThreatEntry, ThreatInfo, ThreatMatch, ThreatMatchesRequest,
    ThreatMatchesResponse, CLIENT_ID, CLIENT_VERSION, ENTRY_TYPE_URL, PLATFORM_ANY,
};

/// Anything that can turn a normalized URL into a verdict.
pub trait ThreatLookup {
    fn lookup(&self, url: &NormalizedUrl) -> impl Future<Output = CheckResult> + Send;
}

/// HTTP client for the Safe Browsing v4 lookup API.
#[derive(Debug, Clone)]
pub struct ThreatLookupClient {
    config: LookupConfig,
    client: reqwest::Client,
}

impl ThreatLookupClient {
    pub fn new(config: LookupConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|error| Error::HttpClient(error.to_string()))?;
        Ok(Self { config, client })
    }

    pub const fn config(&self) -> &LookupConfig {
        &self.config
    }

    async fn fetch(&self, url: &NormalizedUrl) -> std::result::Result<CheckResult, LookupError> {
        let body = ThreatMatchesRequest::for_url(url);

        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(LookupError::from_transport)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(LookupError::from_transport)?;

        tracing::debug!(%url, status = status.as_u16(), "threat lookup responded");
        Ok(classify_response(status, &text))
    }
}

impl ThreatLookup for ThreatLookupClient {
    async fn lookup(&self, url: &NormalizedUrl) -> CheckResult {
        tracing::debug!(%url, endpoint = %self.config.endpoint, "sending threat lookup");

        let result = self
            .fetch(url)
            .await
            .unwrap_or_else(CheckResult::Error);

        match &result {
            CheckResult::Safe => tracing::info!(%url, "no threats found"),
            CheckResult::Unsafe { threats } => {
                tracing::info!(%url, count = threats.len(), "threats found");
            }
            CheckResult::Error(error) => {
                tracing::warn!(%url, cause = error.kind(), "threat lookup failed: {error}");
            }
        }
        result
    }
}
