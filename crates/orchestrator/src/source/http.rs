#![forbid(unsafe_code)]

use crate::domain::VersionSnapshot;
use crate::error::Error;
use crate::source::{ListingPayload, RemoteSource};
use async_trait::async_trait;
use config::Upstream;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// HTTP client carrying the identifying user agent and request timeout.
pub fn upstream_client(upstream: &Upstream) -> Result<reqwest::Client, Error> {
    let client = reqwest::Client::builder()
        .user_agent(upstream.user_agent.as_str())
        .timeout(upstream.timeout)
        .build()?;
    Ok(client)
}

/// GET `url` and parse the body as JSON. Non-2xx statuses are errors.
pub async fn get_json(client: &reqwest::Client, url: &Url) -> Result<Value, Error> {
    let response = client
        .get(url.clone())
        .header(ACCEPT, "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await?;
    debug!(%url, bytes = body.len(), "upstream responded");
    Ok(serde_json::from_slice(&body)?)
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    listing_url: Url,
    versions_url: Url,
}

impl HttpSource {
    pub fn new(upstream: &Upstream) -> Result<Self, Error> {
        Ok(Self {
            client: upstream_client(upstream)?,
            listing_url: upstream.listing_url()?,
            versions_url: upstream.versions_url()?,
        })
    }
}

#[async_trait]
impl RemoteSource for HttpSource {
    async fn fetch_listings(&self) -> Result<ListingPayload, Error> {
        let body = get_json(&self.client, &self.listing_url).await?;
        Ok(ListingPayload::decode(body))
    }

    async fn fetch_versions(&self) -> Result<VersionSnapshot, Error> {
        let body = get_json(&self.client, &self.versions_url).await?;
        Ok(serde_json::from_value(body)?)
    }
}
