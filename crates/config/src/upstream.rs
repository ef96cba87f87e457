#![forbid(unsafe_code)]

use crate::Error;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::time::Duration;
use url::Url;

/// Where the tracker pulls its data from.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Upstream {
    /// Base URL of the upstream API. Endpoint paths are joined onto it.
    pub base_url: String,

    /// Path of the exploit listing endpoint (JSON array).
    pub listing_path: String,

    /// Path of the current client versions endpoint (JSON object).
    pub versions_path: String,

    /// Identifying `User-Agent` sent with every upstream request.
    pub user_agent: String,

    /// Per-request timeout in milliseconds.
    #[serde_as(as = "serde_with::DurationMilliSeconds")]
    pub timeout: Duration,
}

impl Default for Upstream {
    fn default() -> Self {
        Self {
            base_url: "https://weao.xyz".into(),
            listing_path: "/api/status/exploits".into(),
            versions_path: "/api/versions/current".into(),
            user_agent: "WEAO-3PService".into(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl Upstream {
    pub fn listing_url(&self) -> Result<Url, Error> {
        self.endpoint(&self.listing_path)
    }

    pub fn versions_url(&self) -> Result<Url, Error> {
        self.endpoint(&self.versions_path)
    }

    fn base(&self) -> Result<Url, Error> {
        let url = Url::parse(&self.base_url).map_err(|source| Error::InvalidUrl {
            url: self.base_url.clone(),
            source,
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::UnsupportedScheme(other.to_string())),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.base()?
            .join(path)
            .map_err(|source| Error::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                source,
            })
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        self.listing_url()?;
        self.versions_url()?;
        if self.timeout.is_zero() {
            return Err(Error::ZeroDuration("upstream.timeout"));
        }
        Ok(())
    }
}
