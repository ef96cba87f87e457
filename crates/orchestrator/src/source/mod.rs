#![forbid(unsafe_code)]

mod http;
mod payload;

pub use http::{HttpSource, get_json, upstream_client};
pub use payload::ListingPayload;

use crate::domain::VersionSnapshot;
use crate::error::Error;
use async_trait::async_trait;

#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the primary listing. Failures here abort the current tick.
    async fn fetch_listings(&self) -> Result<ListingPayload, Error>;
    /// Fetch the client version snapshot. Failures here are tolerated.
    async fn fetch_versions(&self) -> Result<VersionSnapshot, Error>;
}
