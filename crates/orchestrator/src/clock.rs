#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

#[async_trait::async_trait]
pub trait Clock: Send + Sync {
    /// Monotonic time, used for tick cadence.
    fn now(&self) -> Instant;
    /// Wall-clock time, used for the last-updated stamp.
    fn utc_now(&self) -> DateTime<Utc>;
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by the tokio timer, so paused test time applies to it.
#[derive(Debug, Default)]
pub struct SystemClock;

#[async_trait::async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
