#![forbid(unsafe_code)]
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use orchestrator::domain::VersionSnapshot;
use orchestrator::{Clock, Error, ListingPayload, RemoteSource};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// A scripted upstream response: a JSON body or an HTTP status failure.
pub type Reply = Result<Value, u16>;

#[derive(Default)]
struct Script {
    listings: VecDeque<Reply>,
    versions: VecDeque<Reply>,
    listing_calls: usize,
    version_calls: usize,
}

/// Replays queued replies. The last reply of each queue repeats forever.
#[derive(Clone, Default)]
pub struct ScriptedSource(Arc<Mutex<Script>>);

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_listing(&self, reply: Reply) -> &Self {
        self.0.lock().unwrap().listings.push_back(reply);
        self
    }

    pub fn push_versions(&self, reply: Reply) -> &Self {
        self.0.lock().unwrap().versions.push_back(reply);
        self
    }

    pub fn listing_calls(&self) -> usize {
        self.0.lock().unwrap().listing_calls
    }

    pub fn version_calls(&self) -> usize {
        self.0.lock().unwrap().version_calls
    }
}

fn next(queue: &mut VecDeque<Reply>, url: &str) -> Result<Value, Error> {
    let reply = if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    };
    match reply {
        Some(Ok(body)) => Ok(body),
        Some(Err(status)) => Err(Error::Status {
            url: url.to_owned(),
            status,
        }),
        None => Err(Error::Status {
            url: url.to_owned(),
            status: 503,
        }),
    }
}

#[async_trait::async_trait]
impl RemoteSource for ScriptedSource {
    async fn fetch_listings(&self) -> Result<ListingPayload, Error> {
        let mut script = self.0.lock().unwrap();
        script.listing_calls += 1;
        let body = next(&mut script.listings, "test://listing")?;
        Ok(ListingPayload::decode(body))
    }

    async fn fetch_versions(&self) -> Result<VersionSnapshot, Error> {
        let mut script = self.0.lock().unwrap();
        script.version_calls += 1;
        let body = next(&mut script.versions, "test://versions")?;
        Ok(serde_json::from_value(body)?)
    }
}

struct ClockInner {
    origin: Instant,
    elapsed: Duration,
    sleeps: Vec<Duration>,
}

/// Clock whose sleeps return at once and advance virtual time.
///
/// After `stop_after` sleeps it cancels `cancel`.
#[derive(Clone)]
pub struct StepClock {
    inner: Arc<Mutex<ClockInner>>,
    stop_after: usize,
    cancel: CancellationToken,
}

impl StepClock {
    pub fn new(stop_after: usize, cancel: CancellationToken) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ClockInner {
                origin: Instant::now(),
                elapsed: Duration::ZERO,
                sleeps: Vec::new(),
            })),
            stop_after,
            cancel,
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.inner.lock().unwrap().sleeps.clone()
    }
}

#[async_trait::async_trait]
impl Clock for StepClock {
    fn now(&self) -> Instant {
        let inner = self.inner.lock().unwrap();
        inner.origin + inner.elapsed
    }

    fn utc_now(&self) -> DateTime<Utc> {
        fixed_utc()
    }

    async fn sleep(&self, duration: Duration) {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.sleeps.push(duration);
            inner.elapsed += duration;
            if inner.sleeps.len() >= self.stop_after {
                self.cancel.cancel();
            }
        }
        tokio::task::yield_now().await;
    }
}

/// Clock whose sleeps never finish, so only control events trigger ticks.
#[derive(Clone, Copy, Default)]
pub struct FrozenClock;

#[async_trait::async_trait]
impl Clock for FrozenClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        fixed_utc()
    }

    async fn sleep(&self, _duration: Duration) {
        std::future::pending::<()>().await;
    }
}

pub fn fixed_utc() -> DateTime<Utc> {
    DateTime::from_timestamp(1_717_200_000, 0).unwrap()
}

pub fn foo_listing() -> Value {
    json!([{
        "_id": "x1",
        "title": "Foo",
        "platform": "Windows",
        "version": "1.0",
        "updatedDate": "2024-01-01T00:00:00Z",
        "updateStatus": true,
        "free": true,
        "detected": false,
    }])
}

pub fn two_platform_listing() -> Value {
    json!([
        {
            "_id": "x1",
            "title": "Foo",
            "platform": "Windows",
            "version": "1.1",
            "updatedDate": "2024-02-01T00:00:00Z",
            "updateStatus": true,
            "free": true,
            "detected": false,
        },
        {
            "_id": "m1",
            "title": "Bar",
            "platform": "Mac",
            "version": "0.9",
            "updatedDate": "2024-02-02T00:00:00Z",
            "updateStatus": false,
            "free": false,
            "cost": "$9.99",
            "detected": true,
        },
    ])
}

pub fn versions(windows: &str) -> Value {
    json!({
        "Windows": windows,
        "WindowsDate": "2024-01-01",
        "Mac": "version-mac",
        "MacDate": "2024-01-02",
        "Android": "2.600.1",
        "AndroidDate": "2024-01-03",
        "iOS": "2.600.1",
        "iOSDate": "2024-01-04",
    })
}
