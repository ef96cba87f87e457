#![forbid(unsafe_code)]

//! Polling synchronization of exploit listings and Roblox client versions.

pub mod clock;
pub mod domain;
pub mod engine;
mod error;
pub mod fingerprint;
pub mod source;
pub mod transform;
pub mod view;

pub use clock::{Clock, SystemClock};
pub use engine::{
    ControlEvent, ListingOutcome, Services, SyncEngine, SyncHandle, TickReport, VersionOutcome,
};
pub use error::Error;
pub use source::{HttpSource, ListingPayload, RemoteSource};
pub use view::ViewState;
