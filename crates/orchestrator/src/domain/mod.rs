#![forbid(unsafe_code)]

mod display;
mod listing;
mod versions;

pub use display::{DetailRecord, DisplayRecord, UpdateStatus};
pub use listing::{RawListingRecord, RecommendedReason, SuncInfo};
pub use versions::VersionSnapshot;
