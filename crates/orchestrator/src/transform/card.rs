#![forbid(unsafe_code)]

use crate::domain::{DisplayRecord, RawListingRecord, UpdateStatus};
use std::collections::BTreeSet;

/// Synthetic category for the unfiltered view.
pub const ALL_CATEGORY: &str = "all";

pub fn to_display_record(raw: &RawListingRecord) -> DisplayRecord {
    DisplayRecord {
        id: raw.id.clone(),
        name: raw.title.clone(),
        platform: raw.platform.to_lowercase(),
        version: raw.version.clone(),
        last_update: raw.updated_date.clone(),
        cost: cost_label(raw),
        status: UpdateStatus::from_flag(raw.update_status),
        update_status: raw.update_status,
        detected: raw.detected,
        free: raw.free,
    }
}

pub fn to_display_records(raw: &[RawListingRecord]) -> Vec<DisplayRecord> {
    raw.iter().map(to_display_record).collect()
}

/// `"all"` followed by the sorted, de-duplicated platform tags.
pub fn categories(records: &[DisplayRecord]) -> Vec<String> {
    let platforms: BTreeSet<&str> = records
        .iter()
        .map(|record| record.platform.as_str())
        .filter(|platform| *platform != ALL_CATEGORY)
        .collect();
    std::iter::once(ALL_CATEGORY)
        .chain(platforms)
        .map(str::to_owned)
        .collect()
}

fn cost_label(raw: &RawListingRecord) -> String {
    if raw.free {
        return "Free".into();
    }
    match raw.cost.as_deref() {
        Some(cost) if !cost.is_empty() => cost.to_owned(),
        _ => "Paid".into(),
    }
}
