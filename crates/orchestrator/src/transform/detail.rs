#![forbid(unsafe_code)]

use crate::domain::{DetailRecord, DisplayRecord, RawListingRecord};
use url::Url;

/// Expand a card with the fields of its cached raw record.
///
/// A card whose id is missing from `raw_cache` yields a bare detail record.
pub fn to_detail_record(raw_cache: &[RawListingRecord], card: &DisplayRecord) -> DetailRecord {
    let Some(raw) = raw_cache.iter().find(|raw| raw.id == card.id) else {
        return DetailRecord::bare(card.clone());
    };

    DetailRecord {
        description: Some(description(raw)),
        developer: developer(raw.website_link.as_deref()),
        website_link: raw.website_link.clone(),
        discord_link: raw.discord_link.clone(),
        purchase_link: raw.purchase_link.clone(),
        unc_percentage: raw.unc_percentage,
        sunc_percentage: raw.sunc_percentage,
        decompiler: raw.decompiler,
        multi_inject: raw.multi_inject,
        keysystem: raw.keysystem,
        element_certified: raw.element_certified,
        ex_type: raw.ex_type.clone(),
        rbx_version: raw.rbx_version.clone(),
        ..DetailRecord::bare(card.clone())
    }
}

fn description(raw: &RawListingRecord) -> String {
    let detection = if raw.detected { "Detected" } else { "Undetected" };
    let unc = if raw.unc_status {
        "UNC Compatible"
    } else {
        "UNC Incompatible"
    };
    match raw.ex_type.as_deref().filter(|ex_type| !ex_type.is_empty()) {
        Some(ex_type) => format!("{ex_type} - {detection} - {unc}"),
        None => format!("{detection} - {unc}"),
    }
}

fn developer(website_link: Option<&str>) -> Option<String> {
    let link = website_link?.trim();
    if link.is_empty() {
        return None;
    }
    Url::parse(link).ok()?.host_str().map(str::to_owned)
}
