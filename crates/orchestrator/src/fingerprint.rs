#![forbid(unsafe_code)]

//! Cheap equality keys for upstream payloads.
//!
//! A listing fingerprint covers only `(id, version, updatedDate,
//! updateStatus)` of each record, in order. Edits to any other field (cost,
//! links, capability flags) do not change it and therefore do not refresh
//! the displayed cards.

use crate::domain::{RawListingRecord, VersionSnapshot};
use serde_json::{Value, json};
use sha2::{Digest, Sha256};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of_listing(records: &[RawListingRecord]) -> Self {
        let projection = records
            .iter()
            .map(|record| {
                json!([
                    record.id,
                    record.version,
                    record.updated_date,
                    record.update_status
                ])
            })
            .collect();
        Self::digest(&Value::Array(projection))
    }

    pub fn of_versions(snapshot: &VersionSnapshot) -> Self {
        let fields = snapshot
            .platforms()
            .into_iter()
            .flat_map(|(_, version, date)| [version, date])
            .map(Value::from)
            .collect();
        Self::digest(&Value::Array(fields))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    // JSON text is an injective encoding of the projection, so equal digests
    // mean equal projections.
    fn digest(value: &Value) -> Self {
        let hash = Sha256::digest(value.to_string().as_bytes());
        Self(format!("{hash:x}"))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(id: &str, version: &str) -> RawListingRecord {
        serde_json::from_value(json!({
            "_id": id,
            "title": format!("title-{id}"),
            "platform": "Windows",
            "version": version,
            "updatedDate": "2024-01-01T00:00:00Z",
            "updateStatus": true,
        }))
        .unwrap()
    }

    #[test]
    fn empty_listing_has_a_fingerprint() {
        assert_eq!(Fingerprint::of_listing(&[]), Fingerprint::of_listing(&[]));
        assert_eq!(Fingerprint::of_listing(&[]).as_str().len(), 64);
    }

    #[test]
    fn reordering_is_a_change() {
        let a = record("a", "1.0");
        let b = record("b", "1.0");
        assert_ne!(
            Fingerprint::of_listing(&[a.clone(), b.clone()]),
            Fingerprint::of_listing(&[b, a])
        );
    }

    #[test]
    fn version_bump_is_a_change() {
        assert_ne!(
            Fingerprint::of_listing(&[record("a", "1.0")]),
            Fingerprint::of_listing(&[record("a", "1.1")])
        );
    }

    #[test]
    fn other_fields_are_ignored() {
        let base = record("a", "1.0");
        let mut edited = base.clone();
        edited.title = "renamed".into();
        edited.cost = Some("$20".into());
        edited.detected = !edited.detected;
        edited.decompiler = Some(true);
        edited.website_link = Some("https://example.com".into());
        assert_eq!(
            Fingerprint::of_listing(&[base]),
            Fingerprint::of_listing(&[edited])
        );
    }

    #[test]
    fn version_snapshot_covers_every_field() {
        let snapshot = VersionSnapshot {
            windows: "version-1".into(),
            windows_date: "d1".into(),
            mac: "version-2".into(),
            mac_date: "d2".into(),
            android: "2.600".into(),
            android_date: "d3".into(),
            ios: "2.600".into(),
            ios_date: "d4".into(),
        };
        let mut moved = snapshot.clone();
        moved.ios_date = "d5".into();
        assert_eq!(
            Fingerprint::of_versions(&snapshot),
            Fingerprint::of_versions(&snapshot.clone())
        );
        assert_ne!(
            Fingerprint::of_versions(&snapshot),
            Fingerprint::of_versions(&moved)
        );
    }

    fn arb_record() -> impl Strategy<Value = RawListingRecord> {
        ("[a-c]{1,2}", "[0-9]\\.[0-9]", any::<bool>()).prop_map(|(id, version, status)| {
            let mut record = record(&id, &version);
            record.update_status = status;
            record
        })
    }

    proptest! {
        #[test]
        fn equal_iff_projections_equal(
            left in prop::collection::vec(arb_record(), 0..4),
            right in prop::collection::vec(arb_record(), 0..4),
        ) {
            let project = |records: &[RawListingRecord]| {
                records
                    .iter()
                    .map(|r| (r.id.clone(), r.version.clone(), r.updated_date.clone(), r.update_status))
                    .collect::<Vec<_>>()
            };
            prop_assert_eq!(
                Fingerprint::of_listing(&left) == Fingerprint::of_listing(&right),
                project(&left) == project(&right)
            );
        }

        #[test]
        fn deterministic(records in prop::collection::vec(arb_record(), 0..6)) {
            prop_assert_eq!(Fingerprint::of_listing(&records), Fingerprint::of_listing(&records.clone()));
        }
    }
}
