#![forbid(unsafe_code)]

use crate::domain::RawListingRecord;
use serde_json::Value;
use tracing::warn;

/// A listing body after shape validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingPayload {
    Records(Vec<RawListingRecord>),
    /// The body was valid JSON but not an array.
    Malformed,
}

impl ListingPayload {
    /// Validate a listing body. Array elements that do not decode as a
    /// record are dropped.
    pub fn decode(body: Value) -> Self {
        let items = match body {
            Value::Array(items) => items,
            other => {
                warn!(kind = json_kind(&other), "listing payload is not an array");
                return Self::Malformed;
            }
        };

        let total = items.len();
        let records: Vec<RawListingRecord> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(index, %err, "dropping malformed listing record");
                    None
                }
            })
            .collect();
        if records.len() < total {
            warn!(kept = records.len(), total, "listing payload partially decoded");
        }
        Self::Records(records)
    }

    /// Records to display. A malformed payload has none.
    pub fn into_records(self) -> Vec<RawListingRecord> {
        match self {
            Self::Records(records) => records,
            Self::Malformed => Vec::new(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
