#![forbid(unsafe_code)]

use crate::domain::{DetailRecord, DisplayRecord, RawListingRecord, VersionSnapshot};
use crate::fingerprint::Fingerprint;
use crate::transform::{self, ALL_CATEGORY};
use crate::view::by_category;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Everything the presentation layer renders.
///
/// Listing data sits behind `Arc`s so that snapshots are cheap to clone and
/// an unchanged tick keeps the very same allocation.
#[derive(Debug, Clone)]
pub struct ViewState {
    raw: Arc<Vec<RawListingRecord>>,
    records: Arc<Vec<DisplayRecord>>,
    categories: Arc<Vec<String>>,
    versions: Option<VersionSnapshot>,
    listing_fingerprint: Option<Fingerprint>,
    version_fingerprint: Option<Fingerprint>,
    active_category: String,
    loading: bool,
    error: Option<String>,
    last_updated: Option<DateTime<Utc>>,
    detail: Option<DetailRecord>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ALL_CATEGORY)
    }
}

impl ViewState {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            raw: Arc::default(),
            records: Arc::default(),
            categories: Arc::new(vec![ALL_CATEGORY.to_owned()]),
            versions: None,
            listing_fingerprint: None,
            version_fingerprint: None,
            active_category: category.into(),
            loading: true,
            error: None,
            last_updated: None,
            detail: None,
        }
    }

    pub fn raw(&self) -> &Arc<Vec<RawListingRecord>> {
        &self.raw
    }

    pub fn records(&self) -> &Arc<Vec<DisplayRecord>> {
        &self.records
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn versions(&self) -> Option<&VersionSnapshot> {
        self.versions.as_ref()
    }

    pub fn listing_fingerprint(&self) -> Option<&Fingerprint> {
        self.listing_fingerprint.as_ref()
    }

    pub fn version_fingerprint(&self) -> Option<&Fingerprint> {
        self.version_fingerprint.as_ref()
    }

    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn detail(&self) -> Option<&DetailRecord> {
        self.detail.as_ref()
    }

    /// Cards under the active category.
    pub fn filtered(&self) -> Vec<&DisplayRecord> {
        by_category(&self.records, &self.active_category).collect()
    }

    /// Replace the listing with a freshly fetched one and leave the loading state.
    ///
    /// An open detail view is rebuilt from the new cache, or closed if its
    /// record disappeared.
    pub fn apply_listing(
        &mut self,
        raw: Vec<RawListingRecord>,
        fingerprint: Fingerprint,
        at: DateTime<Utc>,
    ) {
        let records = transform::to_display_records(&raw);
        self.categories = Arc::new(transform::categories(&records));
        self.records = Arc::new(records);
        self.raw = Arc::new(raw);
        self.listing_fingerprint = Some(fingerprint);
        self.last_updated = Some(at);
        self.loading = false;

        if let Some(open) = self.detail.take() {
            self.open_detail(&open.card.id);
        }
    }

    pub fn apply_versions(&mut self, snapshot: VersionSnapshot, fingerprint: Fingerprint) {
        self.versions = Some(snapshot);
        self.version_fingerprint = Some(fingerprint);
    }

    /// Record a failed listing fetch. Cached data stays as it was.
    ///
    /// Returns whether the error or loading flag changed.
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        let message = message.into();
        let changed = self.loading || self.error.as_deref() != Some(message.as_str());
        self.error = Some(message);
        self.loading = false;
        changed
    }

    /// Returns whether an error was cleared.
    pub fn clear_error(&mut self) -> bool {
        self.error.take().is_some()
    }

    /// Returns whether the selection changed.
    pub fn select_category(&mut self, category: impl Into<String>) -> bool {
        let category = category.into();
        if self.active_category == category {
            return false;
        }
        self.active_category = category;
        true
    }

    /// Open the detail view for the card with `id`. Unknown ids are ignored.
    pub fn open_detail(&mut self, id: &str) -> bool {
        let Some(card) = self.records.iter().find(|record| record.id == id) else {
            return false;
        };
        self.detail = Some(transform::to_detail_record(&self.raw, card));
        true
    }

    pub fn close_detail(&mut self) -> bool {
        self.detail.take().is_some()
    }
}
