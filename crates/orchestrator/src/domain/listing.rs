#![forbid(unsafe_code)]

use serde::Deserialize;
use serde_with::{DefaultOnError, serde_as};

/// One exploit entry as published by the upstream status endpoint.
///
/// Only `_id` and `title` are mandatory. Every other field falls back to its
/// default when absent, `null`, or of an unexpected JSON type, so a bad field
/// never rejects the record.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawListingRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub platform: String,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub version: String,
    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "updatedDate", default)]
    pub updated_date: String,
    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "updateStatus", default)]
    pub update_status: bool,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub free: bool,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub detected: bool,
    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "uncStatus", default)]
    pub unc_status: bool,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub beta: bool,

    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub cost: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "rbxversion", default)]
    pub rbx_version: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "websitelink", default)]
    pub website_link: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "discordlink", default)]
    pub discord_link: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "purchaselink", default)]
    pub purchase_link: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "extype", default)]
    pub ex_type: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "roleId", default)]
    pub role_id: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub index: Option<i64>,

    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "elementCertified", default)]
    pub element_certified: Option<bool>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub decompiler: Option<bool>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "multiInject", default)]
    pub multi_inject: Option<bool>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub keysystem: Option<bool>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub clientmods: Option<bool>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub unlinked: Option<bool>,

    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "uncPercentage", default)]
    pub unc_percentage: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "suncPercentage", default)]
    pub sunc_percentage: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub sunc: Option<SuncInfo>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "recommendedReason", default)]
    pub recommended_reason: Option<RecommendedReason>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuncInfo {
    #[serde(rename = "suncScrap")]
    pub scrap: String,
    #[serde(rename = "suncKey")]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecommendedReason {
    #[serde(default)]
    pub features: Vec<String>,
}
