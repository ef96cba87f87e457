#![forbid(unsafe_code)]

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateStatus {
    Updated,
    Outdated,
}

impl UpdateStatus {
    pub fn from_flag(updated: bool) -> Self {
        if updated { Self::Updated } else { Self::Outdated }
    }
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Updated => f.write_str("Updated"),
            Self::Outdated => f.write_str("Outdated"),
        }
    }
}

/// Card projection of a single listing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub id: String,
    pub name: String,
    /// Lower-cased platform tag, also used as the category key.
    pub platform: String,
    pub version: String,
    pub last_update: String,
    pub cost: String,
    pub status: UpdateStatus,
    #[serde(rename = "updateStatus")]
    pub update_status: bool,
    pub detected: bool,
    pub free: bool,
}

/// Expanded projection shown when a card is opened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRecord {
    #[serde(flatten)]
    pub card: DisplayRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(rename = "websitelink", skip_serializing_if = "Option::is_none")]
    pub website_link: Option<String>,
    #[serde(rename = "discordlink", skip_serializing_if = "Option::is_none")]
    pub discord_link: Option<String>,
    #[serde(rename = "purchaselink", skip_serializing_if = "Option::is_none")]
    pub purchase_link: Option<String>,
    #[serde(rename = "uncPercentage", skip_serializing_if = "Option::is_none")]
    pub unc_percentage: Option<f64>,
    #[serde(rename = "suncPercentage", skip_serializing_if = "Option::is_none")]
    pub sunc_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decompiler: Option<bool>,
    #[serde(rename = "multiInject", skip_serializing_if = "Option::is_none")]
    pub multi_inject: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keysystem: Option<bool>,
    #[serde(rename = "elementCertified", skip_serializing_if = "Option::is_none")]
    pub element_certified: Option<bool>,
    #[serde(rename = "extype", skip_serializing_if = "Option::is_none")]
    pub ex_type: Option<String>,
    #[serde(rename = "rbxversion", skip_serializing_if = "Option::is_none")]
    pub rbx_version: Option<String>,
}

impl DetailRecord {
    /// A detail record carrying nothing beyond the card itself.
    pub fn bare(card: DisplayRecord) -> Self {
        Self {
            card,
            description: None,
            developer: None,
            website_link: None,
            discord_link: None,
            purchase_link: None,
            unc_percentage: None,
            sunc_percentage: None,
            decompiler: None,
            multi_inject: None,
            keysystem: None,
            element_certified: None,
            ex_type: None,
            rbx_version: None,
        }
    }
}
