#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, serde_as};

/// Current Roblox client version per platform, with the date it shipped.
///
/// A missing, `null` or mistyped field reads as an empty string so that one
/// bad platform never discards the whole snapshot.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSnapshot {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(rename = "Windows", default)]
    pub windows: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(rename = "WindowsDate", default)]
    pub windows_date: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(rename = "Mac", default)]
    pub mac: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(rename = "MacDate", default)]
    pub mac_date: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(rename = "Android", default)]
    pub android: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(rename = "AndroidDate", default)]
    pub android_date: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(rename = "iOS", default)]
    pub ios: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(rename = "iOSDate", default)]
    pub ios_date: String,
}

impl VersionSnapshot {
    /// `(platform, version, date)` rows in display order.
    pub fn platforms(&self) -> [(&'static str, &str, &str); 4] {
        [
            ("Windows", self.windows.as_str(), self.windows_date.as_str()),
            ("Mac", self.mac.as_str(), self.mac_date.as_str()),
            ("Android", self.android.as_str(), self.android_date.as_str()),
            ("iOS", self.ios.as_str(), self.ios_date.as_str()),
        ]
    }
}
