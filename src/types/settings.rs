use serde::{Deserialize, Serialize};

use super::frequently_viewed::FREQUENTLY_VIEWED_STORAGE_KEY;

/// Top-level application settings container.
///
/// Every section and field falls back to its default, so files written by
/// older versions still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppSettings {
    pub general: GeneralSettings,
    pub frequently_viewed: FrequentlyViewedSettings,
    pub storage: StorageSettings,
}

/// Site-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralSettings {
    pub locale: String,
    pub site_title: String,
    pub base_url: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            site_title: "MDN".to_string(),
            base_url: "https://developer.mozilla.org".to_string(),
        }
    }
}

/// Settings for the frequently viewed documents list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FrequentlyViewedSettings {
    pub enabled: bool,
    pub storage_key: String,
    pub retention_days: u32,
    pub min_visits: usize,
    pub page_size: usize,
}

impl Default for FrequentlyViewedSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            storage_key: FREQUENTLY_VIEWED_STORAGE_KEY.to_string(),
            retention_days: 30,
            min_visits: 2,
            page_size: 10,
        }
    }
}

impl FrequentlyViewedSettings {
    /// Retention window in milliseconds.
    pub fn retention_window_ms(&self) -> i64 {
        i64::from(self.retention_days) * 24 * 60 * 60 * 1000
    }
}

/// Where the local key-value store lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StorageSettings {
    /// Defaults to `docbrowser.db` inside the platform data directory.
    pub database_path: Option<String>,
}
