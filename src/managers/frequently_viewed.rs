//! Frequently viewed documents.
//!
//! Keeps a JSON list of [`VisitRecord`]s under one key of a [`LocalStorage`].
//! Every read migrates legacy records, assigns missing serials and prunes
//! visits older than the retention window; every page view prepends a
//! timestamp and writes the ranked list back. All of it is best-effort: the
//! `get_*`/`record_*` entry points log storage failures and carry on.

use std::cmp::Ordering;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::services::clock::{to_iso_string, Clock};
use crate::storage::LocalStorage;
use crate::types::document::Doc;
use crate::types::errors::FrequentlyViewedError;
use crate::types::frequently_viewed::{
    CollectionPage, FrequentlyViewedCollection, StoredVisitRecord, VisitRecord, MAX_SERIAL,
};
use crate::types::settings::FrequentlyViewedSettings;

pub use crate::types::frequently_viewed::FREQUENTLY_VIEWED_STORAGE_KEY;

/// Thirty days in milliseconds.
pub const THIRTY_DAYS_MS: i64 = 30 * 24 * 60 * 60 * 1000;

pub const COLLECTION_ID: &str = "frequently-viewed";
pub const COLLECTION_NAME: &str = "Frequently Viewed Articles";

/// True when `timestamp` is no older than `window_ms` before `now_ms`.
pub fn is_within_window(timestamp: i64, now_ms: i64, window_ms: i64) -> bool {
    timestamp >= now_ms - window_ms
}

/// Parses the stored JSON array one record at a time.
///
/// A value that is not an array is an error. Elements that do not read as a
/// record (no `url`, wrong types) are logged and dropped so the rest of the
/// list survives.
pub fn parse_stored_entries(json: &str) -> Result<Vec<StoredVisitRecord>, FrequentlyViewedError> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    Ok(values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(index, error = %err, "Dropping unreadable frequently viewed record");
                None
            }
        })
        .collect())
}

/// Upgrades stored records to [`VisitRecord`]s.
///
/// A record without `timestamps` gets its legacy `timestamp` repeated
/// `visitCount` times, provided that timestamp is still inside the window;
/// the legacy field is dropped either way. Records without a serial are
/// numbered in stored order, each one past the highest serial seen so far.
/// Serials above [`MAX_SERIAL`] count as missing.
pub fn migrate_entries(
    stored: Vec<StoredVisitRecord>,
    now_ms: i64,
    window_ms: i64,
) -> Vec<VisitRecord> {
    let kept_serial = |serial: Option<u64>| serial.filter(|s| *s <= MAX_SERIAL);
    let mut max_serial = stored.iter().filter_map(|r| kept_serial(r.serial)).max().unwrap_or(0);
    let mut migrated = 0usize;

    let entries: Vec<VisitRecord> = stored
        .into_iter()
        .map(|record| {
            let timestamps = match record.timestamps {
                Some(timestamps) => timestamps,
                None => {
                    migrated += 1;
                    match record.timestamp {
                        Some(ts) if is_within_window(ts, now_ms, window_ms) => {
                            vec![ts; record.visit_count as usize]
                        }
                        _ => Vec::new(),
                    }
                }
            };
            let serial = match kept_serial(record.serial) {
                Some(serial) => serial,
                None => {
                    max_serial += 1;
                    max_serial
                }
            };
            VisitRecord {
                serial,
                url: record.url,
                title: record.title,
                parents: record.parents,
                summary: record.summary,
                timestamps,
                visit_count: record.visit_count,
                extra: record.extra,
            }
        })
        .collect();

    if migrated > 0 {
        debug!(migrated, "migrated legacy frequently viewed records");
    }
    entries
}

/// Drops timestamps outside the window, then records left without any.
pub fn filter_recent(entries: Vec<VisitRecord>, now_ms: i64, window_ms: i64) -> Vec<VisitRecord> {
    let before = entries.len();
    let kept: Vec<VisitRecord> = entries
        .into_iter()
        .filter_map(|mut entry| {
            entry
                .timestamps
                .retain(|ts| is_within_window(*ts, now_ms, window_ms));
            (!entry.timestamps.is_empty()).then_some(entry)
        })
        .collect();
    if kept.len() < before {
        debug!(pruned = before - kept.len(), "pruned stale frequently viewed records");
    }
    kept
}

/// Next free serial: one past the highest in use, starting at 1.
///
/// `None` once the highest serial is `u64::MAX`.
pub fn next_serial(entries: &[VisitRecord]) -> Option<u64> {
    entries.iter().map(|e| e.serial).max().unwrap_or(0).checked_add(1)
}

/// Most recent visit first; on a tie, more visits first.
pub fn compare_by_recency_then_visits(first: &VisitRecord, second: &VisitRecord) -> Ordering {
    second
        .last_visit()
        .cmp(&first.last_visit())
        .then_with(|| second.visits().cmp(&first.visits()))
}

/// Stable sort by [`compare_by_recency_then_visits`].
pub fn sort_entries(entries: &mut [VisitRecord]) {
    entries.sort_by(compare_by_recency_then_visits);
}

/// Trait defining frequently viewed operations.
pub trait FrequentlyViewedTrait {
    /// Reads, migrates and prunes the stored list, surfacing any failure.
    fn read_entries(&self) -> Result<Vec<VisitRecord>, FrequentlyViewedError>;
    /// Like [`read_entries`](Self::read_entries) but an unreadable store reads as empty.
    fn get_frequently_viewed(&self) -> Vec<VisitRecord>;
    fn set_frequently_viewed(&mut self, entries: &[VisitRecord]) -> Result<(), FrequentlyViewedError>;
    /// Counts a view of `doc`, returning the updated record.
    fn increment(&mut self, doc: Option<&Doc>) -> Result<Option<VisitRecord>, FrequentlyViewedError>;
    /// Best-effort [`increment`](Self::increment); failures are logged.
    fn record_view(&mut self, doc: Option<&Doc>) -> Option<VisitRecord>;
    /// Ranked records with at least `min_visits` visits, first `limit + offset` of them.
    fn collection(&self, limit: usize, offset: usize) -> CollectionPage;
    fn clear(&mut self) -> Result<(), FrequentlyViewedError>;
    fn is_tracking_enabled(&self) -> bool;
    fn set_tracking_enabled(&mut self, enabled: bool);
}

/// Frequently viewed list over any [`LocalStorage`] backend.
pub struct FrequentlyViewedManager {
    storage: Box<dyn LocalStorage>,
    clock: Arc<dyn Clock>,
    settings: FrequentlyViewedSettings,
}

impl FrequentlyViewedManager {
    pub fn new(
        storage: Box<dyn LocalStorage>,
        clock: Arc<dyn Clock>,
        settings: FrequentlyViewedSettings,
    ) -> Self {
        Self {
            storage,
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> &FrequentlyViewedSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: FrequentlyViewedSettings) {
        self.settings = settings;
    }

    pub fn storage(&self) -> &dyn LocalStorage {
        self.storage.as_ref()
    }

    pub fn storage_mut(&mut self) -> &mut dyn LocalStorage {
        self.storage.as_mut()
    }

    fn description(&self) -> String {
        format!(
            "Articles you viewed more than {} times in the past {} days.",
            self.settings.min_visits, self.settings.retention_days
        )
    }
}

impl FrequentlyViewedTrait for FrequentlyViewedManager {
    fn read_entries(&self) -> Result<Vec<VisitRecord>, FrequentlyViewedError> {
        let raw = self.storage.get_item(&self.settings.storage_key)?;
        let stored = match raw {
            Some(json) => parse_stored_entries(&json)?,
            None => Vec::new(),
        };

        let now = self.clock.now_ms();
        let window = self.settings.retention_window_ms();
        let entries = migrate_entries(stored, now, window);
        Ok(filter_recent(entries, now, window))
    }

    fn get_frequently_viewed(&self) -> Vec<VisitRecord> {
        self.read_entries().unwrap_or_else(|err| {
            warn!(error = %err, "Unable to read frequently viewed documents from storage");
            Vec::new()
        })
    }

    fn set_frequently_viewed(&mut self, entries: &[VisitRecord]) -> Result<(), FrequentlyViewedError> {
        let json = serde_json::to_string(entries)?;
        self.storage.set_item(&self.settings.storage_key, &json)?;
        Ok(())
    }

    fn increment(&mut self, doc: Option<&Doc>) -> Result<Option<VisitRecord>, FrequentlyViewedError> {
        let Some(doc) = doc else {
            return Ok(None);
        };
        if !self.settings.enabled {
            debug!(url = %doc.mdn_url, "frequently viewed tracking disabled, view not counted");
            return Ok(None);
        }

        let mut entries = self.read_entries()?;
        let now = self.clock.now_ms();

        match entries.iter().position(|e| e.url == doc.mdn_url) {
            Some(index) => entries[index].timestamps.insert(0, now),
            None => {
                let serial =
                    next_serial(&entries).ok_or(FrequentlyViewedError::SerialsExhausted)?;
                let entry = VisitRecord {
                    serial,
                    url: doc.mdn_url.clone(),
                    title: doc.title.clone(),
                    parents: Some(doc.parents.clone()),
                    summary: None,
                    timestamps: vec![now],
                    visit_count: 1,
                    extra: Default::default(),
                };
                entries.insert(0, entry);
            }
        }

        sort_entries(&mut entries);
        self.set_frequently_viewed(&entries)?;

        Ok(entries.into_iter().find(|e| e.url == doc.mdn_url))
    }

    fn record_view(&mut self, doc: Option<&Doc>) -> Option<VisitRecord> {
        match self.increment(doc) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "Failed to write frequently viewed documents to storage");
                None
            }
        }
    }

    fn collection(&self, limit: usize, offset: usize) -> CollectionPage {
        let mut qualifying: Vec<VisitRecord> = self
            .get_frequently_viewed()
            .into_iter()
            .filter(|e| e.visits() >= self.settings.min_visits)
            .collect();

        let wanted = limit.saturating_add(offset);
        let end = wanted > qualifying.len();

        if qualifying.is_empty() {
            return CollectionPage {
                collection: None,
                end,
            };
        }

        sort_entries(&mut qualifying);
        let article_count = qualifying.len();
        let stamp = qualifying
            .first()
            .and_then(VisitRecord::last_visit)
            .unwrap_or_else(|| self.clock.now_ms());
        qualifying.truncate(wanted);

        CollectionPage {
            collection: Some(FrequentlyViewedCollection {
                id: COLLECTION_ID.to_string(),
                name: COLLECTION_NAME.to_string(),
                description: self.description(),
                article_count,
                created_at: to_iso_string(stamp),
                updated_at: to_iso_string(stamp),
                items: qualifying,
            }),
            end,
        }
    }

    fn clear(&mut self) -> Result<(), FrequentlyViewedError> {
        self.storage.remove_item(&self.settings.storage_key)?;
        Ok(())
    }

    fn is_tracking_enabled(&self) -> bool {
        self.settings.enabled
    }

    fn set_tracking_enabled(&mut self, enabled: bool) {
        self.settings.enabled = enabled;
    }
}
