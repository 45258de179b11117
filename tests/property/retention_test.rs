//! Property-based tests for the retention filter.
//!
//! After a read, every surviving timestamp lies inside the 30-day window, no
//! record is left empty, and no in-window visit is lost.

use std::sync::Arc;

use docbrowser::managers::frequently_viewed::{
    filter_recent, FrequentlyViewedManager, FrequentlyViewedTrait, FREQUENTLY_VIEWED_STORAGE_KEY,
    THIRTY_DAYS_MS,
};
use docbrowser::services::clock::FixedClock;
use docbrowser::storage::{LocalStorage, MemoryStorage};
use docbrowser::types::frequently_viewed::VisitRecord;
use docbrowser::types::settings::FrequentlyViewedSettings;
use proptest::prelude::*;

const NOW: i64 = 1_709_294_400_000;
const DAY: i64 = 24 * 60 * 60 * 1000;

/// Timestamps anywhere from now back to 60 days ago, newest first.
fn arb_timestamps() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0..60 * DAY, 0..8).prop_map(|mut ages| {
        ages.sort_unstable();
        ages.into_iter().map(|age| NOW - age).collect()
    })
}

fn arb_records() -> impl Strategy<Value = Vec<VisitRecord>> {
    prop::collection::vec(arb_timestamps(), 0..12).prop_map(|all| {
        all.into_iter()
            .enumerate()
            .map(|(i, timestamps)| VisitRecord {
                serial: i as u64 + 1,
                url: format!("/doc/{}", i),
                title: format!("Doc {}", i),
                parents: None,
                summary: None,
                timestamps,
                visit_count: 1,
                extra: Default::default(),
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn filtered_records_are_recent_and_non_empty(records in arb_records()) {
        let in_window: usize = records
            .iter()
            .flat_map(|r| r.timestamps.iter())
            .filter(|ts| **ts >= NOW - THIRTY_DAYS_MS)
            .count();

        let kept = filter_recent(records, NOW, THIRTY_DAYS_MS);

        for record in &kept {
            prop_assert!(!record.timestamps.is_empty(), "empty record {} kept", record.url);
            for ts in &record.timestamps {
                prop_assert!(NOW - ts <= THIRTY_DAYS_MS, "stale timestamp kept in {}", record.url);
            }
        }
        let kept_count: usize = kept.iter().map(|r| r.timestamps.len()).sum();
        prop_assert_eq!(kept_count, in_window);
    }

    #[test]
    fn stored_list_reads_back_pruned(records in arb_records()) {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(FREQUENTLY_VIEWED_STORAGE_KEY, &serde_json::to_string(&records).unwrap())
            .unwrap();
        let manager = FrequentlyViewedManager::new(
            Box::new(storage),
            Arc::new(FixedClock::new(NOW)),
            FrequentlyViewedSettings::default(),
        );

        let entries = manager.read_entries().unwrap();
        let expected: Vec<&str> = records
            .iter()
            .filter(|r| r.timestamps.iter().any(|ts| NOW - ts <= THIRTY_DAYS_MS))
            .map(|r| r.url.as_str())
            .collect();
        let actual: Vec<&str> = entries.iter().map(|r| r.url.as_str()).collect();
        prop_assert_eq!(actual, expected);

        if let Some(collection) = manager.collection(100, 0).collection {
            for item in &collection.items {
                prop_assert!(item.timestamps.len() >= 2);
                prop_assert!(item.timestamps.iter().all(|ts| NOW - ts <= THIRTY_DAYS_MS));
            }
        }
    }
}
