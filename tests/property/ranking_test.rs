//! Property-based tests for the ranking comparator.
//!
//! The comparator must be a total order: antisymmetric, transitive, and
//! consistent with a descending sort on (last visit, visit count).

use std::cmp::Ordering;

use docbrowser::managers::frequently_viewed::{compare_by_recency_then_visits, sort_entries};
use docbrowser::types::frequently_viewed::VisitRecord;
use proptest::prelude::*;

/// Records drawn from a small value space so ties are common.
fn arb_record() -> impl Strategy<Value = VisitRecord> {
    (0u64..1000, 0i64..5, 1usize..4).prop_map(|(serial, newest, visits)| VisitRecord {
        serial,
        url: format!("/doc/{}", serial),
        title: String::new(),
        parents: None,
        summary: None,
        timestamps: (0..visits as i64).map(|i| newest * 1_000 - i).collect(),
        visit_count: visits as u32,
        extra: Default::default(),
    })
}

/// Lists whose urls are unique, so original positions can be recovered.
fn arb_list() -> impl Strategy<Value = Vec<VisitRecord>> {
    prop::collection::vec(arb_record(), 0..20).prop_map(|mut records| {
        for (i, record) in records.iter_mut().enumerate() {
            record.url = format!("/doc/{}", i);
        }
        records
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn comparator_is_antisymmetric(a in arb_record(), b in arb_record()) {
        prop_assert_eq!(
            compare_by_recency_then_visits(&a, &b),
            compare_by_recency_then_visits(&b, &a).reverse()
        );
    }

    #[test]
    fn comparator_is_transitive(a in arb_record(), b in arb_record(), c in arb_record()) {
        let ab = compare_by_recency_then_visits(&a, &b);
        let bc = compare_by_recency_then_visits(&b, &c);
        if ab != Ordering::Greater && bc != Ordering::Greater {
            prop_assert_ne!(compare_by_recency_then_visits(&a, &c), Ordering::Greater);
        }
    }

    #[test]
    fn equal_only_when_keys_match(a in arb_record(), b in arb_record()) {
        let equal = compare_by_recency_then_visits(&a, &b) == Ordering::Equal;
        prop_assert_eq!(
            equal,
            a.last_visit() == b.last_visit() && a.visits() == b.visits()
        );
    }

    #[test]
    fn sorted_list_is_descending_and_stable(records in arb_list()) {
        let mut sorted = records.clone();
        sort_entries(&mut sorted);

        let original_position = |r: &VisitRecord| records.iter().position(|x| x.url == r.url);
        for pair in sorted.windows(2) {
            let (first, second) = (&pair[0], &pair[1]);
            prop_assert!(
                (first.last_visit(), first.visits()) >= (second.last_visit(), second.visits())
            );
            if compare_by_recency_then_visits(first, second) == Ordering::Equal {
                prop_assert!(original_position(first) < original_position(second));
            }
        }
    }
}
