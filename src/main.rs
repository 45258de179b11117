//! docbrowser — console demo.
//!
//! Seeds an in-memory store with a legacy record, simulates a month of page
//! views on a fixed clock and prints the resulting frequently viewed collection.

use std::sync::Arc;

use docbrowser::managers::frequently_viewed::{
    FrequentlyViewedManager, FrequentlyViewedTrait, FREQUENTLY_VIEWED_STORAGE_KEY,
};
use docbrowser::managers::frequently_viewed_view::FrequentlyViewedView;
use docbrowser::services::clock::{to_iso_string, Clock, FixedClock};
use docbrowser::storage::{LocalStorage, MemoryStorage};
use docbrowser::types::document::{Doc, DocParent};
use docbrowser::types::settings::FrequentlyViewedSettings;
use tracing_subscriber::EnvFilter;

const DAY: i64 = 24 * 60 * 60 * 1000;

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn doc(url: &str, title: &str) -> Doc {
    Doc {
        mdn_url: url.to_string(),
        title: title.to_string(),
        parents: vec![DocParent {
            uri: "/en-US/docs/Web".to_string(),
            title: "Web".to_string(),
        }],
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let clock = Arc::new(FixedClock::new(1_709_294_400_000));
    let mut storage = MemoryStorage::new();

    section("Legacy data");
    let legacy = serde_json::json!([
        {"url": "/en-US/docs/Web/CSS/flex", "title": "flex", "timestamp": clock.now_ms() - 2 * DAY, "visitCount": 3},
        {"url": "/en-US/docs/Web/HTML/Element/div", "title": "<div>", "timestamp": clock.now_ms() - 45 * DAY, "visitCount": 9}
    ]);
    storage.set_item(FREQUENTLY_VIEWED_STORAGE_KEY, &legacy.to_string())?;
    println!("  Stored 2 legacy records (one of them stale)");

    let mut manager = FrequentlyViewedManager::new(
        Box::new(storage),
        clock.clone(),
        FrequentlyViewedSettings::default(),
    );
    let mut view = FrequentlyViewedView::new(5, 0);

    section("Page views");
    let pages = [
        doc("/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/map", "Array.prototype.map()"),
        doc("/en-US/docs/Web/CSS/grid", "grid"),
        doc("/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/map", "Array.prototype.map()"),
        doc("/en-US/docs/Web/API/fetch", "fetch()"),
        doc("/en-US/docs/Web/CSS/grid", "grid"),
        doc("/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/map", "Array.prototype.map()"),
    ];
    for page in &pages {
        clock.advance(DAY / 4);
        if let Some(entry) = view.record_view(&mut manager, Some(page)) {
            println!("  #{:<2} {} ({} visits)", entry.serial, entry.url, entry.visits());
        }
    }

    section("Frequently viewed");
    let page = view.page(&manager);
    match &page.collection {
        Some(collection) => {
            println!("  {} — {}", collection.name, collection.description);
            println!("  {} articles, updated {}", collection.article_count, collection.updated_at);
            for item in &collection.items {
                println!(
                    "   • {} [{} visits, last {}]",
                    item.title,
                    item.visits(),
                    item.last_visit().map(to_iso_string).unwrap_or_default()
                );
            }
        }
        None => println!("  Nothing viewed more than once yet"),
    }
    println!("  End of list: {}", page.end);
    println!("  Tracked records: {}", manager.get_frequently_viewed().len());

    Ok(())
}
