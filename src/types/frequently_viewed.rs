use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::document::DocParent;

/// Storage key used by the original web client; kept so existing data is picked up.
pub const FREQUENTLY_VIEWED_STORAGE_KEY: &str = "frequently-viewed-documents";

/// Largest serial accepted from storage. Serials were written by a
/// JavaScript client, so anything above its safe integer range is treated
/// as missing and reassigned.
pub const MAX_SERIAL: u64 = (1 << 53) - 1;

/// A visit record exactly as it may sit in storage, legacy shapes included.
///
/// Older clients wrote a single `timestamp` plus a `visitCount` and no
/// `serial`; newer ones write `timestamps`. Anything else on the object is
/// carried through `extra` so a rewrite does not drop it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StoredVisitRecord {
    #[serde(default, deserialize_with = "lenient_serial")]
    pub serial: Option<u64>,
    pub url: String,
    #[serde(default, deserialize_with = "lenient_title")]
    pub title: String,
    #[serde(default)]
    pub parents: Option<Vec<DocParent>>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub timestamps: Option<Vec<i64>>,
    #[serde(
        rename = "visitCount",
        default = "default_visit_count",
        deserialize_with = "lenient_visit_count"
    )]
    pub visit_count: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_visit_count() -> u32 {
    1
}

/// Non-negative integral value of a JSON number, floats like `3.0` included.
fn whole_number(n: &serde_json::Number) -> Option<u64> {
    n.as_u64()
        .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
}

/// Accepts any JSON value for `serial`; only integers in `0..=MAX_SERIAL` count.
fn lenient_serial<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => whole_number(&n).filter(|serial| *serial <= MAX_SERIAL),
        _ => None,
    })
}

/// A null or non-string title reads as empty.
fn lenient_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(title) => title,
        _ => String::new(),
    })
}

/// A present but null, negative or non-numeric `visitCount` reads as 0.
fn lenient_visit_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => whole_number(&n)
            .map(|count| u32::try_from(count).unwrap_or(u32::MAX))
            .unwrap_or(0),
        _ => 0,
    })
}

/// A normalized visit record: serial assigned, timestamps newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisitRecord {
    pub serial: u64,
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<DocParent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub timestamps: Vec<i64>,
    #[serde(rename = "visitCount")]
    pub visit_count: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VisitRecord {
    /// Most recent visit, if any timestamps survived.
    pub fn last_visit(&self) -> Option<i64> {
        self.timestamps.first().copied()
    }

    /// Number of visits inside the retention window.
    pub fn visits(&self) -> usize {
        self.timestamps.len()
    }
}

/// The ranked, paged "Frequently Viewed Articles" collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrequentlyViewedCollection {
    pub id: String,
    pub name: String,
    pub description: String,
    pub article_count: usize,
    pub created_at: String,
    pub updated_at: String,
    pub items: Vec<VisitRecord>,
}

/// Result of one collection computation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CollectionPage {
    /// `None` when no record qualifies.
    pub collection: Option<FrequentlyViewedCollection>,
    /// True once `limit + offset` reaches past the qualifying records.
    pub end: bool,
}
