//! Raw response types for the Sanity HTTP query API.
//!
//! ## Observed shape
//!
//! The query endpoint wraps results in an envelope:
//! `{ "query": "...", "result": [...], "ms": 4 }`. `result` is `null` when
//! the query itself resolves to nothing.
//!
//! Product documents are authored by hand in the studio, so every projected
//! field may be absent or `null`. `price` is usually a JSON number (`32`,
//! `22.5`) but older documents stored it as a string (`"32.00"`), so it is
//! kept as a raw [`serde_json::Value`] and coerced in `normalize.rs`.
//! `image` is the projected asset URL (`image.asset->url`), `null` when no
//! image was uploaded.

use serde::Deserialize;

/// Envelope returned by `GET /v{version}/data/query/{dataset}`.
///
/// Records stay as untyped JSON here so one malformed document does not
/// fail the whole response; each is decoded into [`RawProduct`] separately.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub result: Option<Vec<serde_json::Value>>,

    /// Server-side query time in milliseconds.
    #[serde(default)]
    pub ms: Option<u64>,
}

/// A product document as projected by [`crate::PRODUCT_QUERY`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProduct {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    /// Dollar amount; number or numeric string.
    #[serde(default)]
    pub price: Option<serde_json::Value>,

    #[serde(default)]
    pub sizes: Option<Vec<String>>,

    #[serde(default)]
    pub colors: Option<Vec<String>>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub featured: Option<bool>,

    #[serde(default)]
    pub image: Option<String>,
}
