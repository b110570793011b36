//! Normalization from raw content documents to [`bcb_core::Product`].

use bcb_core::{Category, Cents, Product};

use crate::error::CatalogError;
use crate::types::RawProduct;

/// Coerces one raw document into a [`Product`].
///
/// Rules:
/// - `_id` and `name` must be present and non-blank.
/// - `price` must be a non-negative finite dollar amount (number or numeric
///   string); it is rounded to whole cents.
/// - Unknown or missing categories become [`Category::Other`].
/// - Blank entries in `sizes` and `colors` are dropped; an absent list is
///   empty.
/// - Blank `description`/`image` are treated as absent; `featured` defaults
///   to `false`.
///
/// # Errors
///
/// Returns [`CatalogError::Normalization`] when a required field is missing
/// or the price is unusable.
pub fn normalize_product(raw: RawProduct) -> Result<Product, CatalogError> {
    let id = non_blank(raw.id).ok_or_else(|| CatalogError::Normalization {
        product_id: "<missing>".to_owned(),
        reason: "missing _id".to_owned(),
    })?;

    let fail = |reason: String| CatalogError::Normalization {
        product_id: id.clone(),
        reason,
    };

    let name = non_blank(raw.name).ok_or_else(|| fail("missing name".to_owned()))?;
    let price = match raw.price {
        Some(value) => parse_price(&value).map_err(&fail)?,
        None => return Err(fail("missing price".to_owned())),
    };

    Ok(Product {
        id,
        name,
        price,
        category: Category::from_key(raw.category.as_deref().unwrap_or_default()),
        sizes: clean_list(raw.sizes),
        colors: clean_list(raw.colors),
        description: non_blank(raw.description).unwrap_or_default(),
        featured: raw.featured.unwrap_or(false),
        image: non_blank(raw.image),
    })
}

/// Decodes and normalizes every record in a query result, skipping (and
/// logging) records that fail either step.
#[must_use]
pub fn normalize_products(records: Vec<serde_json::Value>) -> Vec<Product> {
    let total = records.len();
    let products: Vec<Product> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let raw = match serde_json::from_value::<RawProduct>(value) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping undecodable product record");
                    return None;
                }
            };
            match normalize_product(raw) {
                Ok(product) => Some(product),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping invalid product record");
                    None
                }
            }
        })
        .collect();

    if products.len() < total {
        tracing::info!(
            total,
            usable = products.len(),
            "some product records were skipped"
        );
    }
    products
}

fn parse_price(value: &serde_json::Value) -> Result<Cents, String> {
    match value {
        serde_json::Value::Number(n) => {
            let amount = n
                .as_f64()
                .ok_or_else(|| format!("price {n} is not representable"))?;
            Cents::from_major_f64(amount).map_err(|e| e.to_string())
        }
        serde_json::Value::String(s) => s.parse::<Cents>().map_err(|e| e.to_string()),
        other => Err(format!("price has unsupported type: {other}")),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

fn clean_list(values: Option<Vec<String>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| non_blank(Some(v)))
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
