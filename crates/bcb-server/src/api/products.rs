use axum::{
    extract::{Query, State},
    Extension, Json,
};
use bcb_catalog::{load_products, CatalogSource};
use bcb_core::{filter_by_category, Product, CATEGORIES};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct CatalogData {
    source: CatalogSource,
    products: Vec<Product>,
    /// Counts over the whole catalog, before filtering.
    categories: Vec<CategoryCount>,
}

#[derive(Debug, Serialize)]
pub(super) struct CategoryCount {
    key: &'static str,
    label: &'static str,
    count: usize,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ApiResponse<CatalogData>>, ApiError> {
    let key = query.category.as_deref().unwrap_or("all");
    if !CATEGORIES.iter().any(|c| c.key == key) {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            format!("unknown category \"{key}\""),
        ));
    }

    let load = load_products(&state.catalog).await;
    let categories = CATEGORIES
        .iter()
        .map(|c| CategoryCount {
            key: c.key,
            label: c.label,
            count: filter_by_category(&load.products, c.key).len(),
        })
        .collect();

    let products = filter_by_category(&load.products, key)
        .into_iter()
        .filter(|p| query.featured.is_none_or(|f| p.featured == f))
        .cloned()
        .collect();

    Ok(Json(ApiResponse {
        data: CatalogData {
            source: load.source,
            products,
            categories,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
