//! Catalog loading with fallback to the built-in product list.

use bcb_core::{fallback_products, Product};
use serde::Serialize;

use crate::client::ContentClient;

/// Where a loaded catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub products: Vec<Product>,
    pub source: CatalogSource,
}

impl CatalogLoad {
    fn fallback() -> Self {
        Self {
            products: fallback_products(),
            source: CatalogSource::Fallback,
        }
    }
}

/// Loads the catalog from the content backend.
///
/// Never fails: any fetch error, or a result with no usable products, yields
/// the built-in list instead. The reason is logged at `info` since an
/// unconfigured backend is a normal state during setup.
pub async fn load_products(client: &ContentClient) -> CatalogLoad {
    match client.fetch_products().await {
        Ok(products) if !products.is_empty() => {
            tracing::info!(count = products.len(), "loaded products from content backend");
            CatalogLoad {
                products,
                source: CatalogSource::Remote,
            }
        }
        Ok(_) => {
            tracing::info!("content backend has no usable products, using fallback catalog");
            CatalogLoad::fallback()
        }
        Err(e) => {
            tracing::info!(error = %e, "content backend unavailable, using fallback catalog");
            CatalogLoad::fallback()
        }
    }
}
