//! Product feed adapter: reads the merch catalog from the Sanity content
//! backend and falls back to the built-in product list when it can't.

pub mod client;
pub mod error;
pub mod feed;
pub mod normalize;
pub(crate) mod retry;
pub mod types;

pub use client::{project_base_url, ContentClient, PRODUCT_QUERY};
pub use error::CatalogError;
pub use feed::{load_products, CatalogLoad, CatalogSource};
pub use normalize::{normalize_product, normalize_products};
pub use types::{QueryResponse, RawProduct};
