//! Catalog browsing commands.

use bcb_catalog::{load_products, CatalogLoad, CatalogSource, ContentClient};
use bcb_core::{filter_by_category, upcoming_events, AppConfig, Product, CATEGORIES};

/// Loads the catalog, falling back to the built-in list when the content
/// backend is unreachable.
pub(crate) async fn load_catalog(config: &AppConfig) -> anyhow::Result<CatalogLoad> {
    let client = ContentClient::from_config(config)?;
    Ok(load_products(&client).await)
}

/// Looks up a product by id.
pub(crate) fn find_product<'a>(products: &'a [Product], id: &str) -> anyhow::Result<&'a Product> {
    products
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| anyhow::anyhow!("no product with id '{id}'; run `bcb products` to list ids"))
}

pub(crate) async fn run_products(
    config: &AppConfig,
    category: Option<&str>,
    featured_only: bool,
) -> anyhow::Result<()> {
    let key = category.unwrap_or("all");
    if !CATEGORIES.iter().any(|c| c.key == key) {
        let known: Vec<&str> = CATEGORIES.iter().map(|c| c.key).collect();
        anyhow::bail!("unknown category '{key}'; expected one of: {}", known.join(", "));
    }

    let load = load_catalog(config).await?;
    if load.source == CatalogSource::Fallback {
        println!("(showing built-in catalog; content backend unavailable)");
    }

    println!("{}", category_summary(&load.products));
    println!();

    let products: Vec<&Product> = filter_by_category(&load.products, key)
        .into_iter()
        .filter(|p| !featured_only || p.featured)
        .collect();

    if products.is_empty() {
        println!("no products match");
        return Ok(());
    }

    println!("{:<6}{:<34}{:>9}  OPTIONS", "ID", "NAME", "PRICE");
    for product in products {
        println!("{}", product_row(product));
    }
    Ok(())
}

pub(crate) fn run_events() {
    for event in upcoming_events() {
        println!(
            "{} {}  {} ({}) at {}",
            event.date, event.time, event.fixture, event.competition, event.venue
        );
        if let Some(note) = event.note {
            println!("    {note}");
        }
    }
}

/// `All Products (12) · Apparel (4) · ...`
pub(crate) fn category_summary(products: &[Product]) -> String {
    CATEGORIES
        .iter()
        .map(|c| format!("{} ({})", c.label, filter_by_category(products, c.key).len()))
        .collect::<Vec<_>>()
        .join(" · ")
}

pub(crate) fn product_row(product: &Product) -> String {
    let mut options = Vec::new();
    if !product.sizes.is_empty() {
        options.push(product.sizes.join("/"));
    }
    if !product.colors.is_empty() {
        options.push(product.colors.join(", "));
    }
    let star = if product.featured { "*" } else { "" };
    format!(
        "{:<6}{:<34}{:>9}  {}",
        product.id,
        format!("{}{star}", product.name),
        product.price.to_string(),
        options.join(" | ")
    )
}
