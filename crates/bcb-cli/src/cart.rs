//! Cart commands. The cart lives in a [`FileSlot`] under `BCB_CART_DIR` and
//! is rewritten after every change.

use std::fmt::Write as _;

use bcb_core::{
    compute_totals, AppConfig, Cart, CartSession, FileSlot, LineKey, Product, ShippingPolicy,
};
use clap::Subcommand;

use crate::catalog::{find_product, load_catalog};

#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show cart lines and totals
    Show,
    /// Add a product
    Add {
        /// Product id, as listed by `bcb products`
        product_id: String,
        /// Size; defaults to the product's first size
        #[arg(long)]
        size: Option<String>,
        /// Color; defaults to the product's first color
        #[arg(long)]
        color: Option<String>,
        #[arg(long, default_value = "1")]
        qty: u32,
    },
    /// Change a line's quantity by a signed amount; reaching zero removes it
    Update {
        /// Line number from `cart show`
        line: usize,
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Remove a line
    Remove {
        /// Line number from `cart show`
        line: usize,
    },
    /// Empty the cart
    Clear,
}

pub(crate) fn open_session(config: &AppConfig) -> CartSession<FileSlot> {
    CartSession::open(FileSlot::new(config.cart_dir.clone()))
}

pub(crate) async fn run_cart(config: &AppConfig, command: CartCommands) -> anyhow::Result<()> {
    let mut session = open_session(config);

    match command {
        CartCommands::Show => {}
        CartCommands::Add {
            product_id,
            size,
            color,
            qty,
        } => {
            let catalog = load_catalog(config).await?;
            let product = find_product(&catalog.products, &product_id)?;
            let (size, color) = resolve_variant(product, size.as_deref(), color.as_deref())?;
            let added = session.add_item(product, &size, &color, qty)?;
            println!("{} (now {} in cart)", added.message(), added.line_quantity);
        }
        CartCommands::Update { line, delta } => {
            let key = line_key(session.cart(), line)?;
            session.update_quantity(&key, delta);
        }
        CartCommands::Remove { line } => {
            let key = line_key(session.cart(), line)?;
            session.remove_line(&key);
        }
        CartCommands::Clear => {
            session.clear();
            println!("cart cleared");
        }
    }

    print!("{}", render_cart(session.cart(), &config.shipping));
    Ok(())
}

/// Fills in default size and color and checks both against the product.
pub(crate) fn resolve_variant(
    product: &Product,
    size: Option<&str>,
    color: Option<&str>,
) -> anyhow::Result<(String, String)> {
    let size = size.unwrap_or_else(|| product.default_size()).to_owned();
    if !product.offers_size(&size) {
        anyhow::bail!(
            "{} does not come in size '{size}'; available: {}",
            product.name,
            options_or_none(&product.sizes)
        );
    }

    let color = color.unwrap_or_else(|| product.default_color()).to_owned();
    if !product.offers_color(&color) {
        anyhow::bail!(
            "{} does not come in '{color}'; available: {}",
            product.name,
            options_or_none(&product.colors)
        );
    }

    Ok((size, color))
}

/// Maps a 1-based line number from `cart show` to the line's key.
pub(crate) fn line_key(cart: &Cart, line: usize) -> anyhow::Result<LineKey> {
    line.checked_sub(1)
        .and_then(|index| cart.key_at(index))
        .ok_or_else(|| match cart.len() {
            0 => anyhow::anyhow!("the cart is empty"),
            n => anyhow::anyhow!("no line {line}; the cart has lines 1-{n}"),
        })
}

pub(crate) fn render_cart(cart: &Cart, policy: &ShippingPolicy) -> String {
    if cart.is_empty() {
        return "Your cart is empty.\n".to_owned();
    }

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        "{:>3}  {:<32}{:<22}{:>4}{:>10}{:>10}",
        "#", "ITEM", "VARIANT", "QTY", "PRICE", "TOTAL"
    );
    for (i, line) in cart.lines().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<32}{:<22}{:>4}{:>10}{:>10}",
            i + 1,
            line.name,
            line.variant_label().unwrap_or_default(),
            line.quantity,
            line.unit_price.to_string(),
            line.line_total().to_string()
        );
    }

    let totals = compute_totals(cart, policy);
    let _ = writeln!(out, "\n{} items", cart.item_count());
    let _ = writeln!(out, "Subtotal: {}", totals.subtotal);
    if totals.qualifies_for_free_shipping() {
        let _ = writeln!(out, "Shipping: FREE");
    } else {
        let _ = writeln!(
            out,
            "Shipping: {}  (add {} more for free shipping)",
            totals.shipping_fee, totals.remaining_to_free_shipping
        );
    }
    let _ = writeln!(out, "Total:    {}", totals.total);
    out
}

fn options_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_owned()
    } else {
        values.join(", ")
    }
}
