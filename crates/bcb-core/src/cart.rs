//! Cart state and the operations that move it from one snapshot to the next.
//!
//! A [`Cart`] is an owned value. Every mutating operation borrows the current
//! snapshot and returns a new one, so a caller holding an older snapshot (for
//! example, a checkout still in flight) is never affected by later edits.
//!
//! Invariants upheld by every constructor and operation:
//! - no two lines share a [`LineKey`];
//! - every line has `quantity >= 1`;
//! - new lines are appended, existing lines keep their position.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Cents;
use crate::products::Product;

/// How long the "item added" acknowledgement stays visible.
pub const ITEM_ADDED_NOTICE_TTL: Duration = Duration::from_secs(2);

/// Snapshot format written by [`Cart`]'s `Serialize` impl.
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),

    #[error("quantity for {product_id} would exceed {max}")]
    QuantityOverflow { product_id: String, max: u32 },

    #[error("product has no id")]
    MissingProductId,

    #[error("unsupported cart snapshot version {0}")]
    UnsupportedSnapshot(u32),
}

/// Identity of a cart line: one distinct (product, size, color) selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: String,
    pub size: String,
    pub color: String,
}

impl LineKey {
    #[must_use]
    pub fn new(
        product_id: impl Into<String>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.into(),
            color: color.into(),
        }
    }
}

/// One line of the cart.
///
/// `name`, `unit_price` and `image` are copied from the product when the line
/// is created and are never refreshed from the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: Cents,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub color: String,
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(&self.product_id, &self.size, &self.color)
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }

    #[must_use]
    pub fn line_total(&self) -> Cents {
        self.unit_price.times(self.quantity)
    }

    /// `"M / Navy"`, `"Navy"`, or `None` when neither variant is set.
    #[must_use]
    pub fn variant_label(&self) -> Option<String> {
        match (self.size.is_empty(), self.color.is_empty()) {
            (true, true) => None,
            (false, true) => Some(self.size.clone()),
            (true, false) => Some(self.color.clone()),
            (false, false) => Some(format!("{} / {}", self.size, self.color)),
        }
    }
}

/// Acknowledgement returned by [`Cart::add_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAdded {
    pub key: LineKey,
    pub name: String,
    /// Quantity of the line after the add.
    pub line_quantity: u32,
    /// `true` when the add merged into an existing line.
    pub merged: bool,
}

impl ItemAdded {
    #[must_use]
    pub fn message(&self) -> String {
        format!("Added {} to cart", self.name)
    }

    /// How long a UI should keep the acknowledgement on screen.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        ITEM_ADDED_NOTICE_TTL
    }
}

/// An ordered set of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CartSnapshot", into = "CartSnapshot")]
pub struct Cart {
    lines: Vec<CartLine>,
}

/// On-disk / on-wire shape of a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CartSnapshot {
    version: u32,
    #[serde(default)]
    lines: Vec<CartLine>,
}

impl From<Cart> for CartSnapshot {
    fn from(cart: Cart) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            lines: cart.lines,
        }
    }
}

impl TryFrom<CartSnapshot> for Cart {
    type Error = CartError;

    fn try_from(snapshot: CartSnapshot) -> Result<Self, Self::Error> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(CartError::UnsupportedSnapshot(snapshot.version));
        }
        Ok(Cart::from_lines(snapshot.lines))
    }
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from arbitrary lines, restoring the invariants: lines
    /// with quantity 0 are dropped and lines sharing a key are merged into
    /// the first occurrence (quantities summed, saturating).
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut merged: Vec<CartLine> = Vec::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            let key = line.key();
            match merged.iter_mut().find(|l| l.matches(&key)) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => merged.push(line),
            }
        }
        Self { lines: merged }
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(key))
    }

    /// Key of the line at `index` (0-based), if any.
    #[must_use]
    pub fn key_at(&self, index: usize) -> Option<LineKey> {
        self.lines.get(index).map(CartLine::key)
    }

    /// Sum of unit price × quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Cents {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Adds `quantity` units of `product` in the given size and color.
    ///
    /// If a line with the same `(product id, size, color)` exists its
    /// quantity is increased in place; otherwise a new line is appended with
    /// the product's current name, price and image.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`] if `quantity` is 0.
    /// - [`CartError::MissingProductId`] if the product id is blank.
    /// - [`CartError::QuantityOverflow`] if the merged quantity exceeds `u32::MAX`.
    ///
    /// On error `self` is unchanged.
    pub fn add_item(
        &self,
        product: &Product,
        size: &str,
        color: &str,
        quantity: u32,
    ) -> Result<(Cart, ItemAdded), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        if product.id.trim().is_empty() {
            return Err(CartError::MissingProductId);
        }

        let key = LineKey::new(&product.id, size, color);
        let mut lines = self.lines.clone();

        let (line_quantity, merged) = match lines.iter_mut().find(|l| l.matches(&key)) {
            Some(existing) => {
                existing.quantity = existing.quantity.checked_add(quantity).ok_or_else(|| {
                    CartError::QuantityOverflow {
                        product_id: product.id.clone(),
                        max: u32::MAX,
                    }
                })?;
                (existing.quantity, true)
            }
            None => {
                lines.push(CartLine {
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    unit_price: product.price,
                    image: product.image.clone(),
                    size: size.to_owned(),
                    color: color.to_owned(),
                    quantity,
                });
                (quantity, false)
            }
        };

        tracing::debug!(
            product_id = %key.product_id,
            size = %key.size,
            color = %key.color,
            line_quantity,
            merged,
            "cart item added"
        );

        let added = ItemAdded {
            key,
            name: product.name.clone(),
            line_quantity,
            merged,
        };
        Ok((Cart { lines }, added))
    }

    /// Changes the quantity of the line at `key` by `delta`, clamping at 0.
    ///
    /// A line that reaches 0 is removed. Other lines keep their position.
    /// An unknown key yields an unchanged copy.
    #[must_use]
    pub fn update_quantity(&self, key: &LineKey, delta: i64) -> Cart {
        let lines = self
            .lines
            .iter()
            .filter_map(|line| {
                if !line.matches(key) {
                    return Some(line.clone());
                }
                let next = i64::from(line.quantity).saturating_add(delta).max(0);
                let quantity = u32::try_from(next).unwrap_or(u32::MAX);
                (quantity > 0).then(|| CartLine {
                    quantity,
                    ..line.clone()
                })
            })
            .collect();
        Cart { lines }
    }

    /// Drops the line at `key`. No-op if absent.
    #[must_use]
    pub fn remove_line(&self, key: &LineKey) -> Cart {
        Cart {
            lines: self
                .lines
                .iter()
                .filter(|l| !l.matches(key))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
