use serde::{Deserialize, Serialize};

use crate::money::Cents;

/// Size label used when a product lists no sizes.
pub const ONE_SIZE: &str = "One Size";

/// Store category a product is filed under.
///
/// The content backend stores categories as free-form strings; values the
/// storefront does not know about are preserved in [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Apparel,
    Hats,
    Drinkware,
    Accessories,
    Banners,
    Other(String),
}

impl Category {
    /// Parses a feed category key. Matching is case-insensitive; blank input
    /// becomes `Other("")`.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "apparel" => Category::Apparel,
            "hats" => Category::Hats,
            "drinkware" => Category::Drinkware,
            "accessories" => Category::Accessories,
            "banners" => Category::Banners,
            _ => Category::Other(key.trim().to_owned()),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Category::Apparel => "apparel",
            Category::Hats => "hats",
            Category::Drinkware => "drinkware",
            Category::Accessories => "accessories",
            Category::Banners => "banners",
            Category::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Category::from_key(&raw))
    }
}

/// A catalog product, validated at the feed boundary.
///
/// Products are read-only once loaded; the cart copies the fields it needs
/// at add time rather than holding a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque content-backend document id, e.g. `"f1"`.
    pub id: String,
    pub name: String,
    /// Unit price in cents.
    #[serde(rename = "price_cents")]
    pub price: Cents,
    pub category: Category,
    /// Ordered size labels. Empty means a single size.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Ordered color labels. May be empty.
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured: bool,
    /// Image URL from the content backend's asset pipeline, when one is set.
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    /// The size preselected for this product: its first listed size, or
    /// [`ONE_SIZE`] when it lists none.
    #[must_use]
    pub fn default_size(&self) -> &str {
        self.sizes.first().map_or(ONE_SIZE, String::as_str)
    }

    /// The color preselected for this product: its first listed color, or the
    /// empty string.
    #[must_use]
    pub fn default_color(&self) -> &str {
        self.colors.first().map_or("", String::as_str)
    }

    /// Returns `true` if `size` is selectable for this product. A product with
    /// no size list accepts only [`ONE_SIZE`] or an empty size.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        if self.sizes.is_empty() {
            size.is_empty() || size == ONE_SIZE
        } else {
            self.sizes.iter().any(|s| s == size)
        }
    }

    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        if self.colors.is_empty() {
            color.is_empty()
        } else {
            self.colors.iter().any(|c| c == color)
        }
    }
}
