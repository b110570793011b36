//! Built-in catalog used while the content backend is unreachable or empty.

use crate::money::Cents;
use crate::products::{Category, Product, ONE_SIZE};

/// A storefront category filter with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    /// Filter key; `"all"` matches every product.
    pub key: &'static str,
    pub label: &'static str,
}

pub const CATEGORIES: &[CategoryInfo] = &[
    CategoryInfo {
        key: "all",
        label: "All Products",
    },
    CategoryInfo {
        key: "apparel",
        label: "Apparel",
    },
    CategoryInfo {
        key: "hats",
        label: "Hats & Scarves",
    },
    CategoryInfo {
        key: "drinkware",
        label: "Drinkware",
    },
    CategoryInfo {
        key: "accessories",
        label: "Stickers & More",
    },
    CategoryInfo {
        key: "banners",
        label: "Banners & Flags",
    },
];

/// Returns the products in `products` that fall under the filter `key`.
#[must_use]
pub fn filter_by_category<'a>(products: &'a [Product], key: &str) -> Vec<&'a Product> {
    if key == "all" {
        return products.iter().collect();
    }
    products
        .iter()
        .filter(|p| p.category.key() == key)
        .collect()
}

struct Seed {
    id: &'static str,
    name: &'static str,
    category: Category,
    dollars: u64,
    sizes: &'static [&'static str],
    colors: &'static [&'static str],
    description: &'static str,
    featured: bool,
}

const APPAREL_SIZES: &[&str] = &["S", "M", "L", "XL", "2XL"];

fn seeds() -> Vec<Seed> {
    vec![
        Seed {
            id: "f1",
            name: "Chelsea Houston Crest Tee",
            category: Category::Apparel,
            dollars: 32,
            sizes: APPAREL_SIZES,
            colors: &["Chelsea Blue", "White", "Navy"],
            description: "Classic ringspun cotton tee with the Chelsea Houston circle crest. Pre-shrunk, true to size.",
            featured: true,
        },
        Seed {
            id: "f2",
            name: "KTBFFH Matchday Jersey",
            category: Category::Apparel,
            dollars: 45,
            sizes: APPAREL_SIZES,
            colors: &["Chelsea Blue", "White"],
            description: "Premium dry-fit jersey with the Bayou City Blues shield on chest and KTBFFH across the back.",
            featured: true,
        },
        Seed {
            id: "f3",
            name: "Bayou City Blues Hoodie",
            category: Category::Apparel,
            dollars: 55,
            sizes: APPAREL_SIZES,
            colors: &["Navy", "Chelsea Blue"],
            description: "Heavyweight fleece-lined hoodie with embroidered Bayou City Blues shield.",
            featured: true,
        },
        Seed {
            id: "f4",
            name: "HOU/LDN 1905 Vintage Tee",
            category: Category::Apparel,
            dollars: 35,
            sizes: &["S", "M", "L", "XL"],
            colors: &["Heather Grey", "Chelsea Blue"],
            description: "Distressed vintage print featuring the HOU/LDN 1905 mark.",
            featured: false,
        },
        Seed {
            id: "f5",
            name: "Chelsea Houston Snapback",
            category: Category::Hats,
            dollars: 28,
            sizes: &[ONE_SIZE],
            colors: &["Chelsea Blue", "Navy", "White"],
            description: "Structured snapback with 3D embroidered CH monogram.",
            featured: true,
        },
        Seed {
            id: "f6",
            name: "Matchday Scarf",
            category: Category::Hats,
            dollars: 25,
            sizes: &[ONE_SIZE],
            colors: &["Chelsea Blue/White"],
            description: "Double-sided knit scarf. Bayou City Blues on one end, KTBFFH on the other.",
            featured: false,
        },
        Seed {
            id: "f7",
            name: "Chelsea Houston Ceramic Mug",
            category: Category::Drinkware,
            dollars: 18,
            sizes: &[ONE_SIZE],
            colors: &["Chelsea Blue", "White"],
            description: "11oz ceramic mug with Chelsea Houston circle crest.",
            featured: false,
        },
        Seed {
            id: "f8",
            name: "Pint Glass",
            category: Category::Drinkware,
            dollars: 16,
            sizes: &[ONE_SIZE],
            colors: &["Clear"],
            description: "16oz pint glass with the Bayou City Blues shield.",
            featured: false,
        },
        Seed {
            id: "f9",
            name: "Die-Cut Crest Sticker",
            category: Category::Accessories,
            dollars: 5,
            sizes: &[ONE_SIZE],
            colors: &["Full Color"],
            description: "3-inch weatherproof vinyl die-cut.",
            featured: false,
        },
        Seed {
            id: "f10",
            name: "Sticker Pack (6 designs)",
            category: Category::Accessories,
            dollars: 12,
            sizes: &[ONE_SIZE],
            colors: &["Full Color"],
            description: "Six unique designs.",
            featured: false,
        },
        Seed {
            id: "f11",
            name: "Carefree in the 713 Banner",
            category: Category::Banners,
            dollars: 65,
            sizes: &[ONE_SIZE],
            colors: &["Yellow/Blue"],
            description: "Full-size supporters banner. Chelsea Houston shield, CH monogram, and Carefree in the 713 Since 2011.",
            featured: true,
        },
        Seed {
            id: "f12",
            name: "Paul Canoville Canners Banner",
            category: Category::Banners,
            dollars: 65,
            sizes: &[ONE_SIZE],
            colors: &["Chelsea Blue"],
            description: "Paul Canoville tribute banner. Breaking Down Barriers.",
            featured: true,
        },
    ]
}

/// The fixed product list served when the content backend cannot supply one.
#[must_use]
pub fn fallback_products() -> Vec<Product> {
    seeds()
        .into_iter()
        .map(|seed| Product {
            id: seed.id.to_owned(),
            name: seed.name.to_owned(),
            price: Cents::new(seed.dollars * 100),
            category: seed.category,
            sizes: seed.sizes.iter().map(|s| (*s).to_owned()).collect(),
            colors: seed.colors.iter().map(|c| (*c).to_owned()).collect(),
            description: seed.description.to_owned(),
            featured: seed.featured,
            image: None,
        })
        .collect()
}
