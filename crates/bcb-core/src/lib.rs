//! Domain types and the cart & checkout engine for the Bayou City Blues
//! merch store.

pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod events;
pub mod money;
pub mod products;
pub mod store;
pub mod totals;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use cart::{Cart, CartError, CartLine, ItemAdded, LineKey, ITEM_ADDED_NOTICE_TTL};
pub use catalog::{fallback_products, filter_by_category, CategoryInfo, CATEGORIES};
pub use checkout::{
    derive_checkout_payload, CheckoutError, CheckoutLineItem, CheckoutPayload,
    SHIPPING_LINE_NAME,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use events::{upcoming_events, MatchdayEvent};
pub use money::{Cents, MoneyError};
pub use products::{Category, Product, ONE_SIZE};
pub use store::{
    persist_cart, restore_cart, CartSession, CartSlot, FileSlot, MemorySlot, SlotError,
    CART_SLOT_KEY,
};
pub use totals::{compute_totals, ShippingPolicy, Totals};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
