//! Checkout payload derivation.
//!
//! The payload is what the storefront POSTs to the checkout relay; the relay
//! hands the items to the hosted payment provider unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;
use crate::money::Cents;
use crate::totals::{compute_totals, ShippingPolicy};

/// Display name of the synthetic shipping line.
pub const SHIPPING_LINE_NAME: &str = "Shipping";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("line item {index} is invalid: {reason}")]
    InvalidItem { index: usize, reason: String },
}

/// One line item of a payment session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLineItem {
    pub name: String,
    /// Variant label such as `"M / Navy"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price in cents.
    pub unit_amount: Cents,
    pub quantity: u32,
}

/// Request body for the checkout relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPayload {
    pub items: Vec<CheckoutLineItem>,
    #[serde(
        default,
        alias = "customerEmail",
        skip_serializing_if = "Option::is_none"
    )]
    pub customer_email: Option<String>,
}

impl CheckoutPayload {
    #[must_use]
    pub fn with_customer_email(mut self, email: Option<String>) -> Self {
        self.customer_email = email.filter(|e| !e.trim().is_empty());
        self
    }

    /// Sum of unit amount × quantity over all items, shipping included.
    #[must_use]
    pub fn amount_total(&self) -> Cents {
        self.items
            .iter()
            .map(|item| item.unit_amount.times(item.quantity))
            .sum()
    }

    #[must_use]
    pub fn has_shipping_line(&self) -> bool {
        self.items.iter().any(|item| item.name == SHIPPING_LINE_NAME)
    }

    /// Checks a payload received from outside the process.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] for a payload with no items and
    /// [`CheckoutError::InvalidItem`] for a blank name or zero quantity.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        for (index, item) in self.items.iter().enumerate() {
            if item.name.trim().is_empty() {
                return Err(CheckoutError::InvalidItem {
                    index,
                    reason: "name is blank".to_string(),
                });
            }
            if item.quantity == 0 {
                return Err(CheckoutError::InvalidItem {
                    index,
                    reason: "quantity must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Derives the checkout payload for a cart snapshot.
///
/// One item per cart line, in cart order, followed by a single
/// [`SHIPPING_LINE_NAME`] item at the flat fee when [`compute_totals`]
/// charges shipping for the same cart and policy.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
pub fn derive_checkout_payload(
    cart: &Cart,
    policy: &ShippingPolicy,
) -> Result<CheckoutPayload, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let mut items: Vec<CheckoutLineItem> = cart
        .lines()
        .iter()
        .map(|line| CheckoutLineItem {
            name: line.name.clone(),
            description: line.variant_label(),
            unit_amount: line.unit_price,
            quantity: line.quantity,
        })
        .collect();

    let totals = compute_totals(cart, policy);
    if !totals.shipping_fee.is_zero() {
        items.push(CheckoutLineItem {
            name: SHIPPING_LINE_NAME.to_string(),
            description: None,
            unit_amount: totals.shipping_fee,
            quantity: 1,
        });
    }

    Ok(CheckoutPayload {
        items,
        customer_email: None,
    })
}
