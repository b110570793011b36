//! Subtotal, shipping and grand total for a cart snapshot.
//!
//! [`compute_totals`] is the only place the free-shipping rule is evaluated;
//! checkout payload derivation calls it rather than re-deriving the rule.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::money::Cents;

/// Flat-rate shipping with a free-shipping threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: Cents,
    /// Fee charged below the threshold.
    pub flat_fee: Cents,
}

impl ShippingPolicy {
    pub const DEFAULT_THRESHOLD: Cents = Cents::new(7500);
    pub const DEFAULT_FLAT_FEE: Cents = Cents::new(599);

    #[must_use]
    pub const fn new(free_shipping_threshold: Cents, flat_fee: Cents) -> Self {
        Self {
            free_shipping_threshold,
            flat_fee,
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD, Self::DEFAULT_FLAT_FEE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub subtotal: Cents,
    /// Either zero or the policy's flat fee.
    pub shipping_fee: Cents,
    pub total: Cents,
    pub remaining_to_free_shipping: Cents,
}

impl Totals {
    #[must_use]
    pub fn qualifies_for_free_shipping(&self) -> bool {
        self.shipping_fee.is_zero()
    }
}

/// Computes totals for `cart` under `policy`.
///
/// Shipping is waived when the subtotal reaches the threshold. An empty cart
/// has nothing to ship and is charged nothing.
#[must_use]
pub fn compute_totals(cart: &Cart, policy: &ShippingPolicy) -> Totals {
    let subtotal = cart.subtotal();
    let shipping_fee = if cart.is_empty() || subtotal >= policy.free_shipping_threshold {
        Cents::ZERO
    } else {
        policy.flat_fee
    };

    Totals {
        subtotal,
        shipping_fee,
        total: subtotal.saturating_add(shipping_fee),
        remaining_to_free_shipping: policy.free_shipping_threshold.saturating_sub(subtotal),
    }
}
