//! Hosted checkout sessions with the Stripe API.

pub mod client;
pub mod error;
pub mod form;
pub mod types;

pub use client::StripeClient;
pub use error::PaymentsError;
pub use form::{session_form, ORDER_SOURCE};
pub use types::{CheckoutSession, SessionOptions};
