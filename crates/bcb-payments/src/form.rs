//! Form encoding of a Checkout Session create request.
//!
//! Stripe takes nested parameters as bracketed form keys, e.g.
//! `line_items[0][price_data][unit_amount]=3200`.

use bcb_core::CheckoutPayload;

use crate::types::SessionOptions;

/// Value of `metadata[order_source]` on every session.
pub const ORDER_SOURCE: &str = "bayou-city-blues-store";

const CURRENCY: &str = "usd";

/// Builds the ordered form parameters for `POST /v1/checkout/sessions`.
#[must_use]
pub fn session_form(payload: &CheckoutPayload, options: &SessionOptions) -> Vec<(String, String)> {
    let mut form: Vec<(String, String)> = vec![
        ("mode".to_owned(), "payment".to_owned()),
        ("payment_method_types[0]".to_owned(), "card".to_owned()),
    ];

    for (i, item) in payload.items.iter().enumerate() {
        let prefix = format!("line_items[{i}]");
        form.push((
            format!("{prefix}[price_data][currency]"),
            CURRENCY.to_owned(),
        ));
        form.push((
            format!("{prefix}[price_data][product_data][name]"),
            item.name.clone(),
        ));
        if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
            form.push((
                format!("{prefix}[price_data][product_data][description]"),
                description.to_owned(),
            ));
        }
        form.push((
            format!("{prefix}[price_data][unit_amount]"),
            item.unit_amount.get().to_string(),
        ));
        form.push((format!("{prefix}[quantity]"), item.quantity.to_string()));
    }

    if let Some(email) = payload.customer_email.as_deref() {
        form.push(("customer_email".to_owned(), email.to_owned()));
    }

    for (n, country) in options.allowed_countries.iter().enumerate() {
        form.push((
            format!("shipping_address_collection[allowed_countries][{n}]"),
            country.clone(),
        ));
    }

    form.push(("success_url".to_owned(), options.success_url()));
    form.push(("cancel_url".to_owned(), options.cancel_url()));
    form.push((
        "metadata[order_source]".to_owned(),
        ORDER_SOURCE.to_owned(),
    ));
    form
}
