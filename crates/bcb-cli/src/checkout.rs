use anyhow::Context;
use bcb_core::{
    compute_totals, derive_checkout_payload, AppConfig, CartSession, CartSlot, Cents,
    ShippingPolicy,
};

use crate::cart::open_session;
use crate::relay::RelayClient;

/// Derives the payload from the saved cart and asks the relay for a payment
/// page. The cart is left as is whether or not checkout succeeds.
pub(crate) async fn run_checkout(config: &AppConfig, email: Option<String>) -> anyhow::Result<()> {
    let session = open_session(config);
    if session.cart().is_empty() {
        println!("Your cart is empty; add something with `bcb cart add <id>` first.");
        return Ok(());
    }

    let relay = RelayClient::from_config(config)?;
    let (url, total) = checkout_session(&session, &config.shipping, &relay, email).await?;

    println!("Total due: {total}");
    println!("Complete your order at:\n{url}");
    Ok(())
}

/// Returns the payment page URL and the amount due. Takes the session by
/// shared reference; nothing here can change the saved cart.
pub(crate) async fn checkout_session<S: CartSlot>(
    session: &CartSession<S>,
    policy: &ShippingPolicy,
    relay: &RelayClient,
    email: Option<String>,
) -> anyhow::Result<(String, Cents)> {
    let cart = session.cart();
    let payload = derive_checkout_payload(cart, policy)?.with_customer_email(email);
    let totals = compute_totals(cart, policy);
    tracing::info!(
        items = payload.items.len(),
        total = totals.total.get(),
        "starting checkout"
    );

    let url = relay
        .checkout(&payload)
        .await
        .context("checkout failed; your cart has been kept")?;
    Ok((url, totals.total))
}
