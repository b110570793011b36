use bcb_core::{fallback_products, Cart, CartSession, Cents, FileSlot, ShippingPolicy};
use clap::Parser;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::cart::{line_key, render_cart, resolve_variant};
use crate::catalog::{category_summary, find_product, product_row};
use crate::chat::{chat_turn, CHAT_FAILURE_REPLY};
use crate::checkout::checkout_session;
use crate::relay::RelayClient;

fn product(id: &str) -> bcb_core::Product {
    fallback_products()
        .into_iter()
        .find(|p| p.id == id)
        .expect("fallback product")
}

// ---------------------------------------------------------------------------
// argument parsing
// ---------------------------------------------------------------------------

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["bcb"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_products_filters() {
    let cli = Cli::try_parse_from(["bcb", "products", "--category", "hats", "--featured"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Products { category: Some(ref c), featured: true }) if c == "hats"
    ));
}

#[test]
fn cart_add_defaults_quantity_to_one() {
    let cli = Cli::try_parse_from(["bcb", "cart", "add", "f1"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Cart {
            command: CartCommands::Add {
                ref product_id,
                size: None,
                color: None,
                qty: 1
            }
        }) if product_id == "f1"
    ));
}

#[test]
fn cart_update_accepts_negative_delta() {
    let cli = Cli::try_parse_from(["bcb", "cart", "update", "2", "-1"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Cart {
            command: CartCommands::Update { line: 2, delta: -1 }
        })
    ));
}

#[test]
fn checkout_takes_optional_email() {
    let cli = Cli::try_parse_from(["bcb", "checkout", "--email", "fan@example.com"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Checkout { email: Some(ref e) }) if e == "fan@example.com"
    ));
}

#[test]
fn chat_joins_words_and_allows_no_message() {
    let cli = Cli::try_parse_from(["bcb", "chat", "any", "scarves?"]).unwrap();
    match cli.command {
        Some(Commands::Chat { message }) => assert_eq!(message.join(" "), "any scarves?"),
        other => panic!("unexpected command: {other:?}"),
    }

    let cli = Cli::try_parse_from(["bcb", "chat"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Chat { ref message }) if message.is_empty()));
    assert!(Cli::try_parse_from(["bcb", "chat", "--reset"]).is_err());
}

#[test]
fn log_filter_falls_back_to_configured_level() {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    assert_eq!(log_filter("debug").unwrap().to_string(), "debug");
    assert!(log_filter("bcb=[[nope").is_err());
}

// ---------------------------------------------------------------------------
// cart helpers
// ---------------------------------------------------------------------------

#[test]
fn resolve_variant_defaults_to_first_options() {
    let tee = product("f1");
    let (size, color) = resolve_variant(&tee, None, None).unwrap();
    assert_eq!(size, tee.sizes[0]);
    assert_eq!(color, tee.colors[0]);
}

#[test]
fn resolve_variant_uses_one_size_for_sizeless_products() {
    let scarf = product("f6");
    let (size, _) = resolve_variant(&scarf, None, None).unwrap();
    assert_eq!(size, bcb_core::ONE_SIZE);
}

#[test]
fn resolve_variant_rejects_unknown_size_and_color() {
    let tee = product("f1");
    assert!(resolve_variant(&tee, Some("XXXXL"), None).is_err());
    assert!(resolve_variant(&tee, None, Some("Tartan")).is_err());
}

#[test]
fn line_key_is_one_based() {
    let (cart, _) = Cart::new().add_item(&product("f1"), "M", "Navy", 1).unwrap();
    assert_eq!(
        line_key(&cart, 1).unwrap(),
        bcb_core::LineKey::new("f1", "M", "Navy")
    );
    assert!(line_key(&cart, 0).is_err());
    assert!(line_key(&cart, 2).is_err());
    assert!(line_key(&Cart::new(), 1).is_err());
}

#[test]
fn render_cart_shows_shipping_hint_below_threshold() {
    let (cart, _) = Cart::new().add_item(&product("f1"), "M", "Navy", 1).unwrap();
    let out = render_cart(&cart, &ShippingPolicy::default());
    assert!(out.contains("M / Navy"));
    assert!(out.contains("Subtotal: $32.00"));
    assert!(out.contains("Shipping: $5.99  (add $43.00 more for free shipping)"));
    assert!(out.contains("Total:    $37.99"));
}

#[test]
fn render_cart_shows_free_shipping_at_threshold() {
    let (cart, _) = Cart::new().add_item(&product("f1"), "M", "Navy", 3).unwrap();
    let out = render_cart(&cart, &ShippingPolicy::default());
    assert!(out.contains("Shipping: FREE"));
    assert!(out.contains("Total:    $96.00"));
}

#[test]
fn render_empty_cart() {
    assert_eq!(
        render_cart(&Cart::new(), &ShippingPolicy::default()),
        "Your cart is empty.\n"
    );
}

// ---------------------------------------------------------------------------
// catalog helpers
// ---------------------------------------------------------------------------

#[test]
fn find_product_reports_unknown_id() {
    let products = fallback_products();
    assert!(find_product(&products, "f3").is_ok());
    let err = find_product(&products, "nope").unwrap_err();
    assert!(err.to_string().contains("nope"));
}

#[test]
fn category_summary_counts_all_products() {
    let summary = category_summary(&fallback_products());
    assert!(summary.starts_with("All Products (12)"));
}

#[test]
fn product_row_shows_price() {
    let row = product_row(&product("f1"));
    assert!(row.starts_with("f1"));
    assert!(row.contains(&Cents::new(3200).to_string()));
}

// ---------------------------------------------------------------------------
// chat session
// ---------------------------------------------------------------------------

fn relay(server: &MockServer) -> RelayClient {
    RelayClient::new(&server.uri(), 5, "bcb-test/0.1").expect("relay client")
}

#[tokio::test]
async fn chat_session_sends_earlier_turns_as_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({ "chatMessage": "any hats?", "history": [] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "Two of them." })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "chatMessage": "which is cheaper?",
            "history": [
                { "role": "user", "text": "any hats?" },
                { "role": "assistant", "text": "Two of them." }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "The bucket hat." })))
        .expect(1)
        .mount(&server)
        .await;

    let relay = relay(&server);
    let mut transcript = Vec::new();
    assert_eq!(chat_turn(&relay, &mut transcript, "any hats?").await, "Two of them.");
    assert_eq!(
        chat_turn(&relay, &mut transcript, "which is cheaper?").await,
        "The bucket hat."
    );
    assert_eq!(transcript.len(), 4);
}

#[tokio::test]
async fn failed_chat_turn_shows_failure_reply_and_keeps_transcript() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({ "error": "assistant unavailable" })))
        .mount(&server)
        .await;

    let mut transcript = vec![
        bcb_assistant::ChatTurn::user("hats?"),
        bcb_assistant::ChatTurn::assistant("Two of them."),
    ];
    let before = transcript.clone();
    let shown = chat_turn(&relay(&server), &mut transcript, "scarves?").await;

    assert_eq!(shown, CHAT_FAILURE_REPLY);
    assert_eq!(transcript, before);
}

// ---------------------------------------------------------------------------
// checkout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_checkout_leaves_saved_cart_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/checkout"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = CartSession::open(FileSlot::new(dir.path()));
    session.add_item(&product("f1"), "M", "Navy", 2).unwrap();
    session.add_item(&product("f6"), "One Size", "Chelsea Blue/White", 1).unwrap();
    let before = session.cart().clone();

    let err = checkout_session(&session, &ShippingPolicy::default(), &relay(&server), None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("cart has been kept"));

    let reopened = CartSession::open(FileSlot::new(dir.path()));
    assert_eq!(reopened.cart(), &before);
    assert_eq!(reopened.cart().lines(), before.lines());
}

#[tokio::test]
async fn successful_checkout_returns_url_and_total() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/checkout"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "url": "https://checkout.stripe.com/c/pay/cs_9" })),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = CartSession::open(FileSlot::new(dir.path()));
    session.add_item(&product("f1"), "M", "Navy", 1).unwrap();

    let (url, total) = checkout_session(&session, &ShippingPolicy::default(), &relay(&server), None)
        .await
        .unwrap();
    assert_eq!(url, "https://checkout.stripe.com/c/pay/cs_9");
    assert_eq!(total, Cents::new(3799));
    assert_eq!(session.cart().item_count(), 1);
}

#[test]
fn file_slot_cart_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut session = CartSession::open(FileSlot::new(dir.path()));
        session.add_item(&product("f7"), "One Size", "White", 2).unwrap();
    }
    let reopened = CartSession::open(FileSlot::new(dir.path()));
    assert_eq!(reopened.cart().item_count(), 2);
}
