use super::*;
use crate::products::Category;

fn product(id: &str, dollars: u64) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        price: Cents::new(dollars * 100),
        category: Category::Apparel,
        sizes: vec!["S".to_string(), "M".to_string()],
        colors: vec!["Navy".to_string(), "White".to_string()],
        description: String::new(),
        featured: false,
        image: Some(format!("https://cdn.example.com/{id}.png")),
    }
}

fn add(cart: &Cart, product: &Product, size: &str, color: &str, qty: u32) -> Cart {
    cart.add_item(product, size, color, qty)
        .expect("add_item should succeed")
        .0
}

// -----------------------------------------------------------------------
// add_item
// -----------------------------------------------------------------------

#[test]
fn add_item_to_empty_cart_appends_line() {
    let tee = product("f1", 32);
    let (cart, added) = Cart::new().add_item(&tee, "M", "Navy", 1).unwrap();

    assert_eq!(cart.len(), 1);
    let line = &cart.lines()[0];
    assert_eq!(line.product_id, "f1");
    assert_eq!(line.name, "Product f1");
    assert_eq!(line.unit_price, Cents::new(3200));
    assert_eq!(line.image.as_deref(), Some("https://cdn.example.com/f1.png"));
    assert_eq!(line.quantity, 1);
    assert!(!added.merged);
    assert_eq!(added.line_quantity, 1);
    assert_eq!(added.ttl(), ITEM_ADDED_NOTICE_TTL);
}

#[test]
fn add_same_key_merges_and_sums_quantity() {
    let tee = product("f1", 32);
    let cart = add(&Cart::new(), &tee, "M", "Navy", 1);
    let (cart, added) = cart.add_item(&tee, "M", "Navy", 2).unwrap();

    assert_eq!(cart.len(), 1, "same key must not create a second line");
    assert_eq!(cart.lines()[0].quantity, 3);
    assert_eq!(cart.subtotal(), Cents::new(9600));
    assert!(added.merged);
    assert_eq!(added.line_quantity, 3);
}

#[test]
fn add_different_size_or_color_creates_separate_lines() {
    let tee = product("f1", 32);
    let cart = add(&Cart::new(), &tee, "M", "Navy", 1);
    let cart = add(&cart, &tee, "S", "Navy", 1);
    let cart = add(&cart, &tee, "M", "White", 1);

    assert_eq!(cart.len(), 3);
    assert_eq!(cart.item_count(), 3);
}

#[test]
fn merge_keeps_first_occurrence_order() {
    let tee = product("f1", 32);
    let mug = product("f7", 18);
    let cart = add(&Cart::new(), &tee, "M", "Navy", 1);
    let cart = add(&cart, &mug, "", "White", 1);
    let cart = add(&cart, &tee, "M", "Navy", 4);

    let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
    assert_eq!(ids, vec!["f1", "f7"]);
    assert_eq!(cart.lines()[0].quantity, 5);
}

#[test]
fn merge_does_not_refresh_denormalized_price() {
    let mut tee = product("f1", 32);
    let cart = add(&Cart::new(), &tee, "M", "Navy", 1);
    tee.price = Cents::new(4000);
    tee.name = "Renamed Tee".to_string();
    let cart = add(&cart, &tee, "M", "Navy", 1);

    let line = &cart.lines()[0];
    assert_eq!(line.unit_price, Cents::new(3200));
    assert_eq!(line.name, "Product f1");
    assert_eq!(line.quantity, 2);
}

#[test]
fn add_item_rejects_zero_quantity_and_leaves_cart_untouched() {
    let tee = product("f1", 32);
    let cart = add(&Cart::new(), &tee, "M", "Navy", 1);
    let err = cart.add_item(&tee, "M", "Navy", 0).unwrap_err();

    assert_eq!(err, CartError::InvalidQuantity(0));
    assert_eq!(cart.lines()[0].quantity, 1);
}

#[test]
fn add_item_rejects_blank_product_id() {
    let blank = product("  ", 10);
    let err = Cart::new().add_item(&blank, "", "", 1).unwrap_err();
    assert_eq!(err, CartError::MissingProductId);
}

#[test]
fn add_item_rejects_quantity_overflow() {
    let tee = product("f1", 32);
    let cart = add(&Cart::new(), &tee, "M", "Navy", u32::MAX);
    let err = cart.add_item(&tee, "M", "Navy", 1).unwrap_err();
    assert!(
        matches!(err, CartError::QuantityOverflow { ref product_id, .. } if product_id == "f1"),
        "got: {err:?}"
    );
    assert_eq!(cart.lines()[0].quantity, u32::MAX);
}

#[test]
fn add_item_does_not_mutate_source_snapshot() {
    let tee = product("f1", 32);
    let before = add(&Cart::new(), &tee, "M", "Navy", 1);
    let _after = add(&before, &tee, "M", "Navy", 1);
    assert_eq!(before.lines()[0].quantity, 1);
}

// -----------------------------------------------------------------------
// update_quantity / remove_line
// -----------------------------------------------------------------------

#[test]
fn update_quantity_increments_in_place() {
    let tee = product("f1", 32);
    let mug = product("f7", 18);
    let cart = add(&Cart::new(), &tee, "M", "Navy", 1);
    let cart = add(&cart, &mug, "", "White", 1);

    let cart = cart.update_quantity(&LineKey::new("f1", "M", "Navy"), 1);
    assert_eq!(cart.lines()[0].product_id, "f1");
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(cart.lines()[1].quantity, 1);
}

#[test]
fn update_quantity_to_zero_removes_line() {
    let tee = product("f1", 32);
    let mug = product("f7", 18);
    let cart = add(&Cart::new(), &tee, "M", "Navy", 1);
    let cart = add(&cart, &mug, "", "White", 1);

    let updated = cart.update_quantity(&LineKey::new("f1", "M", "Navy"), -1);
    assert_eq!(updated.len(), cart.len() - 1);
    assert!(updated.line(&LineKey::new("f1", "M", "Navy")).is_none());
}

#[test]
fn update_quantity_clamps_large_negative_delta() {
    let tee = product("f1", 32);
    let cart = add(&Cart::new(), &tee, "M", "Navy", 3);
    let cart = cart.update_quantity(&LineKey::new("f1", "M", "Navy"), i64::MIN);
    assert!(cart.is_empty());
}

#[test]
fn update_quantity_saturates_large_positive_delta() {
    let tee = product("f1", 32);
    let cart = add(&Cart::new(), &tee, "M", "Navy", 3);
    let cart = cart.update_quantity(&LineKey::new("f1", "M", "Navy"), i64::MAX);
    assert_eq!(cart.lines()[0].quantity, u32::MAX);
}

#[test]
fn update_quantity_unknown_key_is_noop() {
    let tee = product("f1", 32);
    let cart = add(&Cart::new(), &tee, "M", "Navy", 2);
    let updated = cart.update_quantity(&LineKey::new("nope", "M", "Navy"), -5);
    assert_eq!(updated, cart);
}

#[test]
fn cart_never_holds_zero_quantity_lines() {
    let tee = product("f1", 32);
    let key = LineKey::new("f1", "M", "Navy");
    let mut cart = add(&Cart::new(), &tee, "M", "Navy", 2);
    for delta in [-1, 3, -10, 1, -1] {
        cart = cart.update_quantity(&key, delta);
        assert!(cart.lines().iter().all(|l| l.quantity >= 1));
    }
}

#[test]
fn remove_line_drops_only_that_line() {
    let tee = product("f1", 32);
    let cart = add(&Cart::new(), &tee, "M", "Navy", 1);
    let cart = add(&cart, &tee, "S", "Navy", 1);

    let cart = cart.remove_line(&LineKey::new("f1", "M", "Navy"));
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines()[0].size, "S");
}

#[test]
fn remove_line_absent_is_noop() {
    let tee = product("f1", 32);
    let cart = add(&Cart::new(), &tee, "M", "Navy", 1);
    assert_eq!(cart.remove_line(&LineKey::new("f2", "M", "Navy")), cart);
}

// -----------------------------------------------------------------------
// derived views and snapshots
// -----------------------------------------------------------------------

#[test]
fn key_at_and_item_count() {
    let tee = product("f1", 32);
    let cart = add(&Cart::new(), &tee, "M", "Navy", 2);
    let cart = add(&cart, &tee, "S", "", 3);
    assert_eq!(cart.key_at(1), Some(LineKey::new("f1", "S", "")));
    assert_eq!(cart.key_at(2), None);
    assert_eq!(cart.item_count(), 5);
}

#[test]
fn variant_label_omits_empty_parts() {
    let tee = product("f1", 32);
    let cart = add(&Cart::new(), &tee, "M", "Navy", 1);
    let cart = add(&cart, &tee, "", "Navy", 1);
    let cart = add(&cart, &tee, "", "", 1);
    let labels: Vec<Option<String>> = cart.lines().iter().map(CartLine::variant_label).collect();
    assert_eq!(
        labels,
        vec![Some("M / Navy".to_string()), Some("Navy".to_string()), None]
    );
}

#[test]
fn from_lines_merges_duplicates_and_drops_zero_quantity() {
    let line = |size: &str, quantity: u32| CartLine {
        product_id: "f1".to_string(),
        name: "Tee".to_string(),
        unit_price: Cents::new(3200),
        image: None,
        size: size.to_string(),
        color: "Navy".to_string(),
        quantity,
    };
    let cart = Cart::from_lines(vec![line("M", 1), line("S", 0), line("M", 2)]);
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines()[0].quantity, 3);
}

#[test]
fn snapshot_roundtrip_preserves_lines() {
    let tee = product("f1", 32);
    let mug = product("f7", 18);
    let cart = add(&Cart::new(), &tee, "M", "Navy", 3);
    let cart = add(&cart, &mug, "", "White", 1);

    let json = serde_json::to_string(&cart).expect("serialize");
    assert!(json.contains("\"version\":1"), "json: {json}");
    let decoded: Cart = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, cart);
}

#[test]
fn snapshot_with_unknown_version_is_rejected() {
    let json = r#"{"version":99,"lines":[]}"#;
    let result = serde_json::from_str::<Cart>(json);
    assert!(result.is_err(), "expected error, got: {result:?}");
}
