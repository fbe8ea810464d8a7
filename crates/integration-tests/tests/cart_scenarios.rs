//! Integration tests for the cart state machine.
//!
//! Scenarios run against the two-product catalog A (100) and B (200).

use toko_cli::catalog_file::load_catalog;
use toko_core::{Action, Cart, CartError, Catalog, Price, ProductId, Session};
use toko_integration_tests::fixture;

fn fixture_catalog() -> Catalog {
    load_catalog(&fixture("catalog.json")).expect("fixture catalog loads")
}

fn quantities(cart: &Cart) -> Vec<(String, u32)> {
    cart.entries()
        .map(|e| (e.product_id.to_string(), e.quantity.get()))
        .collect()
}

#[test]
fn test_add_a_b_a() {
    let catalog = fixture_catalog();
    let mut cart = Cart::new();
    cart.add(&catalog, "A").expect("A exists");
    cart.add(&catalog, "B").expect("B exists");
    cart.add(&catalog, "A").expect("A exists");

    assert_eq!(
        quantities(&cart),
        vec![("A".to_string(), 2), ("B".to_string(), 1)]
    );
    let detail = cart.detail(&catalog).expect("all entries in catalog");
    assert_eq!(detail.subtotal(), Price::new(400));
    assert_eq!(cart.total_item_count(), 3);
}

#[test]
fn test_decrement_on_single_unit_is_clamped() {
    let catalog = fixture_catalog();
    let mut cart = Cart::new();
    cart.add(&catalog, "A").expect("A exists");
    cart.decrement("A");
    assert_eq!(quantities(&cart), vec![("A".to_string(), 1)]);
}

#[test]
fn test_add_nonexistent_id() {
    let catalog = fixture_catalog();
    let mut cart = Cart::new();
    cart.add(&catalog, "B").expect("B exists");
    let before = quantities(&cart);

    let err = cart.add(&catalog, "nonexistent-id").expect_err("unknown id");
    assert_eq!(
        err,
        CartError::InvalidProductReference(ProductId::new("nonexistent-id"))
    );
    assert_eq!(quantities(&cart), before);
}

#[test]
fn test_subtotal_is_sum_of_line_totals() {
    let catalog = fixture_catalog();
    let mut cart = Cart::new();
    for _ in 0..3 {
        cart.add(&catalog, "B").expect("B exists");
    }
    cart.add(&catalog, "A").expect("A exists");
    cart.increment("A");

    let detail = cart.detail(&catalog).expect("all entries in catalog");
    let expected: u64 = detail
        .lines()
        .iter()
        .map(|l| l.product.price.amount() * u64::from(l.quantity.get()))
        .sum();
    assert_eq!(detail.subtotal().amount(), expected);
    assert_eq!(expected, 800);
    assert_eq!(cart.total_item_count(), 5);
    assert_eq!(cart.len(), 2);
}

#[test]
fn test_clear_after_any_history() {
    let catalog = fixture_catalog();
    let mut session = Session::new(&catalog);
    let actions = [
        Action::AddToCart {
            product_id: "A".into(),
        },
        Action::Increment {
            product_id: "A".into(),
        },
        Action::AddToCart {
            product_id: "B".into(),
        },
        Action::Remove {
            product_id: "A".into(),
        },
        Action::ClearCart,
    ];
    for action in actions {
        session.apply(action).expect("valid action");
    }

    let view = session.view().expect("view renders");
    assert!(view.cart.is_empty());
    assert_eq!(view.subtotal, Price::ZERO);
    assert_eq!(view.item_count, 0);
    assert_eq!(view.products.len(), 2);
}

#[test]
fn test_actions_from_json_lines() {
    let catalog = fixture_catalog();
    let mut session = Session::new(&catalog);
    let lines = [
        r#"{"action": "add_to_cart", "product_id": "B"}"#,
        r#"{"action": "increment", "product_id": "B"}"#,
        r#"{"action": "set_sort", "sort": "harga-asc"}"#,
        r#"{"action": "checkout"}"#,
    ];
    for line in lines {
        let action: Action = serde_json::from_str(line).expect("valid action json");
        session.apply(action).expect("valid action");
    }

    let view = session.view().expect("view renders");
    assert_eq!(view.subtotal, Price::new(400));
    assert_eq!(
        view.products.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
        vec!["A", "B"]
    );
}
