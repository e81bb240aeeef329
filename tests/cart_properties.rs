//! Property tests for the persisted cart.
//!
//! Each case drives a `CartStore` over an in-memory slot, so hydration and
//! write-back are exercised together with the cart rules.

use std::sync::Arc;

use proptest::prelude::*;

use marketplace_client::adapters::InMemoryKeyValueStore;
use marketplace_client::application::{CartStore, DEFAULT_CART_KEY};
use marketplace_client::domain::cart::NewLineItem;
use marketplace_client::domain::foundation::{ProductId, SellerId};

// =============================================================================
// Test Infrastructure
// =============================================================================

const SELLERS: [&str; 3] = ["farm-a", "farm-b", "bakery"];

fn new_line(product: usize, seller: usize, price_cents: u32, quantity: u32, stock: u32) -> NewLineItem {
    NewLineItem {
        product_id: ProductId::new(format!("p{}", product)).unwrap(),
        name: format!("Product {}", product),
        unit: "piece".to_string(),
        image_url: None,
        price: f64::from(price_cents) / 100.0,
        quantity,
        stock,
        seller_id: SellerId::new(SELLERS[seller]).unwrap(),
        seller_name: SELLERS[seller].to_uppercase(),
    }
}

/// Products have a fixed seller, price and stock so repeated adds agree.
fn catalog_line(product: usize, quantity: u32) -> NewLineItem {
    let seller = product % SELLERS.len();
    let price_cents = 150 + 25 * product as u32;
    let stock = 1 + (product as u32 * 3) % 9;
    new_line(product, seller, price_cents, quantity, stock)
}

fn fresh_store() -> (InMemoryKeyValueStore, CartStore) {
    let slot = InMemoryKeyValueStore::new();
    let store = CartStore::hydrate(Arc::new(slot.clone()), DEFAULT_CART_KEY);
    (slot, store)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn assert_totals_consistent(store: &CartStore) {
    let items = store.items();
    let count: u64 = items.iter().map(|l| u64::from(l.quantity)).sum();
    let subtotal: f64 = items.iter().map(|l| l.price * f64::from(l.quantity)).sum();
    assert_eq!(store.item_count(), count);
    assert!(close(store.subtotal(), subtotal));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn repeated_adds_merge_into_one_clamped_line(
        quantities in prop::collection::vec(1u32..20, 1..8),
        stock in 1u32..30,
    ) {
        let (_, store) = fresh_store();
        for &quantity in &quantities {
            store.add_item(new_line(1, 0, 500, quantity, stock)).unwrap();
        }

        let items = store.items();
        prop_assert_eq!(items.len(), 1);
        let sum: u32 = quantities.iter().sum();
        prop_assert_eq!(items[0].quantity, sum.min(stock));
    }

    #[test]
    fn non_positive_update_removes_line(quantity in -50i64..=0) {
        let (_, store) = fresh_store();
        let id = store.add_item(catalog_line(2, 1)).unwrap();
        store.add_item(catalog_line(3, 1)).unwrap();

        store.update_quantity(&id, quantity);

        prop_assert!(store.items().iter().all(|l| l.id != id));
        prop_assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn positive_update_clamps_to_stock(quantity in 1i64..1_000, stock in 1u32..50) {
        let (_, store) = fresh_store();
        let id = store.add_item(new_line(4, 1, 250, 1, stock)).unwrap();

        store.update_quantity(&id, quantity);

        let line = store.items().into_iter().find(|l| l.id == id).unwrap();
        prop_assert_eq!(i64::from(line.quantity), quantity.min(i64::from(stock)));
    }

    #[test]
    fn totals_track_lines_through_any_edit_sequence(
        ops in prop::collection::vec((0usize..6, 0u8..3, -3i64..12), 0..30),
    ) {
        let (_, store) = fresh_store();
        for (product, op, amount) in ops {
            match op {
                0 => {
                    let quantity = u32::try_from(amount.max(1)).unwrap();
                    store.add_item(catalog_line(product, quantity)).unwrap();
                }
                1 => {
                    let target = store
                        .items()
                        .into_iter()
                        .find(|l| l.product_id.as_str() == format!("p{}", product));
                    if let Some(line) = target {
                        store.update_quantity(&line.id, amount);
                    }
                }
                _ => {
                    let target = store.items().into_iter().nth(product);
                    if let Some(line) = target {
                        store.remove_item(&line.id);
                    }
                }
            }
            assert_totals_consistent(&store);
        }

        for line in store.items() {
            prop_assert!(line.quantity >= 1 && line.quantity <= line.stock);
        }
    }

    #[test]
    fn clear_seller_items_removes_exactly_that_seller(
        products in prop::collection::vec(0usize..9, 0..12),
        seller in 0usize..3,
    ) {
        let (_, store) = fresh_store();
        for product in products {
            store.add_item(catalog_line(product, 1)).unwrap();
        }
        let target = SellerId::new(SELLERS[seller]).unwrap();
        let expected: Vec<_> = store
            .items()
            .into_iter()
            .filter(|l| l.seller_id != target)
            .collect();

        store.clear_seller_items(&target);

        prop_assert_eq!(store.items(), expected);
        prop_assert!(store.seller_items(&target).is_empty());
    }

    #[test]
    fn restart_restores_identical_item_list(
        adds in prop::collection::vec((0usize..6, 1u32..6), 0..10),
    ) {
        let (slot, store) = fresh_store();
        for (product, quantity) in adds {
            store.add_item(catalog_line(product, quantity)).unwrap();
        }

        let restarted = CartStore::hydrate(Arc::new(slot), DEFAULT_CART_KEY);

        prop_assert_eq!(restarted.items(), store.items());
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn repeated_add_accumulates_then_clamps_at_stock() {
    let (_, store) = fresh_store();
    let p1 = || new_line(1, 0, 1000, 2, 5);

    store.add_item(p1()).unwrap();
    store.add_item(p1()).unwrap();
    assert_eq!(store.item_count(), 4);
    assert!(close(store.subtotal(), 40.0));

    store
        .add_item(NewLineItem {
            quantity: 5,
            ..p1()
        })
        .unwrap();
    assert_eq!(store.items()[0].quantity, 5);
    assert_eq!(store.item_count(), 5);
    assert!(close(store.subtotal(), 50.0));
}
