//! Derived cart view for consumers (cart button, checkout per seller).

use crate::domain::cart::{Cart, CartLineItem};
use crate::domain::foundation::SellerId;

/// Lines of one seller with their totals.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerGroup {
    pub seller_id: SellerId,
    pub seller_name: String,
    pub items: Vec<CartLineItem>,
    pub item_count: u64,
    pub subtotal: f64,
}

/// Snapshot of everything a consumer renders from the cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSummary {
    pub item_count: u64,
    pub subtotal: f64,
    /// One group per seller, in the order sellers first appear in the cart.
    pub sellers: Vec<SellerGroup>,
}

impl CartSummary {
    pub fn from_cart(cart: &Cart) -> Self {
        let mut sellers: Vec<SellerGroup> = Vec::new();
        for line in cart.items() {
            let group = match sellers.iter_mut().position(|g| g.seller_id == line.seller_id) {
                Some(index) => &mut sellers[index],
                None => {
                    sellers.push(SellerGroup {
                        seller_id: line.seller_id.clone(),
                        seller_name: line.seller_name.clone(),
                        items: Vec::new(),
                        item_count: 0,
                        subtotal: 0.0,
                    });
                    let last = sellers.len() - 1;
                    &mut sellers[last]
                }
            };
            group.item_count += u64::from(line.quantity);
            group.subtotal += line.line_total();
            group.items.push(line.clone());
        }

        Self {
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
            sellers,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}
