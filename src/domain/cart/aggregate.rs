//! Cart aggregate.
//!
//! Pure, synchronous cart logic. Holds an ordered list of line items with at
//! most one line per product, and keeps every line within
//! `1 <= quantity <= stock`. Persistence lives in the application layer.

use crate::domain::foundation::{LineItemId, ProductId, SellerId, ValidationError};

use super::{CartLineItem, NewLineItem};

/// Ordered collection of cart lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from previously stored lines.
    ///
    /// Lines that cannot satisfy the line invariants (zero stock, zero
    /// quantity, or a negative or non-finite price) are dropped, quantities
    /// above stock are clamped, and repeated
    /// products are merged into their first occurrence. A list that already
    /// satisfies the invariants is kept as is.
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        let mut cart = Self::new();
        for mut line in items {
            let priced = line.price.is_finite() && line.price >= 0.0;
            if !priced || line.stock == 0 || line.quantity == 0 {
                continue;
            }
            match cart.position_of_product(&line.product_id) {
                Some(index) => {
                    let existing = &mut cart.items[index];
                    existing.quantity = existing
                        .quantity
                        .saturating_add(line.quantity)
                        .min(existing.stock);
                }
                None => {
                    line.quantity = line.quantity.min(line.stock);
                    cart.items.push(line);
                }
            }
        }
        cart
    }

    /// Current lines in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CartLineItem> {
        self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a line by its id.
    pub fn line(&self, id: &LineItemId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| &line.id == id)
    }

    /// Adds a product to the cart.
    ///
    /// If the product already has a line, its quantity grows by the added
    /// amount, capped at the stock recorded on that existing line. Otherwise
    /// a new line is appended with a fresh id.
    ///
    /// Returns the id of the line that now holds the product.
    ///
    /// # Errors
    ///
    /// Returns the validation failure of [`NewLineItem::validate`]; the cart is
    /// left unchanged.
    pub fn add_item(&mut self, item: NewLineItem) -> Result<LineItemId, ValidationError> {
        item.validate()?;

        if let Some(index) = self.position_of_product(&item.product_id) {
            let existing = &mut self.items[index];
            existing.quantity = existing
                .quantity
                .saturating_add(item.quantity)
                .min(existing.stock);
            return Ok(existing.id);
        }

        let id = LineItemId::new();
        self.items.push(item.into_line(id));
        Ok(id)
    }

    /// Removes the line with the given id. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: &LineItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|line| &line.id != id);
        self.items.len() != before
    }

    /// Sets a line's quantity.
    ///
    /// A quantity of zero or below removes the line; anything else is capped
    /// at the line's stock. Returns whether a line was found.
    pub fn update_quantity(&mut self, id: &LineItemId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        match self.items.iter_mut().find(|line| &line.id == id) {
            Some(line) => {
                let capped = quantity.min(i64::from(line.stock));
                line.quantity = u32::try_from(capped).unwrap_or(line.stock);
                true
            }
            None => false,
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Removes every line owned by the seller, keeping the order of the rest.
    ///
    /// Returns the number of removed lines.
    pub fn clear_seller_items(&mut self, seller_id: &SellerId) -> usize {
        let before = self.items.len();
        self.items.retain(|line| &line.seller_id != seller_id);
        before - self.items.len()
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `price * quantity` over all lines.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Lines owned by the seller, in cart order.
    pub fn seller_items(&self, seller_id: &SellerId) -> Vec<CartLineItem> {
        self.items
            .iter()
            .filter(|line| &line.seller_id == seller_id)
            .cloned()
            .collect()
    }

    fn position_of_product(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|line| &line.product_id == product_id)
    }
}
