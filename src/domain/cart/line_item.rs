//! Cart line items.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{LineItemId, ProductId, SellerId, ValidationError};

/// One entry in the cart: a product, its quantity and seller attribution.
///
/// Field names serialize in camelCase so the persisted blob stays readable
/// by other clients of the same storage slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: LineItemId,
    pub product_id: ProductId,
    pub name: String,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub price: f64,
    pub quantity: u32,
    pub stock: u32,
    pub seller_id: SellerId,
    pub seller_name: String,
}

impl CartLineItem {
    /// Unit price times quantity.
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A product about to be added to the cart. The line id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub price: f64,
    pub quantity: u32,
    pub stock: u32,
    pub seller_id: SellerId,
    pub seller_name: String,
}

impl NewLineItem {
    /// Checks the constraints a line must satisfy before it enters the cart.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the price is negative or not finite
    /// - `OutOfRange` if the quantity is zero or the product has no stock
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.price.is_finite() {
            return Err(ValidationError::invalid_format("price", "must be a finite number"));
        }
        if self.price < 0.0 {
            return Err(ValidationError::invalid_format("price", "must not be negative"));
        }
        if self.stock == 0 {
            return Err(ValidationError::out_of_range("stock", 1, i64::from(u32::MAX), 0));
        }
        if self.quantity == 0 {
            return Err(ValidationError::out_of_range(
                "quantity",
                1,
                i64::from(self.stock),
                0,
            ));
        }
        Ok(())
    }

    /// Turns this into a stored line, clamping quantity to stock.
    pub(crate) fn into_line(self, id: LineItemId) -> CartLineItem {
        CartLineItem {
            id,
            product_id: self.product_id,
            name: self.name,
            unit: self.unit,
            image_url: self.image_url,
            price: self.price,
            quantity: self.quantity.min(self.stock),
            stock: self.stock,
            seller_id: self.seller_id,
            seller_name: self.seller_name,
        }
    }
}
