//! Cart domain - line items and the cart aggregate.

mod aggregate;
mod line_item;

pub use aggregate::Cart;
pub use line_item::{CartLineItem, NewLineItem};
