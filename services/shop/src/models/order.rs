//! Order model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Cart, Product};

/// Order entity with its lines in checkout order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub user_id: i32,
    pub products: Vec<Product>,
}

/// New order creation payload
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: i32,
    pub price: f64,
    /// One entry per cart line, duplicates kept
    pub product_ids: Vec<i32>,
}

impl NewOrder {
    /// Price the order at the cart total, one line per cart entry
    pub fn from_cart(cart: &Cart, user_id: i32) -> Self {
        Self {
            user_id,
            price: cart.total_price,
            product_ids: cart.products.iter().map(|p| p.product_id).collect(),
        }
    }
}
