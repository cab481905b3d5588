//! Session-scoped shopping cart
//!
//! A cart is never stored on its own. It lives in the session and is turned
//! into an [`Order`](super::Order) at checkout.

use serde::{Deserialize, Serialize};

use crate::dto::ProductDto;

/// Shopping cart. Every add appends a separate line, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub products: Vec<ProductDto>,
    pub total_price: f64,
    pub quantity: usize,
}

impl Cart {
    /// Build a cart whose totals are derived from `products`
    pub fn from_products(products: Vec<ProductDto>) -> Self {
        Self {
            total_price: calculate_total_price(&products),
            quantity: products.len(),
            products,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Sum of the unit prices of `products`, 0.0 for an empty slice
pub fn calculate_total_price(products: &[ProductDto]) -> f64 {
    products.iter().map(|product| product.price).sum()
}
