//! Cart operations
//!
//! Carts are values: every operation takes the current cart and returns the
//! new one with its totals recomputed.

use std::sync::Arc;
use tracing::info;

use crate::{
    dto::ProductDto,
    error::{ShopError, ShopResult},
    models::Cart,
    repositories::ProductRepository,
};

#[derive(Clone)]
pub struct CartService {
    products: Arc<dyn ProductRepository>,
}

impl CartService {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    /// Append a product to the cart. Unknown products are rejected.
    pub async fn add(&self, product_id: i32, cart: Cart) -> ShopResult<Cart> {
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| ShopError::NotFound(format!("Product {}", product_id)))?;

        info!("Adding product {} to cart", product_id);
        let mut products = cart.products;
        products.push(ProductDto::from(product));
        Ok(Cart::from_products(products))
    }

    /// Drop the most recently added line for `product_id`. Carts without
    /// that product come back unchanged.
    pub fn remove(&self, product_id: i32, cart: Cart) -> Cart {
        let mut products = cart.products;
        if let Some(index) = products.iter().rposition(|p| p.product_id == product_id) {
            products.remove(index);
        }
        Cart::from_products(products)
    }

    pub fn clear(&self, _cart: Cart) -> Cart {
        Cart::default()
    }
}
