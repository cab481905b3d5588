//! Checkout and order history

use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::{ShopError, ShopResult},
    models::{Cart, NewOrder, Order},
    repositories::OrderRepository,
};

#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    /// Persist the cart as an order priced at the cart total
    pub async fn save(&self, cart: &Cart, user_id: i32) -> ShopResult<Order> {
        if cart.is_empty() {
            warn!("User {} is checking out an empty cart", user_id);
        }

        let order = self
            .orders
            .create(&NewOrder::from_cart(cart, user_id))
            .await?;

        info!(
            "Placed order {} for user {} ({} lines, total {})",
            order.id,
            user_id,
            order.products.len(),
            order.price
        );
        Ok(order)
    }

    /// Orders of a user, newest first
    pub async fn read_orders(&self, user_id: i32) -> ShopResult<Vec<Order>> {
        Ok(self.orders.find_all_by_user_id(user_id).await?)
    }

    pub async fn read(&self, order_id: i32) -> ShopResult<Order> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| ShopError::NotFound(format!("Order {}", order_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{services::CartService, testing::InMemoryStore};

    #[tokio::test]
    async fn saved_order_mirrors_the_cart() {
        let store = InMemoryStore::seeded().await;
        let carts = CartService::new(store.clone());
        let orders = OrderService::new(store.clone());
        let user = store.user_id("alice").await;

        let pen = store.product_id("Pen").await;
        let mut cart = Cart::default();
        for id in [pen, store.product_id("Book").await, pen] {
            cart = carts.add(id, cart).await.unwrap();
        }

        let order = orders.save(&cart, user).await.unwrap();
        assert_eq!(order.price, 25.5);
        assert_eq!(order.user_id, user);
        let ids: Vec<_> = order.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![pen, store.product_id("Book").await, pen]);

        assert_eq!(orders.read(order.id).await.unwrap(), order);
    }

    #[tokio::test]
    async fn history_is_newest_first() {
        let store = InMemoryStore::seeded().await;
        let orders = OrderService::new(store.clone());
        let user = store.user_id("alice").await;

        let first = orders.save(&Cart::default(), user).await.unwrap();
        let second = orders.save(&Cart::default(), user).await.unwrap();

        let history = orders.read_orders(user).await.unwrap();
        let ids: Vec<_> = history.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert!(orders.read_orders(user + 100).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn order_for_unknown_user_is_not_found() {
        let store = InMemoryStore::seeded().await;
        let carts = CartService::new(store.clone());
        let orders = OrderService::new(store.clone());
        let cart = carts
            .add(store.product_id("Pen").await, Cart::default())
            .await
            .unwrap();

        assert!(matches!(
            orders.save(&cart, 9999).await,
            Err(ShopError::NotFound(_))
        ));
        assert_eq!(store.order_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let store = InMemoryStore::seeded().await;
        let orders = OrderService::new(store);

        assert!(matches!(orders.read(9999).await, Err(ShopError::NotFound(_))));
    }
}
