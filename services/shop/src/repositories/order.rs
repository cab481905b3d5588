//! Order repository
//!
//! Order lines live in `orders_products`, one row per cart entry, ordered by
//! `position`.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Row, postgres::PgRow};
use std::collections::HashMap;
use tracing::info;

use super::{OrderRepository, constraint_error};
use crate::models::{NewOrder, Order, Product};

#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the lines of every order in `order_ids`, keyed by order ID
    async fn load_lines(&self, order_ids: &[i32]) -> Result<HashMap<i32, Vec<Product>>> {
        let rows = sqlx::query(
            r#"
            SELECT op.order_id, p.product_id AS id, p.name, p.description, p.price, p.category_id
            FROM orders_products op
            JOIN products p ON p.product_id = op.product_id
            WHERE op.order_id = ANY($1)
            ORDER BY op.order_id, op.position
            "#,
        )
        .bind(order_ids.to_vec())
        .fetch_all(&self.pool)
        .await?;

        let mut lines: HashMap<i32, Vec<Product>> = HashMap::new();
        for row in rows {
            let order_id: i32 = row.get("order_id");
            lines
                .entry(order_id)
                .or_default()
                .push(Product::from_row(&row)?);
        }

        Ok(lines)
    }

    async fn with_lines(&self, rows: Vec<PgRow>) -> Result<Vec<Order>> {
        let ids: Vec<i32> = rows.iter().map(|row| row.get("order_id")).collect();
        let mut lines = self.load_lines(&ids).await?;

        let orders = rows
            .into_iter()
            .map(|row| {
                let id: i32 = row.get("order_id");
                Order {
                    id,
                    price: row.get("price"),
                    created_at: row.get("created_at"),
                    user_id: row.get("user_id"),
                    products: lines.remove(&id).unwrap_or_default(),
                }
            })
            .collect();

        Ok(orders)
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, new_order: &NewOrder) -> Result<Order> {
        info!(
            "Creating order for user {} with {} line(s)",
            new_order.user_id,
            new_order.product_ids.len()
        );

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO orders (price, user_id)
            VALUES ($1, $2)
            RETURNING order_id, price, created_at, user_id
            "#,
        )
        .bind(new_order.price)
        .bind(new_order.user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(constraint_error)?;
        let order_id: i32 = row.get("order_id");

        for (position, product_id) in new_order.product_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO orders_products (order_id, position, product_id) VALUES ($1, $2, $3)",
            )
            .bind(order_id)
            .bind(position as i32)
            .bind(product_id)
            .execute(&mut *tx)
            .await
            .map_err(constraint_error)?;
        }

        tx.commit().await?;

        let mut orders = self.with_lines(vec![row]).await?;
        orders
            .pop()
            .ok_or_else(|| anyhow::anyhow!("Order {} vanished after insert", order_id))
    }

    async fn find_all_by_user_id(&self, user_id: i32) -> Result<Vec<Order>> {
        info!("Finding orders of user: {}", user_id);

        let rows = sqlx::query(
            r#"
            SELECT order_id, price, created_at, user_id
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC, order_id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        self.with_lines(rows).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>> {
        info!("Finding order by ID: {}", id);

        let row = sqlx::query(
            "SELECT order_id, price, created_at, user_id FROM orders WHERE order_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.with_lines(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}
