//! Product and product image models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: i32,
}

/// Product image, keyed by the product it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Image {
    pub product_id: i32,
    pub link: String,
}
