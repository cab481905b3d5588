//! Category model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Category entity. `rating` is constrained to 1..=5 by the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub rating: Option<i32>,
}
