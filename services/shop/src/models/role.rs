//! Role model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role given to every self-registered account
pub const USER_ROLE: &str = "USER";

/// Role required for the administration pages
pub const ADMIN_ROLE: &str = "ADMIN";

/// Role entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Role {
    pub id: i32,
    pub name: String,
}
