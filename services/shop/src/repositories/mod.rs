//! Repositories for database operations
//!
//! Each entity gets a trait describing the lookups the services need and a
//! PostgreSQL implementation built on `sqlx`.

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Category, Image, NewOrder, NewUser, Order, Product, Role, User};

pub mod category;
pub mod order;
pub mod product;
pub mod role;
pub mod user;

pub use category::PgCategoryRepository;
pub use order::PgOrderRepository;
pub use product::{PgImageRepository, PgProductRepository};
pub use role::PgRoleRepository;
pub use user::PgUserRepository;

/// A write rejected by a table constraint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// A unique column already holds the value
    #[error("{0} already exists")]
    Unique(String),

    /// A referenced row does not exist
    #[error("{0} does not exist")]
    ForeignKey(String),
}

/// Turn constraint failures reported by PostgreSQL into a
/// [`ConstraintViolation`]; any other error passes through.
pub(crate) fn constraint_error(err: sqlx::Error) -> anyhow::Error {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or("record").to_string();
        if db_err.is_unique_violation() {
            return ConstraintViolation::Unique(constraint).into();
        }
        if db_err.is_foreign_key_violation() {
            return ConstraintViolation::ForeignKey(constraint).into();
        }
    }

    err.into()
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<User>>;
    async fn exists_by_email(&self, email: &str) -> Result<bool>;
    async fn create(&self, new_user: &NewUser) -> Result<User>;
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Category>>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Product>>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>>;
    async fn find_by_category_id(&self, category_id: i32) -> Result<Vec<Product>>;
    /// Products whose name or description contains `key`, ignoring case
    async fn search(&self, key: &str) -> Result<Vec<Product>>;
}

#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn find_by_product_id(&self, product_id: i32) -> Result<Option<Image>>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, new_order: &NewOrder) -> Result<Order>;
    /// Orders of a user, newest first
    async fn find_all_by_user_id(&self, user_id: i32) -> Result<Vec<Order>>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Order>>;
}
