//! Persisted records and the session-scoped cart

pub mod cart;
pub mod category;
pub mod order;
pub mod product;
pub mod role;
pub mod user;

// Re-export for convenience
pub use cart::Cart;
pub use category::Category;
pub use order::{NewOrder, Order};
pub use product::{Image, Product};
pub use role::{ADMIN_ROLE, Role, USER_ROLE};
pub use user::{AuthUser, NewUser, User};
