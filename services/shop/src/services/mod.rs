//! Business logic, one service per domain area

pub mod cart;
pub mod category;
pub mod order;
pub mod product;
pub mod user;

pub use cart::CartService;
pub use category::CategoryService;
pub use order::OrderService;
pub use product::ProductService;
pub use user::UserService;
