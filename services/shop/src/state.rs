//! Application state shared across handlers

use std::sync::Arc;

use crate::{
    config::ServerConfig,
    security::RememberMeService,
    services::{CartService, CategoryService, OrderService, ProductService, UserService},
    session::SessionStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub category_service: CategoryService,
    pub product_service: ProductService,
    pub cart_service: CartService,
    pub order_service: OrderService,
    pub user_service: UserService,
    pub sessions: Arc<dyn SessionStore>,
    pub remember_me: RememberMeService,
}
