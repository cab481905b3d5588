//! Shop routes

use axum::{
    Router, middleware,
    routing::{get, post},
};
use common::pagination::Page;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::PathBuf;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    error::{ShopError, ShopResult},
    models::AuthUser,
    security::session_middleware,
    session::CurrentSession,
    state::AppState,
};

pub mod auth;
pub mod cart;
pub mod category;
pub mod order;
pub mod pages;
pub mod product;
pub mod user;

/// Create the router for the shop
pub fn create_router(state: AppState) -> Router {
    let static_dir = PathBuf::from(&state.config.static_dir);

    Router::new()
        .route("/", get(pages::root))
        .route("/health", get(pages::health_check))
        .route("/home", get(pages::home))
        .route("/login", get(pages::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/registration", get(pages::registration_page))
        .route("/users/registrate", post(user::registrate))
        .route("/profile", get(pages::profile))
        .route("/admin", get(pages::admin))
        .route("/category", get(category::show_category))
        .route("/product/search", get(product::search))
        .route("/product/listProducts", get(product::list_products))
        .route("/product/:product_id", get(product::show_product))
        .route("/cart", get(cart::show_cart))
        .route("/cart/add/:product_id", post(cart::add_product))
        .route("/cart/remove/:product_id", post(cart::remove_product))
        .route("/cart/clear", post(cart::clear_cart))
        .route("/cart/order/:user_id", post(cart::place_order))
        .route("/order/read-history/:user_id", get(order::read_history))
        .route("/order/read/:order_id", get(order::read_order))
        .nest_service("/javaScript", ServeDir::new(static_dir.join("javaScript")))
        .nest_service("/img", ServeDir::new(static_dir.join("img")))
        .nest_service("/CSS", ServeDir::new(static_dir.join("CSS")))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// One-based `page` and `size` query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// A page plus what a pager needs to draw itself
fn page_model<T: Serialize>(page: &Page<T>) -> Value {
    json!({
        "items": page.items,
        "currentPage": page.current_page(),
        "size": page.size,
        "total": page.total,
        "totalPages": page.total_pages(),
        "pageNumbers": page.page_numbers(),
    })
}

fn require_user(session: &CurrentSession) -> ShopResult<&AuthUser> {
    session.user().ok_or(ShopError::Unauthorized)
}

/// The signed-in user, if they are `user_id` or an administrator
fn require_owner(session: &CurrentSession, user_id: i32) -> ShopResult<&AuthUser> {
    let user = require_user(session)?;
    if user.id == user_id || user.is_admin() {
        Ok(user)
    } else {
        Err(ShopError::Forbidden)
    }
}
