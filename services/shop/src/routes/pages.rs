//! Plain pages: home, login, registration, profile and administration

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use serde_json::json;

use super::require_user;
use crate::{
    error::ShopResult,
    session::CurrentSession,
    state::AppState,
    views::{View, ViewName},
};

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "shop"
    }))
}

pub async fn root() -> Redirect {
    Redirect::to("/home")
}

/// Categories to browse, plus whoever is signed in
pub async fn home(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
) -> ShopResult<View> {
    let categories = state.category_service.find_all().await?;
    Ok(View::new(
        ViewName::Home,
        json!({
            "categories": categories,
            "user": session.user(),
            "cart": session.context.cart,
        }),
    ))
}

/// `?error` after a failed sign-in, `?logout` after signing out
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    error: Option<String>,
    logout: Option<String>,
}

pub async fn login_page(Query(query): Query<LoginQuery>) -> View {
    View::new(
        ViewName::Login,
        json!({
            "error": query.error.is_some(),
            "logout": query.logout.is_some(),
        }),
    )
}

pub async fn registration_page() -> View {
    View::page(ViewName::Registration)
}

/// The signed-in user as currently stored
pub async fn profile(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
) -> ShopResult<View> {
    let user = require_user(&session)?;
    let user = state.user_service.load_by_username(&user.name).await?;
    Ok(View::new(ViewName::Profile, json!({ "user": user })))
}

/// Every registered user and the whole catalogue. Reaching this page takes
/// the ADMIN role.
pub async fn admin(State(state): State<AppState>) -> ShopResult<View> {
    let users = state.user_service.find_all().await?;
    let products = state.product_service.find_all().await?;
    Ok(View::new(
        ViewName::Admin,
        json!({
            "users": users,
            "products": products,
        }),
    ))
}
