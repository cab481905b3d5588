//! Session cart and checkout
//!
//! Every handler here changes the session, so each one saves it before
//! answering.

use axum::{
    Extension,
    extract::{Path, State},
};
use serde_json::json;
use std::mem;

use super::require_owner;
use crate::{
    error::ShopResult,
    models::Cart,
    session::CurrentSession,
    state::AppState,
    views::{View, ViewName},
};

fn cart_view(cart: &Cart) -> View {
    View::new(ViewName::Cart, json!({ "cart": cart }))
}

pub async fn show_cart(Extension(session): Extension<CurrentSession>) -> View {
    cart_view(&session.context.cart)
}

pub async fn add_product(
    State(state): State<AppState>,
    Extension(mut session): Extension<CurrentSession>,
    Path(product_id): Path<i32>,
) -> ShopResult<View> {
    let cart = mem::take(&mut session.context.cart);
    session.context.cart = state.cart_service.add(product_id, cart).await?;
    state.sessions.save(&session).await?;

    Ok(cart_view(&session.context.cart))
}

pub async fn remove_product(
    State(state): State<AppState>,
    Extension(mut session): Extension<CurrentSession>,
    Path(product_id): Path<i32>,
) -> ShopResult<View> {
    let cart = mem::take(&mut session.context.cart);
    session.context.cart = state.cart_service.remove(product_id, cart);
    state.sessions.save(&session).await?;

    Ok(cart_view(&session.context.cart))
}

pub async fn clear_cart(
    State(state): State<AppState>,
    Extension(mut session): Extension<CurrentSession>,
) -> ShopResult<View> {
    let cart = mem::take(&mut session.context.cart);
    session.context.cart = state.cart_service.clear(cart);
    state.sessions.save(&session).await?;

    Ok(cart_view(&session.context.cart))
}

/// Turn the cart into an order for `user_id`, then empty it
pub async fn place_order(
    State(state): State<AppState>,
    Extension(mut session): Extension<CurrentSession>,
    Path(user_id): Path<i32>,
) -> ShopResult<View> {
    require_owner(&session, user_id)?;

    let order = state
        .order_service
        .save(&session.context.cart, user_id)
        .await?;

    let cart = mem::take(&mut session.context.cart);
    session.context.cart = state.cart_service.clear(cart);
    state.sessions.save(&session).await?;

    Ok(View::new(
        ViewName::Cart,
        json!({
            "cart": session.context.cart,
            "order": order,
        }),
    ))
}
