//! Order history and single orders

use axum::{
    Extension,
    extract::{Path, State},
};
use serde_json::json;

use super::require_owner;
use crate::{
    error::ShopResult,
    session::CurrentSession,
    state::AppState,
    views::{View, ViewName},
};

pub async fn read_history(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path(user_id): Path<i32>,
) -> ShopResult<View> {
    require_owner(&session, user_id)?;

    let orders = state.order_service.read_orders(user_id).await?;
    Ok(View::new(ViewName::OrderHistory, json!({ "orders": orders })))
}

pub async fn read_order(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path(order_id): Path<i32>,
) -> ShopResult<View> {
    let order = state.order_service.read(order_id).await?;
    require_owner(&session, order.user_id)?;

    Ok(View::new(ViewName::Order, json!({ "order": order })))
}
