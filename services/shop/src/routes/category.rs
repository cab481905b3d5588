//! Category page

use axum::extract::{Query, State};
use common::pagination::PageRequest;
use serde::Deserialize;
use serde_json::json;

use super::page_model;
use crate::{
    error::{ShopError, ShopResult},
    state::AppState,
    views::{View, ViewName},
};

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    #[serde(rename = "categoryId")]
    pub category_id: Option<i32>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// One page of a category's products
pub async fn show_category(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> ShopResult<View> {
    let category_id = query
        .category_id
        .ok_or_else(|| ShopError::BadRequest("categoryId is required".to_string()))?;

    let page = state
        .category_service
        .find_products_by_category_id(category_id, PageRequest::from_query(query.page, query.size))
        .await?;

    Ok(View::new(
        ViewName::Category,
        json!({
            "categoryId": category_id,
            "products": page_model(&page),
        }),
    ))
}
