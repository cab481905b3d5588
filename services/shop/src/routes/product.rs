//! Product pages: details, search and the paginated listing

use axum::extract::{Path, Query, State};
use common::pagination::PageRequest;
use serde::Deserialize;
use serde_json::json;

use super::{PaginationQuery, page_model};
use crate::{
    error::{ShopError, ShopResult},
    state::AppState,
    views::{View, ViewName},
};

pub async fn show_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> ShopResult<View> {
    let product = state.product_service.find_by_id(product_id).await?;
    Ok(View::new(ViewName::Product, json!({ "product": product })))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "searchKey")]
    pub search_key: Option<String>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ShopResult<View> {
    let key = query
        .search_key
        .ok_or_else(|| ShopError::BadRequest("searchKey is required".to_string()))?;

    let products = state.product_service.search(&key).await?;
    Ok(View::new(
        ViewName::Product,
        json!({
            "searchKey": key,
            "products": products,
        }),
    ))
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> ShopResult<View> {
    let page = state
        .product_service
        .find_paginated(PageRequest::from_query(query.page, query.size))
        .await?;

    Ok(View::new(
        ViewName::Product,
        json!({ "productPage": page_model(&page) }),
    ))
}
