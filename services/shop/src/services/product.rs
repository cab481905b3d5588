//! Product catalogue

use common::pagination::{Page, PageRequest, paginate};
use std::sync::Arc;
use tracing::debug;

use crate::{
    dto::{ProductDetails, ProductDto},
    error::{ShopError, ShopResult},
    repositories::{ImageRepository, ProductRepository},
};

#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    images: Arc<dyn ImageRepository>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>, images: Arc<dyn ImageRepository>) -> Self {
        Self { products, images }
    }

    pub async fn find_all(&self) -> ShopResult<Vec<ProductDto>> {
        let products = self.products.find_all().await?;
        Ok(products.into_iter().map(ProductDto::from).collect())
    }

    pub async fn find_paginated(&self, request: PageRequest) -> ShopResult<Page<ProductDto>> {
        let products = self.products.find_all().await?;
        Ok(paginate(products, request).map(ProductDto::from))
    }

    /// A product together with its image
    pub async fn find_by_id(&self, id: i32) -> ShopResult<ProductDetails> {
        let product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| ShopError::NotFound(format!("Product {}", id)))?;
        let image = self.images.find_by_product_id(id).await?;

        Ok(ProductDetails::new(product, image))
    }

    /// Case-insensitive substring search over names and descriptions.
    /// A blank key matches nothing.
    pub async fn search(&self, key: &str) -> ShopResult<Vec<ProductDto>> {
        let key = key.trim();
        if key.is_empty() {
            return Ok(Vec::new());
        }

        let products = self.products.search(key).await?;
        debug!("Search for {:?} matched {} products", key, products.len());
        Ok(products.into_iter().map(ProductDto::from).collect())
    }
}
