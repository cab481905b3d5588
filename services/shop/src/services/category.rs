//! Category browsing

use common::pagination::{Page, PageRequest, paginate};
use std::sync::Arc;

use crate::{
    dto::ProductDto,
    error::ShopResult,
    models::Category,
    repositories::{CategoryRepository, ProductRepository},
};

#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CategoryService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            categories,
            products,
        }
    }

    pub async fn find_all(&self) -> ShopResult<Vec<Category>> {
        Ok(self.categories.find_all().await?)
    }

    /// One page of the products in a category. Unknown categories give an empty page.
    pub async fn find_products_by_category_id(
        &self,
        category_id: i32,
        request: PageRequest,
    ) -> ShopResult<Page<ProductDto>> {
        let products = self.products.find_by_category_id(category_id).await?;
        Ok(paginate(products, request).map(ProductDto::from))
    }
}
