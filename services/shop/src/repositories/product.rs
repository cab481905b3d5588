//! Product and product image repositories

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use super::{ImageRepository, ProductRepository};
use crate::models::{Image, Product};

const SELECT_PRODUCT: &str =
    "SELECT product_id AS id, name, description, price, category_id FROM products";

/// Build an ILIKE pattern matching `key` anywhere, with `%`, `_` and `\` taken literally
pub fn contains_pattern(key: &str) -> String {
    let mut pattern = String::with_capacity(key.len() + 2);
    pattern.push('%');
    for c in key.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!("{} ORDER BY product_id", SELECT_PRODUCT))
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        info!("Finding product by ID: {}", id);

        let product = sqlx::query_as::<_, Product>(&format!("{} WHERE product_id = $1", SELECT_PRODUCT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    async fn find_by_category_id(&self, category_id: i32) -> Result<Vec<Product>> {
        info!("Finding products of category: {}", category_id);

        let products = sqlx::query_as::<_, Product>(&format!(
            "{} WHERE category_id = $1 ORDER BY product_id",
            SELECT_PRODUCT
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn search(&self, key: &str) -> Result<Vec<Product>> {
        info!("Searching products for: {}", key);

        let products = sqlx::query_as::<_, Product>(&format!(
            r#"{} WHERE name ILIKE $1 ESCAPE '\' OR description ILIKE $1 ESCAPE '\'
               ORDER BY product_id"#,
            SELECT_PRODUCT
        ))
        .bind(contains_pattern(key))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }
}

#[derive(Clone)]
pub struct PgImageRepository {
    pool: PgPool,
}

impl PgImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for PgImageRepository {
    async fn find_by_product_id(&self, product_id: i32) -> Result<Option<Image>> {
        let image = sqlx::query_as::<_, Image>(
            "SELECT image_id AS product_id, link FROM images WHERE image_id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_wraps_the_key() {
        assert_eq!(contains_pattern("tea"), "%tea%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("100%"), r"%100\%%");
        assert_eq!(contains_pattern("a_b"), r"%a\_b%");
        assert_eq!(contains_pattern(r"c:\"), r"%c:\\%");
    }
}
