use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod dto;
mod error;
mod models;
mod repositories;
mod routes;
mod security;
mod services;
mod session;
mod state;
mod validation;
mod views;

#[cfg(test)]
mod testing;

use common::{
    cache::{RedisConfig, RedisPool},
    database::{self, DatabaseConfig, init_pool},
    error::DatabaseError,
};
use tokio::net::TcpListener;

use crate::{
    config::ServerConfig,
    repositories::{
        PgCategoryRepository, PgImageRepository, PgOrderRepository, PgProductRepository,
        PgRoleRepository, PgUserRepository,
    },
    security::{PasswordEncoder, RememberMeConfig, RememberMeService},
    services::{CartService, CategoryService, OrderService, ProductService, UserService},
    session::RedisSessionStore,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shop=info,tower_http=info")),
        )
        .init();

    info!("Starting shop service");

    let server_config = ServerConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;
    info!("Database migrations applied");

    // Initialize Redis connection pool
    let redis_config = RedisConfig::from_env()?;
    let redis_pool = RedisPool::new(&redis_config).await?;
    if !redis_pool.health_check().await? {
        anyhow::bail!("Failed to connect to Redis");
    }

    let remember_me = RememberMeService::new(RememberMeConfig::from_env()?)?;

    // Initialize repositories
    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let roles = Arc::new(PgRoleRepository::new(pool.clone()));
    let categories = Arc::new(PgCategoryRepository::new(pool.clone()));
    let products = Arc::new(PgProductRepository::new(pool.clone()));
    let images = Arc::new(PgImageRepository::new(pool.clone()));
    let orders = Arc::new(PgOrderRepository::new(pool));

    let app_state = AppState {
        category_service: CategoryService::new(categories, products.clone()),
        product_service: ProductService::new(products.clone(), images),
        cart_service: CartService::new(products),
        order_service: OrderService::new(orders),
        user_service: UserService::new(users, roles, PasswordEncoder::default()),
        sessions: Arc::new(RedisSessionStore::new(
            redis_pool,
            server_config.session_ttl_seconds,
        )),
        remember_me,
        config: Arc::new(server_config),
    };

    info!("Shop service initialized successfully");

    // Start the web server
    let address = app_state.config.bind_address();
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&address).await?;
    info!("Shop service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
