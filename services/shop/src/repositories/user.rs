//! User repository for database operations

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use super::{UserRepository, constraint_error};
use crate::models::{NewUser, Role, User};

const SELECT_USER: &str = r#"
    SELECT u.user_id, u.name, u.password, u.email, u.birth_date, u.balance,
           r.role_id, r.name AS role_name
    FROM users u
    JOIN roles r ON r.role_id = u.role_id
"#;

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("user_id"),
        name: row.get("name"),
        password_hash: row.get("password"),
        email: row.get("email"),
        birth_date: row.get("birth_date"),
        balance: row.get("balance"),
        role: Role {
            id: row.get("role_id"),
            name: row.get("role_name"),
        },
    }
}

/// User repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(&format!("{} ORDER BY u.user_id", SELECT_USER))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        info!("Finding user by ID: {}", id);

        let row = sqlx::query(&format!("{} WHERE u.user_id = $1", SELECT_USER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>> {
        info!("Finding user by name: {}", name);

        let row = sqlx::query(&format!("{} WHERE u.name = $1", SELECT_USER))
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE lower(email) = lower($1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn create(&self, new_user: &NewUser) -> Result<User> {
        info!("Creating new user: {}", new_user.name);

        let row = sqlx::query(
            r#"
            WITH inserted AS (
                INSERT INTO users (name, password, email, birth_date, balance, role_id)
                VALUES ($1, $2, $3, $4, 0, $5)
                RETURNING user_id, name, password, email, birth_date, balance, role_id
            )
            SELECT i.user_id, i.name, i.password, i.email, i.birth_date, i.balance,
                   r.role_id, r.name AS role_name
            FROM inserted i
            JOIN roles r ON r.role_id = i.role_id
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.password_hash)
        .bind(&new_user.email)
        .bind(new_user.birth_date)
        .bind(new_user.role_id)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_error)?;

        Ok(user_from_row(&row))
    }
}
