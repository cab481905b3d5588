//! User model and the authenticated principal derived from it

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::role::{ADMIN_ROLE, Role};

/// User entity
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
    pub balance: f64,
    pub role: Role,
}

/// New user creation payload. Balance always starts at zero.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub password_hash: String,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
    pub role_id: i32,
}

/// Signed-in user as kept in the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub balance: f64,
    pub birth_date: Option<NaiveDate>,
}

impl AuthUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.name.clone(),
            balance: user.balance,
            birth_date: user.birth_date,
        }
    }
}
