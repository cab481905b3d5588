//! Registration, lookup and credential checks

use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    dto::RegistrationForm,
    error::{ShopError, ShopResult},
    models::{AuthUser, NewUser, USER_ROLE, User},
    repositories::{RoleRepository, UserRepository},
    security::PasswordEncoder,
    validation::validate_registration,
};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    encoder: PasswordEncoder,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        encoder: PasswordEncoder,
    ) -> Self {
        Self {
            users,
            roles,
            encoder,
        }
    }

    pub async fn find_all(&self) -> ShopResult<Vec<User>> {
        Ok(self.users.find_all().await?)
    }

    /// Create a customer account with the USER role and a zero balance
    pub async fn register(&self, form: &RegistrationForm) -> ShopResult<User> {
        let registration = validate_registration(form).map_err(ShopError::Validation)?;

        let role = self
            .roles
            .find_by_name(USER_ROLE)
            .await?
            .ok_or_else(|| ShopError::Internal(anyhow::anyhow!("Role {} is missing", USER_ROLE)))?;

        if self.users.exists_by_email(&registration.email).await? {
            warn!("Registration with taken email: {}", registration.email);
            return Err(ShopError::AlreadyExists(format!(
                "User with email {}",
                registration.email
            )));
        }

        let password_hash = self.encoder.encode(&registration.password)?;

        // name and password carry unique constraints too; their violations
        // come back from the repository as AlreadyExists
        let user = self
            .users
            .create(&NewUser {
                name: registration.name,
                password_hash,
                email: registration.email,
                birth_date: registration.birth_date,
                role_id: role.id,
            })
            .await?;

        info!("Registered user {} ({})", user.name, user.id);
        Ok(user)
    }

    pub async fn load_by_username(&self, name: &str) -> ShopResult<AuthUser> {
        self.users
            .find_by_name(name)
            .await?
            .map(|user| AuthUser::from(&user))
            .ok_or_else(|| ShopError::NotFound(format!("User {}", name)))
    }

    pub async fn load_by_id(&self, id: i32) -> ShopResult<Option<AuthUser>> {
        Ok(self
            .users
            .find_by_id(id)
            .await?
            .map(|user| AuthUser::from(&user)))
    }

    /// Check a name/password pair. Unknown names and wrong passwords fail alike.
    pub async fn authenticate(&self, name: &str, password: &str) -> ShopResult<AuthUser> {
        let Some(user) = self.users.find_by_name(name.trim()).await? else {
            warn!("Login attempt for unknown user: {}", name);
            return Err(ShopError::Unauthorized);
        };

        if !self.encoder.matches(password, &user.password_hash)? {
            warn!("Wrong password for user: {}", name);
            return Err(ShopError::Unauthorized);
        }

        info!("User {} signed in", user.name);
        Ok(AuthUser::from(&user))
    }
}
