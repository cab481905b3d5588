//! HTTP session state
//!
//! The session context (cart and signed-in user) is stored in Redis under
//! `session:<uuid>`. The UUID travels in the session cookie.

use anyhow::Result;
use async_trait::async_trait;
use common::cache::RedisPool;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{AuthUser, Cart};

/// Everything remembered about a visitor between requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default)]
    pub cart: Cart,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

/// Session of the current request, handed to handlers through request extensions
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSession {
    pub id: Uuid,
    pub context: SessionContext,
}

impl CurrentSession {
    /// A fresh, anonymous session
    pub fn new() -> Self {
        Self::with_context(SessionContext::default())
    }

    /// A session under a fresh ID holding `context`
    pub fn with_context(context: SessionContext) -> Self {
        Self {
            id: Uuid::new_v4(),
            context,
        }
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.context.user.as_ref()
    }
}

impl Default for CurrentSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage for session contexts
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: Uuid) -> Result<Option<SessionContext>>;
    async fn save(&self, session: &CurrentSession) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

fn session_key(id: Uuid) -> String {
    format!("session:{}", id)
}

/// Session store backed by Redis. Every load pushes the expiry back.
#[derive(Clone)]
pub struct RedisSessionStore {
    redis_pool: RedisPool,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    pub fn new(redis_pool: RedisPool, ttl_seconds: u64) -> Self {
        Self {
            redis_pool,
            ttl_seconds,
        }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<SessionContext>> {
        let key = session_key(id);
        let Some(raw) = self.redis_pool.get(&key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(context) => {
                self.redis_pool.touch(&key, self.ttl_seconds).await?;
                Ok(Some(context))
            }
            Err(e) => {
                warn!("Discarding unreadable session {}: {}", id, e);
                self.redis_pool.delete(&key).await?;
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &CurrentSession) -> Result<()> {
        let raw = serde_json::to_string(&session.context)?;
        self.redis_pool
            .set(&session_key(session.id), &raw, Some(self.ttl_seconds))
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        info!("Deleting session: {}", id);
        self.redis_pool.delete(&session_key(id)).await
    }
}
