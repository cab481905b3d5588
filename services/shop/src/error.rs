//! Custom error types for the shop service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::{
    repositories::ConstraintViolation,
    views::{View, ViewName},
};

/// A rejected form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Custom error type for the shop service
#[derive(Error, Debug)]
pub enum ShopError {
    /// One or more form fields are invalid
    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    /// No signed-in user, or bad credentials
    #[error("Unauthorized")]
    Unauthorized,

    /// Signed in, but not allowed
    #[error("Forbidden")]
    Forbidden,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(anyhow::Error),
}

impl ShopError {
    pub fn status(&self) -> StatusCode {
        match self {
            ShopError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ShopError::NotFound(_) => StatusCode::NOT_FOUND,
            ShopError::AlreadyExists(_) => StatusCode::CONFLICT,
            ShopError::Unauthorized => StatusCode::UNAUTHORIZED,
            ShopError::Forbidden => StatusCode::FORBIDDEN,
            ShopError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ShopError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Repository errors arrive as `anyhow::Error`. Constraint violations keep
/// their meaning; everything else is internal.
impl From<anyhow::Error> for ShopError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ConstraintViolation>() {
            Ok(ConstraintViolation::Unique(what)) => ShopError::AlreadyExists(what),
            Ok(ConstraintViolation::ForeignKey(what)) => ShopError::NotFound(what),
            Err(err) => ShopError::Internal(err),
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        if let ShopError::Unauthorized = self {
            warn!("Unauthenticated request, redirecting to login");
            return Redirect::to("/login").into_response();
        }

        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {:?}", self);
        } else {
            warn!("Request rejected: {}", self);
        }

        let model = match self {
            ShopError::Validation(errors) => json!({
                "status": status.as_u16(),
                "message": "Validation failed",
                "errors": errors,
            }),
            ShopError::Internal(_) => json!({
                "status": status.as_u16(),
                "message": "Internal server error",
            }),
            other => json!({
                "status": status.as_u16(),
                "message": other.to_string(),
            }),
        };

        View::new(ViewName::Error, model)
            .with_status(status)
            .into_response()
    }
}

/// Type alias for shop results
pub type ShopResult<T> = Result<T, ShopError>;
