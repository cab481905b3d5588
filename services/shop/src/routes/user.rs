//! Account registration

use axum::{Form, extract::State, http::StatusCode};
use serde_json::json;
use tracing::debug;

use crate::{
    dto::RegistrationForm,
    error::{ShopError, ShopResult},
    state::AppState,
    views::{View, ViewName},
};

/// Register and continue to the login page. Invalid forms come back to the
/// registration page with one message per rejected field.
pub async fn registrate(
    State(state): State<AppState>,
    Form(form): Form<RegistrationForm>,
) -> ShopResult<View> {
    match state.user_service.register(&form).await {
        Ok(user) => Ok(View::new(
            ViewName::Login,
            json!({ "registered": user.name }),
        )),
        Err(ShopError::Validation(errors)) => {
            debug!("Registration form rejected: {} errors", errors.len());
            Ok(View::new(
                ViewName::Registration,
                json!({
                    "errors": errors,
                    "form": {
                        "name": form.name,
                        "email": form.email,
                        "birthDate": form.birth_date,
                    },
                }),
            )
            .with_status(StatusCode::UNPROCESSABLE_ENTITY))
        }
        Err(e) => Err(e),
    }
}
