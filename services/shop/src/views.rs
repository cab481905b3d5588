//! View documents returned by page handlers
//!
//! Every page answers with `{"view": <name>, "model": {...}}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Names of the pages the front end knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewName {
    Home,
    Category,
    Login,
    Registration,
    Product,
    Profile,
    Cart,
    OrderHistory,
    Order,
    Admin,
    Error,
}

/// A view name plus the model it is rendered with
#[derive(Debug, Clone)]
pub struct View {
    status: StatusCode,
    name: ViewName,
    model: Value,
}

impl View {
    pub fn new(name: ViewName, model: Value) -> Self {
        Self {
            status: StatusCode::OK,
            name,
            model,
        }
    }

    /// A view without model data
    pub fn page(name: ViewName) -> Self {
        Self::new(name, json!({}))
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "view": self.name,
            "model": self.model,
        }));

        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_names_render_in_snake_case() {
        assert_eq!(
            serde_json::to_value(ViewName::OrderHistory).unwrap(),
            json!("order_history")
        );
        assert_eq!(serde_json::to_value(ViewName::Home).unwrap(), json!("home"));
    }

    #[test]
    fn status_defaults_to_ok() {
        let response = View::page(ViewName::Login).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = View::page(ViewName::Error)
            .with_status(StatusCode::NOT_FOUND)
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
