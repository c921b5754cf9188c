//! Unified error handling with Sentry integration.
//!
//! Every route handler returns `Result<T, AppError>`. Errors render as a JSON
//! body `{"error": "..."}`; server-side failures are captured to Sentry first
//! and their details are not sent to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::auth::AuthError;
use crate::services::catalog::CatalogError;
use crate::services::chat::ChatError;
use crate::services::checkout::CheckoutError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog lookup or loading failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Sign-in, sign-up or sign-out failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The order was rejected.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Chat(#[from] ChatError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::ProductNotFound(_) | CatalogError::OrderNotFound(_))
            | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Catalog(_) | Self::Auth(AuthError::Storage(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Chat(ChatError::NoAgentOnline) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Auth(_) | Self::Checkout(_) | Self::Chat(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context after sign-in.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context on sign-out.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}
