//! Unified error handling with Sentry capture.
//!
//! Provides a unified `ApiError` type that maps domain errors onto HTTP
//! responses. Validation failures are reported the way form-aware clients
//! expect: a 400 whose JSON body keys the message list by field name, e.g.
//! `{"cart_id": ["..."]}`. Server errors are captured to Sentry before
//! responding. All route handlers return `Result<T, ApiError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use oxcart_store::services::carts::CartError;
use oxcart_store::services::checkout::CheckoutError;
use oxcart_store::services::orders::OrderAccessError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No caller identity present.
    #[error("authentication required")]
    Unauthenticated,

    /// Field-level validation failure.
    #[error("validation failed on {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(&'static str),

    /// Authenticated caller lacks permission for this resource.
    #[error("permission denied")]
    Forbidden,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::InvalidCart => Self::Validation {
                field: "cart_id",
                message: "No cart with the given ID was found or the cart is empty.".to_owned(),
            },
            CheckoutError::Repository(inner) => Self::Internal(inner.to_string()),
        }
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::UnknownCart => Self::NotFound("cart"),
            CartError::UnknownItem => Self::NotFound("cart item"),
            CartError::UnknownProduct => Self::Validation {
                field: "product_id",
                message: "No product with the given ID was found.".to_owned(),
            },
            CartError::InvalidQuantity => Self::Validation {
                field: "quantity",
                message: "Quantity must be a positive integer.".to_owned(),
            },
            CartError::Repository(inner) => Self::Internal(inner.to_string()),
        }
    }
}

impl From<OrderAccessError> for ApiError {
    fn from(err: OrderAccessError) -> Self {
        match err {
            OrderAccessError::NotFound => Self::NotFound("order"),
            OrderAccessError::Forbidden => Self::Forbidden,
            OrderAccessError::Repository(inner) => Self::Internal(inner.to_string()),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self) -> Value {
        match self {
            Self::Validation { field, message } => {
                let mut errors = serde_json::Map::new();
                errors.insert(field.to_owned(), json!([message]));
                Value::Object(errors)
            }
            Self::Unauthenticated => {
                json!({ "detail": "Authentication credentials were not provided." })
            }
            Self::Forbidden => {
                json!({ "detail": "You do not have permission to perform this action." })
            }
            Self::NotFound(what) => json!({ "detail": format!("No {what} matches the given query.") }),
            // Don't expose internal error details to clients
            Self::Internal(_) => json!({ "detail": "Internal server error" }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();
        (status, Json(self.body())).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(get_status(ApiError::Unauthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(
            get_status(ApiError::Validation {
                field: "cart_id",
                message: "bad".to_owned()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(get_status(ApiError::NotFound("order")), StatusCode::NOT_FOUND);
        assert_eq!(get_status(ApiError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            get_status(ApiError::Internal("boom".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_errors_key_messages_by_field() {
        let err = ApiError::Validation {
            field: "cart_id",
            message: "required".to_owned(),
        };
        assert_eq!(err.body(), json!({ "cart_id": ["required"] }));
    }

    #[test]
    fn missing_and_empty_carts_share_one_error_shape() {
        let missing = ApiError::from(CheckoutError::InvalidCart);
        let empty = ApiError::from(CheckoutError::InvalidCart);
        assert_eq!(missing.body(), empty.body());
    }
}
