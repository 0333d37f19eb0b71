//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unauthorized - missing or invalid credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict - resource already exists or invalid state transition.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Insufficient coins.
    #[error("insufficient coins: balance={balance}, required={required}")]
    InsufficientCoins {
        /// Current balance.
        balance: i64,
        /// Required amount.
        required: i64,
    },

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                self.to_string(),
                None,
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone(), None),
            Self::InsufficientCoins { balance, required } => (
                StatusCode::PAYMENT_REQUIRED,
                "insufficient_coins",
                self.to_string(),
                Some(serde_json::json!({
                    "balance": balance,
                    "required": required
                })),
            ),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<glint_coins_store::StoreError> for ApiError {
    fn from(err: glint_coins_store::StoreError) -> Self {
        use glint_coins_store::StoreError;

        match err {
            StoreError::NotFound { entity, id } => Self::NotFound(format!("{entity} not found: {id}")),
            StoreError::Inactive { entity, id } => {
                Self::BadRequest(format!("{entity} is inactive: {id}"))
            }
            StoreError::InsufficientCoins { balance, required } => {
                Self::InsufficientCoins { balance, required }
            }
            StoreError::InvalidAmount(amount) => {
                Self::BadRequest(format!("invalid amount: {amount}"))
            }
            StoreError::InvalidQuantity(quantity) => {
                Self::BadRequest(format!("invalid quantity: {quantity}"))
            }
            StoreError::SelfExchange => {
                Self::BadRequest("sender and recipient are the same user".into())
            }
            StoreError::AlreadySubscribed { creator, .. } => {
                Self::Conflict(format!("already subscribed to creator {creator}"))
            }
            StoreError::Database(msg) | StoreError::Serialization(msg) => Self::Internal(msg),
        }
    }
}
