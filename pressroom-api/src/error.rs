use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use pressroom_catalog::{GenerationError, OptionError, TierTableError};
use pressroom_core::CoreError;
use pressroom_order::{OrderError, Rejection};

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    /// Claimed price did not survive server-side recomputation
    PriceRejected(Rejection),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::PriceRejected(reason) => (StatusCode::UNPROCESSABLE_ENTITY, reason.to_string()),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<TierTableError> for AppError {
    fn from(err: TierTableError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<OptionError> for AppError {
    fn from(err: OptionError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<Rejection> for AppError {
    fn from(reason: Rejection) -> Self {
        Self::PriceRejected(reason)
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => Self::NotFoundError(format!("Order not found: {}", id)),
            OrderError::InvalidTransition { .. } => Self::ConflictError(err.to_string()),
            OrderError::PriceRejected(reason) => Self::PriceRejected(reason),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        Self::Anyhow(err.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}
