//! Card module errors

use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use kernel::error::kind::ErrorKind;
use rust_decimal::Decimal;
use thiserror::Error;

pub type CardResult<T> = Result<T, CardError>;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("Card not found with id: {0}")]
    CardNotFound(i64),

    #[error("User not found with id: {0}")]
    UserNotFound(i64),

    #[error("{0}")]
    AccessDenied(&'static str),

    /// Transfer rejected by a business rule other than funds
    #[error("{0}")]
    TransferNotAllowed(String),

    #[error("Insufficient funds on card {card_id}. Available: {available}, Required: {required}")]
    InsufficientFunds {
        card_id: i64,
        available: Decimal,
        required: Decimal,
    },

    #[error("{0}")]
    Validation(String),

    #[error("Card number already exists")]
    DuplicateCardNumber,

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CardNotFound(_) | Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::AccessDenied(_) => ErrorKind::Forbidden,
            Self::TransferNotAllowed(_) | Self::InsufficientFunds { .. } => {
                ErrorKind::UnprocessableEntity
            }
            Self::Validation(_) => ErrorKind::BadRequest,
            Self::DuplicateCardNumber => ErrorKind::Conflict,
            Self::Database(_) | Self::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            // Hide internals from clients
            Self::Database(_) | Self::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        if self.kind().is_server_error() {
            tracing::error!(error = ?self, "card operation failed");
        } else {
            tracing::debug!(error = %self, "card operation rejected");
        }
    }
}

impl IntoResponse for CardError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
