//! HTTP error type shared by all handlers.
//!
//! Every failure leaves the service as a JSON body `{"error": "..."}`;
//! validation failures also name the offending `field`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::ledger::LedgerError;
use crate::store::StoreError;

pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Insufficient funds")]
    pub error: String,
    /// Request field that failed validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "amount")]
    pub field: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            field: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    InvalidOperation(#[from] LedgerError),
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("Database error")]
    Database(#[source] sqlx::Error),
}

impl ApiError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ApiError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidOperation(_) | ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::WalletNotFound(_) | StoreError::TransactionNotFound { .. } => {
                ApiError::NotFound(err.to_string())
            }
            StoreError::Ledger(e) => ApiError::InvalidOperation(e),
            StoreError::Database(e) => ApiError::Database(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation("body", rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation("path", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation { field, message } => ErrorBody {
                error: message.clone(),
                field: Some((*field).to_string()),
            },
            ApiError::Database(e) => {
                // Driver details stay in the log.
                tracing::error!("Database error: {:?}", e);
                ErrorBody::new("Database error")
            }
            other => ErrorBody::new(other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}
