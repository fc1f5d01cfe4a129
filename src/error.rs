//! Error handling for the application

use std::any::Any;

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pricing::responses::ErrorResponse;
use crate::pricing::PricingError;
use crate::venue::UpstreamError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Not Found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Pricing(PricingError::DistanceExceeded { .. })
            | AppError::Pricing(PricingError::InvalidValue { .. }) => StatusCode::BAD_REQUEST,
            AppError::Pricing(PricingError::NoDistanceRanges) | AppError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            // Business-rule rejections share the code of plain HTTP errors
            AppError::Pricing(PricingError::DistanceExceeded { .. }) | AppError::NotFound => {
                "HTTP_ERROR"
            }
            AppError::Pricing(PricingError::InvalidValue { .. }) => "TYPE_ERROR",
            AppError::Pricing(PricingError::NoDistanceRanges) | AppError::Upstream(_) => {
                "UPSTREAM_ERROR"
            }
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("{}: {}", self.error_code(), self);
        } else {
            tracing::debug!("{}: {}", self.error_code(), self);
        }

        let body = ErrorResponse::new(self.error_code(), self.to_string());
        (status, Json(body)).into_response()
    }
}

/// Turn a handler panic into the standard internal error response
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(detail).into_response()
}

pub type Result<T> = std::result::Result<T, AppError>;
