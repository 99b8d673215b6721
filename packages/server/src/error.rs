use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `STATE_CONFLICT`,
    /// `EMAIL_TAKEN`, `TOKEN_MISSING`, `TOKEN_INVALID`, `INVALID_CREDENTIALS`,
    /// `ACCESS_DENIED`, `NOT_FOUND`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "foodName is required")]
    pub message: String,
}

/// Application-level error type.
///
/// State conflicts and taken emails map to 400 rather than 409: the HTTP
/// contract only uses 400/401/403/404 on failure, and clients key off the
/// `code` field to tell the cases apart.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    /// A guarded transition's precondition did not hold -- already reserved,
    /// not in the expected status, or not the caller's reservation. Callers
    /// cannot distinguish a lost race from stale state without re-reading.
    StateConflict(String),
    EmailTaken,
    TokenMissing,
    TokenInvalid,
    InvalidCredentials,
    AccessDenied,
    NotFound(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::StateConflict(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "STATE_CONFLICT",
                    message: msg,
                },
            ),
            AppError::EmailTaken => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "EMAIL_TAKEN",
                    message: "User already exists".into(),
                },
            ),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "TOKEN_MISSING",
                    message: "Authentication required".into(),
                },
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "TOKEN_INVALID",
                    message: "Invalid or expired token".into(),
                },
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "INVALID_CREDENTIALS",
                    message: "Invalid credentials".into(),
                },
            ),
            AppError::AccessDenied => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    code: "ACCESS_DENIED",
                    message: "Access denied".into(),
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}
