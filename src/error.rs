use crate::models::ErrorResponse;
use crate::services::{AuthError, PostgresError, StorageError};
use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Application-level error taxonomy
///
/// Every error is terminal for its request; nothing here is retried.
/// `Authorization` deliberately does not produce a JSON body: a missing or
/// forged session redirects home with a generic notice, the same response
/// for every authorization failure.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("username or email already taken")]
    DuplicateUser,

    #[error("invalid username or password")]
    Authentication,

    #[error("access unauthorized")]
    Authorization,

    #[error("{0} not found")]
    NotFound(String),

    #[error("image upload failed: {0}")]
    Upload(#[from] StorageError),

    #[error("session backend error: {0}")]
    Session(#[from] AuthError),

    #[error("database error: {0}")]
    Database(#[from] PostgresError),
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_failed",
            AppError::DuplicateUser => "duplicate_user",
            AppError::Authentication => "authentication_failed",
            AppError::Authorization => "access_unauthorized",
            AppError::NotFound(_) => "not_found",
            AppError::Upload(_) => "upload_failed",
            AppError::Session(_) => "session_error",
            AppError::Database(_) => "database_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateUser => StatusCode::CONFLICT,
            AppError::Authentication => StatusCode::UNAUTHORIZED,
            AppError::Authorization => StatusCode::SEE_OTHER,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upload(_) | AppError::Session(_) | AppError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self, AppError::Authorization) {
            return HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/?notice=Access+unauthorized"))
                .finish();
        }

        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

impl From<crate::core::SelectorError> for AppError {
    fn from(err: crate::core::SelectorError) -> Self {
        AppError::Validation(err.to_string())
    }
}
