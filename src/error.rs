//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every handler returns `Result<_, AppError>`, so each failure is converted into one of
//! a small set of categories at the request boundary:
//!
//! * validation and conflict failures become `400 Bad Request`,
//! * token failures become `401 Unauthorized`,
//! * missing or foreign resources become `404 Not Found`,
//! * everything else becomes a generic `500` whose detail is only logged.
//!
//! `From` implementations for the crate's collaborators (`validator`, `bcrypt`, the
//! store layer and actix's blocking pool) allow plain `?` in handlers.

use actix_web::{
    error::{BlockingError, JsonPayloadError, ResponseError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::auth::token::TokenError;
use crate::store::StoreError;

/// Message returned to clients for every server-side failure.
pub const GENERIC_SERVER_ERROR: &str = "Server error";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// The bearer token was missing or failed verification (HTTP 401).
    Unauthorized(TokenError),
    /// Malformed request or a conflicting write such as a duplicate email (HTTP 400).
    BadRequest(String),
    /// The resource does not exist or belongs to another user (HTTP 404).
    NotFound(String),
    /// Unexpected server-side failure (HTTP 500). The message is logged, never sent.
    InternalServerError(String),
    /// Failure reported by the store (HTTP 500). The message is logged, never sent.
    DatabaseError(String),
    /// Input failed `validator` rules (HTTP 400).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(kind) => write!(f, "Unauthorized: {}", kind),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Unauthorized(kind) => kind.message().to_string(),
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::ValidationError(msg) => {
                msg.clone()
            }
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                log::error!("{}", self);
                GENERIC_SERVER_ERROR.to_string()
            }
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        AppError::Unauthorized(error)
    }
}

/// Store conflicts surface as 400s; every other store failure is a 500.
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        match error {
            StoreError::Conflict(msg) => AppError::BadRequest(msg),
            StoreError::Backend(msg) => AppError::DatabaseError(msg),
        }
    }
}

impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::InternalServerError(format!("blocking task failed: {}", error))
    }
}

/// `JsonConfig` error handler so that undecodable bodies (missing required fields,
/// wrong types, unknown categories) answer with the same JSON error shape as
/// every other 400.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid request body: {}", err)).into()
}
