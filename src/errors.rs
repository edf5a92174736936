use http::StatusCode;
use thiserror::Error;
use worker::{Error as WorkerError, Response};

use crate::models::ErrorBody;

pub type AppResult<T> = std::result::Result<T, AppError>;

/// Failures surfaced by the API handlers.
///
/// Every variant maps to a status code and a JSON [`ErrorBody`]; none of them
/// is allowed to escape to the worker runtime.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),
    #[error("Unauthorized. Please provide a valid API key or log in.")]
    Unauthorized,
    #[error("No file uploaded")]
    NoFileUploaded,
    #[error("R2 public URL not configured")]
    PublicUrlNotConfigured,
    #[error("Storage error: {message}")]
    Storage { message: String },
    #[error("Internal error: {message}")]
    Unexpected { message: String },
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Not Found")]
    NotFound,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NoFileUploaded => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::PublicUrlNotConfigured
            | AppError::Storage { .. }
            | AppError::Unexpected { .. }
            | AppError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body returned to the client.
    ///
    /// Storage and unexpected failures share the `Internal Server Error` label
    /// and carry the underlying description in `details`.
    pub fn to_body(&self) -> ErrorBody {
        match self {
            AppError::Storage { message } | AppError::Unexpected { message } => {
                ErrorBody::with_details("Internal Server Error", message.clone())
            }
            AppError::Worker(e) => ErrorBody::with_details("Internal Server Error", e.to_string()),
            other => ErrorBody::new(other.to_string()),
        }
    }

    pub fn to_response(&self) -> worker::Result<Response> {
        Ok(Response::from_json(&self.to_body())?.with_status(self.status_code().as_u16()))
    }
}
