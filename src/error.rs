use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use serde::Serialize;

use thiserror::Error;

use crate::admin::AdminError;
use crate::submission::SubmitError;

pub type RestResult<T> = Result<T, RestError>;

/// A required contact field was missing or blank
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// The CAPTCHA service could not produce a verdict
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("Failed to reach verification service")]
    Request(#[from] reqwest::Error),

    #[error("Verification service returned a malformed response")]
    MalformedResponse(#[from] serde_json::Error),
}

/// The contact store failed to complete an operation
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Malformed contact id: {0}")]
    InvalidId(String),

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

/// Errors returned to HTTP callers
///
/// Each variant carries a fixed, generic message. Underlying causes are logged
/// where the conversion happens and never rendered into the response.
#[derive(Debug, Error)]
pub enum RestError {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    InternalError(&'static str),
}

impl From<ValidationError> for RestError {
    fn from(e: ValidationError) -> Self {
        tracing::info!("Rejected contact submission: {}", e);
        Self::BadRequest("Please fill in all fields.")
    }
}

impl From<SubmitError> for RestError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::Rejected => Self::BadRequest("CAPTCHA verification failed."),
            SubmitError::VerificationUnavailable(error) => {
                tracing::error!(error.cause_chain = ?error, "CAPTCHA verification unavailable");
                Self::InternalError("CAPTCHA verification is currently unavailable.")
            }
            SubmitError::PersistFailed(error) => {
                tracing::error!(error.cause_chain = ?error, "Failed to store contact message");
                Self::BadRequest("Failed to send message.")
            }
        }
    }
}

impl From<AdminError> for RestError {
    fn from(e: AdminError) -> Self {
        match e {
            AdminError::Unauthorized => Self::Unauthorized("Unauthorized access"),
            AdminError::NotFound => Self::NotFound("Contact not found"),
            AdminError::Persistence(PersistenceError::InvalidId(id)) => {
                tracing::info!("Malformed contact id: {}", id);
                Self::BadRequest("Invalid contact id")
            }
            AdminError::Persistence(error) => {
                tracing::error!(error.cause_chain = ?error, "Contact store failure");
                Self::InternalError("Server Error")
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    success: bool,
    msg: &'a str,
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let msg = match self {
            Self::BadRequest(msg)
            | Self::Unauthorized(msg)
            | Self::NotFound(msg)
            | Self::InternalError(msg) => msg,
        };

        HttpResponse::build(self.status_code()).json(ErrorBody {
            success: false,
            msg,
        })
    }
}
