use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use log::error;
use serde_json::json;
use thiserror::Error;

use crate::database::StoreError;

/// Errors surfaced to API callers. The message is the exact text clients see.
#[derive(Debug, Error)]
pub enum CustomError {
    #[error("{0}")]
    BadRequestError(String),

    #[error("{0}")]
    UnauthorizedError(String),

    #[error("{0}")]
    ForbiddenError(String),

    #[error("{0}")]
    NotFoundError(String),

    #[error("{0}")]
    PreconditionFailedError(String),

    #[error("{0}")]
    InternalServerError(String),

    /// Same status and text as the wrapped error, reported under `message`
    #[error("{0}")]
    Notice(Box<CustomError>),
}

impl CustomError {
    /// Build a closure that logs a persistence failure and hides it behind a generic 400
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> CustomError {
        move |e| {
            error!("{message} ({e})");
            CustomError::BadRequestError(message.to_string())
        }
    }

    /// Like [`CustomError::store`], with the text under `message`
    pub fn store_notice(message: &'static str) -> impl FnOnce(StoreError) -> CustomError {
        move |e| CustomError::store(message)(e).notice()
    }

    /// Report this error's text under the `message` key
    pub fn notice(self) -> Self {
        match self {
            CustomError::Notice(_) => self,
            other => CustomError::Notice(Box::new(other)),
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            CustomError::Notice(_) => "message",
            _ => "errorMessage",
        }
    }
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match self {
            CustomError::Notice(inner) => inner.status_code(),
            CustomError::BadRequestError(..) => StatusCode::BAD_REQUEST,
            CustomError::UnauthorizedError(..) => StatusCode::UNAUTHORIZED,
            CustomError::ForbiddenError(..) => StatusCode::FORBIDDEN,
            CustomError::NotFoundError(..) => StatusCode::NOT_FOUND,
            CustomError::PreconditionFailedError(..) => StatusCode::PRECONDITION_FAILED,
            CustomError::InternalServerError(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut error_message = json!({
            "success": false,
            "httpStatusCode": self.status_code().as_u16(),
        });
        error_message[self.message_key()] = json!(self.to_string());

        HttpResponse::build(self.status_code()).json(error_message)
    }
}
