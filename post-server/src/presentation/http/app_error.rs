use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::domain::error::{DomainError, INVALID_REQUEST_MESSAGE};

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("malformed json body: {0}")]
    Json(#[from] JsonRejection),

    #[error("malformed query string: {0}")]
    Query(#[from] QueryRejection),

    #[error("malformed path: {0}")]
    Path(#[from] PathRejection),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    pub(crate) code: String,
    pub(crate) message: String,
    pub(crate) validation: BTreeMap<String, String>,
}

impl ErrorResponse {
    pub(crate) fn new(
        status: StatusCode,
        message: impl Into<String>,
        validation: BTreeMap<String, String>,
    ) -> Self {
        Self {
            code: status.as_u16().to_string(),
            message: message.into(),
            validation,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, validation) = match self {
            AppError::Domain(err) => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    error!(error = %err, "request failed");
                } else {
                    debug!(error = %err, "request rejected");
                }
                let message = err.message();
                (status, message, err.into_validation())
            }
            AppError::Validation(errors) => {
                debug!(error = %errors, "request validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    INVALID_REQUEST_MESSAGE,
                    field_messages(&errors),
                )
            }
            AppError::Json(rejection) => {
                debug!(error = %rejection, "json body rejected");
                let status = match rejection.status() {
                    StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, INVALID_REQUEST_MESSAGE, BTreeMap::new())
            }
            AppError::Query(rejection) => {
                debug!(error = %rejection, "query string rejected");
                (StatusCode::BAD_REQUEST, INVALID_REQUEST_MESSAGE, BTreeMap::new())
            }
            AppError::Path(rejection) => {
                debug!(error = %rejection, "path rejected");
                (StatusCode::BAD_REQUEST, INVALID_REQUEST_MESSAGE, BTreeMap::new())
            }
        };

        (status, Json(ErrorResponse::new(status, message, validation))).into_response()
    }
}

fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errors)| {
            errors.first().map(|error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}
